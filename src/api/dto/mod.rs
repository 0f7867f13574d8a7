//! Data Transfer Objects for REST request/response serialization.
//!
//! Wire field names are Spanish (`anio`, `fecha`, `nombre`, ...) to stay
//! compatible with existing clients of the holiday API.

pub mod admin_dto;
pub mod holiday_dto;

pub use admin_dto::*;
pub use holiday_dto::*;
