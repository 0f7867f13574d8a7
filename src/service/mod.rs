//! Service layer: the shared holiday store and the queries over it.

pub mod holiday_store;
pub mod query;

pub use holiday_store::{HolidayStore, MutationOutcome};
pub use query::{HolidayCheck, UpcomingHoliday, UpcomingReport};
