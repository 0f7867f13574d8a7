//! # feriados-api
//!
//! HTTP service for Argentine stock-market holidays, backed by a single JSON
//! document.
//!
//! Clients can list holidays by year, check whether a date is a holiday,
//! and ask for the next holidays with the days remaining until each. Callers
//! holding the shared API key can add and remove holidays. Every mutation is
//! written back to the document before it returns.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers + X-API-Key middleware (api/)
//!     │
//!     ├── HolidayStore, queries (service/)
//!     │
//!     ├── HolidayCalendar, YearLedger, date rules (domain/)
//!     │
//!     └── JSON document (persistence/)
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
