//! Domain layer: holiday records, ledgers, the calendar mapping, date
//! validation, the clock and shared-secret authorization.
//!
//! Everything here is synchronous and free of I/O; locking and persistence
//! live in [`crate::service`] and [`crate::persistence`].

pub mod access;
pub mod calendar;
pub mod clock;
pub mod dates;
pub mod holiday;
pub mod ledger;

pub use calendar::{DateLookup, HolidayCalendar, RecordAnomaly};
pub use clock::{Clock, FixedClock, SystemClock};
pub use holiday::HolidayRecord;
pub use ledger::YearLedger;
