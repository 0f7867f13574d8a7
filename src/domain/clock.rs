//! Source of "today" for year-window checks and the upcoming query.

use std::fmt::Debug;

use chrono::{Local, NaiveDate};

/// Supplies the current civil date.
///
/// Injected through the application state so tests can pin the date.
pub trait Clock: Debug + Send + Sync {
    /// Returns today's date.
    fn today(&self) -> NaiveDate;
}

/// Wall-clock time in the server's local timezone.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// A clock frozen on one date.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}
