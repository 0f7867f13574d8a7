//! Sorted, duplicate-free list of holidays for one year.

use serde::{Deserialize, Serialize};

use super::HolidayRecord;
use crate::error::ServiceError;

/// The holidays of a single calendar year.
///
/// Kept sorted ascending by date after every mutation, with at most one
/// record per date. Serializes as a plain JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct YearLedger {
    records: Vec<HolidayRecord>,
}

impl YearLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the records in date order.
    #[must_use]
    pub fn records(&self) -> &[HolidayRecord] {
        &self.records
    }

    /// Consumes the ledger, returning its records in date order.
    #[must_use]
    pub fn into_records(self) -> Vec<HolidayRecord> {
        self.records
    }

    /// Returns the number of holidays in the ledger.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the ledger holds no holidays.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Finds the record on `date` (`YYYY-MM-DD`).
    #[must_use]
    pub fn find(&self, date: &str) -> Option<&HolidayRecord> {
        self.records.iter().find(|r| r.date == date)
    }

    /// Inserts a record and restores date order.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DuplicateDate`] if a record already exists on
    /// the same date; the ledger is left untouched.
    pub fn insert(&mut self, record: HolidayRecord) -> Result<(), ServiceError> {
        if self.find(&record.date).is_some() {
            return Err(ServiceError::DuplicateDate(record.date));
        }
        self.records.push(record);
        self.sort();
        Ok(())
    }

    /// Removes and returns the record on `date`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::DateNotFound`] if no record matches.
    pub fn remove(&mut self, date: &str) -> Result<HolidayRecord, ServiceError> {
        let pos = self
            .records
            .iter()
            .position(|r| r.date == date)
            .ok_or_else(|| ServiceError::DateNotFound(date.to_string()))?;
        Ok(self.records.remove(pos))
    }

    /// Sorts records ascending by date text.
    pub fn sort(&mut self) {
        self.records.sort_by(|a, b| a.date.cmp(&b.date));
    }

    /// Returns `true` if records are in strictly ascending date order.
    #[must_use]
    pub fn is_sorted_unique(&self) -> bool {
        self.records.windows(2).all(|w| match w {
            [a, b] => a.date < b.date,
            _ => true,
        })
    }
}

impl From<Vec<HolidayRecord>> for YearLedger {
    fn from(records: Vec<HolidayRecord>) -> Self {
        let mut ledger = Self { records };
        ledger.sort();
        ledger
    }
}
