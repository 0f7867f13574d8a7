//! The year → ledger mapping and its mutation rules.
//!
//! [`HolidayCalendar`] is the plain data structure behind the store: it
//! enforces the year-consistency and duplicate rules but knows nothing of
//! locking or persistence.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dates::DATE_FORMAT;
use super::{HolidayRecord, YearLedger};
use crate::error::ServiceError;

/// Outcome of looking up a single date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateLookup {
    /// The date is a holiday.
    Holiday(HolidayRecord),
    /// The year has data but this date is not in it.
    NotHoliday,
    /// There is no ledger at all for the date's year.
    NoDataForYear,
}

/// A stored record that broke the calendar invariants at load time.
///
/// [`HolidayCalendar::repair`] fixes what it can: misfiled records move to
/// the ledger of their real year and repeated dates are dropped. Records
/// with a malformed date are kept untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordAnomaly {
    /// The date text is not a valid `YYYY-MM-DD` date. Kept.
    MalformedDate {
        /// Ledger key holding the record.
        year: i32,
        /// Offending date text.
        date: String,
    },
    /// The date belonged to another year and was moved there.
    Misfiled {
        /// Ledger key the record was found under.
        from: i32,
        /// Year of the date, where the record now lives.
        to: i32,
        /// Date of the moved record.
        date: String,
    },
    /// A second record on an already-filled date. Dropped.
    DuplicateDate {
        /// Ledger that already held the date.
        year: i32,
        /// Repeated date text.
        date: String,
        /// Name of the dropped record.
        dropped: String,
    },
}

impl RecordAnomaly {
    /// Whether repairing this anomaly changed the calendar contents.
    #[must_use]
    pub const fn rewrites_document(&self) -> bool {
        !matches!(self, Self::MalformedDate { .. })
    }
}

impl fmt::Display for RecordAnomaly {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedDate { year, date } => {
                write!(f, "year {year}: malformed date {date:?} kept as is")
            }
            Self::Misfiled { from, to, date } => {
                write!(f, "year {from}: date {date} moved to year {to}")
            }
            Self::DuplicateDate {
                year,
                date,
                dropped,
            } => {
                write!(f, "year {year}: dropped duplicate {dropped:?} on {date}")
            }
        }
    }
}

/// Mapping from year to that year's [`YearLedger`].
///
/// Serializes as a JSON object keyed by the year as a decimal string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolidayCalendar {
    years: BTreeMap<i32, YearLedger>,
}

impl HolidayCalendar {
    /// Creates an empty calendar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns every year with its ledger, in ascending year order.
    #[must_use]
    pub fn years(&self) -> &BTreeMap<i32, YearLedger> {
        &self.years
    }

    /// Returns the ledger for `year`, if any.
    #[must_use]
    pub fn get(&self, year: i32) -> Option<&YearLedger> {
        self.years.get(&year)
    }

    /// Number of year keys.
    #[must_use]
    pub fn year_count(&self) -> usize {
        self.years.len()
    }

    /// Total number of holidays across all years.
    #[must_use]
    pub fn holiday_count(&self) -> usize {
        self.years.values().map(YearLedger::len).sum()
    }

    /// Looks up `date` in the ledger of its year.
    #[must_use]
    pub fn lookup(&self, date: NaiveDate) -> DateLookup {
        let Some(ledger) = self.years.get(&date.year()) else {
            return DateLookup::NoDataForYear;
        };
        let key = date.format(DATE_FORMAT).to_string();
        match ledger.find(&key) {
            Some(record) => DateLookup::Holiday(record.clone()),
            None => DateLookup::NotHoliday,
        }
    }

    /// Adds a holiday to `year`, creating the ledger if needed.
    ///
    /// Returns the inserted record and the new ledger length.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::YearMismatch`] if `date` is not in `year`.
    /// - [`ServiceError::DuplicateDate`] if the ledger already holds `date`.
    ///
    /// On error the calendar is unchanged.
    pub fn add(
        &mut self,
        year: i32,
        date: NaiveDate,
        name: &str,
    ) -> Result<(HolidayRecord, usize), ServiceError> {
        let record = HolidayRecord::new(date, name);
        if date.year() != year {
            return Err(ServiceError::YearMismatch {
                year,
                date: record.date,
            });
        }
        let ledger = self.years.entry(year).or_default();
        if let Err(err) = ledger.insert(record.clone()) {
            if ledger.is_empty() {
                self.years.remove(&year);
            }
            return Err(err);
        }
        Ok((record, ledger.len()))
    }

    /// Removes the holiday on `date` from `year`.
    ///
    /// Returns the removed record and the remaining ledger length. An
    /// emptied ledger keeps its year key.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::YearNotFound`] if `year` has no ledger.
    /// - [`ServiceError::DateNotFound`] if the ledger has no such date.
    pub fn remove(
        &mut self,
        year: i32,
        date: NaiveDate,
    ) -> Result<(HolidayRecord, usize), ServiceError> {
        let ledger = self
            .years
            .get_mut(&year)
            .ok_or(ServiceError::YearNotFound(year))?;
        let removed = ledger.remove(&date.format(DATE_FORMAT).to_string())?;
        Ok((removed, ledger.len()))
    }

    /// Restores the ledger invariants on a freshly loaded calendar.
    ///
    /// Records filed under the wrong year move to the ledger of their date's
    /// year. When a date appears twice in one ledger, the first record in
    /// document order wins. Every ledger ends up sorted. A ledger emptied by
    /// moving its records keeps its key.
    pub fn repair(&mut self) -> Vec<RecordAnomaly> {
        let mut anomalies = Vec::new();
        let mut misfiled = Vec::new();

        for (&year, ledger) in &mut self.years {
            let mut kept: Vec<HolidayRecord> = Vec::with_capacity(ledger.len());
            for record in std::mem::take(ledger).into_records() {
                match record.year() {
                    Some(actual) if actual != year => {
                        misfiled.push((year, actual, record));
                        continue;
                    }
                    Some(_) => {}
                    None => anomalies.push(RecordAnomaly::MalformedDate {
                        year,
                        date: record.date.clone(),
                    }),
                }
                if kept.iter().any(|r| r.date == record.date) {
                    anomalies.push(RecordAnomaly::DuplicateDate {
                        year,
                        date: record.date,
                        dropped: record.name,
                    });
                } else {
                    kept.push(record);
                }
            }
            *ledger = YearLedger::from(kept);
        }

        for (from, to, record) in misfiled {
            let ledger = self.years.entry(to).or_default();
            if ledger.find(&record.date).is_some() {
                anomalies.push(RecordAnomaly::DuplicateDate {
                    year: to,
                    date: record.date,
                    dropped: record.name,
                });
                continue;
            }
            let date = record.date.clone();
            if ledger.insert(record).is_ok() {
                anomalies.push(RecordAnomaly::Misfiled { from, to, date });
            }
        }
        anomalies
    }
}

impl From<BTreeMap<i32, YearLedger>> for HolidayCalendar {
    fn from(years: BTreeMap<i32, YearLedger>) -> Self {
        Self { years }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    fn date(text: &str) -> NaiveDate {
        let Ok(d) = super::super::dates::parse(text) else {
            panic!("invalid test date {text}");
        };
        d
    }

    #[test]
    fn add_lookup_remove_scenario() {
        let mut calendar = HolidayCalendar::new();

        let added = calendar.add(2025, date("2025-01-01"), "Año Nuevo");
        let Ok((record, len)) = added else {
            panic!("first add should succeed");
        };
        assert_eq!(record.name, "Año Nuevo");
        assert_eq!(len, 1);

        let dup = calendar.add(2025, date("2025-01-01"), "X");
        assert!(matches!(dup, Err(ServiceError::DuplicateDate(_))));

        let DateLookup::Holiday(found) = calendar.lookup(date("2025-01-01")) else {
            panic!("expected a holiday");
        };
        assert_eq!(found.name, "Año Nuevo");

        let Ok((removed, remaining)) = calendar.remove(2025, date("2025-01-01")) else {
            panic!("remove should succeed");
        };
        assert_eq!(removed.name, "Año Nuevo");
        assert_eq!(remaining, 0);

        assert_eq!(calendar.lookup(date("2025-01-01")), DateLookup::NotHoliday);
    }

    #[test]
    fn add_rejects_year_mismatch() {
        let mut calendar = HolidayCalendar::new();
        let result = calendar.add(2024, date("2025-01-01"), "Año Nuevo");
        assert!(matches!(result, Err(ServiceError::YearMismatch { year: 2024, .. })));
        assert_eq!(calendar.year_count(), 0);
    }

    #[test]
    fn duplicate_leaves_calendar_unchanged() {
        let mut calendar = HolidayCalendar::new();
        let _ = calendar.add(2025, date("2025-05-01"), "Trabajador");
        let before = calendar.clone();
        let _ = calendar.add(2025, date("2025-05-01"), "Otro");
        assert_eq!(calendar, before);
    }

    #[test]
    fn lookup_distinguishes_missing_year() {
        let mut calendar = HolidayCalendar::new();
        let _ = calendar.add(2025, date("2025-05-01"), "Trabajador");
        assert_eq!(calendar.lookup(date("2026-05-01")), DateLookup::NoDataForYear);
        assert_eq!(calendar.lookup(date("2025-05-02")), DateLookup::NotHoliday);
    }

    #[test]
    fn remove_reports_missing_year_and_date() {
        let mut calendar = HolidayCalendar::new();
        assert!(matches!(
            calendar.remove(2025, date("2025-01-01")),
            Err(ServiceError::YearNotFound(2025))
        ));
        let _ = calendar.add(2025, date("2025-05-01"), "Trabajador");
        assert!(matches!(
            calendar.remove(2025, date("2025-01-01")),
            Err(ServiceError::DateNotFound(_))
        ));
    }

    #[test]
    fn ledgers_stay_sorted() {
        let mut calendar = HolidayCalendar::new();
        for d in ["2025-12-08", "2025-02-03", "2025-10-12", "2025-02-04"] {
            let _ = calendar.add(2025, date(d), "h");
        }
        let Some(ledger) = calendar.get(2025) else {
            panic!("ledger exists");
        };
        assert!(ledger.is_sorted_unique());
        assert_eq!(calendar.holiday_count(), 4);
    }

    #[test]
    fn json_uses_string_year_keys() {
        let mut calendar = HolidayCalendar::new();
        let _ = calendar.add(2025, date("2025-01-01"), "Año Nuevo");
        let json = serde_json::to_value(&calendar).ok();
        assert_eq!(
            json,
            Some(serde_json::json!({
                "2025": [{"fecha": "2025-01-01", "nombre": "Año Nuevo"}]
            }))
        );
    }

    fn parse_calendar(raw: &str) -> HolidayCalendar {
        let Ok(calendar) = serde_json::from_str::<HolidayCalendar>(raw) else {
            panic!("document should parse");
        };
        calendar
    }

    fn dates_of(calendar: &HolidayCalendar, year: i32) -> Vec<String> {
        let Some(ledger) = calendar.get(year) else {
            panic!("ledger {year} exists");
        };
        ledger.records().iter().map(|r| r.date.clone()).collect()
    }

    #[test]
    fn repair_sorts_and_keeps_malformed_dates() {
        let mut calendar = parse_calendar(
            r#"{"2025": [
                {"fecha": "2025-12-25", "nombre": "Navidad"},
                {"fecha": "2025-13-01", "nombre": "broken"},
                {"fecha": "2025-01-01", "nombre": "Año Nuevo"}
            ]}"#,
        );
        let anomalies = calendar.repair();
        assert_eq!(
            anomalies,
            vec![RecordAnomaly::MalformedDate {
                year: 2025,
                date: "2025-13-01".to_string()
            }]
        );
        assert!(!anomalies.iter().any(RecordAnomaly::rewrites_document));
        assert_eq!(
            dates_of(&calendar, 2025),
            ["2025-01-01", "2025-12-25", "2025-13-01"]
        );
    }

    #[test]
    fn repair_drops_duplicate_dates() {
        let mut calendar = parse_calendar(
            r#"{"2025": [
                {"fecha": "2025-01-01", "nombre": "A"},
                {"fecha": "2025-01-01", "nombre": "B"}
            ]}"#,
        );
        let anomalies = calendar.repair();
        assert_eq!(
            anomalies,
            vec![RecordAnomaly::DuplicateDate {
                year: 2025,
                date: "2025-01-01".to_string(),
                dropped: "B".to_string()
            }]
        );
        assert!(anomalies.iter().all(RecordAnomaly::rewrites_document));

        let Ok((removed, remaining)) = calendar.remove(2025, date("2025-01-01")) else {
            panic!("remove should succeed");
        };
        assert_eq!(removed.name, "A");
        assert_eq!(remaining, 0);
        assert_eq!(calendar.lookup(date("2025-01-01")), DateLookup::NotHoliday);
    }

    #[test]
    fn repair_moves_misfiled_records() {
        let mut calendar = parse_calendar(
            r#"{
                "2025": [{"fecha": "2025-01-01", "nombre": "Año Nuevo"}],
                "2026": [{"fecha": "2027-03-01", "nombre": "misfiled"}]
            }"#,
        );
        let anomalies = calendar.repair();
        assert_eq!(
            anomalies,
            vec![RecordAnomaly::Misfiled {
                from: 2026,
                to: 2027,
                date: "2027-03-01".to_string()
            }]
        );
        assert!(dates_of(&calendar, 2026).is_empty());
        let DateLookup::Holiday(found) = calendar.lookup(date("2027-03-01")) else {
            panic!("moved record should be found under its own year");
        };
        assert_eq!(found.name, "misfiled");
    }

    #[test]
    fn repair_drops_misfiled_record_clashing_with_target() {
        let mut calendar = parse_calendar(
            r#"{
                "2024": [{"fecha": "2025-01-01", "nombre": "misfiled"}],
                "2025": [{"fecha": "2025-01-01", "nombre": "Año Nuevo"}]
            }"#,
        );
        let anomalies = calendar.repair();
        assert_eq!(
            anomalies,
            vec![RecordAnomaly::DuplicateDate {
                year: 2025,
                date: "2025-01-01".to_string(),
                dropped: "misfiled".to_string()
            }]
        );
        assert_eq!(dates_of(&calendar, 2025), ["2025-01-01"]);
        assert_eq!(calendar.holiday_count(), 1);
    }
}
