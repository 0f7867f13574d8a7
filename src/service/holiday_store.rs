//! Lock-guarded holiday store with write-through persistence.

use chrono::NaiveDate;
use tokio::sync::RwLock;

use super::query::{self, HolidayCheck, UpcomingReport};
use crate::domain::{DateLookup, HolidayCalendar, HolidayRecord, RecordAnomaly, YearLedger};
use crate::error::ServiceError;
use crate::persistence::JsonFileStorage;

/// Result of a successful [`HolidayStore::add`] or [`HolidayStore::remove`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationOutcome {
    /// The record inserted or removed.
    pub record: HolidayRecord,
    /// Length of the year's ledger after the mutation.
    pub ledger_len: usize,
}

/// Owner of the year → ledger mapping.
///
/// One instance per process, shared through [`crate::app_state::AppState`].
///
/// # Concurrency
///
/// - Readers share a [`tokio::sync::RwLock`] read guard.
/// - `add` and `remove` hold the write guard across the invariant check,
///   the file write and the in-memory commit, so mutations are serialized
///   and readers never observe a half-applied change.
/// - The change is applied to a working copy and only committed once the
///   document is on disk; a failed write leaves memory untouched.
#[derive(Debug)]
pub struct HolidayStore {
    calendar: RwLock<HolidayCalendar>,
    storage: JsonFileStorage,
}

impl HolidayStore {
    /// Hydrates the store from `storage`.
    ///
    /// A missing document yields an empty store. Records that break the
    /// calendar invariants are repaired (see [`HolidayCalendar::repair`]) and
    /// logged; when the repair changed anything the document is rewritten.
    /// A failed rewrite is logged and the repaired calendar is served anyway.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageRead`] if the document exists but
    /// cannot be read or parsed.
    pub async fn load(storage: JsonFileStorage) -> Result<Self, ServiceError> {
        let mut calendar = match storage.load().await? {
            Some(calendar) => calendar,
            None => {
                tracing::warn!(
                    path = %storage.path().display(),
                    "holiday document not found, starting with an empty calendar"
                );
                HolidayCalendar::new()
            }
        };

        let anomalies = calendar.repair();
        for anomaly in &anomalies {
            tracing::warn!(%anomaly, "inconsistent holiday record in storage");
        }
        if anomalies.iter().any(RecordAnomaly::rewrites_document) {
            match storage.save(&calendar).await {
                Ok(()) => tracing::info!(
                    path = %storage.path().display(),
                    "rewrote repaired holiday document"
                ),
                Err(err) => tracing::warn!(
                    error = %err,
                    "could not rewrite repaired holiday document"
                ),
            }
        }

        tracing::info!(
            path = %storage.path().display(),
            years = calendar.year_count(),
            holidays = calendar.holiday_count(),
            "holiday calendar loaded"
        );
        Ok(Self::with_calendar(calendar, storage))
    }

    /// Builds a store around an in-memory calendar without reading storage.
    #[must_use]
    pub fn with_calendar(calendar: HolidayCalendar, storage: JsonFileStorage) -> Self {
        Self {
            calendar: RwLock::new(calendar),
            storage,
        }
    }

    /// Returns a snapshot of the whole mapping.
    pub async fn get_all(&self) -> HolidayCalendar {
        self.calendar.read().await.clone()
    }

    /// Returns a copy of the ledger for `year`.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::YearNotFound`] if the year has no ledger.
    pub async fn get_year(&self, year: i32) -> Result<YearLedger, ServiceError> {
        let calendar = self.calendar.read().await;
        query::by_year(&calendar, year).cloned()
    }

    /// Looks up a single date.
    pub async fn lookup_by_date(&self, date: NaiveDate) -> DateLookup {
        self.calendar.read().await.lookup(date)
    }

    /// Checks whether `date` is a holiday.
    pub async fn is_holiday(&self, date: NaiveDate) -> HolidayCheck {
        let calendar = self.calendar.read().await;
        query::by_date(&calendar, date)
    }

    /// Returns the next `count` holidays on or after `reference`.
    ///
    /// Logs a warning with the number of stored records that were skipped
    /// because their date is malformed.
    pub async fn upcoming(&self, reference: NaiveDate, count: usize) -> UpcomingReport {
        let report = {
            let calendar = self.calendar.read().await;
            query::upcoming(&calendar, reference, count)
        };
        if report.skipped > 0 {
            tracing::warn!(
                skipped = report.skipped,
                "skipped holiday records with malformed dates"
            );
        }
        report
    }

    /// Returns `(years, holidays)` counts.
    pub async fn stats(&self) -> (usize, usize) {
        let calendar = self.calendar.read().await;
        (calendar.year_count(), calendar.holiday_count())
    }

    /// Adds a holiday and persists the store.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::YearMismatch`] if `date` is not in `year`.
    /// - [`ServiceError::DuplicateDate`] if `year` already has `date`.
    /// - [`ServiceError::StorageWrite`] if the document cannot be written;
    ///   the in-memory calendar is left unchanged.
    pub async fn add(
        &self,
        year: i32,
        date: NaiveDate,
        name: &str,
    ) -> Result<MutationOutcome, ServiceError> {
        let mut calendar = self.calendar.write().await;
        let mut working = calendar.clone();
        let (record, ledger_len) = working.add(year, date, name)?;

        self.storage.save(&working).await?;
        *calendar = working;

        tracing::info!(year, date = %record.date, name = %record.name, ledger_len, "holiday added");
        Ok(MutationOutcome { record, ledger_len })
    }

    /// Removes a holiday and persists the store.
    ///
    /// # Errors
    ///
    /// - [`ServiceError::YearNotFound`] if `year` has no ledger.
    /// - [`ServiceError::DateNotFound`] if the ledger has no such date.
    /// - [`ServiceError::StorageWrite`] if the document cannot be written;
    ///   the in-memory calendar is left unchanged.
    pub async fn remove(&self, year: i32, date: NaiveDate) -> Result<MutationOutcome, ServiceError> {
        let mut calendar = self.calendar.write().await;
        let mut working = calendar.clone();
        let (record, ledger_len) = working.remove(year, date)?;

        self.storage.save(&working).await?;
        *calendar = working;

        tracing::info!(year, date = %record.date, name = %record.name, ledger_len, "holiday removed");
        Ok(MutationOutcome { record, ledger_len })
    }

    /// Writes the current mapping to storage.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageWrite`] on failure.
    pub async fn persist(&self) -> Result<(), ServiceError> {
        let calendar = self.calendar.read().await;
        self.storage.save(&calendar).await
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::dates;

    fn date(text: &str) -> NaiveDate {
        let Ok(d) = dates::parse(text) else {
            panic!("invalid test date {text}");
        };
        d
    }

    fn temp_storage() -> (tempfile::TempDir, JsonFileStorage) {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let storage = JsonFileStorage::new(dir.path().join("feriados.json"));
        (dir, storage)
    }

    async fn empty_store() -> (tempfile::TempDir, HolidayStore) {
        let (dir, storage) = temp_storage();
        let Ok(store) = HolidayStore::load(storage).await else {
            panic!("empty store should load");
        };
        (dir, store)
    }

    #[tokio::test]
    async fn missing_document_loads_empty() {
        let (_dir, store) = empty_store().await;
        assert_eq!(store.stats().await, (0, 0));
        assert!(matches!(
            store.get_year(2025).await,
            Err(ServiceError::YearNotFound(2025))
        ));
    }

    #[tokio::test]
    async fn corrupt_document_fails_load() {
        let (dir, storage) = temp_storage();
        let _ = std::fs::write(dir.path().join("feriados.json"), "[1, 2");
        assert!(matches!(
            HolidayStore::load(storage).await,
            Err(ServiceError::StorageRead(_))
        ));
    }

    #[tokio::test]
    async fn load_repairs_and_rewrites_inconsistent_document() {
        let (dir, storage) = temp_storage();
        let path = dir.path().join("feriados.json");
        let _ = std::fs::write(
            &path,
            r#"{
                "2025": [
                    {"fecha": "2025-01-01", "nombre": "A"},
                    {"fecha": "2025-01-01", "nombre": "B"}
                ],
                "2026": [{"fecha": "2027-03-01", "nombre": "misfiled"}]
            }"#,
        );
        let Ok(store) = HolidayStore::load(storage).await else {
            panic!("inconsistent document should still load");
        };

        let Ok(removed) = store.remove(2025, date("2025-01-01")).await else {
            panic!("remove should succeed");
        };
        assert_eq!(removed.record.name, "A");
        assert!(!store.is_holiday(date("2025-01-01")).await.matched);

        let check = store.is_holiday(date("2027-03-01")).await;
        assert!(check.matched);
        assert_eq!(check.name.as_deref(), Some("misfiled"));
        let report = store.upcoming(date("2025-06-01"), 5).await;
        let names: Vec<&str> = report.entries.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, ["misfiled"]);

        let reloaded = HolidayStore::load(JsonFileStorage::new(&path)).await;
        let Ok(reloaded) = reloaded else {
            panic!("rewritten document should load");
        };
        assert_eq!(reloaded.get_all().await, store.get_all().await);
    }

    #[tokio::test]
    async fn repaired_document_is_written_back_on_load() {
        let (dir, storage) = temp_storage();
        let path = dir.path().join("feriados.json");
        let _ = std::fs::write(
            &path,
            r#"{"2024": [{"fecha": "2025-05-01", "nombre": "Trabajador"}]}"#,
        );
        let Ok(_store) = HolidayStore::load(storage).await else {
            panic!("document should load");
        };
        let Ok(text) = std::fs::read_to_string(&path) else {
            panic!("document should still exist");
        };
        let Ok(value) = serde_json::from_str::<serde_json::Value>(&text) else {
            panic!("rewritten document is JSON");
        };
        assert_eq!(
            value,
            serde_json::json!({
                "2024": [],
                "2025": [{"fecha": "2025-05-01", "nombre": "Trabajador"}]
            })
        );
    }

    #[tokio::test]
    async fn add_duplicate_lookup_remove_scenario() {
        let (_dir, store) = empty_store().await;
        let new_year = date("2025-01-01");

        let Ok(added) = store.add(2025, new_year, "Año Nuevo").await else {
            panic!("add should succeed");
        };
        assert_eq!(added.ledger_len, 1);

        let dup = store.add(2025, new_year, "X").await;
        assert!(matches!(dup, Err(ServiceError::DuplicateDate(_))));

        let check = store.is_holiday(new_year).await;
        assert!(check.matched);
        assert_eq!(check.name.as_deref(), Some("Año Nuevo"));

        let Ok(removed) = store.remove(2025, new_year).await else {
            panic!("remove should succeed");
        };
        assert_eq!(removed.record.name, "Año Nuevo");
        assert_eq!(removed.ledger_len, 0);

        assert!(!store.is_holiday(new_year).await.matched);
    }

    #[tokio::test]
    async fn lookup_by_date_distinguishes_outcomes() {
        let (_dir, store) = empty_store().await;
        let _ = store.add(2025, date("2025-05-25"), "Revolución de Mayo").await;

        let DateLookup::Holiday(record) = store.lookup_by_date(date("2025-05-25")).await else {
            panic!("expected a holiday");
        };
        assert_eq!(record.name, "Revolución de Mayo");
        assert_eq!(
            store.lookup_by_date(date("2025-05-26")).await,
            DateLookup::NotHoliday
        );
        assert_eq!(
            store.lookup_by_date(date("2030-05-25")).await,
            DateLookup::NoDataForYear
        );
    }

    #[tokio::test]
    async fn mutations_are_persisted_and_reload() {
        let (dir, store) = empty_store().await;
        let _ = store.add(2025, date("2025-12-25"), "Navidad").await;
        let _ = store.add(2025, date("2025-05-01"), "Día del Trabajador").await;
        let _ = store.add(2026, date("2026-01-01"), "Año Nuevo").await;

        let reloaded =
            HolidayStore::load(JsonFileStorage::new(dir.path().join("feriados.json"))).await;
        let Ok(reloaded) = reloaded else {
            panic!("reload should succeed");
        };
        assert_eq!(reloaded.get_all().await, store.get_all().await);

        let Ok(ledger) = reloaded.get_year(2025).await else {
            panic!("2025 ledger should exist");
        };
        assert!(ledger.is_sorted_unique());
        assert_eq!(
            ledger.records().first().map(|r| r.date.as_str()),
            Some("2025-05-01")
        );
    }

    #[tokio::test]
    async fn failed_write_leaves_memory_unchanged() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let blocker = dir.path().join("blocker");
        let _ = std::fs::write(&blocker, "not a directory");
        let store = HolidayStore::with_calendar(
            HolidayCalendar::new(),
            JsonFileStorage::new(blocker.join("feriados.json")),
        );

        let result = store.add(2025, date("2025-01-01"), "Año Nuevo").await;
        assert!(matches!(result, Err(ServiceError::StorageWrite(_))));
        assert_eq!(store.get_all().await, HolidayCalendar::new());
        assert!(store.persist().await.is_err());
    }

    #[tokio::test]
    async fn remove_errors() {
        let (_dir, store) = empty_store().await;
        assert!(matches!(
            store.remove(2025, date("2025-01-01")).await,
            Err(ServiceError::YearNotFound(2025))
        ));
        let _ = store.add(2025, date("2025-05-25"), "Revolución de Mayo").await;
        assert!(matches!(
            store.remove(2025, date("2025-01-01")).await,
            Err(ServiceError::DateNotFound(_))
        ));
    }

    #[tokio::test]
    async fn concurrent_adds_are_serialized() {
        let (_dir, store) = empty_store().await;
        let store = Arc::new(store);

        let mut handles = Vec::new();
        for day in 1..=20u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                let Some(d) = NaiveDate::from_ymd_opt(2025, 3, day) else {
                    panic!("valid day");
                };
                store.add(2025, d, "Marzo").await.is_ok()
            }));
        }
        // five more tasks race for the same date
        let mut dup_handles = Vec::new();
        for _ in 0..5 {
            let store = Arc::clone(&store);
            dup_handles.push(tokio::spawn(async move {
                store.add(2025, date("2025-04-02"), "Malvinas").await.is_ok()
            }));
        }

        for handle in handles {
            assert!(matches!(handle.await, Ok(true)));
        }
        let mut dup_successes = 0;
        for handle in dup_handles {
            if matches!(handle.await, Ok(true)) {
                dup_successes += 1;
            }
        }
        assert_eq!(dup_successes, 1);

        let Ok(ledger) = store.get_year(2025).await else {
            panic!("ledger should exist");
        };
        assert_eq!(ledger.len(), 21);
        assert!(ledger.is_sorted_unique());
    }

    #[tokio::test]
    async fn upcoming_uses_snapshot() {
        let (_dir, store) = empty_store().await;
        let _ = store.add(2025, date("2025-05-01"), "Trabajador").await;
        let _ = store.add(2025, date("2025-07-01"), "Julio").await;
        let _ = store.add(2025, date("2025-08-01"), "Agosto").await;

        let report = store.upcoming(date("2025-06-01"), 2).await;
        let days: Vec<i64> = report.entries.iter().map(|h| h.days_remaining).collect();
        assert_eq!(days, vec![30, 61]);
    }
}
