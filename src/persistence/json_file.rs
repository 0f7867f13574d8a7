//! JSON document storage for the holiday calendar.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::HolidayCalendar;
use crate::error::ServiceError;

/// Reads and writes the whole calendar as one JSON document.
///
/// Writes go to a sibling `.tmp` file that is then renamed over the
/// target, so readers of the file never see a partial document.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    /// Creates storage backed by the file at `path`.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the path of the backing document.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the document.
    ///
    /// Returns `Ok(None)` when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageRead`] if the file cannot be read or
    /// is not a valid calendar document.
    pub async fn load(&self) -> Result<Option<HolidayCalendar>, ServiceError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(ServiceError::StorageRead(format!(
                    "{}: {e}",
                    self.path.display()
                )));
            }
        };
        let calendar = serde_json::from_slice(&bytes).map_err(|e| {
            ServiceError::StorageRead(format!("{}: {e}", self.path.display()))
        })?;
        Ok(Some(calendar))
    }

    /// Replaces the document with `calendar`, pretty-printed.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceError::StorageWrite`] if serialization, the
    /// temporary write, or the final rename fails.
    pub async fn save(&self, calendar: &HolidayCalendar) -> Result<(), ServiceError> {
        let mut bytes =
            serde_json::to_vec_pretty(calendar).map_err(|e| write_error(&self.path, e))?;
        bytes.push(b'\n');

        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(&self.path, e))?;
        }

        let tmp = self.temp_path();
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|e| write_error(&self.path, e))?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(write_error(&self.path, e));
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> ServiceError {
    ServiceError::StorageWrite(format!("{}: {e}", path.display()))
}
