//! Shared application state injected into all Axum handlers.

use std::sync::Arc;

use chrono::{Datelike, NaiveDate};

use crate::config::ServiceConfig;
use crate::domain::Clock;
use crate::service::HolidayStore;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The single holiday store of the process.
    pub store: Arc<HolidayStore>,
    /// Validated service configuration.
    pub config: Arc<ServiceConfig>,
    /// Source of "today" for range checks and the upcoming query.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Bundles the store, configuration and clock.
    #[must_use]
    pub fn new(store: Arc<HolidayStore>, config: Arc<ServiceConfig>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    /// Today's date according to the injected clock.
    #[must_use]
    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    /// The current year, read at call time.
    #[must_use]
    pub fn current_year(&self) -> i32 {
        self.today().year()
    }
}
