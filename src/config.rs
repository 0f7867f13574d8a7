//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`). Only `API_KEY` is mandatory; everything else has a default.

use std::net::SocketAddr;
use std::path::PathBuf;

/// Lowest value accepted for `MIN_YEAR`.
pub const MIN_YEAR_FLOOR: i32 = 1900;

/// Default number of entries returned by the upcoming-holidays query.
pub const DEFAULT_UPCOMING: usize = 5;

/// Errors raised while loading or validating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is missing or empty.
    #[error("{0} is required but not configured")]
    Missing(&'static str),

    /// A variable is set but cannot be parsed.
    #[error("{key} has an invalid value: {value:?}")]
    Invalid {
        /// Variable name.
        key: &'static str,
        /// Raw value found in the environment.
        value: String,
    },

    /// A parsed value falls outside its allowed range.
    #[error("{0}")]
    OutOfRange(String),
}

/// Log output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`ServiceConfig::from_env`].
#[derive(Clone)]
pub struct ServiceConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Path of the JSON document holding the holiday calendar.
    pub holidays_file: PathBuf,

    /// Shared secret required by the mutating endpoints.
    pub api_key: String,

    /// Earliest year accepted by any endpoint.
    pub min_year: i32,

    /// How many years past the current one are accepted.
    pub max_year_offset: i32,

    /// Upper bound for the `cantidad` parameter of the upcoming query.
    pub max_upcoming: usize,

    /// Route prefix, either empty or of the form `/segment`.
    pub api_prefix: String,

    /// Output format for logs.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("listen_addr", &self.listen_addr)
            .field("holidays_file", &self.holidays_file)
            .field("api_key", &"<redacted>")
            .field("min_year", &self.min_year)
            .field("max_year_offset", &self.max_year_offset)
            .field("max_upcoming", &self.max_upcoming)
            .field("api_prefix", &self.api_prefix)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl ServiceConfig {
    /// Loads configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file,
    /// then validates the result.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `API_KEY` is missing, a numeric variable
    /// cannot be parsed, or a value is out of range.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let listen_addr = parse_env("LISTEN_ADDR", SocketAddr::from(([0, 0, 0, 0], 8000)))?;
        let holidays_file = std::env::var("FERIADOS_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("feriados.json"));
        let api_key = std::env::var("API_KEY").unwrap_or_default();

        let min_year = parse_env("MIN_YEAR", MIN_YEAR_FLOOR)?;
        let max_year_offset = parse_env("MAX_YEAR_OFFSET", 10)?;
        let max_upcoming = parse_env("MAX_PROXIMOS_FERIADOS", 20)?;

        let api_prefix = normalize_prefix(&std::env::var("API_PREFIX").unwrap_or_default());
        let log_format = match std::env::var("LOG_FORMAT").ok().as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        let config = Self {
            listen_addr,
            holidays_file,
            api_key,
            min_year,
            max_year_offset,
            max_upcoming,
            api_prefix,
            log_format,
        };
        config.validate()?;
        Ok(config)
    }

    /// Checks the bounds every setting must respect.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] for an empty API key and
    /// [`ConfigError::OutOfRange`] for numeric settings below their floor.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api_key.is_empty() {
            return Err(ConfigError::Missing("API_KEY"));
        }
        if self.min_year < MIN_YEAR_FLOOR {
            return Err(ConfigError::OutOfRange(format!(
                "MIN_YEAR cannot be lower than {MIN_YEAR_FLOOR}"
            )));
        }
        if self.max_year_offset < 1 {
            return Err(ConfigError::OutOfRange(
                "MAX_YEAR_OFFSET must be at least 1".to_string(),
            ));
        }
        if self.max_upcoming < 1 {
            return Err(ConfigError::OutOfRange(
                "MAX_PROXIMOS_FERIADOS must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Prepends the configured prefix to a route path.
    #[must_use]
    pub fn prefixed(&self, path: &str) -> String {
        format!("{}{path}", self.api_prefix)
    }
}

/// Parses an environment variable as `T`, returning `default` when it is
/// not set.
fn parse_env<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match std::env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        Err(_) => Ok(default),
    }
}

/// Turns `"api/"`, `"/api"` or `"/api/"` into `"/api"`; blank stays blank.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}
