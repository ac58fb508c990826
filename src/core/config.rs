//! Validated monitor configuration.
//!
//! Built once at startup from the three positional arguments and never
//! mutated afterwards.

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, WatchError};

/// File every kill is appended to unless overridden
pub const DEFAULT_LOG_FILE: &str = "process_kill_log.txt";

const SECONDS_PER_MINUTE: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    process_name: String,
    max_lifetime: Duration,
    poll_interval: Duration,
    log_path: PathBuf,
}

impl MonitorConfig {
    /// Build a configuration from `<process_name> <max_lifetime_minutes> <frequency_minutes>`.
    ///
    /// # Errors
    /// * `ArgumentCount` - anything other than exactly three arguments
    /// * `ArgumentFormat` - empty name, or either number is not a positive integer
    pub fn from_args<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let [name, lifetime, frequency] = args else {
            return Err(WatchError::ArgumentCount);
        };

        let name = name.as_ref();
        if name.is_empty() {
            return Err(WatchError::ArgumentFormat);
        }

        let max_lifetime = parse_minutes(lifetime.as_ref()).ok_or(WatchError::ArgumentFormat)?;
        let poll_interval = parse_minutes(frequency.as_ref()).ok_or(WatchError::ArgumentFormat)?;

        Ok(Self {
            process_name: name.to_string(),
            max_lifetime,
            poll_interval,
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
        })
    }

    /// Build a configuration from already-typed values
    pub fn new<S: Into<String>>(
        process_name: S,
        max_lifetime: Duration,
        poll_interval: Duration,
    ) -> Result<Self> {
        let process_name = process_name.into();

        if process_name.is_empty() {
            return Err(WatchError::invalid_config("process name must not be empty"));
        }
        if max_lifetime.is_zero() {
            return Err(WatchError::invalid_config("max lifetime must be positive"));
        }
        if poll_interval.is_zero() {
            return Err(WatchError::invalid_config("poll interval must be positive"));
        }

        Ok(Self {
            process_name,
            max_lifetime,
            poll_interval,
            log_path: PathBuf::from(DEFAULT_LOG_FILE),
        })
    }

    /// Replace the kill log location
    pub fn with_log_path<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.log_path = path.into();
        self
    }

    pub fn process_name(&self) -> &str {
        &self.process_name
    }

    pub fn max_lifetime(&self) -> Duration {
        self.max_lifetime
    }

    pub fn poll_interval(&self) -> Duration {
        self.poll_interval
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Max lifetime in whole minutes, as it was given on the command line
    pub fn max_lifetime_minutes(&self) -> u64 {
        self.max_lifetime.as_secs() / SECONDS_PER_MINUTE
    }

    pub fn poll_interval_minutes(&self) -> u64 {
        self.poll_interval.as_secs() / SECONDS_PER_MINUTE
    }
}

/// Parse a strictly positive number of minutes, ignoring surrounding whitespace
fn parse_minutes(raw: &str) -> Option<Duration> {
    let minutes: u64 = raw.trim().parse().ok()?;
    if minutes == 0 {
        return None;
    }
    minutes
        .checked_mul(SECONDS_PER_MINUTE)
        .map(Duration::from_secs)
}
