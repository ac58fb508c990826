//! Capabilities the monitor loop consumes.
//!
//! The loop never touches the OS directly. Process enumeration, termination,
//! log persistence and stop requests all come in through these traits so the
//! loop can run against real processes or against test doubles.

use chrono::{DateTime, Local};
use std::path::Path;
use std::time::Duration;

use crate::error::Result;

/// Snapshot of a single process taken at poll time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessHandle {
    pub pid: u32,
    pub name: String,
    pub start_time: DateTime<Local>,
}

impl ProcessHandle {
    pub fn new<S: Into<String>>(pid: u32, name: S, start_time: DateTime<Local>) -> Self {
        Self {
            pid,
            name: name.into(),
            start_time,
        }
    }
}

/// Finds running processes by exact name
pub trait ProcessLookup {
    /// Every process currently running under `name`, in no particular order
    fn find_by_name(&self, name: &str) -> Vec<ProcessHandle>;
}

/// Terminates a process
pub trait ProcessKiller {
    fn kill(&self, process: &ProcessHandle) -> Result<()>;
}

/// Append-only sink for kill records
pub trait KillLog {
    fn append(&self, path: &Path, text: &str) -> Result<()>;
}

/// Stop request raised from outside the monitor loop
pub trait CancellationSource {
    /// Must never block
    fn is_signaled(&self) -> bool;

    /// Wait up to `timeout`. Sources that can be woken should return as soon
    /// as they are signaled.
    fn wait_timeout(&self, timeout: Duration) {
        std::thread::sleep(timeout);
    }
}
