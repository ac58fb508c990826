// Test doubles for the monitor capabilities

use chrono::{DateTime, Local, TimeDelta};
use parking_lot::Mutex;
use procwatch::core::{
    CancellationSource, KillLog, MonitorConfig, ProcessHandle, ProcessKiller, ProcessLookup,
};
use procwatch::{Result, WatchError};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

pub fn config(name: &str, max_minutes: u64, frequency_minutes: u64) -> MonitorConfig {
    MonitorConfig::from_args(&[
        name.to_string(),
        max_minutes.to_string(),
        frequency_minutes.to_string(),
    ])
    .unwrap()
}

pub fn started_ago(pid: u32, name: &str, now: DateTime<Local>, minutes: i64) -> ProcessHandle {
    ProcessHandle::new(pid, name, now - TimeDelta::minutes(minutes))
}

/// Fixed process table that records lookups and kill attempts
#[derive(Default)]
pub struct MockProcesses {
    pub processes: Vec<ProcessHandle>,
    /// Kills of these pids fail
    pub failing_pids: Vec<u32>,
    pub lookups: AtomicUsize,
    pub kill_attempts: Mutex<Vec<u32>>,
}

impl MockProcesses {
    pub fn with(processes: Vec<ProcessHandle>) -> Self {
        Self {
            processes,
            ..Default::default()
        }
    }

    pub fn lookup_count(&self) -> usize {
        self.lookups.load(Ordering::SeqCst)
    }

    pub fn attempts(&self) -> Vec<u32> {
        self.kill_attempts.lock().clone()
    }
}

impl ProcessLookup for MockProcesses {
    fn find_by_name(&self, name: &str) -> Vec<ProcessHandle> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        self.processes
            .iter()
            .filter(|p| p.name == name)
            .cloned()
            .collect()
    }
}

impl ProcessKiller for MockProcesses {
    fn kill(&self, process: &ProcessHandle) -> Result<()> {
        self.kill_attempts.lock().push(process.pid);
        if self.failing_pids.contains(&process.pid) {
            return Err(WatchError::kill_failed(process.pid, "access denied"));
        }
        Ok(())
    }
}

/// In-memory kill log, optionally failing every append
#[derive(Default)]
pub struct MockLog {
    pub fail: bool,
    pub appends: Mutex<Vec<(PathBuf, String)>>,
}

impl MockLog {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }

    pub fn texts(&self) -> Vec<String> {
        self.appends.lock().iter().map(|(_, text)| text.clone()).collect()
    }
}

impl KillLog for MockLog {
    fn append(&self, path: &Path, text: &str) -> Result<()> {
        if self.fail {
            return Err(WatchError::Io(io::Error::new(
                io::ErrorKind::PermissionDenied,
                "file is locked",
            )));
        }
        self.appends.lock().push((path.to_path_buf(), text.to_string()));
        Ok(())
    }
}

/// Polled-only source that signals itself after a number of checks
pub struct SignalAfterChecks {
    remaining: AtomicUsize,
}

impl SignalAfterChecks {
    pub fn new(checks: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(checks),
        }
    }
}

impl CancellationSource for SignalAfterChecks {
    fn is_signaled(&self) -> bool {
        self.remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_err()
    }
}
