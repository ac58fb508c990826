//! OS process access backed by sysinfo.

use chrono::{DateTime, Local};
use parking_lot::Mutex;
use std::ffi::OsStr;
use sysinfo::{Pid, Process, ProcessRefreshKind, ProcessesToUpdate, System};

use crate::core::capabilities::{ProcessHandle, ProcessKiller, ProcessLookup};
use crate::error::{Result, WatchError};

/// Live view of the system process table
pub struct SystemProcesses {
    system: Mutex<System>,
}

impl SystemProcesses {
    pub fn new() -> Self {
        Self {
            system: Mutex::new(System::new()),
        }
    }
}

impl Default for SystemProcesses {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessLookup for SystemProcesses {
    fn find_by_name(&self, name: &str) -> Vec<ProcessHandle> {
        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::nothing(),
        );

        system
            .processes()
            .iter()
            .filter(|(_, process)| matches_target(process.name(), name))
            .filter_map(|(pid, process)| to_handle(*pid, process))
            .collect()
    }
}

impl ProcessKiller for SystemProcesses {
    fn kill(&self, process: &ProcessHandle) -> Result<()> {
        let pid = Pid::from_u32(process.pid);
        let mut system = self.system.lock();
        system.refresh_processes_specifics(
            ProcessesToUpdate::Some(&[pid]),
            true,
            ProcessRefreshKind::nothing(),
        );

        // A different start time means the pid was recycled by another process
        let target = system
            .process(pid)
            .filter(|current| start_time_of(current) == Some(process.start_time))
            .ok_or(WatchError::ProcessVanished { pid: process.pid })?;

        if target.kill() {
            Ok(())
        } else {
            Err(WatchError::kill_failed(
                process.pid,
                "the operating system refused to terminate it",
            ))
        }
    }
}

fn to_handle(pid: Pid, process: &Process) -> Option<ProcessHandle> {
    let start_time = start_time_of(process)?;
    Some(ProcessHandle::new(
        pid.as_u32(),
        process.name().to_string_lossy(),
        start_time,
    ))
}

fn start_time_of(process: &Process) -> Option<DateTime<Local>> {
    let secs = i64::try_from(process.start_time()).ok()?;
    DateTime::from_timestamp(secs, 0).map(|utc| utc.with_timezone(&Local))
}

/// Exact name match.
///
/// Windows reports image names with their extension and compares them
/// case-insensitively, so `notepad` matches `Notepad.exe` there.
#[cfg(windows)]
pub fn matches_target(process_name: &OsStr, target: &str) -> bool {
    let name = process_name.to_string_lossy();
    let strip = |s: &str| -> String {
        let lower = s.to_ascii_lowercase();
        match lower.strip_suffix(".exe") {
            Some(stem) => stem.to_string(),
            None => lower,
        }
    };
    strip(&name) == strip(target)
}

/// Exact name match.
#[cfg(not(windows))]
pub fn matches_target(process_name: &OsStr, target: &str) -> bool {
    process_name == OsStr::new(target)
}
