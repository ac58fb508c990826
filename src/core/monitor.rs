//! Process lifetime monitor.
//!
//! Polls every process matching the configured name, terminates the ones
//! that outlived `max_lifetime` and appends a record of each kill to the
//! kill log.
//!
//! # Examples
//!
//! ```no_run
//! use procwatch::core::{Capabilities, MonitorConfig, ProcessMonitor, StopSignal};
//! use procwatch::platform::{FileKillLog, SystemProcesses};
//!
//! let config = MonitorConfig::from_args(&["notepad", "5", "1"])?;
//! let processes = SystemProcesses::new();
//! let caps = Capabilities {
//!     lookup: &processes,
//!     killer: &processes,
//!     log: &FileKillLog,
//! };
//!
//! let stop = StopSignal::new();
//! let summary = ProcessMonitor::new(config, caps).run(&stop, |event| {
//!     println!("{:?}", event);
//! });
//! println!("Killed {} processes", summary.totals.killed);
//! # Ok::<(), procwatch::WatchError>(())
//! ```

use chrono::{DateTime, Local, TimeDelta};
use std::time::{Duration, Instant};

use super::capabilities::{CancellationSource, KillLog, ProcessHandle, ProcessKiller, ProcessLookup};
use super::config::MonitorConfig;
use crate::ui::formatters::{format_minutes, format_timestamp};

/// Longest uninterrupted wait between two cancellation checks
pub const DEFAULT_TICK: Duration = Duration::from_secs(1);

/// External collaborators the monitor drives
#[derive(Clone, Copy)]
pub struct Capabilities<'a> {
    pub lookup: &'a dyn ProcessLookup,
    pub killer: &'a dyn ProcessKiller,
    pub log: &'a dyn KillLog,
}

/// One successful termination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KillRecord {
    pub timestamp: DateTime<Local>,
    pub process_name: String,
    pub pid: u32,
    pub runtime: TimeDelta,
}

impl KillRecord {
    /// Human-readable log line, without trailing newline
    pub fn line(&self) -> String {
        format!(
            "{}: Killed process '{}' after running for {} minutes.",
            format_timestamp(self.timestamp),
            self.process_name,
            format_minutes(self.runtime)
        )
    }
}

/// Something the operator should hear about
#[derive(Debug, Clone)]
pub enum MonitorEvent {
    /// Process terminated and the record was persisted
    Killed(KillRecord),
    /// Termination failed, nothing was logged
    KillFailed {
        process: ProcessHandle,
        reason: String,
    },
    /// Process terminated but the record could not be appended
    LogFailed { record: KillRecord, reason: String },
    /// Process is still under the lifetime limit
    WithinLimit {
        process: ProcessHandle,
        runtime: TimeDelta,
    },
}

/// Counters for a single poll
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CycleStats {
    pub matched: usize,
    pub killed: usize,
    pub within_limit: usize,
    pub kill_failures: usize,
    pub log_failures: usize,
}

impl CycleStats {
    fn absorb(&mut self, other: CycleStats) {
        self.matched += other.matched;
        self.killed += other.killed;
        self.within_limit += other.within_limit;
        self.kill_failures += other.kill_failures;
        self.log_failures += other.log_failures;
    }
}

/// Totals for a whole run
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MonitorSummary {
    pub cycles: usize,
    pub totals: CycleStats,
}

pub struct ProcessMonitor<'a> {
    config: MonitorConfig,
    caps: Capabilities<'a>,
    tick: Duration,
}

impl<'a> ProcessMonitor<'a> {
    pub fn new(config: MonitorConfig, caps: Capabilities<'a>) -> Self {
        Self {
            config,
            caps,
            tick: DEFAULT_TICK,
        }
    }

    /// Change the sleep increment. Values above one second are clamped so a
    /// stop request is never left waiting longer than that.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick.min(DEFAULT_TICK).max(Duration::from_millis(1));
        self
    }

    pub fn config(&self) -> &MonitorConfig {
        &self.config
    }

    /// Poll, kill and sleep until `cancel` is signaled.
    ///
    /// The first poll happens immediately. Per-process failures are reported
    /// through `on_event` and never end the loop.
    pub fn run<C, F>(&self, cancel: &C, mut on_event: F) -> MonitorSummary
    where
        C: CancellationSource + ?Sized,
        F: FnMut(&MonitorEvent),
    {
        let mut summary = MonitorSummary::default();

        log::info!(
            "Monitoring '{}' (max lifetime {:?}, poll every {:?})",
            self.config.process_name(),
            self.config.max_lifetime(),
            self.config.poll_interval()
        );

        loop {
            if cancel.is_signaled() {
                break;
            }

            let stats = self.poll_once(&mut on_event);
            summary.cycles += 1;
            summary.totals.absorb(stats);

            if self.sleep_until_next_poll(cancel) {
                break;
            }
        }

        log::info!(
            "Monitor stopped after {} cycles ({} killed)",
            summary.cycles,
            summary.totals.killed
        );
        summary
    }

    /// Run a single poll, reading the wall clock once right after the lookup
    pub fn poll_once<F>(&self, on_event: F) -> CycleStats
    where
        F: FnMut(&MonitorEvent),
    {
        self.poll_with_clock(Local::now, on_event)
    }

    /// Run a single poll, measuring every process against `now`
    pub fn poll_at<F>(&self, now: DateTime<Local>, on_event: F) -> CycleStats
    where
        F: FnMut(&MonitorEvent),
    {
        self.poll_with_clock(|| now, on_event)
    }

    fn poll_with_clock<N, F>(&self, clock: N, mut on_event: F) -> CycleStats
    where
        N: FnOnce() -> DateTime<Local>,
        F: FnMut(&MonitorEvent),
    {
        let mut stats = CycleStats::default();
        let processes = self.caps.lookup.find_by_name(self.config.process_name());
        let now = clock();
        stats.matched = processes.len();

        log::debug!(
            "Found {} process(es) named '{}'",
            processes.len(),
            self.config.process_name()
        );

        for process in processes {
            let runtime = now - process.start_time;

            if self.exceeds_lifetime(runtime) {
                self.kill_and_log(process, runtime, &mut stats, &mut on_event);
            } else {
                stats.within_limit += 1;
                on_event(&MonitorEvent::WithinLimit { process, runtime });
            }
        }

        stats
    }

    /// Strictly greater than the limit. Negative runtimes (clock skew) never qualify.
    fn exceeds_lifetime(&self, runtime: TimeDelta) -> bool {
        runtime
            .to_std()
            .map(|runtime| runtime > self.config.max_lifetime())
            .unwrap_or(false)
    }

    /// Kill one process and persist the record.
    ///
    /// Kill and append failures are independent: a failed append never undoes
    /// or retries the kill.
    fn kill_and_log<F>(
        &self,
        process: ProcessHandle,
        runtime: TimeDelta,
        stats: &mut CycleStats,
        on_event: &mut F,
    ) where
        F: FnMut(&MonitorEvent),
    {
        if let Err(e) = self.caps.killer.kill(&process) {
            log::warn!("Failed to kill process {} ({}): {}", process.pid, process.name, e);
            stats.kill_failures += 1;
            on_event(&MonitorEvent::KillFailed {
                process,
                reason: e.to_string(),
            });
            return;
        }

        stats.killed += 1;

        let record = KillRecord {
            timestamp: Local::now(),
            process_name: process.name,
            pid: process.pid,
            runtime,
        };

        let text = format!("{}{}", record.line(), LINE_ENDING);
        match self.caps.log.append(self.config.log_path(), &text) {
            Ok(()) => on_event(&MonitorEvent::Killed(record)),
            Err(e) => {
                log::warn!(
                    "Failed to write to log file {}: {}",
                    self.config.log_path().display(),
                    e
                );
                stats.log_failures += 1;
                on_event(&MonitorEvent::LogFailed {
                    record,
                    reason: e.to_string(),
                });
            }
        }
    }

    /// Wait out the poll interval in `tick`-sized steps.
    ///
    /// Returns true if a stop was requested during the wait.
    fn sleep_until_next_poll<C>(&self, cancel: &C) -> bool
    where
        C: CancellationSource + ?Sized,
    {
        let deadline = Instant::now() + self.config.poll_interval();

        loop {
            if cancel.is_signaled() {
                return true;
            }

            let now = Instant::now();
            if now >= deadline {
                return false;
            }

            cancel.wait_timeout((deadline - now).min(self.tick));
        }
    }
}

#[cfg(windows)]
const LINE_ENDING: &str = "\r\n";
#[cfg(not(windows))]
const LINE_ENDING: &str = "\n";
