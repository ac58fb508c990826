// Poll-and-kill behavior against mocked capabilities

use chrono::Local;
use procwatch::core::{Capabilities, CycleStats, MonitorEvent, ProcessMonitor, DEFAULT_LOG_FILE};
use std::path::Path;

use super::support::{config, started_ago, MockLog, MockProcesses};

#[test]
fn test_overage_process_is_killed_and_logged() {
    let now = Local::now();
    let processes = MockProcesses::with(vec![started_ago(42, "worker", now, 6)]);
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let stats = ProcessMonitor::new(config("worker", 5, 1), caps).poll_at(now, |_| {});

    assert_eq!(stats.killed, 1);
    assert_eq!(processes.attempts(), vec![42]);

    let texts = log.texts();
    assert_eq!(texts.len(), 1);
    assert!(
        texts[0].contains("Killed process 'worker' after running for 6.00 minutes."),
        "unexpected log line: {}",
        texts[0]
    );

    let appends = log.appends.lock();
    assert_eq!(appends[0].0, Path::new(DEFAULT_LOG_FILE));
}

#[test]
fn test_process_within_lifetime_is_left_alone() {
    let now = Local::now();
    let processes = MockProcesses::with(vec![started_ago(42, "worker", now, 6)]);
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let mut events = Vec::new();
    let stats =
        ProcessMonitor::new(config("worker", 7, 1), caps).poll_at(now, |e| events.push(e.clone()));

    assert_eq!(stats.killed, 0);
    assert_eq!(stats.within_limit, 1);
    assert!(processes.attempts().is_empty());
    assert!(log.texts().is_empty());
    assert!(matches!(events.as_slice(), [MonitorEvent::WithinLimit { .. }]));
}

#[test]
fn test_runtime_equal_to_lifetime_is_not_killed() {
    let now = Local::now();
    let processes = MockProcesses::with(vec![started_ago(1, "worker", now, 5)]);
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let stats = ProcessMonitor::new(config("worker", 5, 1), caps).poll_at(now, |_| {});

    assert_eq!(stats.killed, 0);
    assert!(processes.attempts().is_empty());
}

#[test]
fn test_no_matches_is_a_quiet_cycle() {
    let processes = MockProcesses::default();
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let mut events = 0;
    let stats = ProcessMonitor::new(config("worker", 5, 1), caps).poll_once(|_| events += 1);

    assert_eq!(stats, CycleStats::default());
    assert_eq!(events, 0);
    assert_eq!(processes.lookup_count(), 1);
}

#[test]
fn test_kill_failure_does_not_stop_other_kills() {
    let now = Local::now();
    let mut processes = MockProcesses::with(vec![
        started_ago(1, "worker", now, 30),
        started_ago(2, "worker", now, 30),
        started_ago(3, "worker", now, 30),
    ]);
    processes.failing_pids = vec![2];
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let mut failed = Vec::new();
    let stats = ProcessMonitor::new(config("worker", 5, 1), caps).poll_at(now, |e| {
        if let MonitorEvent::KillFailed { process, reason } = e {
            failed.push((process.pid, reason.clone()));
        }
    });

    assert_eq!(processes.attempts(), vec![1, 2, 3]);
    assert_eq!(stats.killed, 2);
    assert_eq!(stats.kill_failures, 1);
    assert_eq!(log.texts().len(), 2);
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, 2);
    assert!(failed[0].1.contains("access denied"));
}

#[test]
fn test_log_failure_keeps_the_kill() {
    let now = Local::now();
    let processes = MockProcesses::with(vec![
        started_ago(1, "worker", now, 10),
        started_ago(2, "worker", now, 10),
    ]);
    let log = MockLog::failing();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let mut log_failures = Vec::new();
    let stats = ProcessMonitor::new(config("worker", 5, 1), caps).poll_at(now, |e| {
        if let MonitorEvent::LogFailed { record, .. } = e {
            log_failures.push(record.pid);
        }
    });

    // Each process is killed exactly once, never retried because of the log
    assert_eq!(processes.attempts(), vec![1, 2]);
    assert_eq!(stats.killed, 2);
    assert_eq!(stats.log_failures, 2);
    assert_eq!(log_failures, vec![1, 2]);
}

#[test]
fn test_failed_kill_is_retried_next_cycle() {
    let now = Local::now();
    let mut processes = MockProcesses::with(vec![started_ago(9, "worker", now, 10)]);
    processes.failing_pids = vec![9];
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let monitor = ProcessMonitor::new(config("worker", 5, 1), caps);
    monitor.poll_at(now, |_| {});
    monitor.poll_at(now, |_| {});

    assert_eq!(processes.attempts(), vec![9, 9]);
    assert!(log.texts().is_empty());
}

#[test]
fn test_custom_log_path_is_used() {
    let now = Local::now();
    let processes = MockProcesses::with(vec![started_ago(1, "worker", now, 10)]);
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let config = config("worker", 5, 1).with_log_path("custom/kills.log");
    ProcessMonitor::new(config, caps).poll_at(now, |_| {});

    let appends = log.appends.lock();
    assert_eq!(appends[0].0, Path::new("custom/kills.log"));
}

#[test]
fn test_killed_event_carries_record() {
    let now = Local::now();
    let processes = MockProcesses::with(vec![started_ago(5, "worker", now, 8)]);
    let log = MockLog::default();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &log,
    };

    let mut records = Vec::new();
    ProcessMonitor::new(config("worker", 5, 1), caps).poll_at(now, |e| {
        if let MonitorEvent::Killed(record) = e {
            records.push(record.clone());
        }
    });

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].pid, 5);
    assert_eq!(records[0].process_name, "worker");
    assert_eq!(records[0].runtime, chrono::TimeDelta::minutes(8));
    assert!(log.texts()[0].starts_with(&records[0].line()));
}
