//! Watch command handler.
//!
//! Validates the arguments, wires the real OS capabilities into the monitor
//! and runs it until the operator stops it.

use anyhow::{Context, Result};
use clap::ArgMatches;
use colored::Colorize;

use crate::core::{Capabilities, MonitorConfig, ProcessMonitor, StopSignal};
use crate::platform::{
    install_ctrlc_handler, join_key_listener, spawn_key_listener, FileKillLog, SystemProcesses,
};
use crate::ui::{print_config, print_event, print_summary, print_usage};

/// Execute the watch command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let args: Vec<String> = matches
        .get_many::<String>("args")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    print_usage();

    let mut config = MonitorConfig::from_args(&args)?;
    if let Some(path) = matches.get_one::<String>("log-file") {
        config = config.with_log_path(path);
    }

    print_config(&config);
    println!();

    let stop = StopSignal::new();
    install_ctrlc_handler(stop.clone()).context("Failed to install stop handler")?;

    let listener = if matches.get_flag("no-keyboard") {
        None
    } else {
        spawn_key_listener(stop.clone())
    };

    if listener.is_some() {
        println!("{}", "Press 'q' or Ctrl+C to stop".dimmed());
    } else {
        println!("{}", "Press Ctrl+C to stop".dimmed());
    }
    println!();

    let processes = SystemProcesses::new();
    let caps = Capabilities {
        lookup: &processes,
        killer: &processes,
        log: &FileKillLog,
    };

    let monitor = ProcessMonitor::new(config, caps);
    let summary = monitor.run(&stop, |event| print_event(event, monitor.config()));

    // Let the key listener notice the stop and exit
    stop.signal();
    if let Some(handle) = listener {
        join_key_listener(handle);
    }

    println!("{}", "Exiting...".yellow().bold());
    print_summary(&summary);

    Ok(())
}
