// Console output for the watch command

use colored::Colorize;

use super::formatters::{format_minutes, pad_right};
use crate::core::{MonitorConfig, MonitorEvent, MonitorSummary};
use crate::error::USAGE;

const VALUE_WIDTH: usize = 15;

pub fn print_usage() {
    println!("{}", format!(" | Usage: {}", USAGE).white().bold());
    println!("{}", " | Example: procwatch notepad 5 1".dimmed());
    println!("{}", " ------------------------------------------ ".dimmed());
}

pub fn print_config(config: &MonitorConfig) {
    let rows = [
        ("Process Name:     ", config.process_name().to_string()),
        ("Max Lifetime(min):", config.max_lifetime_minutes().to_string()),
        ("Frequency(min):   ", config.poll_interval_minutes().to_string()),
    ];

    for (label, value) in rows {
        println!(
            " | {} [{}] |",
            label.white(),
            pad_right(&value, VALUE_WIDTH).cyan()
        );
    }
    println!(
        "{}",
        format!(" | Kill log: {}", config.log_path().display()).dimmed()
    );
}

/// Print one monitor event the way the operator should see it
pub fn print_event(event: &MonitorEvent, config: &MonitorConfig) {
    match event {
        MonitorEvent::Killed(record) => {
            println!("{}", record.line().green());
        }
        MonitorEvent::LogFailed { record, reason } => {
            println!("{}", record.line().green());
            println!(
                "{} {}",
                "Failed to write to log file:".red().bold(),
                reason.red()
            );
        }
        MonitorEvent::KillFailed { process, reason } => {
            println!(
                "{} '{}' (pid {}): {}",
                "Failed to kill process".red().bold(),
                process.name,
                process.pid,
                reason.red()
            );
        }
        MonitorEvent::WithinLimit { process, runtime } => {
            println!(
                "{}",
                format!(
                    "Runtime of process '{}' (pid {}) is within the limit: {} < {} minutes",
                    process.name,
                    process.pid,
                    format_minutes(*runtime),
                    config.max_lifetime_minutes()
                )
                .dimmed()
            );
        }
    }
}

pub fn print_summary(summary: &MonitorSummary) {
    let totals = &summary.totals;

    println!();
    println!("{}", "─".repeat(50));
    println!("{}", "Monitor Summary".white().bold());
    println!("{}", "─".repeat(50));
    println!("{} {}", "Polls:".white(), summary.cycles.to_string().yellow().bold());
    println!("{} {}", "Killed:".green().bold(), totals.killed.to_string().yellow().bold());

    if totals.kill_failures > 0 {
        println!(
            "{} {}",
            "Failed kills:".red().bold(),
            totals.kill_failures.to_string().red()
        );
    }
    if totals.log_failures > 0 {
        println!(
            "{} {} (processes were killed but not logged)",
            "Failed log writes:".red().bold(),
            totals.log_failures.to_string().red()
        );
    }
    println!();
}
