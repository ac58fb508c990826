// Core business logic module

pub mod cancel;
pub mod capabilities;
pub mod config;
pub mod monitor;

// Re-export commonly used items
pub use cancel::StopSignal;
pub use capabilities::{CancellationSource, KillLog, ProcessHandle, ProcessKiller, ProcessLookup};
pub use config::{MonitorConfig, DEFAULT_LOG_FILE};
pub use monitor::{Capabilities, CycleStats, KillRecord, MonitorEvent, MonitorSummary, ProcessMonitor};
