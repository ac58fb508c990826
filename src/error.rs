use std::io;
use thiserror::Error;

/// Invocation shape shown in argument errors
pub const USAGE: &str = "procwatch <process_name> <max_lifetime_minutes> <frequency_minutes>";

/// Custom error type for procwatch
#[derive(Error, Debug)]
pub enum WatchError {
    #[error("Please pass correct number of arguments: procwatch <process_name> <max_lifetime_minutes> <frequency_minutes>")]
    ArgumentCount,

    #[error("Please pass arguments in a format: procwatch <string> <int> <int>")]
    ArgumentFormat,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Process {pid} is no longer running")]
    ProcessVanished { pid: u32 },

    #[error("Failed to kill process {pid}: {reason}")]
    KillFailed { pid: u32, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Signal handler error: {0}")]
    Signal(String),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for procwatch
pub type Result<T> = std::result::Result<T, WatchError>;

impl WatchError {
    /// Create an invalid configuration error
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        WatchError::InvalidConfig(msg.into())
    }

    /// Create a kill failure error
    pub fn kill_failed<S: Into<String>>(pid: u32, reason: S) -> Self {
        WatchError::KillFailed {
            pid,
            reason: reason.into(),
        }
    }

    pub fn signal<S: Into<String>>(msg: S) -> Self {
        WatchError::Signal(msg.into())
    }

    pub fn terminal<S: Into<String>>(msg: S) -> Self {
        WatchError::Terminal(msg.into())
    }
}
