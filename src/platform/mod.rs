// Platform-specific code module

pub mod fs;
pub mod processes;
pub mod stop_requests;

// Re-exports for cleaner imports
pub use fs::FileKillLog;
pub use processes::SystemProcesses;
pub use stop_requests::{install_ctrlc_handler, join_key_listener, spawn_key_listener};
