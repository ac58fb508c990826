// Command handlers module
pub mod watch;

// Re-exports for cleaner imports
pub use watch::execute as watch;
