// UI and formatting module

pub mod banner;
pub mod formatters;

// Re-export commonly used items for cleaner imports
pub use banner::{print_config, print_event, print_summary, print_usage};
pub use formatters::{format_minutes, format_timestamp, pad_right};
