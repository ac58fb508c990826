use chrono::{DateTime, Local, TimeDelta};

/// Format a runtime as fractional minutes with two decimals ("6.00")
pub fn format_minutes(runtime: TimeDelta) -> String {
    format!("{:.2}", runtime.num_milliseconds() as f64 / 60_000.0)
}

/// Format timestamp in human-readable format (YYYY-MM-DD HH:MM:SS)
pub fn format_timestamp(time: DateTime<Local>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Left-align a value inside a fixed-width column, never truncating
pub fn pad_right(value: &str, width: usize) -> String {
    format!("{:<width$}", value, width = width)
}
