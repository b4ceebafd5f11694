use std::time::Duration;

/// Milliseconds with one decimal place, e.g. `12.3`.
#[must_use]
pub fn format_millis(duration: Duration) -> String {
    format_tenths(duration.as_micros().saturating_add(50) / 100)
}

/// Seconds with one decimal place, e.g. `4.0`.
#[must_use]
pub fn format_seconds(duration: Duration) -> String {
    format_tenths(duration.as_millis().saturating_add(50) / 100)
}

fn format_tenths(tenths: u128) -> String {
    format!("{}.{}", tenths / 10, tenths % 10)
}
