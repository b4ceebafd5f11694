//! Rendering of attempt lines: response bodies and latency figures.
mod body;
mod units;

pub use body::format_body;
pub use units::{format_millis, format_seconds};
