//! The poll loop: one GET at a time, classified, counted, and printed.
mod attempt;
mod config;
mod engine;
mod stats;

#[cfg(test)]
mod tests;

pub use attempt::{Attempt, AttemptOutcome};
pub use config::PollConfig;
pub use engine::{LineSinks, StopReason, run_poll};
pub use stats::PollStats;
