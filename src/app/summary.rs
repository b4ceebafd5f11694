use std::io::Write;
use std::process::ExitCode;
use std::time::Duration;

use crate::output::format_seconds;
use crate::poll::PollStats;

/// Exit status when at least one attempt got an HTTP response.
const EXIT_ANY_SUCCESS: u8 = 0;
/// Exit status when no attempt got an HTTP response, including empty runs.
const EXIT_NO_SUCCESS: u8 = 1;

pub(crate) fn summary_line(stats: &PollStats, elapsed: Duration) -> String {
    format!(
        "Stopped after {} request(s) in {}s - {} succeeded, {} failed.",
        stats.total(),
        format_seconds(elapsed),
        stats.success(),
        stats.failure()
    )
}

pub(crate) fn print_summary<W: Write>(
    out: &mut W,
    stats: &PollStats,
    elapsed: Duration,
) -> std::io::Result<()> {
    writeln!(out, "{}", summary_line(stats, elapsed))?;
    out.flush()
}

pub(crate) const fn exit_code(stats: &PollStats) -> u8 {
    if stats.success() > 0 {
        EXIT_ANY_SUCCESS
    } else {
        EXIT_NO_SUCCESS
    }
}

pub(crate) fn exit_status(stats: &PollStats) -> ExitCode {
    ExitCode::from(exit_code(stats))
}
