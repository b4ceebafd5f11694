use std::io::Write;

use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use tokio::time::{Instant, sleep};
use tracing::{debug, info};

use crate::error::AppResult;
use crate::http::{GetRequest, Transport};
use crate::shutdown::ShutdownReceiver;

use super::{Attempt, PollConfig, PollStats};

/// Printed to the error stream when a shutdown signal ends the run.
const INTERRUPT_NOTICE: &str = "Interrupted by user.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The configured request count was reached.
    LimitReached,
    /// A shutdown signal arrived.
    Interrupted,
}

/// Where attempt lines go: successes to `out`, failures and notices to `err`.
pub struct LineSinks<O, E> {
    pub out: O,
    pub err: E,
}

impl<O: Write, E: Write> LineSinks<O, E> {
    pub const fn new(out: O, err: E) -> Self {
        Self { out, err }
    }

    fn success(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.out, "{}", line)?;
        self.out.flush()
    }

    fn failure(&mut self, line: &str) -> std::io::Result<()> {
        writeln!(self.err, "{}", line)?;
        self.err.flush()
    }
}

/// Runs the poll loop until the count limit is reached or `shutdown_rx`
/// fires.
///
/// Each attempt resolves to success or failure before the loop looks at the
/// shutdown signal again; a request cut short by shutdown is recorded as an
/// `Interrupted` failure.
///
/// # Errors
///
/// Returns an error only when an attempt line cannot be written.
pub async fn run_poll<T, O, E>(
    config: &PollConfig,
    transport: &T,
    stats: &mut PollStats,
    shutdown_rx: &mut ShutdownReceiver,
    sinks: &mut LineSinks<O, E>,
) -> AppResult<StopReason>
where
    T: Transport + ?Sized,
    O: Write,
    E: Write,
{
    info!(
        "Polling {} every {:?} (timeout {:?}, count {})",
        config.url(),
        config.interval(),
        config.timeout(),
        config
            .limit()
            .map_or_else(|| "unbounded".to_owned(), |limit| limit.to_string())
    );

    loop {
        if limit_reached(config, stats) {
            return Ok(StopReason::LimitReached);
        }
        if shutdown_requested(shutdown_rx) {
            return interrupted(sinks);
        }

        let sequence = stats.begin_attempt();
        let started_at = Instant::now();
        let request = GetRequest {
            url: config.url(),
            headers: config.header_map(),
            timeout: config.timeout(),
            verify_tls: config.verify_tls(),
        };

        let attempt = tokio::select! {
            biased;
            result = transport.issue_get(request) => Attempt::resolve(sequence, started_at, result),
            () = wait_for_shutdown(shutdown_rx) => Attempt::interrupted(sequence, started_at),
        };

        if attempt.is_success() {
            stats.record_success();
        } else {
            stats.record_failure();
        }
        debug!(
            "Attempt {} resolved after {:?}: success={} total={} failures={}",
            attempt.sequence,
            attempt.elapsed(),
            attempt.is_success(),
            stats.total(),
            stats.failure()
        );

        let line = attempt.line(config.raw());
        if attempt.is_success() {
            sinks.success(&line)?;
        } else {
            sinks.failure(&line)?;
        }

        if attempt.was_interrupted() {
            return interrupted(sinks);
        }
        if limit_reached(config, stats) {
            return Ok(StopReason::LimitReached);
        }

        let interval = config.interval();
        if !interval.is_zero() {
            tokio::select! {
                biased;
                () = wait_for_shutdown(shutdown_rx) => return interrupted(sinks),
                () = sleep(interval) => {}
            }
        }
    }
}

fn limit_reached(config: &PollConfig, stats: &PollStats) -> bool {
    config.limit().is_some_and(|limit| stats.total() >= limit)
}

fn interrupted<O: Write, E: Write>(sinks: &mut LineSinks<O, E>) -> AppResult<StopReason> {
    sinks.failure(INTERRUPT_NOTICE)?;
    Ok(StopReason::Interrupted)
}

fn shutdown_requested(shutdown_rx: &mut ShutdownReceiver) -> bool {
    match shutdown_rx.try_recv() {
        Ok(()) | Err(TryRecvError::Lagged(_)) => true,
        Err(TryRecvError::Empty | TryRecvError::Closed) => false,
    }
}

/// Resolves once shutdown is signalled. A closed channel never resolves, so
/// a run without a signal source keeps going until its count is reached.
async fn wait_for_shutdown(shutdown_rx: &mut ShutdownReceiver) {
    match shutdown_rx.recv().await {
        Ok(()) | Err(RecvError::Lagged(_)) => {}
        Err(RecvError::Closed) => std::future::pending::<()>().await,
    }
}
