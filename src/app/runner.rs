use std::process::ExitCode;

use tokio::time::Instant;
use tracing::{info, warn};

use crate::{
    error::AppResult,
    http::ReqwestTransport,
    poll::{LineSinks, PollConfig, PollStats, StopReason, run_poll},
    shutdown::shutdown_channel,
    shutdown_handlers::setup_signal_shutdown_handler,
};

use super::summary;

/// Polls until the count is reached or the process is interrupted, then
/// prints the summary and returns the exit status.
///
/// # Errors
///
/// Returns an error when the HTTP client cannot be built or output cannot be
/// written.
pub(crate) async fn run_local(config: PollConfig) -> AppResult<ExitCode> {
    let transport = ReqwestTransport::prepared(config.verify_tls())?;
    let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let mut stats = PollStats::new();
    let mut sinks = LineSinks::new(std::io::stdout(), std::io::stderr());
    let run_start = Instant::now();

    let result = run_poll(
        &config,
        &transport,
        &mut stats,
        &mut shutdown_rx,
        &mut sinks,
    )
    .await;
    let elapsed = run_start.elapsed();

    drop(shutdown_tx.send(()));
    if let Err(err) = signal_handle.await {
        warn!("Signal handler task failed: {}", err);
    }
    drop(transport);

    match result? {
        StopReason::LimitReached => info!("Request limit reached."),
        StopReason::Interrupted => info!("Stopped by shutdown signal."),
    }

    summary::print_summary(&mut sinks.out, &stats, elapsed)?;
    Ok(summary::exit_status(&stats))
}
