use super::*;
use crate::error::{TransportError, TransportErrorKind};
use crate::http::{GetRequest, HeaderSet, HttpReply, Transport};
use crate::shutdown::{ShutdownSender, shutdown_channel};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

const TEST_URL: &str = "http://localhost:9001/color";
const RUN_DEADLINE: Duration = Duration::from_secs(5);

enum Step {
    Reply(u16, &'static str),
    Fail(TransportErrorKind, &'static str),
    Hang,
}

#[derive(Debug)]
struct SeenRequest {
    url: String,
    headers: Vec<(String, String)>,
    timeout: Duration,
    verify_tls: bool,
}

/// Plays back `steps` in order, then answers `200 {"color":"blue"}`.
struct ScriptedTransport {
    steps: Mutex<VecDeque<Step>>,
    seen: Mutex<Vec<SeenRequest>>,
    calls: AtomicU64,
    shutdown_on_call: Option<(u64, ShutdownSender)>,
}

impl ScriptedTransport {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: Mutex::new(steps.into()),
            seen: Mutex::new(Vec::new()),
            calls: AtomicU64::new(0),
            shutdown_on_call: None,
        }
    }

    fn with_shutdown_on_call(mut self, call: u64, shutdown_tx: ShutdownSender) -> Self {
        self.shutdown_on_call = Some((call, shutdown_tx));
        self
    }

    fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for ScriptedTransport {
    async fn issue_get(&self, request: GetRequest<'_>) -> Result<HttpReply, TransportError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst).saturating_add(1);
        if let Ok(mut seen) = self.seen.lock() {
            seen.push(SeenRequest {
                url: request.url.to_string(),
                headers: request
                    .headers
                    .iter()
                    .map(|(name, value)| {
                        (
                            name.as_str().to_owned(),
                            value.to_str().unwrap_or_default().to_owned(),
                        )
                    })
                    .collect(),
                timeout: request.timeout,
                verify_tls: request.verify_tls,
            });
        }
        if let Some((trigger, shutdown_tx)) = self.shutdown_on_call.as_ref()
            && *trigger == call
        {
            drop(shutdown_tx.send(()));
        }
        let step = self.steps.lock().ok().and_then(|mut steps| steps.pop_front());
        match step {
            Some(Step::Reply(status, body)) => Ok(HttpReply {
                status,
                body: body.to_owned(),
            }),
            Some(Step::Fail(kind, description)) => Err(TransportError::new(kind, description)),
            Some(Step::Hang) => {
                std::future::pending::<()>().await;
                Err(TransportError::new(TransportErrorKind::Request, "unreachable"))
            }
            None => Ok(HttpReply {
                status: 200,
                body: "{\"color\":\"blue\"}".to_owned(),
            }),
        }
    }
}

struct RunResult {
    stop: StopReason,
    stats: PollStats,
    stdout: Vec<String>,
    stderr: Vec<String>,
}

fn run_async_test<F>(future: F) -> Result<(), String>
where
    F: Future<Output = Result<(), String>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| format!("Failed to build runtime: {}", err))?;
    runtime.block_on(future)
}

fn config(count: u64, interval: Duration) -> Result<PollConfig, String> {
    PollConfig::new(TEST_URL)
        .map(|config| config.with_count(count).with_interval(interval))
        .map_err(|err| err.to_string())
}

fn lines(bytes: Vec<u8>) -> Result<Vec<String>, String> {
    let text = String::from_utf8(bytes).map_err(|err| err.to_string())?;
    Ok(text.lines().map(str::to_owned).collect())
}

async fn run_with(
    config: &PollConfig,
    transport: &ScriptedTransport,
    shutdown_rx: &mut crate::shutdown::ShutdownReceiver,
) -> Result<RunResult, String> {
    let mut stats = PollStats::new();
    let mut sinks = LineSinks::new(Vec::new(), Vec::new());
    let stop = tokio::time::timeout(
        RUN_DEADLINE,
        run_poll(config, transport, &mut stats, shutdown_rx, &mut sinks),
    )
    .await
    .map_err(|err| format!("poll loop did not stop: {}", err))?
    .map_err(|err| err.to_string())?;
    Ok(RunResult {
        stop,
        stats,
        stdout: lines(sinks.out)?,
        stderr: lines(sinks.err)?,
    })
}

fn check_invariant(stats: &PollStats) -> Result<(), String> {
    if stats.success().saturating_add(stats.failure()) != stats.total() {
        return Err(format!("Broken stats invariant: {:?}", stats));
    }
    Ok(())
}

fn sequence_of(line: &str) -> Option<u64> {
    line.strip_prefix('[')
        .and_then(|rest| rest.get(..4))
        .and_then(|digits| digits.parse().ok())
}

#[test]
fn bounded_run_issues_exactly_count_requests() -> Result<(), String> {
    run_async_test(async {
        let config = config(3, Duration::ZERO)?;
        let transport = ScriptedTransport::new(Vec::new());
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        check_invariant(&result.stats)?;
        if result.stop != StopReason::LimitReached {
            return Err(format!("Unexpected stop reason: {:?}", result.stop));
        }
        if result.stats.total() != 3 || result.stats.success() != 3 || transport.calls() != 3 {
            return Err(format!(
                "Unexpected totals: {:?}, calls {}",
                result.stats,
                transport.calls()
            ));
        }
        if !result.stderr.is_empty() {
            return Err(format!("Unexpected stderr: {:?}", result.stderr));
        }
        Ok(())
    })
}

#[test]
fn success_line_has_sequence_status_latency_and_body() -> Result<(), String> {
    run_async_test(async {
        let config = config(1, Duration::ZERO)?;
        let transport = ScriptedTransport::new(vec![Step::Reply(200, "{ \"color\": \"blue\" }")]);
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        let line = result
            .stdout
            .first()
            .ok_or_else(|| "Missing success line".to_owned())?;
        let parts: Vec<&str> = line.splitn(4, ' ').collect();
        match parts.as_slice() {
            ["[0001]", "200", latency, "{\"color\":\"blue\"}"] => {
                let millis = latency
                    .strip_suffix("ms")
                    .ok_or_else(|| format!("Latency without unit: {}", latency))?;
                let (whole, tenths) = millis
                    .split_once('.')
                    .ok_or_else(|| format!("Latency without decimal: {}", latency))?;
                if whole.parse::<u64>().is_err() || tenths.len() != 1 {
                    return Err(format!("Malformed latency: {}", latency));
                }
                Ok(())
            }
            _ => Err(format!("Unexpected success line: {}", line)),
        }
    })
}

#[test]
fn raw_mode_prints_body_verbatim() -> Result<(), String> {
    run_async_test(async {
        let config = config(1, Duration::ZERO)?.with_raw(true);
        let transport = ScriptedTransport::new(vec![Step::Reply(200, " { \"color\": \"blue\" }\n")]);
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        match result.stdout.first() {
            Some(line) if line.ends_with("ms { \"color\": \"blue\" }") => Ok(()),
            other => Err(format!("Unexpected raw line: {:?}", other)),
        }
    })
}

#[test]
fn server_errors_count_as_success() -> Result<(), String> {
    run_async_test(async {
        let config = config(2, Duration::ZERO)?;
        let transport = ScriptedTransport::new(vec![
            Step::Reply(503, "unavailable"),
            Step::Reply(404, ""),
        ]);
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        check_invariant(&result.stats)?;
        if result.stats.success() != 2 || result.stats.failure() != 0 {
            return Err(format!("Unexpected stats: {:?}", result.stats));
        }
        let second = result.stdout.get(1).map(String::as_str).unwrap_or_default();
        if !second.starts_with("[0002] 404 ") || !second.ends_with(" <non-JSON body>") {
            return Err(format!("Unexpected second line: {}", second));
        }
        Ok(())
    })
}

#[test]
fn timeout_is_recorded_as_failure() -> Result<(), String> {
    run_async_test(async {
        let config = config(1, Duration::ZERO)?;
        let transport = ScriptedTransport::new(vec![Step::Fail(
            TransportErrorKind::Timeout,
            "operation timed out",
        )]);
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        check_invariant(&result.stats)?;
        if result.stats.success() != 0 || result.stats.failure() != 1 {
            return Err(format!("Unexpected stats: {:?}", result.stats));
        }
        if !result.stdout.is_empty() {
            return Err(format!("Unexpected stdout: {:?}", result.stdout));
        }
        match result.stderr.as_slice() {
            [line] if line == "[0001] ERROR Timeout: operation timed out" => Ok(()),
            other => Err(format!("Unexpected stderr: {:?}", other)),
        }
    })
}

#[test]
fn mixed_outcomes_keep_contiguous_sequence_numbers() -> Result<(), String> {
    run_async_test(async {
        let config = config(5, Duration::from_millis(1))?;
        let transport = ScriptedTransport::new(vec![
            Step::Reply(200, "\"blue\""),
            Step::Fail(TransportErrorKind::Connect, "connection refused"),
            Step::Reply(200, "\"green\""),
            Step::Fail(TransportErrorKind::Timeout, "timed out"),
            Step::Fail(TransportErrorKind::Connect, "connection refused"),
        ]);
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        check_invariant(&result.stats)?;
        if result.stats.success() != 2 || result.stats.failure() != 3 {
            return Err(format!("Unexpected stats: {:?}", result.stats));
        }
        let ok_seq: Vec<Option<u64>> = result.stdout.iter().map(|line| sequence_of(line)).collect();
        let err_seq: Vec<Option<u64>> = result.stderr.iter().map(|line| sequence_of(line)).collect();
        if ok_seq != [Some(1), Some(3)] || err_seq != [Some(2), Some(4), Some(5)] {
            return Err(format!("Unexpected sequences: {:?} / {:?}", ok_seq, err_seq));
        }
        if result.stdout.get(1).map(String::as_str).is_none_or(|line| !line.ends_with(" green")) {
            return Err(format!("Unexpected stdout: {:?}", result.stdout));
        }
        Ok(())
    })
}

#[test]
fn request_carries_configured_headers_timeout_and_tls_flag() -> Result<(), String> {
    run_async_test(async {
        let headers = HeaderSet::from_pairs([("X-Env", "1"), ("X-Env", "2"), ("Accept", "*/*")]);
        let config = config(1, Duration::ZERO)?
            .with_timeout(Duration::from_millis(750))
            .with_verify_tls(false)
            .with_headers(&headers)
            .map_err(|err| err.to_string())?;
        let transport = ScriptedTransport::new(Vec::new());
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        run_with(&config, &transport, &mut shutdown_rx).await?;

        let seen = transport.seen.lock().map_err(|err| err.to_string())?;
        let request = seen.first().ok_or_else(|| "No request seen".to_owned())?;
        if request.url != TEST_URL {
            return Err(format!("Unexpected url: {}", request.url));
        }
        if request.timeout != Duration::from_millis(750) || request.verify_tls {
            return Err(format!("Unexpected request settings: {:?}", request));
        }
        let mut headers = request.headers.clone();
        headers.sort();
        if headers
            != [
                ("accept".to_owned(), "*/*".to_owned()),
                ("x-env".to_owned(), "2".to_owned()),
            ]
        {
            return Err(format!("Unexpected headers: {:?}", headers));
        }
        Ok(())
    })
}

#[test]
fn count_limit_skips_final_sleep() -> Result<(), String> {
    run_async_test(async {
        let config = config(1, Duration::from_secs(30))?;
        let transport = ScriptedTransport::new(Vec::new());
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let started = tokio::time::Instant::now();
        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        if started.elapsed() >= Duration::from_secs(5) {
            return Err("Loop slept after reaching its count".to_owned());
        }
        if result.stats.total() != 1 {
            return Err(format!("Unexpected stats: {:?}", result.stats));
        }
        Ok(())
    })
}

#[test]
fn positive_interval_pauses_between_attempts() -> Result<(), String> {
    run_async_test(async {
        let config = config(3, Duration::from_millis(100))?;
        let transport = ScriptedTransport::new(Vec::new());
        let (_shutdown_tx, mut shutdown_rx) = shutdown_channel();

        let started = tokio::time::Instant::now();
        let result = run_with(&config, &transport, &mut shutdown_rx).await?;
        let elapsed = started.elapsed();

        if result.stats.total() != 3 {
            return Err(format!("Unexpected stats: {:?}", result.stats));
        }
        // Two gaps between three attempts, no trailing sleep.
        if elapsed < Duration::from_millis(200) || elapsed >= Duration::from_millis(300) {
            return Err(format!("Unexpected run time: {:?}", elapsed));
        }
        Ok(())
    })
}

#[test]
fn attempt_latency_is_measured_from_its_start() -> Result<(), String> {
    run_async_test(async {
        let started_at = tokio::time::Instant::now();
        tokio::time::sleep(Duration::from_millis(20)).await;
        let attempt = Attempt::resolve(
            7,
            started_at,
            Ok(HttpReply {
                status: 204,
                body: String::new(),
            }),
        );

        match &attempt.outcome {
            AttemptOutcome::Success { latency, .. }
                if *latency >= Duration::from_millis(20) && *latency <= attempt.elapsed() => {}
            other => return Err(format!("Unexpected outcome: {:?}", other)),
        }
        if attempt.was_interrupted() || !attempt.line(false).starts_with("[0007] 204 ") {
            return Err(format!("Unexpected attempt: {:?}", attempt));
        }
        Ok(())
    })
}

#[test]
fn only_shutdown_marks_an_attempt_interrupted() -> Result<(), String> {
    let started_at = tokio::time::Instant::now();
    let timed_out = Attempt::resolve(
        1,
        started_at,
        Err(TransportError::new(TransportErrorKind::Timeout, "timed out")),
    );
    let cancelled = Attempt::interrupted(2, started_at);

    if timed_out.is_success() || timed_out.was_interrupted() {
        return Err(format!("Timeout misclassified: {:?}", timed_out));
    }
    if cancelled.is_success() || !cancelled.was_interrupted() {
        return Err(format!("Cancellation misclassified: {:?}", cancelled));
    }
    if cancelled.line(false) != "[0002] ERROR Interrupted: request cancelled by shutdown" {
        return Err(format!("Unexpected line: {}", cancelled.line(false)));
    }
    Ok(())
}

#[test]
fn unbounded_run_stops_on_shutdown_between_attempts() -> Result<(), String> {
    run_async_test(async {
        let config = config(0, Duration::from_millis(5))?;
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        let transport = ScriptedTransport::new(Vec::new()).with_shutdown_on_call(4, shutdown_tx);

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        check_invariant(&result.stats)?;
        if result.stop != StopReason::Interrupted {
            return Err(format!("Unexpected stop reason: {:?}", result.stop));
        }
        if result.stats.total() != 4 || result.stats.success() != 4 {
            return Err(format!("Unexpected stats: {:?}", result.stats));
        }
        if result.stderr.last().map(String::as_str) != Some("Interrupted by user.") {
            return Err(format!("Missing interrupt notice: {:?}", result.stderr));
        }
        Ok(())
    })
}

#[test]
fn shutdown_during_request_resolves_attempt_as_failure() -> Result<(), String> {
    run_async_test(async {
        let config = config(0, Duration::ZERO)?;
        let transport = ScriptedTransport::new(vec![Step::Reply(200, "ok"), Step::Hang]);
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(shutdown_tx.send(()));
        });

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        check_invariant(&result.stats)?;
        if result.stats.total() != 2 || result.stats.success() != 1 || result.stats.failure() != 1
        {
            return Err(format!("Unexpected stats: {:?}", result.stats));
        }
        match result.stderr.as_slice() {
            [failure, notice]
                if failure.starts_with("[0002] ERROR Interrupted:")
                    && notice == "Interrupted by user." =>
            {
                Ok(())
            }
            other => Err(format!("Unexpected stderr: {:?}", other)),
        }
    })
}

#[test]
fn shutdown_before_first_attempt_issues_nothing() -> Result<(), String> {
    run_async_test(async {
        let config = config(0, Duration::ZERO)?;
        let transport = ScriptedTransport::new(Vec::new());
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        shutdown_tx.send(()).map_err(|err| err.to_string())?;

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        if result.stop != StopReason::Interrupted || result.stats.total() != 0 {
            return Err(format!(
                "Unexpected result: {:?} {:?}",
                result.stop, result.stats
            ));
        }
        if transport.calls() != 0 || !result.stdout.is_empty() {
            return Err("Expected no requests".to_owned());
        }
        Ok(())
    })
}

#[test]
fn closed_shutdown_channel_does_not_stop_the_loop() -> Result<(), String> {
    run_async_test(async {
        let config = config(3, Duration::from_millis(1))?;
        let transport = ScriptedTransport::new(Vec::new());
        let (shutdown_tx, mut shutdown_rx) = shutdown_channel();
        drop(shutdown_tx);

        let result = run_with(&config, &transport, &mut shutdown_rx).await?;

        if result.stop != StopReason::LimitReached || result.stats.total() != 3 {
            return Err(format!(
                "Unexpected result: {:?} {:?}",
                result.stop, result.stats
            ));
        }
        Ok(())
    })
}

#[test]
fn stats_count_attempts_before_they_resolve() -> Result<(), String> {
    let mut stats = PollStats::new();
    let first = stats.begin_attempt();
    if first != 1 || stats.total() != 1 || stats.success() != 0 || stats.failure() != 0 {
        return Err(format!("Unexpected stats after begin: {:?}", stats));
    }
    stats.record_failure();
    let second = stats.begin_attempt();
    stats.record_success();
    if second != 2 || stats.success() != 1 || stats.failure() != 1 {
        return Err(format!("Unexpected stats after resolve: {:?}", stats));
    }
    check_invariant(&stats)
}

#[test]
fn config_rejects_bad_urls() -> Result<(), String> {
    for url in ["not a url", "ftp://example.test/file", "localhost:9001"] {
        if PollConfig::new(url).is_ok() {
            return Err(format!("Expected '{}' to be rejected", url));
        }
    }
    Ok(())
}

#[test]
fn config_limit_is_none_when_count_is_zero() -> Result<(), String> {
    let unbounded = config(0, Duration::ZERO)?;
    let bounded = config(9, Duration::ZERO)?;
    if unbounded.limit().is_some() || bounded.limit() != Some(9) {
        return Err("Unexpected limits".to_owned());
    }
    Ok(())
}
