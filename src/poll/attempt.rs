use std::time::Duration;

use tokio::time::Instant;

use crate::error::{TransportError, TransportErrorKind};
use crate::http::HttpReply;
use crate::output::{format_body, format_millis};

#[derive(Debug)]
pub enum AttemptOutcome {
    Success {
        status: u16,
        latency: Duration,
        body: String,
    },
    Failure(TransportError),
}

/// One request/response (or request/error) cycle.
#[derive(Debug)]
pub struct Attempt {
    pub sequence: u64,
    pub started_at: Instant,
    pub outcome: AttemptOutcome,
}

impl Attempt {
    /// Classifies a finished exchange. Latency runs from `started_at` to now.
    #[must_use]
    pub fn resolve(
        sequence: u64,
        started_at: Instant,
        result: Result<HttpReply, TransportError>,
    ) -> Self {
        let outcome = match result {
            Ok(reply) => AttemptOutcome::Success {
                status: reply.status,
                latency: started_at.elapsed(),
                body: reply.body,
            },
            Err(err) => AttemptOutcome::Failure(err),
        };
        Self {
            sequence,
            started_at,
            outcome,
        }
    }

    /// An attempt whose request was cut short by shutdown.
    #[must_use]
    pub fn interrupted(sequence: u64, started_at: Instant) -> Self {
        Self {
            sequence,
            started_at,
            outcome: AttemptOutcome::Failure(TransportError::interrupted()),
        }
    }

    /// Time since the request was issued; covers failures, which carry no
    /// latency of their own.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }

    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.outcome, AttemptOutcome::Success { .. })
    }

    #[must_use]
    pub fn was_interrupted(&self) -> bool {
        matches!(
            &self.outcome,
            AttemptOutcome::Failure(err) if err.kind == TransportErrorKind::Interrupted
        )
    }

    /// The line printed for this attempt: `[0001] 200 12.3ms {...}` on
    /// success, `[0001] ERROR Timeout: ...` on failure.
    #[must_use]
    pub fn line(&self, raw: bool) -> String {
        match &self.outcome {
            AttemptOutcome::Success {
                status,
                latency,
                body,
            } => format!(
                "[{:04}] {} {}ms {}",
                self.sequence,
                status,
                format_millis(*latency),
                format_body(body, raw)
            ),
            AttemptOutcome::Failure(err) => format!(
                "[{:04}] ERROR {}: {}",
                self.sequence,
                err.kind,
                err.description
            ),
        }
    }
}
