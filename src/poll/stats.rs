/// Running totals for one poll run.
///
/// `total` is bumped when an attempt starts and exactly one of `success` or
/// `failure` when it resolves, so `success + failure <= total` always holds
/// and the two are equal between attempts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PollStats {
    total: u64,
    success: u64,
    failure: u64,
}

impl PollStats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            total: 0,
            success: 0,
            failure: 0,
        }
    }

    /// Starts an attempt and returns its 1-based sequence number.
    pub const fn begin_attempt(&mut self) -> u64 {
        self.total = self.total.saturating_add(1);
        self.total
    }

    pub const fn record_success(&mut self) {
        self.success = self.success.saturating_add(1);
    }

    pub const fn record_failure(&mut self) {
        self.failure = self.failure.saturating_add(1);
    }

    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    #[must_use]
    pub const fn success(&self) -> u64 {
        self.success
    }

    #[must_use]
    pub const fn failure(&self) -> u64 {
        self.failure
    }
}
