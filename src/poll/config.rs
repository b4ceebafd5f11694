use std::time::Duration;

use reqwest::{Url, header::HeaderMap};

use crate::args::PollArgs;
use crate::error::{AppResult, HttpError};
use crate::http::HeaderSet;

const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(1);

/// Validated settings for one poll run. Built once, never changed.
#[derive(Debug, Clone)]
pub struct PollConfig {
    url: Url,
    interval: Duration,
    timeout: Duration,
    count: u64,
    header_map: HeaderMap,
    verify_tls: bool,
    raw: bool,
}

impl PollConfig {
    /// Creates a config for `url` with default interval, timeout, and an
    /// unbounded count.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL does not parse or is not http(s).
    pub fn new(url: &str) -> Result<Self, HttpError> {
        let parsed = Url::parse(url).map_err(|err| HttpError::InvalidUrl {
            url: url.to_owned(),
            source: err,
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(HttpError::UnsupportedScheme {
                    scheme: other.to_owned(),
                });
            }
        }
        Ok(Self {
            url: parsed,
            interval: DEFAULT_INTERVAL,
            timeout: DEFAULT_TIMEOUT,
            count: 0,
            header_map: HeaderMap::new(),
            verify_tls: true,
            raw: false,
        })
    }

    /// Builds the config from parsed (and config-file merged) CLI arguments.
    ///
    /// # Errors
    ///
    /// Returns an error when the URL or a header cannot be used in a request.
    pub fn from_args(args: &PollArgs) -> AppResult<Self> {
        let config = Self::new(&args.url)?
            .with_interval(args.interval)
            .with_timeout(args.timeout)
            .with_count(args.count)
            .with_verify_tls(!args.insecure)
            .with_raw(args.raw)
            .with_headers(&HeaderSet::from_pairs(args.headers.iter().cloned()))?;
        Ok(config)
    }

    #[must_use]
    pub const fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// A zero timeout is ignored; requests always carry a positive deadline.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        if !timeout.is_zero() {
            self.timeout = timeout;
        }
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    #[must_use]
    pub const fn with_verify_tls(mut self, verify_tls: bool) -> Self {
        self.verify_tls = verify_tls;
        self
    }

    #[must_use]
    pub const fn with_raw(mut self, raw: bool) -> Self {
        self.raw = raw;
        self
    }

    /// # Errors
    ///
    /// Returns an error when a header name or value is not valid HTTP.
    pub fn with_headers(mut self, headers: &HeaderSet) -> Result<Self, HttpError> {
        self.header_map = headers.to_header_map()?;
        Ok(self)
    }

    #[must_use]
    pub const fn url(&self) -> &Url {
        &self.url
    }

    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// `None` when the run is unbounded.
    #[must_use]
    pub const fn limit(&self) -> Option<u64> {
        if self.count == 0 {
            None
        } else {
            Some(self.count)
        }
    }

    pub(crate) const fn header_map(&self) -> &HeaderMap {
        &self.header_map
    }

    #[must_use]
    pub const fn verify_tls(&self) -> bool {
        self.verify_tls
    }

    #[must_use]
    pub const fn raw(&self) -> bool {
        self.raw
    }
}
