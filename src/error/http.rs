use std::error::Error as StdError;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Unsupported URL scheme '{scheme}'. Use http or https.")]
    UnsupportedScheme { scheme: String },
    #[error("Invalid header name '{name}': {source}")]
    InvalidHeaderName {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderName,
    },
    #[error("Invalid header value for '{name}': {source}")]
    InvalidHeaderValue {
        name: String,
        #[source]
        source: reqwest::header::InvalidHeaderValue,
    },
    #[error("Failed to build HTTP client: {source}")]
    BuildClient {
        #[source]
        source: reqwest::Error,
    },
}

/// Broad class of a failed exchange, printed as the error category label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    Redirect,
    Body,
    Decode,
    Builder,
    Request,
    Interrupted,
}

impl TransportErrorKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            TransportErrorKind::Timeout => "Timeout",
            TransportErrorKind::Connect => "Connect",
            TransportErrorKind::Redirect => "Redirect",
            TransportErrorKind::Body => "Body",
            TransportErrorKind::Decode => "Decode",
            TransportErrorKind::Builder => "Builder",
            TransportErrorKind::Request => "Request",
            TransportErrorKind::Interrupted => "Interrupted",
        }
    }
}

impl fmt::Display for TransportErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// An HTTP exchange that never produced a response.
#[derive(Debug, Error)]
#[error("{kind}: {description}")]
pub struct TransportError {
    pub kind: TransportErrorKind,
    pub description: String,
}

impl TransportError {
    #[must_use]
    pub fn new(kind: TransportErrorKind, description: impl Into<String>) -> Self {
        Self {
            kind,
            description: description.into(),
        }
    }

    #[must_use]
    pub fn interrupted() -> Self {
        Self::new(
            TransportErrorKind::Interrupted,
            "request cancelled by shutdown",
        )
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        let kind = if err.is_timeout() {
            TransportErrorKind::Timeout
        } else if err.is_connect() {
            TransportErrorKind::Connect
        } else if err.is_redirect() {
            TransportErrorKind::Redirect
        } else if err.is_body() {
            TransportErrorKind::Body
        } else if err.is_decode() {
            TransportErrorKind::Decode
        } else if err.is_builder() {
            TransportErrorKind::Builder
        } else {
            TransportErrorKind::Request
        };
        Self::new(kind, describe_chain(&err))
    }
}

/// Joins an error and its sources into one line; reqwest hides the useful
/// detail (refused, DNS, certificate) in the source chain.
fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut description = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !description.contains(&text) {
            description.push_str(": ");
            description.push_str(&text);
        }
        source = inner.source();
    }
    description
}
