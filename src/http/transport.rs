use std::sync::OnceLock;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url, header::HeaderMap};
use tracing::debug;

use crate::args::DEFAULT_USER_AGENT;
use crate::error::{HttpError, TransportError};

/// One GET exchange as the poll loop describes it to a transport.
#[derive(Debug, Clone, Copy)]
pub struct GetRequest<'req> {
    pub url: &'req Url,
    pub headers: &'req HeaderMap,
    pub timeout: Duration,
    pub verify_tls: bool,
}

/// A completed exchange. Any status code counts, including 4xx and 5xx.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub body: String,
}

/// Issues GET requests for the poll loop.
///
/// Implementations must honour `timeout` and `verify_tls`, and return
/// `Err` only when no HTTP response was obtained. `Interrupted` is reserved
/// for the poll loop's own shutdown handling.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn issue_get(&self, request: GetRequest<'_>) -> Result<HttpReply, TransportError>;
}

/// `reqwest` transport. Keeps one pooled client per TLS-verification mode;
/// the pools are released when the transport is dropped.
#[derive(Debug, Default)]
pub struct ReqwestTransport {
    verified: OnceLock<Client>,
    unverified: OnceLock<Client>,
}

impl ReqwestTransport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a transport with the client for `verify_tls` already built, so
    /// TLS backend problems surface before polling starts.
    ///
    /// # Errors
    ///
    /// Returns an error when the HTTP client cannot be built.
    pub fn prepared(verify_tls: bool) -> Result<Self, HttpError> {
        let transport = Self::new();
        let client =
            build_client(verify_tls).map_err(|err| HttpError::BuildClient { source: err })?;
        drop(transport.cell(verify_tls).set(client));
        Ok(transport)
    }

    const fn cell(&self, verify_tls: bool) -> &OnceLock<Client> {
        if verify_tls {
            &self.verified
        } else {
            &self.unverified
        }
    }

    fn client(&self, verify_tls: bool) -> Result<&Client, TransportError> {
        let cell = self.cell(verify_tls);
        if let Some(client) = cell.get() {
            return Ok(client);
        }
        let client = build_client(verify_tls)?;
        Ok(cell.get_or_init(|| client))
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn issue_get(&self, request: GetRequest<'_>) -> Result<HttpReply, TransportError> {
        let client = self.client(request.verify_tls)?;
        let response = client
            .get(request.url.clone())
            .headers(request.headers.clone())
            .timeout(request.timeout)
            .send()
            .await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!("GET {} -> {} ({} bytes)", request.url, status, body.len());
        Ok(HttpReply { status, body })
    }
}

fn build_client(verify_tls: bool) -> Result<Client, reqwest::Error> {
    let mut builder = Client::builder().user_agent(DEFAULT_USER_AGENT);
    if !verify_tls {
        builder = builder
            .danger_accept_invalid_certs(true)
            .danger_accept_invalid_hostnames(true);
    }
    builder.build()
}
