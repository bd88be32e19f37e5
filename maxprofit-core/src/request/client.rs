//! Profit request client: query → GET with retry → `(status, JSON body)`.

use serde_json::Value;

use super::query::ProfitQuery;
use super::retry::{retry_with_backoff, RetryNotice, RetryPolicy, Sleeper, ThreadSleeper};
use super::transport::{FetchError, RawResponse, ReqwestTransport, Transport};
use crate::config::ServerConfig;
use crate::response::Reply;

/// Normalized response: status plus parsed JSON body.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpReply {
    pub status: u16,
    pub body: Value,
}

pub struct ProfitClient<T: Transport, S: Sleeper = ThreadSleeper> {
    transport: T,
    sleeper: S,
    base_url: String,
    policy: RetryPolicy,
}

impl ProfitClient<ReqwestTransport> {
    pub fn from_config(server: &ServerConfig) -> Result<Self, FetchError> {
        let transport = ReqwestTransport::new(server.request_timeout())?;
        Ok(Self::new(transport, server.base_url()))
    }
}

impl<T: Transport> ProfitClient<T> {
    pub fn new(transport: T, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            sleeper: ThreadSleeper,
            base_url: base_url.into(),
            policy: RetryPolicy::default(),
        }
    }
}

impl<T: Transport, S: Sleeper> ProfitClient<T, S> {
    pub fn with_sleeper<S2: Sleeper>(self, sleeper: S2) -> ProfitClient<T, S2> {
        ProfitClient {
            transport: self.transport,
            sleeper,
            base_url: self.base_url,
            policy: self.policy,
        }
    }

    pub fn fetch(&self, query: &ProfitQuery) -> Result<HttpReply, FetchError> {
        self.fetch_with(query, |_| {})
    }

    /// Issue the query, retrying transient failures. `on_retry` hears about
    /// each backoff before it starts.
    pub fn fetch_with(
        &self,
        query: &ProfitQuery,
        mut on_retry: impl FnMut(&RetryNotice),
    ) -> Result<HttpReply, FetchError> {
        let url = query.url(&self.base_url);
        tracing::info!(symbol = %query.symbol, %url, "requesting max profit");

        let policy = &self.policy;
        let attempted = retry_with_backoff(
            policy,
            &self.sleeper,
            |_| self.transport.get(&url),
            |result| match result {
                Ok(resp) if policy.is_retryable_status(resp.status) => {
                    Some(format!("HTTP {}", resp.status))
                }
                Err(e) if e.is_transient() => Some(e.to_string()),
                _ => None,
            },
            |notice| {
                tracing::warn!(
                    attempt = notice.attempt,
                    delay_ms = notice.delay.as_millis() as u64,
                    cause = %notice.cause,
                    "retrying max profit request"
                );
                on_retry(notice);
            },
        );
        let raw = match attempted {
            Ok(raw) => raw,
            Err(e) => {
                tracing::warn!(error = %e, "max profit request failed");
                return Err(e);
            }
        };

        let reply = parse_body(raw)?;
        tracing::info!(status = reply.status, "max profit request completed");
        Ok(reply)
    }

    /// Fetch and decode in one step.
    pub fn request(
        &self,
        query: &ProfitQuery,
        on_retry: impl FnMut(&RetryNotice),
    ) -> Result<Reply, FetchError> {
        self.fetch_with(query, on_retry).map(Reply::decode)
    }
}

fn parse_body(raw: RawResponse) -> Result<HttpReply, FetchError> {
    let body = serde_json::from_str(&raw.body).map_err(|e| FetchError::InvalidJson {
        status: raw.status,
        reason: e.to_string(),
    })?;
    Ok(HttpReply {
        status: raw.status,
        body,
    })
}
