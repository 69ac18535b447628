//! Relay selection and failover for cross-origin acquisition.
//!
//! The source page cannot be fetched directly from every network position, so
//! requests are routed through a fixed ordered list of public relay
//! endpoints. The router remembers which relay last succeeded (one shared
//! atomic index) and starts its probe there on the next call; a success
//! elsewhere moves the index again, so no relay is ever permanently excluded.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("http error: {0}")]
    Http(String),
}

#[derive(Debug, Error)]
pub enum DeliveryError {
    #[error("all {attempts} relay endpoints failed, last error: {last}")]
    RelaysExhausted {
        attempts: usize,
        #[source]
        last: TransportError,
    },
}

pub struct TransportResponse {
    pub status: u16,
    pub body: String,
}

/// Seam between the router and the network, so tests can inject scripted
/// transports instead of touching real relays.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError>;
}

fn default_encode_target() -> bool {
    true
}

/// One relay endpoint: a URL-rewriting prefix template plus how the target is
/// embedded and whether the response body arrives wrapped in a JSON envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelayEndpoint {
    pub name: String,
    /// Prefix the target URL is appended to.
    pub prefix: String,
    /// Percent-encode the target before appending (most relays require it).
    #[serde(default = "default_encode_target")]
    pub encode_target: bool,
    /// JSON field holding the real body, e.g. allorigins wraps responses in
    /// `{"contents": ...}`.
    #[serde(default)]
    pub envelope_field: Option<String>,
}

impl RelayEndpoint {
    pub fn new(name: &str, prefix: &str) -> Self {
        Self {
            name: name.to_string(),
            prefix: prefix.to_string(),
            encode_target: true,
            envelope_field: None,
        }
    }

    pub fn with_envelope(mut self, field: &str) -> Self {
        self.envelope_field = Some(field.to_string());
        self
    }

    /// Rewrite a target URL through this relay's template.
    pub fn rewrite(&self, target_url: &str) -> String {
        if self.encode_target {
            let encoded: String =
                url::form_urlencoded::byte_serialize(target_url.as_bytes()).collect();
            format!("{}{}", self.prefix, encoded)
        } else {
            format!("{}{}", self.prefix, target_url)
        }
    }

    fn unwrap_body(&self, body: String) -> String {
        if let Some(field) = &self.envelope_field {
            if let Ok(value) = serde_json::from_str::<serde_json::Value>(&body) {
                if let Some(inner) = value.get(field).and_then(|v| v.as_str()) {
                    return inner.to_string();
                }
            }
        }
        body
    }
}

/// The relay chain the original deployment shipped with.
pub fn default_relay_endpoints() -> Vec<RelayEndpoint> {
    vec![
        RelayEndpoint::new("allorigins", "https://api.allorigins.win/get?url=")
            .with_envelope("contents"),
        RelayEndpoint::new("corsproxy", "https://corsproxy.io/?"),
        RelayEndpoint::new("codetabs", "https://api.codetabs.com/v1/proxy?quest="),
    ]
}

/// Routes a target URL through the relay chain with sticky-success failover.
///
/// The preferred index is the only shared mutable state in the pipeline; it
/// is injected so callers control its lifetime and tests can observe it. A
/// relaxed atomic is enough: it is a single advisory integer.
pub struct RelayRouter {
    endpoints: Vec<RelayEndpoint>,
    preferred: Arc<AtomicUsize>,
    transport: Arc<dyn Transport>,
    attempt_timeout: Duration,
}

impl RelayRouter {
    pub fn new(
        endpoints: Vec<RelayEndpoint>,
        preferred: Arc<AtomicUsize>,
        transport: Arc<dyn Transport>,
        attempt_timeout: Duration,
    ) -> Self {
        Self {
            endpoints,
            preferred,
            transport,
            attempt_timeout,
        }
    }

    pub fn preferred_index(&self) -> usize {
        self.preferred.load(Ordering::Relaxed)
    }

    /// Deliver a GET for `target_url` through the relay chain and return the
    /// unwrapped response body.
    ///
    /// Endpoints are tried strictly in rotation order starting at the
    /// preferred index; the first 2xx response wins and updates the index.
    /// A timeout counts as a plain failure and the probe advances. There are
    /// no retries beyond one pass over the chain; retrying is the caller's
    /// decision.
    pub async fn deliver(&self, target_url: &str) -> Result<String, DeliveryError> {
        let count = self.endpoints.len();
        if count == 0 {
            return Err(DeliveryError::RelaysExhausted {
                attempts: 0,
                last: TransportError::Http("no relay endpoints configured".to_string()),
            });
        }

        let start = self.preferred.load(Ordering::Relaxed) % count;
        let mut last_error = None;

        for offset in 0..count {
            let index = (start + offset) % count;
            let endpoint = &self.endpoints[index];
            let relay_url = endpoint.rewrite(target_url);

            debug!(relay = %endpoint.name, "attempting relay delivery");

            match self.transport.get(&relay_url, self.attempt_timeout).await {
                Ok(response) if (200..300).contains(&response.status) => {
                    self.preferred.store(index, Ordering::Relaxed);
                    debug!(relay = %endpoint.name, status = response.status, "relay delivery succeeded");
                    return Ok(endpoint.unwrap_body(response.body));
                }
                Ok(response) => {
                    warn!(relay = %endpoint.name, status = response.status, "relay returned non-success status");
                    last_error = Some(TransportError::Http(format!(
                        "unexpected status {}",
                        response.status
                    )));
                }
                Err(error) => {
                    warn!(relay = %endpoint.name, %error, "relay delivery failed");
                    last_error = Some(error);
                }
            }
        }

        Err(DeliveryError::RelaysExhausted {
            attempts: count,
            last: last_error
                .unwrap_or_else(|| TransportError::Http("no attempt recorded".to_string())),
        })
    }
}

/// Production transport backed by reqwest.
///
/// The `Accept` header is owned here and cannot be overridden by callers:
/// extraction depends on receiving markup or JSON.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        let version = env!("CARGO_PKG_VERSION");
        let user_agent = format!("tunedock-cli v{} (https://github.com/musicdock/tunedock-cli)", version);

        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .expect("Failed to create HTTP client");

        Self { client }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, url: &str, timeout: Duration) -> Result<TransportResponse, TransportError> {
        let result = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "application/json, text/html, */*",
            )
            .timeout(timeout)
            .send()
            .await;

        match result {
            Ok(response) => {
                let status = response.status().as_u16();
                let body = response
                    .text()
                    .await
                    .map_err(|e| TransportError::Http(e.to_string()))?;
                Ok(TransportResponse { status, body })
            }
            Err(e) if e.is_timeout() => Err(TransportError::Timeout),
            Err(e) => Err(TransportError::Http(e.to_string())),
        }
    }
}
