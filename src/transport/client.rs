//! HTTP transport backed by reqwest.
//!
//! # Responsibilities
//! - Send JSON requests with the configured timeouts
//! - Decode JSON response bodies
//! - Refuse hosts outside the configured domain list

use futures_util::future::{BoxFuture, FutureExt};
use serde_json::Value;
use std::time::Duration;
use url::Url;

use crate::config::TransportConfig;
use crate::transport::{Transport, TransportFailure, TransportRequest, TransportResponse};

/// Failure detail reported for hosts outside `allowed_hosts`.
pub const DOMAIN_LIST_FAILURE: &str = "url not in domain list";

/// Transport built on a shared `reqwest::Client`.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
    allowed_hosts: Vec<String>,
}

impl ReqwestTransport {
    /// Create a transport from configuration.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportFailure> {
        let mut builder = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        if !config.system_proxy {
            builder = builder.no_proxy();
        }
        let client = builder
            .build()
            .map_err(|e| TransportFailure::new(format!("failed to build HTTP client: {}", e)))?;

        tracing::debug!(
            timeout_secs = config.timeout_secs,
            connect_timeout_secs = config.connect_timeout_secs,
            allowed_hosts = config.allowed_hosts.len(),
            "HTTP transport initialized"
        );

        Ok(Self {
            client,
            allowed_hosts: config.allowed_hosts.clone(),
        })
    }

    fn check_host(&self, url: &str) -> Result<(), TransportFailure> {
        if self.allowed_hosts.is_empty() {
            return Ok(());
        }

        let parsed = Url::parse(url)
            .map_err(|e| TransportFailure::new(format!("request:fail invalid url '{}': {}", url, e)))?;
        let host = parsed.host_str().unwrap_or_default();

        if self.allowed_hosts.iter().any(|allowed| allowed.eq_ignore_ascii_case(host)) {
            Ok(())
        } else {
            tracing::warn!(host = %host, "Request host is not in the allowed domain list");
            Err(TransportFailure::new(format!(
                "request:fail {} {}",
                DOMAIN_LIST_FAILURE, url
            )))
        }
    }

    async fn execute(&self, request: TransportRequest) -> Result<TransportResponse, TransportFailure> {
        self.check_host(&request.url)?;

        let mut builder = self.client.request(request.method.into(), &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportFailure::new(format!("request:fail {}", e)))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| TransportFailure::new(format!("request:fail reading body: {}", e)))?;

        let data = if text.is_empty() {
            Value::Null
        } else {
            match serde_json::from_str(&text) {
                Ok(value) => value,
                Err(_) => Value::String(text),
            }
        };

        Ok(TransportResponse { status, data })
    }
}

impl Transport for ReqwestTransport {
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse, TransportFailure>> {
        self.execute(request).boxed()
    }
}

impl std::fmt::Debug for ReqwestTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReqwestTransport")
            .field("allowed_hosts", &self.allowed_hosts)
            .finish()
    }
}
