//! Request configuration and response envelope types.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::config::ClientConfig;
use crate::error::{RequestError, RequestResult};

/// Header carrying the session key.
pub const SESSION_HEADER: &str = "Session-Key";

/// Header carrying the per-call correlation ID.
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Envelope code signalling an expired or invalid session.
pub const SESSION_EXPIRED_CODE: i64 = 401;

/// Envelope codes treated as success.
pub const ACCEPTED_CODES: [i64; 6] = [0, 1000, 1001, 1002, 1003, 1004];

/// Per-call configuration. Unset fields fall back to the process-wide
/// configuration, then to built-in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// Overrides the configured base URL for this call.
    pub base_url: Option<String>,
    /// Headers layered over the configured default headers.
    pub headers: BTreeMap<String, String>,
    pub use_auth: Option<bool>,
    pub show_toast: Option<bool>,
    pub show_loading: Option<bool>,
    pub loading_title: Option<String>,
    /// Ask the session supplier for a fresh session.
    pub re_auth: Option<bool>,
}

impl RequestConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn use_auth(mut self, use_auth: bool) -> Self {
        self.use_auth = Some(use_auth);
        self
    }

    pub fn show_toast(mut self, show_toast: bool) -> Self {
        self.show_toast = Some(show_toast);
        self
    }

    pub fn show_loading(mut self, show_loading: bool) -> Self {
        self.show_loading = Some(show_loading);
        self
    }

    pub fn loading_title(mut self, title: impl Into<String>) -> Self {
        self.loading_title = Some(title.into());
        self
    }

    pub fn re_auth(mut self, re_auth: bool) -> Self {
        self.re_auth = Some(re_auth);
        self
    }
}

/// Settings of one attempt after merging every configuration layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResolvedConfig {
    pub base_url: String,
    pub headers: BTreeMap<String, String>,
    pub use_auth: bool,
    pub show_toast: bool,
    pub show_loading: bool,
    pub loading_title: String,
    pub re_auth: bool,
}

impl ResolvedConfig {
    /// Merge built-ins, process-wide config and the caller's config.
    pub fn merge(client: &ClientConfig, call: &RequestConfig) -> Self {
        let defaults = &client.defaults;

        let mut headers = BTreeMap::new();
        set_header(&mut headers, "Content-Type", "application/json");
        for (name, value) in defaults.headers.iter().chain(&call.headers) {
            set_header(&mut headers, name, value);
        }

        Self {
            base_url: call.base_url.clone().unwrap_or_else(|| client.base_url.clone()),
            headers,
            use_auth: call.use_auth.unwrap_or(defaults.use_auth),
            show_toast: call.show_toast.unwrap_or(defaults.show_toast),
            show_loading: call.show_loading.unwrap_or(defaults.show_loading),
            loading_title: call
                .loading_title
                .clone()
                .unwrap_or_else(|| defaults.loading_title.clone()),
            re_auth: call.re_auth.unwrap_or(false),
        }
    }
}

/// Insert a header, replacing any existing entry whose name differs only in case.
pub(crate) fn set_header(
    headers: &mut BTreeMap<String, String>,
    name: &str,
    value: impl Into<String>,
) {
    headers.retain(|existing, _| !existing.eq_ignore_ascii_case(name));
    headers.insert(name.to_string(), value.into());
}

/// `{code, message, data}` wrapper returned by every endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResponseEnvelope<T = Value> {
    pub code: i64,
    pub message: String,
    pub data: T,
}

#[derive(Deserialize)]
struct WireEnvelope {
    code: i64,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    data: Value,
}

impl ResponseEnvelope<Value> {
    /// Read an envelope from a decoded response body.
    pub fn from_body(body: Value) -> RequestResult<Self> {
        let wire: WireEnvelope = serde_json::from_value(body)
            .map_err(|e| RequestError::Transport(format!("invalid response envelope: {}", e)))?;
        Ok(Self {
            code: wire.code,
            message: wire.message.unwrap_or_default(),
            data: wire.data,
        })
    }

    /// Decode the payload into a typed envelope.
    pub fn decode<T: DeserializeOwned>(self) -> RequestResult<ResponseEnvelope<T>> {
        let data = serde_json::from_value(self.data)
            .map_err(|e| RequestError::Transport(format!("invalid response data: {}", e)))?;
        Ok(ResponseEnvelope {
            code: self.code,
            message: self.message,
            data,
        })
    }
}

impl<T> ResponseEnvelope<T> {
    /// Whether the code is in the accepted set.
    pub fn is_accepted(&self) -> bool {
        ACCEPTED_CODES.contains(&self.code)
    }
}
