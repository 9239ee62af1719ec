//! Configuration schema definitions.
//!
//! This module defines the process-wide configuration read by the dispatcher.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration for the API client.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL prepended to every relative request path.
    pub base_url: String,

    /// Request paths that never carry a session header.
    pub auth_whitelist: Vec<String>,

    /// Request defaults layered between built-ins and per-call config.
    pub defaults: RequestDefaults,

    /// HTTP transport settings.
    pub transport: TransportConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Static session settings.
    pub session: SessionConfig,
}

impl ClientConfig {
    /// Create a configuration with only the base URL set.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Check whether a request path is exempt from authentication.
    pub fn is_whitelisted(&self, url: &str) -> bool {
        self.auth_whitelist.iter().any(|entry| entry == url)
    }
}

/// Default request settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RequestDefaults {
    /// Extra headers sent with every request.
    pub headers: BTreeMap<String, String>,

    /// Attach the session header.
    pub use_auth: bool,

    /// Surface failures through the notifier.
    pub show_toast: bool,

    /// Show a loading indicator while the request is in flight.
    pub show_loading: bool,

    /// Title of the loading indicator.
    pub loading_title: String,
}

impl Default for RequestDefaults {
    fn default() -> Self {
        Self {
            headers: BTreeMap::new(),
            use_auth: true,
            show_toast: true,
            show_loading: false,
            loading_title: "Loading...".to_string(),
        }
    }
}

/// Transport configuration for the reqwest client.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TransportConfig {
    /// Total request timeout in seconds.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Hosts the transport may reach. Empty allows every host.
    pub allowed_hosts: Vec<String>,

    /// Honour proxy settings from the environment.
    pub system_proxy: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 5,
            allowed_hosts: Vec::new(),
            system_proxy: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Emit logs as JSON lines instead of the human format.
    pub json_logs: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

/// Session configuration for the static session supplier.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SessionConfig {
    /// Session key sent in the `Session-Key` header.
    pub token: Option<String>,
}
