//! Transport subsystem.
//!
//! # Data Flow
//! ```text
//! Dispatcher attempt
//!     → TransportRequest (final url, verb, merged headers, JSON body)
//!     → Transport::send (exactly one terminal outcome)
//!     → TransportResponse (status, JSON data) | TransportFailure (detail)
//! ```
//!
//! # Design Decisions
//! - Object-safe trait returning a boxed future so collaborators can be swapped at runtime
//! - Timeouts belong to the transport, not the dispatcher
//! - Non-JSON response bodies are surfaced as JSON strings

pub mod client;

use futures_util::future::BoxFuture;
use serde_json::Value;
use std::collections::BTreeMap;
use thiserror::Error;

use crate::routing::spec::Verb;

pub use client::ReqwestTransport;

/// A fully resolved outbound request.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub url: String,
    pub method: Verb,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

/// A response delivered by the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub data: Value,
}

impl TransportResponse {
    /// 200 response carrying `data`.
    pub fn ok(data: Value) -> Self {
        Self { status: 200, data }
    }
}

/// The transport could not deliver a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct TransportFailure {
    pub message: String,
}

impl TransportFailure {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Network primitive used by the dispatcher.
pub trait Transport: Send + Sync {
    /// Send a request and resolve with its single terminal outcome.
    fn send(&self, request: TransportRequest) -> BoxFuture<'_, Result<TransportResponse, TransportFailure>>;
}
