//! Metrics collection.
//!
//! # Metrics
//! - `api_tree_requests_total` (counter): logical requests by outcome
//! - `api_tree_request_duration_seconds` (histogram): latency including retries
//! - `api_tree_reauth_attempts_total` (counter): session re-authentication retries
//! - `api_tree_route_nodes_created_total` (counter): route nodes materialized
//!
//! # Design Decisions
//! - Uses the `metrics` facade; the host application installs an exporter
//! - Without a recorder every call is a no-op

use std::time::Duration;

/// Record the terminal outcome of a logical request.
pub fn record_request(outcome: &'static str, elapsed: Duration) {
    metrics::counter!("api_tree_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("api_tree_request_duration_seconds", "outcome" => outcome)
        .record(elapsed.as_secs_f64());
}

/// Record one re-authentication retry.
pub fn record_reauth_attempt() {
    metrics::counter!("api_tree_reauth_attempts_total").increment(1);
}

/// Record a newly materialized route node.
pub fn record_route_node_created() {
    metrics::counter!("api_tree_route_nodes_created_total").increment(1);
}
