//! Lazily materialized route nodes.
//!
//! # Responsibilities
//! - Hold the accumulated path and its derived spec
//! - Own the bound call for that path
//! - Cache child nodes by segment name
//!
//! # Design Decisions
//! - Children live in a DashMap; construct-on-miss is the only mutation
//! - `entry().or_insert_with` makes construction atomic per key
//! - Nodes are never evicted, so repeated access returns the same `Arc`

use dashmap::DashMap;
use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::observability::metrics;
use crate::routing::call::BoundCall;
use crate::routing::spec::PathSpec;

/// One accessed path prefix: an endpoint and a namespace at once.
pub struct RouteNode {
    path: String,
    spec: PathSpec,
    call: BoundCall,
    children: DashMap<String, Arc<RouteNode>>,
    dispatcher: Arc<Dispatcher>,
}

impl RouteNode {
    fn new(path: String, dispatcher: Arc<Dispatcher>) -> Self {
        let spec = PathSpec::parse(&path);
        let call = BoundCall::bind(&spec, dispatcher.clone());

        tracing::trace!(
            path = %path,
            url = %spec.url,
            verb = %spec.verb,
            shape = ?spec.shape,
            "Route node created"
        );
        metrics::record_route_node_created();

        Self {
            path,
            spec,
            call,
            children: DashMap::new(),
            dispatcher,
        }
    }

    /// Full accumulated path, e.g. `/user/info/get`.
    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn spec(&self) -> &PathSpec {
        &self.spec
    }

    /// The call bound to this node.
    pub fn call(&self) -> &BoundCall {
        &self.call
    }

    /// Child node for `segment`, created on first access.
    pub fn route(&self, segment: &str) -> Arc<RouteNode> {
        child(&self.children, &self.path, segment, &self.dispatcher)
    }

    /// Number of materialized children.
    pub fn child_count(&self) -> usize {
        self.children.len()
    }
}

/// Look up or create the child of `parent_path` named `segment`.
pub(crate) fn child(
    children: &DashMap<String, Arc<RouteNode>>,
    parent_path: &str,
    segment: &str,
    dispatcher: &Arc<Dispatcher>,
) -> Arc<RouteNode> {
    if let Some(node) = children.get(segment) {
        return node.value().clone();
    }

    children
        .entry(segment.to_string())
        .or_insert_with(|| {
            Arc::new(RouteNode::new(
                format!("{}/{}", parent_path, segment),
                dispatcher.clone(),
            ))
        })
        .value()
        .clone()
}

impl std::fmt::Debug for RouteNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteNode")
            .field("path", &self.path)
            .field("spec", &self.spec)
            .field("children", &self.children.len())
            .finish()
    }
}
