//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Caller: api.route("user").route("info").route("postP")
//!     → tree.rs (top-level node cache)
//!     → node.rs (child cache, construct on miss)
//!     → spec.rs (verb + call shape from the last segment)
//!     → call.rs (shape-typed call bound to the dispatcher)
//!
//! Dispatch:
//!     → url.rs (base + path + query string)
//! ```
//!
//! # Design Decisions
//! - No route registration: every segment name is valid
//! - Deterministic: same path always derives the same spec
//! - Nodes are memoized for the lifetime of the tree

pub mod call;
pub mod node;
pub mod spec;
pub mod tree;
pub mod url;

pub use call::{BodyCall, BoundCall, FullCall, NoArgsCall, ParamsCall};
pub use node::RouteNode;
pub use spec::{CallShape, PathSpec, Verb};
pub use tree::RouteTree;
pub use url::{build_url, Params};
