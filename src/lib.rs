//! Path-chained API client.
//!
//! # Architecture Overview
//!
//! ```text
//!   api.route("user").route("info").route("getP")
//!        │
//!        ▼
//!   ┌───────────┐    ┌────────────┐    ┌──────────────┐    ┌───────────┐
//!   │ RouteTree │───▶│ RouteNode  │───▶│  BoundCall   │───▶│Dispatcher │
//!   │  (root)   │    │ (memoized) │    │(shape-typed) │    │           │
//!   └───────────┘    └────────────┘    └──────────────┘    └─────┬─────┘
//!                                                                │
//!          ┌────────────────┬──────────────────┬─────────────────┤
//!          ▼                ▼                  ▼                 ▼
//!     ┌─────────┐    ┌────────────┐     ┌────────────┐    ┌─────────────┐
//!     │ url     │    │  session   │     │ transport  │    │ notifier /  │
//!     │ builder │    │  supplier  │     │ (reqwest)  │    │ activity    │
//!     └─────────┘    └────────────┘     └────────────┘    └─────────────┘
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod observability;
pub mod routing;
pub mod transport;

pub use config::ClientConfig;
pub use dispatch::{Dispatcher, RequestConfig, ResponseEnvelope};
pub use error::{RequestError, RequestResult};
pub use routing::{BoundCall, CallShape, PathSpec, RouteNode, RouteTree, Verb};
