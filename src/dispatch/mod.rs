//! Request dispatch subsystem.
//!
//! # Data Flow
//! ```text
//! Bound call / direct request (url, params, body, verb, config)
//!     → types.rs (merge defaults → process config → call config)
//!     → collaborators.rs (session key, loading indicator)
//!     → transport (single terminal outcome)
//!     → dispatcher.rs (classify: transport / http status / business / success)
//!     → on 401: retry with forced session refresh, at most 3 times
//! ```
//!
//! # Design Decisions
//! - Retries are an explicit bounded loop, invisible to the caller
//! - Notifier calls never influence the outcome
//! - Retry state lives in the call, never shared between calls

pub mod collaborators;
pub mod dispatcher;
pub mod types;

pub use collaborators::{ActivityHook, NoActivity, Notifier, SessionSupplier, StaticSession, ToastKind, TracingNotifier};
pub use dispatcher::{Dispatcher, MAX_REAUTH_ATTEMPTS};
pub use types::{RequestConfig, ResponseEnvelope};
