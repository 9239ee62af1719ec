//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → ClientConfig (validated)
//!     → held by the Dispatcher in an ArcSwap
//!
//! On update:
//!     Dispatcher::update_config
//!     → atomic swap of Arc<ClientConfig>
//!     → in-flight calls keep the snapshot they started with
//! ```
//!
//! # Design Decisions
//! - Config is read-mostly; set once at startup, swapped whole if ever replaced
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::ClientConfig;
pub use schema::ObservabilityConfig;
pub use schema::RequestDefaults;
pub use schema::TransportConfig;
