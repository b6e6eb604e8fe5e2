//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file (optional)
//!     → loader.rs (parse, apply environment overrides)
//!     → validation.rs (semantic checks, all errors reported)
//!     → Frozen GatewayConfig, immutable for the process lifetime
//! ```
//!
//! # Design Decisions
//! - Backend base URLs are static and pre-resolved; no discovery, no reload
//! - Environment variables win over file values (deployments set hosts there)
//! - Validation returns every error, not just the first

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    BackendsConfig, GatewayConfig, LimitsConfig, ListenerConfig, ObservabilityConfig,
    TimeoutConfig,
};
