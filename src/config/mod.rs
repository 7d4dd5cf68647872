//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → command-line / env overrides
//!     → validation.rs (semantic checks)
//!     → DashboardConfig (validated, immutable)
//! ```
//!
//! # Design Decisions
//! - Config is static for the life of the process
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, read_config, ConfigError};
pub use schema::DashboardConfig;
pub use schema::ObservabilityConfig;
pub use schema::RefreshConfig;
pub use schema::ServerConfig;
pub use schema::SourceConfig;
pub use validation::{validate_config, ValidationError};
