//! Operations infrastructure for klay clients.
//!
//! - **Config**: YAML-based configuration with fail-fast validation
//! - **Observability**: `tracing` subscriber setup with JSON or pretty output
//!
//! # Example
//!
//! ```no_run
//! use klay_operations::{config::load_config, init_logging_from_config};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("client.yaml")?;
//!     init_logging_from_config(&config.observability.log_level, &config.observability.log_format)?;
//!
//!     let options = config.keystore.to_encrypt_options()?;
//!     tracing::info!(kdf = options.kdf.name(), cipher = %options.cipher, "client configured");
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod errors;
pub mod observability;

pub use config::{
    load_config, load_config_from_str, ChainConfig, ClientConfig, KeystoreConfig,
    ObservabilityConfig,
};
pub use errors::{ConfigError, LoggingError};
pub use observability::{init_logging, init_logging_from_config, parse_level, LogFormat};
