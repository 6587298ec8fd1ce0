//! Configuration loading and validation.
//!
//! - Configuration types with serde support
//! - YAML file loading
//! - Fail-fast validation that collects all errors

mod loader;
pub mod types;
mod validation;

pub use loader::{load_config, load_config_from_str};
pub use types::{
    ChainConfig, ClientConfig, KeystoreConfig, ObservabilityConfig, Pbkdf2Config, ScryptConfig,
};
pub use validation::validate_config;
