//! Configuration management for generated CLIs.
//!
//! This module provides configuration loading through TOML or JSON files and
//! environment variable management via `.env` files.
//!
//! # Example
//!
//! ```no_run
//! use clientcli::config::{CliConfig, EnvironmentLoader};
//! use std::path::Path;
//!
//! // Load environment variables
//! let env = EnvironmentLoader::new(Some(Path::new(".env")));
//!
//! // Load configuration, falling back to defaults
//! let config = CliConfig::load_or(env.config_path().as_deref(), CliConfig::default()).unwrap();
//!
//! println!("App: {}", config.app.name);
//! println!("Log filter: {:?}", env.log_filter());
//! ```

pub mod config;
pub mod environment;

// Re-export main types for convenience
pub use self::config::CliConfig;
pub use self::environment::EnvironmentLoader;
