//! Environment variable loading and management.

use std::env;
use std::path::{Path, PathBuf};

/// Overrides the configured tracing filter
pub const LOG_ENV: &str = "CLIENTCLI_LOG";

/// Points at a configuration file
pub const CONFIG_ENV: &str = "CLIENTCLI_CONFIG";

/// Loads environment variables from .env file and system environment.
#[derive(Debug, Clone)]
pub struct EnvironmentLoader {
    env_file: Option<PathBuf>,
}

impl EnvironmentLoader {
    /// Initialize the environment loader.
    ///
    /// # Arguments
    /// * `env_file` - Path to a .env file. Nothing is loaded when None.
    pub fn new(env_file: Option<&Path>) -> Self {
        if let Some(path) = env_file.filter(|p| p.exists()) {
            if let Err(e) = dotenv::from_path(path) {
                tracing::warn!(path = %path.display(), error = %e, "Failed to load .env file");
            }
        }

        Self {
            env_file: env_file.map(Path::to_path_buf),
        }
    }

    /// The .env file this loader was created with
    pub fn env_file(&self) -> Option<&Path> {
        self.env_file.as_deref()
    }

    /// Tracing filter from `CLIENTCLI_LOG`, if set
    pub fn log_filter(&self) -> Option<String> {
        env::var(LOG_ENV).ok().filter(|v| !v.trim().is_empty())
    }

    /// Configuration file from `CLIENTCLI_CONFIG`, if set
    pub fn config_path(&self) -> Option<PathBuf> {
        env::var_os(CONFIG_ENV).map(PathBuf::from)
    }
}

impl Default for EnvironmentLoader {
    fn default() -> Self {
        Self::new(None)
    }
}
