//! Application metadata for the generated root command

use serde::{Deserialize, Serialize};

/// Application metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application (root command) name
    pub name: String,

    /// Application version
    #[serde(default = "default_version")]
    pub version: String,

    /// Author(s)
    #[serde(default)]
    pub author: Option<String>,

    /// About text / description
    #[serde(default)]
    pub about: Option<String>,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl AppConfig {
    /// Create metadata with a name and version
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            author: None,
            about: None,
        }
    }

    /// Set the about text
    pub fn with_about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Set the author
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_NAME"), default_version())
    }
}
