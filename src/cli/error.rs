//! Error types for CLI construction and execution

use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur while building or running a client CLI
#[derive(Error, Debug)]
pub enum CliError {
    /// A descriptor could not be turned into a command node
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// The underlying client member returned an error
    #[error("Command '{command}' failed: {error}")]
    Invocation {
        /// CLI name of the command that failed
        command: String,
        /// Error raised by the client member
        error: anyhow::Error,
    },

    /// A command result could not be encoded as JSON
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A group member returned something other than a client object
    #[error("Group '{0}' did not return a client object")]
    NotAContext(String),

    /// A required argument was not supplied
    #[error("Missing argument: {0}")]
    MissingArgument(String),

    /// An argument value could not be read or converted
    #[error("Invalid argument '{name}': {message}")]
    InvalidArgument {
        /// Parameter name
        name: String,
        /// Description of the failure
        message: String,
    },

    /// Parsed command line did not resolve to a built node
    #[error("Routing error: {0}")]
    Routing(String),

    /// Command-line usage error reported by clap (also covers --help and --version)
    #[error(transparent)]
    Usage(#[from] clap::Error),

    /// Writing command output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invocation error for the named command
    pub fn invocation<S: Into<String>>(command: S, error: anyhow::Error) -> Self {
        Self::Invocation {
            command: command.into(),
            error,
        }
    }

    /// Create an invalid descriptor error with context
    pub fn descriptor<S: Into<String>>(msg: S) -> Self {
        Self::InvalidDescriptor(msg.into())
    }

    /// Create a routing error with context
    pub fn routing<S: Into<String>>(msg: S) -> Self {
        Self::Routing(msg.into())
    }

    /// Create an invalid argument error
    pub fn invalid_argument(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        CliError::Serialization(err.to_string())
    }
}
