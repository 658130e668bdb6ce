//! clientcli - Build clap command trees from client objects
//!
//! clientcli turns the public methods and properties of API client objects
//! into a nested command line:
//!
//! - **`cli`** - client registration tables, descriptors, the tree builder and the executor
//! - **`config`** - TOML/JSON configuration and `.env` loading
//! - **`observability`** - stderr `tracing` subscriber setup
//!
//! # Features
//!
//! ```toml
//! [dependencies]
//! clientcli = { version = "0.1", default-features = false }
//! # Or with configuration files and log output:
//! clientcli = { version = "0.1", features = ["config", "observability"] }
//! ```
//!
//! # Example
//!
//! ```
//! use clientcli::prelude::*;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! struct Client;
//! struct Accounts;
//!
//! impl Client {
//!     fn accounts() -> Property {
//!         Property::new("accounts", |_ctx| Ok(Returned::context(Accounts)))
//!     }
//! }
//!
//! impl Accounts {
//!     fn list() -> Callable {
//!         Callable::method("list", CommandSpec::new().about("List accounts"), |ctx, _args| {
//!             receiver::<Accounts>(ctx)?;
//!             Returned::json(&json!([{"id": 1}]))
//!         })
//!     }
//! }
//!
//! impl ClientObject for Client {
//!     fn members(&self) -> Vec<Member> {
//!         vec![Member::Property(Client::accounts())]
//!     }
//! }
//!
//! impl ClientObject for Accounts {
//!     fn members(&self) -> Vec<Member> {
//!         vec![Member::Method(Accounts::list())]
//!     }
//! }
//!
//! let tree = vec![Descriptor::group(Client::accounts(), client_descriptors(&Accounts))];
//! let cli = ClientCli::new(AppConfig::new("root", "1.0.0"), |_args| Ok(Arc::new(Client)))
//!     .with_descriptors(&tree)
//!     .unwrap();
//!
//! let mut out = Vec::new();
//! cli.run_from(["root", "accounts", "list"], &mut out).unwrap();
//! assert_eq!(String::from_utf8(out).unwrap(), "[{\"id\":1}]\n");
//! ```

#![warn(missing_docs)]

/// Command tree construction and execution
pub mod cli;

/// Configuration management (enabled with the `config` feature)
#[cfg(feature = "config")]
pub mod config;

/// Observability utilities (enabled with the `observability` feature)
#[cfg(feature = "observability")]
pub mod observability;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::cli::{
        client_descriptors, construct_commands, find_client_commands, receiver, AppConfig,
        Arguments, Callable, CliError, CliResult, ClientCli, ClientObject, CommandSpec, Context,
        Descriptor, Member, ParamSpec, ParamType, Property, Returned,
    };

    #[cfg(feature = "config")]
    pub use crate::config::{CliConfig, EnvironmentLoader};

    #[cfg(feature = "observability")]
    pub use crate::observability::init_tracing;
}
