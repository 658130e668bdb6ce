//! CLI feature - command trees built from client objects
//!
//! A client object lists its methods and properties in a registration table.
//! Descriptors pick members out of those tables and arrange them into a tree;
//! the tree builder turns each descriptor into a command node, and the
//! executor renders the nodes into a clap command and runs the selected path.
//!
//! # Architecture
//!
//! - [`ClientObject`] - registration table of a client's members
//! - [`Descriptor`] - which member becomes a command, which becomes a group
//! - [`construct_commands`] - recursive, lazy tree builder
//! - [`CliBuilder`] - renders command nodes into `clap::Command`
//! - [`ClientCli`] - parses, walks groups outer to inner, prints the leaf result
//!
//! Leaf results are printed to stdout as one compact JSON line. A group's
//! result is never printed; it becomes the receiver of the group's children.

pub mod adapter;
pub mod arguments;
pub mod builder;
pub mod client;
pub mod config;
pub mod discovery;
pub mod error;
pub mod executor;
pub mod params;
pub mod tree;
pub mod utils;

#[cfg(test)]
pub mod test_utils;

// Re-exports for convenience
pub use adapter::{build_command, build_group, cli_name, CommandNode, NodeKind};
pub use arguments::Arguments;
pub use builder::CliBuilder;
pub use client::{
    receiver, AsAny, CallFn, Callable, CallableKind, ClientObject, Context, Member, Property,
    Returned, Target,
};
pub use config::AppConfig;
pub use discovery::{client_descriptors, find_client_commands, find_client_properties};
pub use error::{CliError, CliResult};
pub use executor::{ClientCli, ContextFactory};
pub use params::{CommandSpec, ParamSpec, ParamType};
pub use tree::{construct_commands, Descriptor};
pub use utils::display_error;
