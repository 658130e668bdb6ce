//! CLI executor - the main ClientCli type
//!
//! Owns the root context factory and the built command nodes, parses the
//! command line with clap and walks the matched path, invoking each group in
//! turn and finally the selected leaf.

use super::adapter::{check_sibling, CommandNode, NodeKind};
use super::arguments::Arguments;
use super::builder::CliBuilder;
use super::client::{Context, Returned};
use super::config::AppConfig;
use super::error::{CliError, CliResult};
use super::params::{validate_params, ParamSpec};
use super::tree::{construct_commands, Descriptor};
use std::ffi::OsString;
use std::io::Write;
use std::sync::Arc;
use tracing::debug;

/// Creates the top-level client from the root command's arguments
pub type ContextFactory = Arc<dyn Fn(&Arguments) -> anyhow::Result<Context> + Send + Sync>;

/// A command line built from client objects
///
/// # Example
///
/// ```
/// use clientcli::cli::{
///     receiver, AppConfig, Callable, ClientCli, ClientObject, CommandSpec, Descriptor, Member,
///     Returned,
/// };
/// use serde_json::json;
///
/// struct Client;
///
/// impl Client {
///     fn status() -> Callable {
///         Callable::method("status", CommandSpec::new(), |ctx, _args| {
///             receiver::<Client>(ctx)?;
///             Returned::json(&json!({"ok": true}))
///         })
///     }
/// }
///
/// impl ClientObject for Client {
///     fn members(&self) -> Vec<Member> {
///         vec![Member::Method(Client::status())]
///     }
/// }
///
/// let cli = ClientCli::new(AppConfig::new("client", "1.0.0"), |_args| Ok(std::sync::Arc::new(Client)))
///     .with_descriptors(&[Descriptor::from(Client::status())])
///     .unwrap();
///
/// let mut out = Vec::new();
/// cli.run_from(["client", "status"], &mut out).unwrap();
/// assert_eq!(String::from_utf8(out).unwrap(), "{\"ok\":true}\n");
/// ```
pub struct ClientCli {
    app: AppConfig,
    root_params: Vec<ParamSpec>,
    root: ContextFactory,
    commands: Vec<CommandNode>,
}

impl ClientCli {
    /// Create a CLI whose top-level client is produced by `root`
    pub fn new<F>(app: AppConfig, root: F) -> Self
    where
        F: Fn(&Arguments) -> anyhow::Result<Context> + Send + Sync + 'static,
    {
        Self {
            app,
            root_params: Vec::new(),
            root: Arc::new(root),
            commands: Vec::new(),
        }
    }

    /// Parameters of the root command, passed to the context factory
    pub fn with_root_params<I>(mut self, params: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = ParamSpec>,
    {
        self.root_params.extend(params);
        validate_params(&self.app.name, &self.root_params)?;
        Ok(self)
    }

    /// Build and register top-level nodes from descriptors
    pub fn with_descriptors<'a, I>(mut self, descriptors: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = &'a Descriptor>,
        I::IntoIter: 'a,
    {
        for node in construct_commands(descriptors) {
            self.add_command(node?)?;
        }
        Ok(self)
    }

    /// Register already built nodes
    pub fn with_commands<I>(mut self, nodes: I) -> CliResult<Self>
    where
        I: IntoIterator<Item = CommandNode>,
    {
        for node in nodes {
            self.add_command(node)?;
        }
        Ok(self)
    }

    /// Register a single top-level node
    pub fn add_command(&mut self, node: CommandNode) -> CliResult<()> {
        check_sibling(&self.app.name, &self.commands, &node)?;
        self.commands.push(node);
        Ok(())
    }

    /// Application metadata
    pub fn app(&self) -> &AppConfig {
        &self.app
    }

    /// Registered top-level nodes
    pub fn commands(&self) -> &[CommandNode] {
        &self.commands
    }

    /// Render the clap command tree
    pub fn build_clap(&self) -> clap::Command {
        CliBuilder::new(&self.app, &self.commands)
            .with_root_params(&self.root_params)
            .build()
    }

    /// Parse the process arguments and run, printing to stdout
    pub fn run(&self) -> CliResult<Returned> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.run_from(std::env::args_os(), &mut out)
    }

    /// Parse `args` and run the selected command, writing its output to `out`
    pub fn run_from<I, T>(&self, args: I, out: &mut dyn Write) -> CliResult<Returned>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let matches = self.build_clap().try_get_matches_from(args)?;

        let root_args = Arguments::from_matches(&self.root_params, &matches)?;
        let mut receiver =
            (self.root)(&root_args).map_err(|e| CliError::invocation(&self.app.name, e))?;

        let (mut name, mut sub_matches) = matches
            .subcommand()
            .ok_or_else(|| CliError::routing("no command given"))?;
        let mut nodes = self.commands.as_slice();

        loop {
            let node = nodes
                .iter()
                .find(|n| n.answers_to(name))
                .ok_or_else(|| CliError::routing(format!("command not found: {}", name)))?;
            let args = Arguments::from_matches(&node.spec().params, sub_matches)?;

            match node.kind() {
                NodeKind::Command => {
                    debug!(command = %node.name(), "running command");
                    return node.invoke_command(&receiver, &args, out);
                }
                NodeKind::Group { children } => {
                    receiver = node.invoke_group(&receiver, &args)?;
                    let (next, next_matches) = sub_matches.subcommand().ok_or_else(|| {
                        CliError::routing(format!("group '{}' requires a command", node.name()))
                    })?;
                    name = next;
                    sub_matches = next_matches;
                    nodes = children.as_slice();
                }
            }
        }
    }
}
