//! Command and group adapters
//!
//! [`build_command`] turns a member into a leaf that prints its result as
//! JSON; [`build_group`] turns a member into a group whose result becomes the
//! receiver of its children. Both take the receiver explicitly at run time.

use super::arguments::Arguments;
use super::builder::CliBuilder;
use super::client::{Callable, Context, Returned, Target};
use super::error::{CliError, CliResult};
use super::params::{validate_params, CommandSpec};
use std::io::Write;
use tracing::{debug, trace};

/// Subcommand name clap adds to every command with subcommands
const RESERVED_COMMAND: &str = "help";

/// CLI name for a member: lowercase, underscores become dashes
pub fn cli_name(member: &str) -> String {
    member.to_lowercase().replace('_', "-")
}

/// Fail if `node` answers to a name or alias already taken among `siblings`
pub(crate) fn check_sibling(parent: &str, siblings: &[CommandNode], node: &CommandNode) -> CliResult<()> {
    for name in node.names() {
        if siblings.iter().any(|sibling| sibling.answers_to(name)) {
            return Err(CliError::descriptor(format!(
                "'{}' already has a command named '{}'",
                parent, name
            )));
        }
    }
    Ok(())
}

/// Leaf or group
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Executes its member and prints the result
    Command,
    /// Publishes its member's result to its children
    Group {
        /// Child nodes in insertion order
        children: Vec<CommandNode>,
    },
}

/// A built command or group, ready to be rendered into clap
#[derive(Debug, Clone)]
pub struct CommandNode {
    name: String,
    callable: Callable,
    kind: NodeKind,
}

impl CommandNode {
    /// CLI name of the node
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Metadata copied from the member
    pub fn spec(&self) -> &CommandSpec {
        self.callable.spec()
    }

    /// The wrapped member
    pub fn callable(&self) -> &Callable {
        &self.callable
    }

    /// Leaf or group
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// True for group nodes
    pub fn is_group(&self) -> bool {
        matches!(self.kind, NodeKind::Group { .. })
    }

    /// Children of a group; empty for leaves
    pub fn children(&self) -> &[CommandNode] {
        match &self.kind {
            NodeKind::Group { children } => children,
            NodeKind::Command => &[],
        }
    }

    /// Name followed by aliases
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.spec().aliases.iter().map(String::as_str))
    }

    /// Whether `name` selects this node (by name or alias)
    pub fn answers_to(&self, name: &str) -> bool {
        self.name == name || self.spec().aliases.iter().any(|alias| alias == name)
    }

    /// Render this node and its children as a clap command
    pub fn to_clap(&self) -> clap::Command {
        CliBuilder::build_command(self)
    }

    /// Find a direct child by name or alias
    pub fn find_child(&self, name: &str) -> Option<&CommandNode> {
        self.children().iter().find(|child| child.answers_to(name))
    }

    /// Attach a child to this group
    pub fn add_command(&mut self, child: CommandNode) -> CliResult<()> {
        let group = self.name.clone();
        match &mut self.kind {
            NodeKind::Command => Err(CliError::descriptor(format!(
                "cannot attach '{}' to '{}': not a group",
                child.name, group
            ))),
            NodeKind::Group { children } => {
                check_sibling(&format!("group '{}'", group), children, &child)?;
                trace!(group = %group, command = %child.name, "attached command");
                children.push(child);
                Ok(())
            }
        }
    }

    // A result that could not be encoded keeps its own error kind
    fn invocation_error(&self, error: anyhow::Error) -> CliError {
        match error.downcast::<CliError>() {
            Ok(err @ CliError::Serialization(_)) => err,
            Ok(err) => CliError::invocation(&self.name, err.into()),
            Err(error) => CliError::invocation(&self.name, error),
        }
    }

    /// Run a leaf: call the member with `receiver` and write a non-null result
    /// to `out` as one line of JSON
    pub fn invoke_command(
        &self,
        receiver: &Context,
        args: &Arguments,
        out: &mut dyn Write,
    ) -> CliResult<Returned> {
        debug!(command = %self.name, "invoking command");
        let response = self
            .callable
            .call(receiver, args)
            .map_err(|e| self.invocation_error(e))?;

        if let Some(line) = response.to_json_line()? {
            writeln!(out, "{}", line)?;
        }
        Ok(response)
    }

    /// Run a group: call the member with `receiver` and return the client
    /// object its children will receive
    pub fn invoke_group(&self, receiver: &Context, args: &Arguments) -> CliResult<Context> {
        debug!(group = %self.name, "invoking group");
        self.callable
            .call(receiver, args)
            .map_err(|e| self.invocation_error(e))?
            .into_context()
            .ok_or_else(|| CliError::NotAContext(self.name.clone()))
    }
}

fn build_node(target: Target, kind: NodeKind) -> CliResult<CommandNode> {
    let callable = target.into_callable()?;
    let name = cli_name(callable.name());
    if name.is_empty() {
        return Err(CliError::descriptor("member name is empty"));
    }

    let spec = callable.spec();
    let mut names = vec![name.as_str()];
    for alias in &spec.aliases {
        if alias.is_empty() || names.contains(&alias.as_str()) {
            return Err(CliError::descriptor(format!(
                "command '{}': alias '{}' is empty or repeated",
                name, alias
            )));
        }
        names.push(alias);
    }
    if names.contains(&RESERVED_COMMAND) {
        return Err(CliError::descriptor(format!(
            "command '{}': '{}' is reserved for the help subcommand",
            name, RESERVED_COMMAND
        )));
    }
    validate_params(&name, &spec.params)?;
    debug!(name = %name, group = matches!(kind, NodeKind::Group { .. }), "built node");
    Ok(CommandNode {
        name,
        callable,
        kind,
    })
}

/// Wrap a method or property as a leaf command
pub fn build_command(target: impl Into<Target>) -> CliResult<CommandNode> {
    build_node(target.into(), NodeKind::Command)
}

/// Wrap a method or property as a group
pub fn build_group(target: impl Into<Target>) -> CliResult<CommandNode> {
    build_node(target.into(), NodeKind::Group { children: Vec::new() })
}
