//! Descriptor trees and the recursive tree builder

use super::adapter::{build_command, build_group, CommandNode};
use super::client::{Callable, Property, Target};
use super::error::CliResult;

/// Describes one node of the command tree
///
/// # Example
///
/// ```
/// use clientcli::cli::{construct_commands, Callable, CommandSpec, Descriptor, Property, Returned};
/// use serde_json::json;
///
/// let accounts = Property::new("accounts", |ctx| Ok(Returned::Context(ctx.clone())));
/// let list = Callable::method("list", CommandSpec::new(), |_ctx, _args| {
///     Returned::json(&json!([{"id": 1}]))
/// });
///
/// let tree = vec![Descriptor::group(accounts, [Descriptor::from(list)])];
/// let nodes: Vec<_> = construct_commands(&tree).collect::<Result<_, _>>().unwrap();
/// assert_eq!(nodes[0].children()[0].name(), "list");
/// ```
#[derive(Debug, Clone)]
pub enum Descriptor {
    /// A leaf command
    Command(Target),
    /// A group whose `context` member yields the receiver for `commands`
    Group {
        /// Member producing the child receiver
        context: Target,
        /// Children, in listing order
        commands: Vec<Descriptor>,
    },
}

impl Descriptor {
    /// Leaf descriptor
    pub fn command(target: impl Into<Target>) -> Self {
        Descriptor::Command(target.into())
    }

    /// Group descriptor
    pub fn group<I>(context: impl Into<Target>, commands: I) -> Self
    where
        I: IntoIterator<Item = Descriptor>,
    {
        Descriptor::Group {
            context: context.into(),
            commands: commands.into_iter().collect(),
        }
    }

    /// True for group descriptors
    pub fn is_group(&self) -> bool {
        matches!(self, Descriptor::Group { .. })
    }
}

impl From<Callable> for Descriptor {
    fn from(callable: Callable) -> Self {
        Descriptor::Command(Target::Method(callable))
    }
}

impl From<Property> for Descriptor {
    fn from(property: Property) -> Self {
        Descriptor::Command(Target::Property(property))
    }
}

/// Build command nodes from descriptors, depth first, in input order
///
/// The returned iterator is lazy: each top-level node, with all of its
/// children attached, is built when it is pulled.
pub fn construct_commands<'a, I>(descriptors: I) -> impl Iterator<Item = CliResult<CommandNode>> + 'a
where
    I: IntoIterator<Item = &'a Descriptor>,
    I::IntoIter: 'a,
{
    descriptors.into_iter().map(construct_command)
}

fn construct_command(descriptor: &Descriptor) -> CliResult<CommandNode> {
    match descriptor {
        Descriptor::Group { context, commands } => {
            let mut group = build_group(context.clone())?;
            for child in construct_commands(commands) {
                group.add_command(child?)?;
            }
            Ok(group)
        }
        Descriptor::Command(target) => build_command(target.clone()),
    }
}
