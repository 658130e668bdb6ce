//! CLI builder - renders built command nodes into a clap Command

use super::adapter::CommandNode;
use super::arguments::{parse_finite_float, parse_json};
use super::config::AppConfig;
use super::params::{ParamSpec, ParamType};
use clap::builder::PossibleValuesParser;
use clap::{Arg, ArgAction, Command, ValueHint};
use std::path::PathBuf;

/// Builds a clap Command tree from command nodes
pub struct CliBuilder<'a> {
    app: &'a AppConfig,
    root_params: &'a [ParamSpec],
    nodes: &'a [CommandNode],
}

impl<'a> CliBuilder<'a> {
    /// Create a new builder for the given application and top-level nodes
    pub fn new(app: &'a AppConfig, nodes: &'a [CommandNode]) -> Self {
        Self {
            app,
            root_params: &[],
            nodes,
        }
    }

    /// Parameters accepted by the root command itself
    pub fn with_root_params(mut self, params: &'a [ParamSpec]) -> Self {
        self.root_params = params;
        self
    }

    /// Build the root clap Command
    pub fn build(self) -> Command {
        let mut app = Command::new(self.app.name.clone())
            .version(self.app.version.clone())
            .subcommand_required(true)
            .arg_required_else_help(true);

        if let Some(author) = &self.app.author {
            app = app.author(author.clone());
        }

        if let Some(about) = &self.app.about {
            app = app.about(about.clone());
        }

        for param in self.root_params {
            app = app.arg(Self::build_arg(param));
        }

        for node in self.nodes {
            app = app.subcommand(Self::build_command(node));
        }

        app
    }

    /// Build a command (including subcommands for groups)
    pub fn build_command(node: &CommandNode) -> Command {
        let spec = node.spec();
        let mut cmd = Command::new(node.name().to_owned());

        if let Some(about) = &spec.about {
            cmd = cmd.about(about.clone());
        }

        if let Some(long_about) = &spec.long_about {
            cmd = cmd.long_about(long_about.clone());
        }

        for alias in &spec.aliases {
            cmd = cmd.alias(alias.clone());
        }

        if spec.hidden {
            cmd = cmd.hide(true);
        }

        for param in &spec.params {
            cmd = cmd.arg(Self::build_arg(param));
        }

        if node.is_group() {
            cmd = cmd.subcommand_required(true);
            for child in node.children() {
                cmd = cmd.subcommand(Self::build_command(child));
            }
        }

        cmd
    }

    /// Build a single argument
    pub fn build_arg(param: &ParamSpec) -> Arg {
        let mut arg = Arg::new(param.name.clone());

        if !param.positional {
            arg = arg.long(param.long_flag());
            if let Some(short) = param.short {
                arg = arg.short(short);
            }
        }

        if let Some(help) = &param.help {
            arg = arg.help(help.clone());
        }

        if let Some(value_name) = &param.value_name {
            arg = arg.value_name(value_name.clone());
        }

        // Flags take no value; everything else sets or appends one
        if param.param_type == ParamType::Bool {
            return arg.action(ArgAction::SetTrue);
        }

        arg = if param.multiple {
            arg.action(ArgAction::Append)
        } else {
            arg.action(ArgAction::Set)
        };

        if param.multiple && param.positional {
            arg = arg.num_args(1..);
        }

        arg = match param.param_type {
            ParamType::String if !param.possible_values.is_empty() => {
                arg.value_parser(PossibleValuesParser::new(param.possible_values.clone()))
            }
            ParamType::String => arg.value_parser(clap::value_parser!(String)),
            ParamType::Integer => arg.value_parser(clap::value_parser!(i64)),
            ParamType::Float => arg.value_parser(parse_finite_float),
            ParamType::Json => arg.value_parser(parse_json),
            ParamType::Path => arg
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::AnyPath),
            ParamType::Bool => arg,
        };

        if param.required {
            arg = arg.required(true);
        }

        if let Some(default) = &param.default {
            arg = arg.default_value(default.clone());
        }

        arg
    }
}
