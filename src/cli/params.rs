//! Parameter specifications attached to client members
//!
//! Every callable carries a [`CommandSpec`] describing its help text and the
//! ordered list of parameters it accepts. The clap builder copies these onto
//! the generated command unchanged, so a generated command exposes exactly the
//! surface its member declares.

use super::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Argument ids and long flags clap adds to every command
const RESERVED_IDS: [&str; 2] = ["help", "version"];

/// Short flags clap adds to every command
const RESERVED_SHORTS: [char; 2] = ['h', 'V'];

/// Value type of a parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamType {
    /// Free-form text
    #[default]
    String,
    /// Signed 64-bit integer
    Integer,
    /// 64-bit float
    Float,
    /// Boolean flag, present or absent
    Bool,
    /// A JSON literal, parsed before the member sees it
    Json,
    /// Filesystem path
    Path,
}

/// A single parameter of a command or group
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamSpec {
    /// Parameter name, as seen by the member through `Arguments`
    pub name: String,

    /// Value type
    #[serde(rename = "type", default)]
    pub param_type: ParamType,

    /// Positional argument rather than an option
    #[serde(default)]
    pub positional: bool,

    /// Short flag (e.g., 'v' for -v)
    #[serde(default)]
    pub short: Option<char>,

    /// Long flag; defaults to the name with underscores turned into dashes
    #[serde(default)]
    pub long: Option<String>,

    /// Help text
    #[serde(default)]
    pub help: Option<String>,

    /// Whether the parameter must be supplied
    #[serde(default)]
    pub required: bool,

    /// Default value, parsed like a command-line value
    #[serde(default)]
    pub default: Option<String>,

    /// Accept more than one value
    #[serde(default)]
    pub multiple: bool,

    /// Allowed values (string parameters only)
    #[serde(default)]
    pub possible_values: Vec<String>,

    /// Value name for help text
    #[serde(default)]
    pub value_name: Option<String>,
}

impl ParamSpec {
    fn new(name: impl Into<String>, positional: bool) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::String,
            positional,
            short: None,
            long: None,
            help: None,
            required: positional,
            default: None,
            multiple: false,
            possible_values: Vec::new(),
            value_name: None,
        }
    }

    /// A required positional argument
    pub fn argument(name: impl Into<String>) -> Self {
        Self::new(name, true)
    }

    /// An optional `--name VALUE` option
    pub fn option(name: impl Into<String>) -> Self {
        Self::new(name, false)
    }

    /// A boolean `--name` flag
    pub fn flag(name: impl Into<String>) -> Self {
        Self::new(name, false).with_type(ParamType::Bool)
    }

    /// Set the value type
    pub fn with_type(mut self, param_type: ParamType) -> Self {
        self.param_type = param_type;
        self
    }

    /// Set the help text
    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.help = Some(help.into());
        self
    }

    /// Set a short flag
    pub fn with_short(mut self, short: char) -> Self {
        self.short = Some(short);
        self
    }

    /// Override the long flag
    pub fn with_long(mut self, long: impl Into<String>) -> Self {
        self.long = Some(long.into());
        self
    }

    /// Set a default value
    pub fn with_default(mut self, default: impl Into<String>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Mark the parameter as required or optional
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Accept more than one value
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    /// Restrict values to the given set
    pub fn with_possible_values<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.possible_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Set the value name shown in help
    pub fn with_value_name(mut self, value_name: impl Into<String>) -> Self {
        self.value_name = Some(value_name.into());
        self
    }

    /// Long flag used on the command line
    pub fn long_flag(&self) -> String {
        self.long
            .clone()
            .unwrap_or_else(|| self.name.replace('_', "-"))
    }
}

/// CLI-facing metadata of a member: help text and parameters
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSpec {
    /// Short help
    #[serde(default)]
    pub about: Option<String>,

    /// Long help, shown with --help
    #[serde(default)]
    pub long_about: Option<String>,

    /// Alternative command names
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Hide the command from help listings
    #[serde(default)]
    pub hidden: bool,

    /// Parameters, in declaration order
    #[serde(default)]
    pub params: Vec<ParamSpec>,
}

impl CommandSpec {
    /// Empty spec
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the short help
    pub fn about(mut self, about: impl Into<String>) -> Self {
        self.about = Some(about.into());
        self
    }

    /// Set the long help
    pub fn long_about(mut self, long_about: impl Into<String>) -> Self {
        self.long_about = Some(long_about.into());
        self
    }

    /// Add an alias
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Hide from help listings
    pub fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Append a parameter
    pub fn param(mut self, param: ParamSpec) -> Self {
        self.params.push(param);
        self
    }
}

/// Check a parameter list before it is handed to clap
///
/// Ids, long flags and short flags must be unique and must not shadow the
/// help and version arguments. Required positionals come before optional
/// ones, and only the last positional may take multiple values.
pub fn validate_params(command: &str, params: &[ParamSpec]) -> CliResult<()> {
    let mut ids = HashSet::new();
    let mut longs = HashSet::new();
    let mut shorts = HashSet::new();
    let mut optional_positional: Option<&str> = None;
    let mut multiple_positional: Option<&str> = None;

    let invalid = |msg: String| Err(CliError::descriptor(format!("command '{}': {}", command, msg)));

    for param in params {
        let name = param.name.as_str();
        if name.is_empty() {
            return invalid("parameter name is empty".to_string());
        }
        if RESERVED_IDS.contains(&name) || !ids.insert(name) {
            return invalid(format!("parameter '{}' is reserved or already defined", name));
        }

        if param.positional {
            if let Some(previous) = multiple_positional {
                return invalid(format!(
                    "positional '{}' follows '{}', which takes multiple values",
                    name, previous
                ));
            }
            if param.required {
                if let Some(previous) = optional_positional {
                    return invalid(format!(
                        "required positional '{}' follows optional positional '{}'",
                        name, previous
                    ));
                }
            } else {
                optional_positional = Some(name);
            }
            if param.multiple {
                multiple_positional = Some(name);
            }
            continue;
        }

        let long = param.long_flag();
        if long.is_empty() || RESERVED_IDS.contains(&long.as_str()) || !longs.insert(long.clone()) {
            return invalid(format!("flag '--{}' is reserved or already in use", long));
        }
        if let Some(short) = param.short {
            if RESERVED_SHORTS.contains(&short) || !shorts.insert(short) {
                return invalid(format!("flag '-{}' is reserved or already in use", short));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_argument_is_required_positional() {
        let param = ParamSpec::argument("account_id");
        assert!(param.positional);
        assert!(param.required);
        assert_eq!(param.param_type, ParamType::String);
    }

    #[test]
    fn test_option_long_flag_defaults_to_dashed_name() {
        let param = ParamSpec::option("page_size").with_type(ParamType::Integer);
        assert!(!param.positional);
        assert!(!param.required);
        assert_eq!(param.long_flag(), "page-size");

        let param = param.with_long("size");
        assert_eq!(param.long_flag(), "size");
    }

    #[test]
    fn test_parse_param_from_json() {
        let json = r#"{
            "name": "state",
            "type": "string",
            "possible_values": ["active", "deleted"],
            "default": "active"
        }"#;

        let param: ParamSpec = serde_json::from_str(json).unwrap();
        assert_eq!(param.name, "state");
        assert_eq!(param.possible_values, vec!["active", "deleted"]);
        assert_eq!(param.default.as_deref(), Some("active"));
        assert!(!param.positional);
    }

    #[test]
    fn test_command_spec_preserves_param_order() {
        let spec = CommandSpec::new()
            .about("List networks")
            .param(ParamSpec::argument("account_id"))
            .param(ParamSpec::flag("all"));

        let names: Vec<_> = spec.params.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["account_id", "all"]);
        assert_eq!(spec.about.as_deref(), Some("List networks"));
    }

    #[test]
    fn test_validate_params_accepts_distinct_params() {
        let params = vec![
            ParamSpec::argument("account_id"),
            ParamSpec::argument("network_id").required(false),
            ParamSpec::option("limit").with_short('l'),
            ParamSpec::flag("verbose").with_short('v'),
        ];
        assert!(validate_params("list", &params).is_ok());
    }

    #[test]
    fn test_validate_params_rejects_collisions() {
        let cases = vec![
            vec![ParamSpec::option("id"), ParamSpec::option("id")],
            vec![ParamSpec::option("help")],
            vec![ParamSpec::argument("version")],
            vec![ParamSpec::flag("human").with_short('h')],
            vec![ParamSpec::flag("verbose").with_short('V')],
            vec![ParamSpec::option("all").with_long("help")],
            vec![ParamSpec::option("page_size"), ParamSpec::option("size").with_long("page-size")],
            vec![ParamSpec::flag("all").with_short('a'), ParamSpec::flag("any").with_short('a')],
            vec![ParamSpec::option("")],
        ];
        for params in cases {
            let result = validate_params("list", &params);
            assert!(
                matches!(result, Err(CliError::InvalidDescriptor(_))),
                "expected rejection for {:?}",
                params
            );
        }
    }

    #[test]
    fn test_validate_params_positional_order() {
        let optional_first = vec![
            ParamSpec::argument("first").required(false),
            ParamSpec::argument("second"),
        ];
        assert!(validate_params("get", &optional_first).is_err());

        let multiple_first = vec![
            ParamSpec::argument("ids").multiple(),
            ParamSpec::argument("name"),
        ];
        assert!(validate_params("get", &multiple_first).is_err());
    }
}
