//! Arguments forwarded to client members
//!
//! Values are read out of clap's `ArgMatches` according to the member's
//! declared `ParamSpec`s and stored as JSON values, so members can pull them
//! out with any `Deserialize` type.

use super::error::{CliError, CliResult};
use super::params::{ParamSpec, ParamType};
use clap::ArgMatches;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Parsed arguments of one command invocation
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Arguments {
    named: BTreeMap<String, Value>,
    positional: Vec<Value>,
}

impl Arguments {
    /// Empty argument set
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a named value (builder style, mostly for tests and direct calls)
    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.named.insert(name.into(), value.into());
        self
    }

    /// Add a positional value; it is also reachable by name
    pub fn with_positional(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        let value = value.into();
        self.positional.push(value.clone());
        self.named.insert(name.into(), value);
        self
    }

    /// Read the values declared by `params` out of clap matches
    ///
    /// Optional parameters that were not supplied and have no default are
    /// left out. Flags are always present.
    pub fn from_matches(params: &[ParamSpec], matches: &ArgMatches) -> CliResult<Self> {
        let mut args = Self::new();
        for param in params {
            if let Some(value) = extract(param, matches)? {
                if param.positional {
                    args.positional.push(value.clone());
                }
                args.named.insert(param.name.clone(), value);
            }
        }
        Ok(args)
    }

    /// Get a value converted to `T`, or `None` if absent
    pub fn get<T: DeserializeOwned>(&self, name: &str) -> CliResult<Option<T>> {
        self.named
            .get(name)
            .map(|value| {
                serde_json::from_value(value.clone())
                    .map_err(|e| CliError::invalid_argument(name, e.to_string()))
            })
            .transpose()
    }

    /// Get a value converted to `T`, failing if absent
    pub fn require<T: DeserializeOwned>(&self, name: &str) -> CliResult<T> {
        self.get(name)?
            .ok_or_else(|| CliError::MissingArgument(name.to_string()))
    }

    /// Raw value by name
    pub fn value(&self, name: &str) -> Option<&Value> {
        self.named.get(name)
    }

    /// Positional values in declaration order
    pub fn positional(&self) -> &[Value] {
        &self.positional
    }

    /// Whether a value was supplied
    pub fn contains(&self, name: &str) -> bool {
        self.named.contains_key(name)
    }

    /// Number of named values
    pub fn len(&self) -> usize {
        self.named.len()
    }

    /// True when no values were supplied
    pub fn is_empty(&self) -> bool {
        self.named.is_empty()
    }

    /// Iterate over named values
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.named.iter()
    }

    /// All named values as a JSON object
    pub fn to_json(&self) -> Value {
        Value::Object(self.named.clone().into_iter().collect())
    }
}

/// Parser used for `ParamType::Json` values
pub(crate) fn parse_json(raw: &str) -> Result<Value, serde_json::Error> {
    serde_json::from_str(raw)
}

/// Parser used for `ParamType::Float` values; NaN and infinities have no
/// JSON representation
pub(crate) fn parse_finite_float(raw: &str) -> Result<f64, String> {
    let value: f64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("invalid float '{}': {}", raw, e))?;
    if value.is_finite() {
        Ok(value)
    } else {
        Err(format!("'{}' is not a finite number", raw))
    }
}

fn extract(param: &ParamSpec, matches: &ArgMatches) -> CliResult<Option<Value>> {
    let id = param.name.as_str();
    match param.param_type {
        ParamType::Bool => {
            let flag = matches
                .try_get_one::<bool>(id)
                .map_err(|e| CliError::invalid_argument(id, e.to_string()))?;
            Ok(Some(Value::Bool(flag.copied().unwrap_or(false))))
        }
        ParamType::String => collect::<String>(param, matches, |s| Value::String(s.clone())),
        ParamType::Integer => collect::<i64>(param, matches, |n| Value::from(*n)),
        ParamType::Float => collect::<f64>(param, matches, |n| Value::from(*n)),
        ParamType::Json => collect::<Value>(param, matches, Value::clone),
        ParamType::Path => collect::<PathBuf>(param, matches, |p| {
            Value::String(p.to_string_lossy().into_owned())
        }),
    }
}

fn collect<T>(
    param: &ParamSpec,
    matches: &ArgMatches,
    to_value: impl Fn(&T) -> Value,
) -> CliResult<Option<Value>>
where
    T: Clone + Send + Sync + 'static,
{
    let id = param.name.as_str();
    if param.multiple {
        let values = matches
            .try_get_many::<T>(id)
            .map_err(|e| CliError::invalid_argument(id, e.to_string()))?;
        Ok(values.map(|values| Value::Array(values.map(&to_value).collect())))
    } else {
        let value = matches
            .try_get_one::<T>(id)
            .map_err(|e| CliError::invalid_argument(id, e.to_string()))?;
        Ok(value.map(to_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::builder::CliBuilder;
    use clap::Command;
    use serde_json::json;

    fn matches_for(params: &[ParamSpec], argv: &[&str]) -> ArgMatches {
        let mut cmd = Command::new("test");
        for param in params {
            cmd = cmd.arg(CliBuilder::build_arg(param));
        }
        cmd.try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn test_from_matches_reads_typed_values() {
        let params = vec![
            ParamSpec::argument("account_id"),
            ParamSpec::option("limit").with_type(ParamType::Integer),
            ParamSpec::option("ratio").with_type(ParamType::Float),
            ParamSpec::option("filter").with_type(ParamType::Json),
            ParamSpec::flag("all"),
        ];
        let matches = matches_for(
            &params,
            &[
                "test",
                "ac-1",
                "--limit",
                "20",
                "--ratio",
                "0.5",
                "--filter",
                r#"{"state":"active"}"#,
            ],
        );

        let args = Arguments::from_matches(&params, &matches).unwrap();
        assert_eq!(args.require::<String>("account_id").unwrap(), "ac-1");
        assert_eq!(args.require::<i64>("limit").unwrap(), 20);
        assert_eq!(args.require::<f64>("ratio").unwrap(), 0.5);
        assert_eq!(args.value("filter"), Some(&json!({"state": "active"})));
        assert!(!args.require::<bool>("all").unwrap());
        assert_eq!(args.positional(), &[json!("ac-1")]);
    }

    #[test]
    fn test_absent_optional_is_omitted() {
        let params = vec![ParamSpec::option("name")];
        let matches = matches_for(&params, &["test"]);

        let args = Arguments::from_matches(&params, &matches).unwrap();
        assert!(!args.contains("name"));
        assert_eq!(args.get::<String>("name").unwrap(), None);
        assert!(matches!(
            args.require::<String>("name"),
            Err(CliError::MissingArgument(_))
        ));
    }

    #[test]
    fn test_default_value_is_used() {
        let params = vec![ParamSpec::option("state").with_default("active")];
        let matches = matches_for(&params, &["test"]);

        let args = Arguments::from_matches(&params, &matches).unwrap();
        assert_eq!(args.require::<String>("state").unwrap(), "active");
    }

    #[test]
    fn test_multiple_values() {
        let params = vec![ParamSpec::option("tag").multiple()];
        let matches = matches_for(&params, &["test", "--tag", "a", "--tag", "b"]);

        let args = Arguments::from_matches(&params, &matches).unwrap();
        assert_eq!(args.require::<Vec<String>>("tag").unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_wrong_type_is_invalid_argument() {
        let args = Arguments::new().with("limit", "many");
        assert!(matches!(
            args.get::<i64>("limit"),
            Err(CliError::InvalidArgument { .. })
        ));
    }

    #[test]
    fn test_to_json() {
        let args = Arguments::new()
            .with_positional("account_id", "ac-1")
            .with("all", true);
        assert_eq!(args.to_json(), json!({"account_id": "ac-1", "all": true}));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_non_finite_float_is_rejected_by_parser() {
        let params = vec![ParamSpec::option("ratio").with_type(ParamType::Float)];
        let mut cmd = Command::new("test");
        for param in &params {
            cmd = cmd.arg(CliBuilder::build_arg(param));
        }

        for raw in ["NaN", "inf", "-infinity"] {
            let err = cmd
                .clone()
                .try_get_matches_from(["test", "--ratio", raw])
                .err()
                .unwrap();
            assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        }

        let matches = matches_for(&params, &["test", "--ratio", "1e3"]);
        let args = Arguments::from_matches(&params, &matches).unwrap();
        assert_eq!(args.require::<f64>("ratio").unwrap(), 1000.0);
    }
}
