//! Shared utility functions for the generated CLI

use super::error::CliError;
use colored::*;

/// Display a user-friendly error message with suggestions
///
/// Usage errors are not handled here; clap renders those itself.
pub fn display_error(error: &CliError, app_name: Option<&str>) {
    let app = app_name.unwrap_or(env!("CARGO_PKG_NAME"));

    eprintln!("{} {}", "❌ Error:".red().bold(), error_context(error));
    eprintln!("   {}", error.to_string().red());

    let suggestions = suggestions_for(error, app);
    if !suggestions.is_empty() {
        eprintln!("{}", "💡 Suggestions:".blue());
        for suggestion in suggestions {
            eprintln!("   • {}", suggestion);
        }
    }
}

fn error_context(error: &CliError) -> &'static str {
    match error {
        CliError::Invocation { .. } => "command failed",
        CliError::MissingArgument(_) | CliError::InvalidArgument { .. } => "bad argument",
        CliError::Serialization(_) => "could not print the result",
        CliError::NotAContext(_) | CliError::InvalidDescriptor(_) | CliError::Routing(_) => {
            "the command tree is misconfigured"
        }
        CliError::Usage(_) => "invalid usage",
        CliError::Io(_) => "I/O error",
    }
}

/// Contextual hints for an error
pub fn suggestions_for(error: &CliError, app: &str) -> Vec<String> {
    match error {
        CliError::MissingArgument(_) | CliError::InvalidArgument { .. } => vec![
            format!("Run '{} <command> --help' to see the expected arguments", app),
        ],
        CliError::NotAContext(name) => vec![format!(
            "'{}' must return a client object to be used as a group",
            name
        )],
        CliError::Invocation { error, .. } => {
            let message = error.to_string().to_lowercase();
            if message.contains("connection") || message.contains("network") {
                vec![
                    "Check your network connection".to_string(),
                    "Verify the API endpoint is reachable".to_string(),
                ]
            } else if message.contains("permission denied") || message.contains("unauthorized") {
                vec!["Check your credentials and permissions".to_string()]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    }
}
