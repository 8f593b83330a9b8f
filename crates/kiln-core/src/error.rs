//! The error every kiln command reports through
//!
//! Each variant carries enough to render a one-line message, an optional
//! corrective hint, and the process exit code the CLI should use.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

/// Exit code for bad user input (column specs, names)
pub const EXIT_VALIDATION: i32 = 2;
/// Exit code for refused filesystem operations
pub const EXIT_FILESYSTEM: i32 = 3;
/// Exit code for configuration problems
pub const EXIT_CONFIG: i32 = 4;
/// Exit code for everything else
pub const EXIT_GENERAL: i32 = 1;

/// kiln error
#[derive(Debug, Error)]
pub enum CliError {
    // ─────────────────────────────────────────────────────────────────────────
    // Column spec errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("invalid column definition '{segment}': expected name:type[:modifier...]")]
    MalformedSegment { segment: String },

    #[error("column definition '{segment}' is missing a {field}")]
    MissingField {
        segment: String,
        field: &'static str,
    },

    #[error("unknown modifier '{modifier}' on column '{column}'")]
    UnknownModifier { column: String, modifier: String },

    #[error("invalid {role}: '{value}'")]
    InvalidIdentifier { role: &'static str, value: String },

    #[error("invalid default for {ty} column '{column}': '{value}'")]
    InvalidDefault {
        column: String,
        ty: String,
        value: String,
    },

    #[error("invalid {kind} name: '{value}'")]
    InvalidName { kind: &'static str, value: String },

    // ─────────────────────────────────────────────────────────────────────────
    // Filesystem errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("refusing to write '{}' outside of '{}'", .path.display(), .base.display())]
    UnsafePath { path: PathBuf, base: PathBuf },

    #[error("file already exists: {}", .0.display())]
    AlreadyExists(PathBuf),

    // ─────────────────────────────────────────────────────────────────────────
    // Config / IO errors
    // ─────────────────────────────────────────────────────────────────────────
    #[error("configuration error: {0}")]
    Config(String),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::MalformedSegment { .. }
            | CliError::MissingField { .. }
            | CliError::UnknownModifier { .. }
            | CliError::InvalidIdentifier { .. }
            | CliError::InvalidDefault { .. }
            | CliError::InvalidName { .. } => EXIT_VALIDATION,

            CliError::UnsafePath { .. } | CliError::AlreadyExists(_) => EXIT_FILESYSTEM,

            CliError::Config(_) => EXIT_CONFIG,

            CliError::Yaml(_) | CliError::Io(_) => EXIT_GENERAL,
        }
    }

    /// Stable error code, used in JSON output
    pub fn code(&self) -> &'static str {
        match self {
            CliError::MalformedSegment { .. } => "MALFORMED_SEGMENT",
            CliError::MissingField { .. } => "MISSING_FIELD",
            CliError::UnknownModifier { .. } => "UNKNOWN_MODIFIER",
            CliError::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
            CliError::InvalidDefault { .. } => "INVALID_DEFAULT",
            CliError::InvalidName { .. } => "INVALID_NAME",
            CliError::UnsafePath { .. } => "UNSAFE_PATH",
            CliError::AlreadyExists(_) => "ALREADY_EXISTS",
            CliError::Config(_) => "CONFIG_ERROR",
            CliError::Yaml(_) => "YAML_ERROR",
            CliError::Io(_) => "IO_ERROR",
        }
    }

    /// Corrective hint shown under the error message
    pub fn hint(&self) -> Option<String> {
        match self {
            CliError::MalformedSegment { .. } => Some(
                "Columns look like 'id:int:pk,name:text:nullable' (name:type[:modifier...])"
                    .to_string(),
            ),
            CliError::MissingField { field, .. } => {
                Some(format!("Give every column a {} before the next ':'", field))
            }
            CliError::UnknownModifier { .. } => Some(
                "Valid modifiers: pk, autoincrement, nullable, fk(table.column), default(value)"
                    .to_string(),
            ),
            CliError::InvalidIdentifier { role, .. } => Some(format!(
                "A {} must start with a letter or underscore and contain only letters, digits and underscores",
                role
            )),
            CliError::InvalidDefault { ty, .. } => {
                Some(format!("Defaults for {} columns must be numeric literals", ty))
            }
            CliError::InvalidName { kind, .. } => match *kind {
                "worker" => Some(
                    "Worker names start with a letter and contain only letters, digits and hyphens"
                        .to_string(),
                ),
                _ => Some(format!(
                    "{} names start with a letter and contain only letters, digits, hyphens and underscores",
                    capitalize(kind)
                )),
            },
            CliError::UnsafePath { .. } => {
                Some("Use a relative path inside the current project".to_string())
            }
            CliError::AlreadyExists(_) => Some("Use --force to overwrite".to_string()),
            CliError::Config(_) | CliError::Yaml(_) => {
                Some("Check the file reported by 'kiln config path'".to_string())
            }
            CliError::Io(_) => None,
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
