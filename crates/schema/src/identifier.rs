//! Name grammars
//!
//! Three independent fixed patterns:
//! - identifiers (table, column, foreign key parts): `^[A-Za-z_][A-Za-z0-9_]*$`
//! - project names: letters, digits, hyphens, underscores; leading letter
//! - worker names: letters, digits, hyphens; leading letter, no underscores
//!
//! Emitted SQL is plain string interpolation, so the identifier grammar is
//! what keeps `users; DROP TABLE users;--` out of a `CREATE TABLE`.

use kiln_core::{CliError, Result};
use regex::Regex;
use std::sync::LazyLock;

static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").unwrap());

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").unwrap());

static WORKER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9-]*$").unwrap());

/// Which grammar a name is checked against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameKind {
    Identifier,
    Project,
    Worker,
}

impl NameKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameKind::Identifier => "identifier",
            NameKind::Project => "project",
            NameKind::Worker => "worker",
        }
    }

    pub fn validate(&self, value: &str) -> Result<()> {
        match self {
            NameKind::Identifier => validate_identifier(value, "identifier"),
            NameKind::Project => validate_project_name(value),
            NameKind::Worker => validate_worker_name(value),
        }
    }
}

/// Whether `value` is a legal table/column identifier
pub fn is_valid_identifier(value: &str) -> bool {
    IDENTIFIER.is_match(value)
}

/// Fail with an error naming `role` ("table name", "column name", ...)
pub fn validate_identifier(value: &str, role: &'static str) -> Result<()> {
    if is_valid_identifier(value) {
        Ok(())
    } else {
        Err(CliError::InvalidIdentifier {
            role,
            value: value.to_string(),
        })
    }
}

pub fn is_valid_project_name(value: &str) -> bool {
    PROJECT_NAME.is_match(value)
}

pub fn validate_project_name(value: &str) -> Result<()> {
    if is_valid_project_name(value) {
        Ok(())
    } else {
        Err(CliError::InvalidName {
            kind: "project",
            value: value.to_string(),
        })
    }
}

pub fn is_valid_worker_name(value: &str) -> bool {
    WORKER_NAME.is_match(value)
}

pub fn validate_worker_name(value: &str) -> Result<()> {
    if is_valid_worker_name(value) {
        Ok(())
    } else {
        Err(CliError::InvalidName {
            kind: "worker",
            value: value.to_string(),
        })
    }
}
