//! Column descriptor

use kiln_core::{CliError, Result};
use regex::Regex;
use serde::Serialize;
use std::sync::LazyLock;

use crate::types::ColumnType;

static NUMERIC_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+(\.\d*)?|\.\d+)([eE][+-]?\d+)?$").unwrap());

/// Referenced column when `fk()` names only a table
pub const DEFAULT_FOREIGN_KEY_COLUMN: &str = "id";

/// One parsed column
///
/// Built once by the parser and only read afterwards. Foreign keys are
/// plain names of another table, not links to other descriptors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDescriptor {
    /// Column name as written (case conversion happens in the emitters)
    pub name: String,

    /// Normalized type
    #[serde(rename = "type")]
    pub ty: ColumnType,

    pub is_primary_key: bool,

    /// Only meaningful together with `is_primary_key`
    pub is_auto_increment: bool,

    pub is_foreign_key: bool,

    /// Dotted table path (`schema.table`), set iff `is_foreign_key`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key_table: Option<String>,

    /// Referenced column, set iff `is_foreign_key`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foreign_key_column: Option<String>,

    pub is_nullable: bool,

    /// Raw default (literal or expression such as `now()`), unescaped
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
}

impl ColumnDescriptor {
    /// A plain `NOT NULL` column with no modifiers
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            is_primary_key: false,
            is_auto_increment: false,
            is_foreign_key: false,
            foreign_key_table: None,
            foreign_key_column: None,
            is_nullable: false,
            default_value: None,
        }
    }

    /// Primary key whose value the database generates
    pub fn is_generated_key(&self) -> bool {
        self.is_primary_key && self.is_auto_increment
    }

    /// `(table, column)` this column references, if any
    pub fn reference(&self) -> Option<(&str, &str)> {
        if !self.is_foreign_key {
            return None;
        }
        let table = self.foreign_key_table.as_deref()?;
        let column = self
            .foreign_key_column
            .as_deref()
            .unwrap_or(DEFAULT_FOREIGN_KEY_COLUMN);
        Some((table, column))
    }

    /// Whether the default is the current-time expression
    pub fn defaults_to_now(&self) -> bool {
        self.default_value.as_deref().is_some_and(is_now)
    }
}

/// Default of a numeric column, refused unless it is a number
///
/// Numeric defaults are emitted unquoted, so anything else would land in the
/// output verbatim.
pub(crate) fn numeric_default<'a>(column: &ColumnDescriptor, value: &'a str) -> Result<&'a str> {
    let value = value.trim();
    if NUMERIC_LITERAL.is_match(value) {
        Ok(value)
    } else {
        Err(CliError::InvalidDefault {
            column: column.name.clone(),
            ty: column.ty.to_string(),
            value: value.to_string(),
        })
    }
}

/// `now` / `now()`, case-insensitive
pub(crate) fn is_now(value: &str) -> bool {
    let value = value.trim();
    value.eq_ignore_ascii_case("now()") || value.eq_ignore_ascii_case("now")
}
