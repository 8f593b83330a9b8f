//! Generated file rendering
//!
//! Wraps emitter output in a small file template using `{{PLACEHOLDER}}`
//! substitution, and picks the conventional file name for it.

use chrono::{DateTime, TimeZone};
use kiln_core::Result;
use regex::Regex;
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::LazyLock;

use crate::case::to_snake_case;
use crate::column::ColumnDescriptor;
use crate::drift::columns_to_drift;
use crate::sql::columns_to_sql;

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([A-Z_][A-Z0-9_]*)\}\}").unwrap());

const MIGRATION_TEMPLATE: &str = "\
-- Migration: create {{TABLE}}
-- Generated by kiln on {{DATE}}

{{SQL}}
";

const DRIFT_TEMPLATE: &str = "\
import 'package:drift/drift.dart';

{{CLASS}}
";

/// A rendered file, not yet written
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFile {
    /// Suggested file name, no directory
    pub file_name: String,
    pub contents: String,
}

/// Template variables
#[derive(Debug, Clone, Default)]
pub struct Variables {
    vars: HashMap<String, String>,
}

impl Variables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a variable value
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.vars.insert(key.to_uppercase(), value.into());
    }

    /// Replace all {{PLACEHOLDER}} patterns in a string
    ///
    /// Unknown placeholders are left as-is. Substituted values are not
    /// scanned again.
    pub fn substitute(&self, content: &str) -> String {
        PLACEHOLDER
            .replace_all(content, |caps: &regex::Captures| {
                let key = &caps[1];
                self.vars
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| format!("{{{{{}}}}}", key))
            })
            .to_string()
    }
}

/// `CREATE TABLE` migration named `<timestamp>_create_<table>.sql`
pub fn render_migration<Tz>(
    table_name: &str,
    columns: &[ColumnDescriptor],
    now: DateTime<Tz>,
) -> Result<RenderedFile>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let sql = columns_to_sql(table_name, columns)?;
    let table = to_snake_case(table_name);

    let mut vars = Variables::new();
    vars.set("TABLE", table.as_str());
    vars.set("DATE", now.format("%Y-%m-%d %H:%M:%S").to_string());
    vars.set("SQL", sql);

    Ok(RenderedFile {
        file_name: format!("{}_create_{}.sql", now.format("%Y%m%d%H%M%S"), table),
        contents: vars.substitute(MIGRATION_TEMPLATE),
    })
}

/// Dart source file named `<table>.dart` holding the Drift table class
pub fn render_drift_file(table_name: &str, columns: &[ColumnDescriptor]) -> Result<RenderedFile> {
    let class = columns_to_drift(table_name, columns)?;

    let mut vars = Variables::new();
    vars.set("CLASS", class);

    Ok(RenderedFile {
        file_name: format!("{}.dart", to_snake_case(table_name)),
        contents: vars.substitute(DRIFT_TEMPLATE),
    })
}
