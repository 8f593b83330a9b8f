//! SQL emitter: descriptors -> Postgres `CREATE TABLE`

use kiln_core::Result;

use crate::case::to_snake_case;
use crate::column::{is_now, numeric_default, ColumnDescriptor};
use crate::identifier::validate_identifier;
use crate::types::ColumnType;

/// Build a `CREATE TABLE` statement
///
/// The table name is checked before any column is looked at; every column
/// name is checked as well. Names are snake_cased in the output.
///
/// Defaults on integer, bigint and real columns are written unquoted and
/// must therefore be plain numeric literals (`42`, `-1.5`, `1e3`).
/// Expressions such as `nextval('s')` or `1_000` fail with
/// `CliError::InvalidDefault`.
pub fn columns_to_sql(table_name: &str, columns: &[ColumnDescriptor]) -> Result<String> {
    validate_identifier(table_name, "table name")?;

    let lines = columns
        .iter()
        .map(column_line)
        .collect::<Result<Vec<_>>>()?;

    let table = to_snake_case(table_name);
    tracing::debug!(table = %table, columns = lines.len(), "emitting CREATE TABLE");

    if lines.is_empty() {
        return Ok(format!("CREATE TABLE {} ();", table));
    }
    Ok(format!("CREATE TABLE {} (\n  {}\n);", table, lines.join(",\n  ")))
}

fn column_line(column: &ColumnDescriptor) -> Result<String> {
    validate_identifier(&column.name, "column name")?;
    let name = to_snake_case(&column.name);

    let mut line = if column.is_generated_key() {
        if column.ty == ColumnType::Uuid {
            format!("{} UUID DEFAULT gen_random_uuid() PRIMARY KEY", name)
        } else {
            format!("{} SERIAL PRIMARY KEY", name)
        }
    } else if column.is_primary_key {
        format!("{} {} PRIMARY KEY", name, column.ty.sql_type())
    } else {
        let mut line = format!("{} {}", name, column.ty.sql_type());
        if !column.is_nullable {
            line.push_str(" NOT NULL");
        }
        line
    };

    if let Some(value) = column.default_value.as_deref() {
        if !column.is_primary_key {
            line.push_str(" DEFAULT ");
            line.push_str(&format_default(column, value)?);
        }
    }

    if let Some((table, target)) = column.reference() {
        line.push_str(&format!(
            " REFERENCES {}({}) ON DELETE CASCADE",
            table, target
        ));
    }

    Ok(line)
}

fn format_default(column: &ColumnDescriptor, value: &str) -> Result<String> {
    if is_now(value) {
        return Ok("now()".to_string());
    }

    match column.ty {
        ColumnType::Boolean => Ok(sql_bool(value).to_string()),
        ref ty if ty.is_numeric() => Ok(numeric_default(column, value)?.to_string()),
        _ => Ok(format!("'{}'", value.replace('\'', "''"))),
    }
}

fn sql_bool(value: &str) -> &'static str {
    if value.trim().eq_ignore_ascii_case("true") {
        "true"
    } else {
        "false"
    }
}
