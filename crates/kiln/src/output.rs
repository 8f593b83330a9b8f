//! Terminal output

use colored::*;
use kiln_core::error::EXIT_GENERAL;
use kiln_core::CliError;
use schema::types::TYPE_ALIASES;
use schema::{ColumnDescriptor, ColumnType};

/// Print an error (and its hint) to stderr, returning the exit code
pub fn report_error(err: &anyhow::Error) -> u8 {
    eprintln!("{} {:#}", "error:".red().bold(), err);

    let code = match err.downcast_ref::<CliError>() {
        Some(cli_err) => {
            if let Some(hint) = cli_err.hint() {
                eprintln!("{} {}", "hint:".yellow(), hint);
            }
            cli_err.exit_code()
        }
        None => EXIT_GENERAL,
    };

    u8::try_from(code).unwrap_or(1)
}

pub fn success(message: &str) {
    eprintln!("{} {}", "success:".green(), message);
}

/// Table of parsed columns
pub fn print_columns(columns: &[ColumnDescriptor]) {
    if columns.is_empty() {
        println!("No columns");
        return;
    }

    println!("{:<24} {:<10} {}", "NAME".bold(), "TYPE".bold(), "MODIFIERS".bold());
    for column in columns {
        println!(
            "{:<24} {:<10} {}",
            column.name.cyan(),
            column.ty.as_str(),
            modifiers(column).join(" ")
        );
    }
}

fn modifiers(column: &ColumnDescriptor) -> Vec<String> {
    let mut out = Vec::new();
    if column.is_primary_key {
        out.push("pk".to_string());
    }
    if column.is_auto_increment {
        out.push("autoincrement".to_string());
    }
    if column.is_nullable {
        out.push("nullable".to_string());
    }
    if let Some((table, target)) = column.reference() {
        out.push(format!("fk({}.{})", table, target));
    }
    if let Some(value) = &column.default_value {
        out.push(format!("default({})", value));
    }
    out
}

/// Table of accepted type aliases and what each emitter makes of them
pub fn print_types() {
    println!(
        "{:<10} {:<12} {:<16} {}",
        "TYPE".bold(),
        "SQL".bold(),
        "DRIFT".bold(),
        "ALIASES".bold()
    );
    for (name, aliases) in TYPE_ALIASES {
        let ty = ColumnType::normalize(name);
        println!(
            "{:<10} {:<12} {:<16} {}",
            name.cyan(),
            ty.sql_type(),
            ty.drift_column_class(),
            aliases.join(", ").dimmed()
        );
    }
    println!();
    println!(
        "{}",
        "Other type names are kept as written and emitted as TEXT / text().".dimmed()
    );
}
