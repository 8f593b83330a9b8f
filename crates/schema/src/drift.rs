//! Drift emitter: descriptors -> Dart table class
//!
//! ```dart
//! class Users extends Table {
//!   IntColumn get id => integer().autoIncrement()();
//!   TextColumn get email => text()();
//! }
//! ```

use kiln_core::Result;

use crate::case::{to_camel_case, to_pascal_case};
use crate::column::{numeric_default, ColumnDescriptor};
use crate::identifier::validate_identifier;
use crate::types::ColumnType;

/// Build a Drift table class
///
/// Names are validated exactly like the SQL emitter does, then the class
/// name is PascalCased and getters camelCased. Numeric defaults must be
/// numeric literals, as in `columns_to_sql`.
pub fn columns_to_drift(table_name: &str, columns: &[ColumnDescriptor]) -> Result<String> {
    validate_identifier(table_name, "table name")?;

    let declarations = columns
        .iter()
        .map(column_declaration)
        .collect::<Result<Vec<_>>>()?;

    let class_name = to_pascal_case(table_name);
    tracing::debug!(class = %class_name, columns = declarations.len(), "emitting Drift table");

    let mut out = format!("class {} extends Table {{\n", class_name);
    for declaration in &declarations {
        out.push_str("  ");
        out.push_str(declaration);
        out.push('\n');
    }

    // Drift infers the key only for autoIncrement columns
    let keys: Vec<String> = columns
        .iter()
        .filter(|c| c.is_primary_key && !c.is_auto_increment)
        .map(|c| to_camel_case(&c.name))
        .collect();
    if !keys.is_empty() {
        out.push_str("\n  @override\n");
        out.push_str(&format!(
            "  Set<Column> get primaryKey => {{{}}};\n",
            keys.join(", ")
        ));
    }

    out.push('}');
    Ok(out)
}

fn column_declaration(column: &ColumnDescriptor) -> Result<String> {
    validate_identifier(&column.name, "column name")?;

    let mut chain = format!("{}()", column.ty.drift_builder());
    if column.is_generated_key() {
        chain.push_str(".autoIncrement()");
    }
    if column.is_nullable {
        chain.push_str(".nullable()");
    }
    if let Some(value) = column.default_value.as_deref() {
        chain.push_str(&format!(".withDefault({})", dart_default(column, value)?));
    }

    Ok(format!(
        "{} get {} => {}();",
        column.ty.drift_column_class(),
        to_camel_case(&column.name),
        chain
    ))
}

fn dart_default(column: &ColumnDescriptor, value: &str) -> Result<String> {
    if column.defaults_to_now() {
        return Ok("currentDateAndTime".to_string());
    }

    match column.ty {
        ColumnType::Boolean => {
            let flag = value.trim().eq_ignore_ascii_case("true");
            Ok(format!("const Constant({})", flag))
        }
        ref ty if ty.is_numeric() => Ok(format!(
            "const Constant({})",
            numeric_default(column, value)?
        )),
        _ => Ok(format!("const Constant('{}')", escape_dart(value))),
    }
}

/// Escape for a single-quoted Dart string literal
fn escape_dart(value: &str) -> String {
    value
        .replace('\\', "\\\\")
        .replace('\'', "\\'")
        .replace('$', "\\$")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_column_spec;

    fn drift(table: &str, spec: &str) -> String {
        columns_to_drift(table, &parse_column_spec(spec).unwrap()).unwrap()
    }

    #[test]
    fn test_nullable() {
        let out = drift("Items", "description:text:nullable");
        assert!(out.contains(".nullable()"));
        assert!(out.contains("TextColumn get description => text().nullable()();"));
    }

    #[test]
    fn test_class_layout() {
        let out = drift("order_items", "id:int:pk:autoincrement,productName:text");
        assert_eq!(
            out,
            "class OrderItems extends Table {\n  IntColumn get id => integer().autoIncrement()();\n  TextColumn get productName => text()();\n}"
        );
    }

    #[test]
    fn test_getters_are_camel_cased() {
        let out = drift("users", "created_at:datetime,is_admin:bool");
        assert!(out.contains("DateTimeColumn get createdAt => dateTime()();"));
        assert!(out.contains("BoolColumn get isAdmin => boolean()();"));
    }

    #[test]
    fn test_getter_keeps_edge_underscores() {
        let out = drift("t", "type_:text,__meta__:text");
        assert!(out.contains("TextColumn get type_ => text()();"));
        assert!(out.contains("TextColumn get __meta__ => text()();"));
    }

    #[test]
    fn test_type_mapping() {
        let out = drift("t", "a:bigint,b:uuid,c:json,d:bytes,e:float,f:money");
        assert!(out.contains("Int64Column get a => int64()();"));
        assert!(out.contains("TextColumn get b => text()();"));
        assert!(out.contains("TextColumn get c => text()();"));
        assert!(out.contains("BlobColumn get d => blob()();"));
        assert!(out.contains("RealColumn get e => real()();"));
        assert!(out.contains("TextColumn get f => text()();"));
    }

    #[test]
    fn test_defaults() {
        let out = drift(
            "posts",
            "created:timestamp:default(now),published:bool:default(True),views:int:default(0),score:real:default(1.5),title:text:default(Untitled)",
        );
        assert!(out.contains("dateTime().withDefault(currentDateAndTime)()"));
        assert!(out.contains("boolean().withDefault(const Constant(true))()"));
        assert!(out.contains("integer().withDefault(const Constant(0))()"));
        assert!(out.contains("real().withDefault(const Constant(1.5))()"));
        assert!(out.contains("text().withDefault(const Constant('Untitled'))()"));
    }

    #[test]
    fn test_string_default_is_escaped() {
        let out = drift("notes", "body:text:default(it's $5)");
        assert!(out.contains(r"const Constant('it\'s \$5')"));
    }

    #[test]
    fn test_chain_order() {
        let out = drift("t", "note:text:nullable:default(x)");
        assert!(out.contains("text().nullable().withDefault(const Constant('x'))();"));
    }

    #[test]
    fn test_plain_primary_key_override() {
        let out = drift("tags", "slug:text:pk,label:text");
        assert!(out.contains("TextColumn get slug => text()();"));
        assert!(out.contains("  @override\n  Set<Column> get primaryKey => {slug};\n}"));

        let out = drift("tags", "id:int:pk:autoincrement");
        assert!(!out.contains("primaryKey"));
    }

    #[test]
    fn test_table_name_validated() {
        let columns = parse_column_spec("id:int").unwrap();
        let err = columns_to_drift("users; DROP TABLE users;--", &columns).unwrap_err();
        assert_eq!(err.code(), "INVALID_IDENTIFIER");
        assert!(err.to_string().contains("table name"));
    }

    #[test]
    fn test_column_name_validated() {
        let columns = parse_column_spec("bad-name:text").unwrap();
        let err = columns_to_drift("items", &columns).unwrap_err();
        assert!(err.to_string().contains("column name"));
    }

    #[test]
    fn test_numeric_default_must_be_numeric() {
        let columns = parse_column_spec("n:bigint:default(lots)").unwrap();
        let err = columns_to_drift("t", &columns).unwrap_err();
        assert_eq!(err.code(), "INVALID_DEFAULT");
    }
}
