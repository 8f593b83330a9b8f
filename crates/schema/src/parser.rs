//! Column spec parser
//!
//! Grammar, one line:
//!
//! ```text
//! spec     := segment ("," segment)*
//! segment  := name ":" type (":" modifier)*
//! modifier := pk | primarykey | primary_key
//!           | autoincrement | auto_increment | serial
//!           | nullable | null
//!           | fk(table[.table...][.column])
//!           | default(value)
//! ```
//!
//! Commas and colons inside parentheses do not split, so
//! `default('a,b')` and `default(12:00)` keep their argument whole.
//! Empty segments are skipped. The first bad segment fails the whole parse.

use kiln_core::{CliError, Result};

use crate::column::{ColumnDescriptor, DEFAULT_FOREIGN_KEY_COLUMN};
use crate::identifier::validate_identifier;
use crate::types::ColumnType;

/// Parse a column spec into descriptors, in the order written
pub fn parse_column_spec(spec: &str) -> Result<Vec<ColumnDescriptor>> {
    let mut columns = Vec::new();

    for segment in split_top_level(spec, ',') {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }
        columns.push(parse_segment(segment)?);
    }

    tracing::debug!("parsed {} column(s) from spec", columns.len());
    Ok(columns)
}

fn parse_segment(segment: &str) -> Result<ColumnDescriptor> {
    let fields = split_top_level(segment, ':');
    if fields.len() < 2 {
        return Err(CliError::MalformedSegment {
            segment: segment.to_string(),
        });
    }

    let name = fields[0].trim();
    let raw_type = fields[1].trim();
    if name.is_empty() {
        return Err(CliError::MissingField {
            segment: segment.to_string(),
            field: "name",
        });
    }
    if raw_type.is_empty() {
        return Err(CliError::MissingField {
            segment: segment.to_string(),
            field: "type",
        });
    }

    let mut column = ColumnDescriptor::new(name, ColumnType::normalize(raw_type));
    for token in &fields[2..] {
        apply_modifier(&mut column, token.trim())?;
    }

    tracing::trace!(?column, "parsed column");
    Ok(column)
}

fn apply_modifier(column: &mut ColumnDescriptor, token: &str) -> Result<()> {
    match token.to_ascii_lowercase().as_str() {
        "pk" | "primarykey" | "primary_key" => column.is_primary_key = true,
        "autoincrement" | "auto_increment" | "serial" => column.is_auto_increment = true,
        "nullable" | "null" => column.is_nullable = true,
        _ => {
            if let Some(reference) = call_argument(token, "fk") {
                apply_foreign_key(column, reference)?;
            } else if let Some(value) = call_argument(token, "default") {
                column.default_value = Some(value.to_string());
            } else {
                return Err(CliError::UnknownModifier {
                    column: column.name.clone(),
                    modifier: token.to_string(),
                });
            }
        }
    }
    Ok(())
}

/// `fk(auth.users.id)` -> table `auth.users`, column `id`
/// `fk(users)` -> table `users`, column `id`
fn apply_foreign_key(column: &mut ColumnDescriptor, reference: &str) -> Result<()> {
    let parts: Vec<&str> = reference.trim().split('.').collect();

    let (table_parts, target) = match parts.split_last() {
        Some((last, rest)) if !rest.is_empty() => {
            validate_identifier(last, "foreign key column")?;
            (rest, *last)
        }
        _ => (&parts[..], DEFAULT_FOREIGN_KEY_COLUMN),
    };

    for part in table_parts {
        validate_identifier(part, "foreign key table")?;
    }

    column.is_foreign_key = true;
    column.foreign_key_table = Some(table_parts.join("."));
    column.foreign_key_column = Some(target.to_string());
    Ok(())
}

/// Argument of `keyword(...)`, keyword matched case-insensitively
///
/// Everything between the first `(` and the final `)` is returned, so
/// nested calls such as `default(now())` stay intact.
fn call_argument<'a>(token: &'a str, keyword: &str) -> Option<&'a str> {
    let open = keyword.len();
    let head = token.get(..open)?;
    if !head.eq_ignore_ascii_case(keyword) {
        return None;
    }
    let rest = &token[open..];
    if rest.len() < 2 || !rest.starts_with('(') || !rest.ends_with(')') {
        return None;
    }
    Some(&rest[1..rest.len() - 1])
}

/// Split on `sep` outside of parentheses
fn split_top_level(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;

    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            c if c == sep && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_columns() {
        let columns = parse_column_spec("id:int,name:text").unwrap();
        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].ty, ColumnType::Integer);
        assert_eq!(columns[1].name, "name");
        assert_eq!(columns[1].ty, ColumnType::Text);
        assert!(!columns[0].is_primary_key);
    }

    #[test]
    fn test_primary_key() {
        let columns = parse_column_spec("id:int:pk").unwrap();
        assert!(columns[0].is_primary_key);
        assert!(!columns[0].is_auto_increment);
    }

    #[test]
    fn test_foreign_key_with_schema() {
        let columns = parse_column_spec("userId:uuid:fk(auth.users.id)").unwrap();
        let col = &columns[0];
        assert!(col.is_foreign_key);
        assert_eq!(col.foreign_key_table.as_deref(), Some("auth.users"));
        assert_eq!(col.foreign_key_column.as_deref(), Some("id"));
    }

    #[test]
    fn test_foreign_key_defaults_column() {
        let columns = parse_column_spec("owner:uuid:fk(users)").unwrap();
        assert_eq!(columns[0].foreign_key_table.as_deref(), Some("users"));
        assert_eq!(columns[0].foreign_key_column.as_deref(), Some("id"));

        let columns = parse_column_spec("owner:int:FK(users.user_id)").unwrap();
        assert_eq!(columns[0].foreign_key_table.as_deref(), Some("users"));
        assert_eq!(columns[0].foreign_key_column.as_deref(), Some("user_id"));
    }

    #[test]
    fn test_every_foreign_key_has_a_column() {
        let spec = "a:int:fk(t),b:int:fk(s.t),c:int:fk(s.t.c),d:int:fk(x.y.z.w)";
        for col in parse_column_spec(spec).unwrap() {
            assert!(col.is_foreign_key);
            assert!(col.foreign_key_column.is_some(), "{} has no fk column", col.name);
        }
    }

    #[test]
    fn test_foreign_key_components_validated() {
        for spec in [
            "a:int:fk(users;drop)",
            "a:int:fk(auth.users-x.id)",
            "a:int:fk(users.id')",
            "a:int:fk()",
            "a:int:fk(users.)",
            "a:int:fk(.id)",
        ] {
            let err = parse_column_spec(spec).unwrap_err();
            assert_eq!(err.code(), "INVALID_IDENTIFIER", "spec: {}", spec);
        }
    }

    #[test]
    fn test_all_modifiers() {
        let columns =
            parse_column_spec("id:int:PK:AutoIncrement,note:str:null,flag:bool:default(TRUE)")
                .unwrap();
        assert!(columns[0].is_generated_key());
        assert!(columns[1].is_nullable);
        assert_eq!(columns[2].ty, ColumnType::Boolean);
        assert_eq!(columns[2].default_value.as_deref(), Some("TRUE"));
    }

    #[test]
    fn test_modifier_aliases() {
        let columns = parse_column_spec(
            "a:int:primary_key:serial,b:int:primarykey:auto_increment,c:text:nullable",
        )
        .unwrap();
        assert!(columns[0].is_generated_key());
        assert!(columns[1].is_generated_key());
        assert!(columns[2].is_nullable);
    }

    #[test]
    fn test_default_keeps_nested_parens_and_case() {
        let columns = parse_column_spec("created:timestamp:default(now())").unwrap();
        assert_eq!(columns[0].default_value.as_deref(), Some("now()"));

        let columns = parse_column_spec("status:text:DEFAULT(Active)").unwrap();
        assert_eq!(columns[0].default_value.as_deref(), Some("Active"));
    }

    #[test]
    fn test_default_may_contain_separators() {
        let columns = parse_column_spec("tags:text:default(a,b),opens:text:default(09:00),n:int").unwrap();
        assert_eq!(columns.len(), 3);
        assert_eq!(columns[0].default_value.as_deref(), Some("a,b"));
        assert_eq!(columns[1].default_value.as_deref(), Some("09:00"));
    }

    #[test]
    fn test_empty_segments_skipped() {
        let columns = parse_column_spec(",id:int,, ,name:text,").unwrap();
        assert_eq!(columns.len(), 2);
        assert!(parse_column_spec("").unwrap().is_empty());
    }

    #[test]
    fn test_count_matches_non_empty_segments() {
        for spec in ["a:int", "a:int,b:text", "a:int,,b:text, ,c:bool:nullable"] {
            let expected = spec.split(',').filter(|s| !s.trim().is_empty()).count();
            assert_eq!(parse_column_spec(spec).unwrap().len(), expected);
        }
    }

    #[test]
    fn test_trims_name_and_type() {
        let columns = parse_column_spec("  id : INT : pk ").unwrap();
        assert_eq!(columns[0].name, "id");
        assert_eq!(columns[0].ty, ColumnType::Integer);
        assert!(columns[0].is_primary_key);
    }

    #[test]
    fn test_unknown_type_passes_through() {
        let columns = parse_column_spec("price:Money").unwrap();
        assert_eq!(columns[0].ty, ColumnType::Other("money".to_string()));
    }

    #[test]
    fn test_malformed_segment() {
        let err = parse_column_spec("id:int,name").unwrap_err();
        assert_eq!(err.code(), "MALFORMED_SEGMENT");
        assert!(err.to_string().contains("'name'"));
    }

    #[test]
    fn test_missing_name_or_type() {
        let err = parse_column_spec(":int").unwrap_err();
        assert!(matches!(err, CliError::MissingField { field: "name", .. }));

        let err = parse_column_spec("id: ").unwrap_err();
        assert!(matches!(err, CliError::MissingField { field: "type", .. }));
    }

    #[test]
    fn test_unknown_modifier() {
        let err = parse_column_spec("id:int:unique").unwrap_err();
        assert_eq!(err.code(), "UNKNOWN_MODIFIER");
        assert!(err.to_string().contains("unique"));
        assert!(err.hint().unwrap().contains("autoincrement"));

        // Unclosed call is not a modifier
        assert!(parse_column_spec("a:int:fk(users").is_err());
        assert!(parse_column_spec("a:int:defaults(1)").is_err());
    }

    #[test]
    fn test_fails_atomically() {
        // Valid leading segments do not produce partial output
        let result = parse_column_spec("id:int:pk,name:text,bad:int:wat");
        assert!(result.is_err());
    }

    #[test]
    fn test_call_argument() {
        assert_eq!(call_argument("fk(users)", "fk"), Some("users"));
        assert_eq!(call_argument("Default(now())", "default"), Some("now()"));
        assert_eq!(call_argument("default()", "default"), Some(""));
        assert_eq!(call_argument("fk", "fk"), None);
        assert_eq!(call_argument("fkx(users)", "fk"), None);
    }
}
