//! Normalized column types
//!
//! Users write whatever alias they are used to (`str`, `varchar`, `int`,
//! `timestamp`...). Everything is folded into one small closed set, and each
//! emitter maps that set onto its own type tokens.

use serde::{Serialize, Serializer};
use std::fmt;

/// Normalized column type
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Integer,
    Bigint,
    Text,
    Boolean,
    Real,
    Datetime,
    Uuid,
    Jsonb,
    Blob,
    /// Unrecognized type name, kept lower-cased as written
    Other(String),
}

/// Accepted aliases for every normalized type, in display order
pub const TYPE_ALIASES: &[(&str, &[&str])] = &[
    ("integer", &["int", "integer", "number"]),
    ("bigint", &["bigint"]),
    ("text", &["str", "string", "varchar", "char", "text"]),
    ("boolean", &["bool", "boolean"]),
    ("real", &["float", "double", "decimal", "real"]),
    (
        "datetime",
        &["date", "timestamp", "timestamptz", "time", "datetime"],
    ),
    ("uuid", &["uuid"]),
    ("jsonb", &["json", "jsonb"]),
    ("blob", &["blob", "bytes", "binary"]),
];

impl ColumnType {
    /// Normalize a raw type name (case-insensitive)
    ///
    /// Normalizing an already normalized name returns the same type.
    pub fn normalize(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        match lower.as_str() {
            "int" | "integer" | "number" => ColumnType::Integer,
            "bigint" => ColumnType::Bigint,
            "str" | "string" | "varchar" | "char" | "text" => ColumnType::Text,
            "bool" | "boolean" => ColumnType::Boolean,
            "float" | "double" | "decimal" | "real" => ColumnType::Real,
            "date" | "timestamp" | "timestamptz" | "time" | "datetime" => ColumnType::Datetime,
            "uuid" => ColumnType::Uuid,
            "json" | "jsonb" => ColumnType::Jsonb,
            "blob" | "bytes" | "binary" => ColumnType::Blob,
            _ => ColumnType::Other(lower),
        }
    }

    /// Normalized name
    pub fn as_str(&self) -> &str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Bigint => "bigint",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Real => "real",
            ColumnType::Datetime => "datetime",
            ColumnType::Uuid => "uuid",
            ColumnType::Jsonb => "jsonb",
            ColumnType::Blob => "blob",
            ColumnType::Other(name) => name,
        }
    }

    /// Whether defaults for this type are emitted unquoted as numbers
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ColumnType::Integer | ColumnType::Real | ColumnType::Bigint
        )
    }

    /// Postgres type token
    pub fn sql_type(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Bigint => "BIGINT",
            ColumnType::Text => "TEXT",
            ColumnType::Boolean => "BOOLEAN",
            ColumnType::Real => "REAL",
            ColumnType::Datetime => "TIMESTAMPTZ",
            ColumnType::Uuid => "UUID",
            ColumnType::Jsonb => "JSONB",
            ColumnType::Blob => "BYTEA",
            ColumnType::Other(_) => "TEXT",
        }
    }

    /// Drift column builder (`integer()`, `text()`, ...)
    pub fn drift_builder(&self) -> &'static str {
        match self {
            ColumnType::Integer => "integer",
            ColumnType::Bigint => "int64",
            ColumnType::Text => "text",
            ColumnType::Boolean => "boolean",
            ColumnType::Real => "real",
            ColumnType::Datetime => "dateTime",
            ColumnType::Uuid | ColumnType::Jsonb => "text",
            ColumnType::Blob => "blob",
            ColumnType::Other(_) => "text",
        }
    }

    /// Drift column class the builder produces
    pub fn drift_column_class(&self) -> &'static str {
        match self.drift_builder() {
            "integer" => "IntColumn",
            "int64" => "Int64Column",
            "boolean" => "BoolColumn",
            "real" => "RealColumn",
            "dateTime" => "DateTimeColumn",
            "blob" => "BlobColumn",
            _ => "TextColumn",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(ColumnType::normalize("str"), ColumnType::Text);
        assert_eq!(ColumnType::normalize("VARCHAR"), ColumnType::Text);
        assert_eq!(ColumnType::normalize("number"), ColumnType::Integer);
        assert_eq!(ColumnType::normalize("Double"), ColumnType::Real);
        assert_eq!(ColumnType::normalize("timestamptz"), ColumnType::Datetime);
        assert_eq!(ColumnType::normalize("json"), ColumnType::Jsonb);
        assert_eq!(ColumnType::normalize("bytes"), ColumnType::Blob);
    }

    #[test]
    fn test_alias_table_matches_normalize() {
        for (normalized, aliases) in TYPE_ALIASES {
            for alias in aliases.iter() {
                assert_eq!(ColumnType::normalize(alias).as_str(), *normalized);
            }
        }
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for raw in ["int", "varchar", "timestamp", "bytes", "Money", "float"] {
            let once = ColumnType::normalize(raw);
            let twice = ColumnType::normalize(once.as_str());
            assert_eq!(once, twice, "normalizing '{}' twice changed it", raw);
        }
    }

    #[test]
    fn test_unknown_passes_through_lowercased() {
        assert_eq!(
            ColumnType::normalize("Money"),
            ColumnType::Other("money".to_string())
        );
        assert_eq!(ColumnType::normalize("Money").sql_type(), "TEXT");
        assert_eq!(ColumnType::normalize("Money").drift_builder(), "text");
    }

    #[test]
    fn test_sql_types() {
        assert_eq!(ColumnType::Datetime.sql_type(), "TIMESTAMPTZ");
        assert_eq!(ColumnType::Blob.sql_type(), "BYTEA");
        assert_eq!(ColumnType::Jsonb.sql_type(), "JSONB");
    }

    #[test]
    fn test_drift_types() {
        assert_eq!(ColumnType::Bigint.drift_builder(), "int64");
        assert_eq!(ColumnType::Bigint.drift_column_class(), "Int64Column");
        assert_eq!(ColumnType::Uuid.drift_column_class(), "TextColumn");
        assert_eq!(ColumnType::Datetime.drift_builder(), "dateTime");
        assert_eq!(ColumnType::Boolean.drift_column_class(), "BoolColumn");
    }
}
