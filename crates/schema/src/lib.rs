//! schema - Column spec compiler for kiln
//!
//! "Describe the table once. Get the DDL and the ORM class for free."
//!
//! A column spec is a single line such as
//! `id:int:pk:autoincrement,email:text,owner:uuid:fk(auth.users.id)`.
//! [`parse_column_spec`] turns it into [`ColumnDescriptor`]s, and the two
//! emitters turn those into a `CREATE TABLE` statement
//! ([`columns_to_sql`]) or a Drift table class ([`columns_to_drift`]).
//!
//! Emitted text is built by plain interpolation, so every table and column
//! name that reaches an emitter is checked against the identifier grammar
//! in [`identifier`] first.

pub mod case;
pub mod column;
pub mod drift;
pub mod identifier;
pub mod parser;
pub mod render;
pub mod sql;
pub mod types;

pub use column::ColumnDescriptor;
pub use drift::columns_to_drift;
pub use parser::parse_column_spec;
pub use sql::columns_to_sql;
pub use types::ColumnType;
