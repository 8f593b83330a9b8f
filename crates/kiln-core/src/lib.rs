//! kiln core - shared functionality for the kiln command line
//!
//! Everything here is plumbing the generators lean on: the typed error
//! every command reports through, standard paths, the YAML configuration
//! file, and the one place that is allowed to write generated files.

pub mod config;
pub mod error;
pub mod fs;
pub mod paths;

pub use config::Config;
pub use error::{CliError, Result};
pub use paths::Paths;
