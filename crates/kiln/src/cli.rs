//! CLI command definitions and handlers

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand, ValueEnum};
use kiln_core::{fs::write_within, CliError, Config, Paths};
use schema::identifier::NameKind;
use schema::render::{render_drift_file, render_migration};
use schema::types::TYPE_ALIASES;
use schema::{columns_to_drift, columns_to_sql, parse_column_spec, ColumnType};
use std::path::{Path, PathBuf};

use crate::output;

/// kiln - Developer command line
#[derive(Parser)]
#[command(name = "kiln")]
#[command(version)]
#[command(about = "Generate SQL tables and Drift classes from one-line column specs")]
#[command(after_help = "\
COLUMN SPECS:
    name:type[:modifier...] separated by commas

    types       int, bigint, text, bool, real, datetime, uuid, json, blob (see 'kiln types')
    modifiers   pk, autoincrement, nullable, fk(table[.column]), default(value)

EXAMPLES:
    kiln gen sql users --columns 'id:int:pk:autoincrement,email:text,bio:text:nullable'
    kiln gen drift todo_items --columns 'id:int:pk:autoincrement,done:bool:default(false)'
    kiln gen migration posts --columns 'id:uuid:pk:autoincrement,author:uuid:fk(auth.users)'
    kiln gen columns --columns 'created:timestamp:default(now())' --json
    kiln check image-resizer --kind worker")]
pub struct Cli {
    /// More log output (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Config file (default: ~/.config/kiln/config.yaml or $KILN_CONFIG)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Generate code from a column spec
    Gen {
        #[command(subcommand)]
        target: GenTarget,
    },

    /// Check a name against a naming grammar
    Check {
        /// Name to check
        value: String,

        /// Grammar to check against
        #[arg(long, value_enum, default_value = "identifier")]
        kind: KindArg,
    },

    /// List supported column types and their aliases
    Types {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Manage the kiln configuration file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum GenTarget {
    /// Print or write a CREATE TABLE statement
    Sql {
        /// Table name
        table: String,

        /// Column spec (name:type[:modifier...],...)
        #[arg(short, long)]
        columns: String,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Print or write a Drift table class
    Drift {
        /// Table name
        table: String,

        /// Column spec (name:type[:modifier...],...)
        #[arg(short, long)]
        columns: String,

        /// Write to this file instead of stdout
        #[arg(short, long, value_name = "PATH", conflicts_with = "write")]
        out: Option<PathBuf>,

        /// Write <table>.dart into the configured Drift directory
        #[arg(long)]
        write: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Write a timestamped CREATE TABLE migration
    Migration {
        /// Table name
        table: String,

        /// Column spec (name:type[:modifier...],...)
        #[arg(short, long)]
        columns: String,

        /// Migrations directory (default: from config)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Print the migration instead of writing it
        #[arg(long)]
        dry_run: bool,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Show how a column spec is parsed
    Columns {
        /// Column spec (name:type[:modifier...],...)
        #[arg(short, long)]
        columns: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration
    Show,

    /// Print the config file location
    Path,

    /// Write a default config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Table/column identifier
    Identifier,
    /// Project name (letters, digits, hyphens, underscores)
    Project,
    /// Worker name (letters, digits, hyphens)
    Worker,
}

impl From<KindArg> for NameKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Identifier => NameKind::Identifier,
            KindArg::Project => NameKind::Project,
            KindArg::Worker => NameKind::Worker,
        }
    }
}

/// What every command gets: configuration and where it may write
pub struct Context {
    pub config: Config,
    pub config_path: PathBuf,
    pub cwd: PathBuf,
}

impl Context {
    pub fn load(config_path: PathBuf) -> Result<Self> {
        let config = Config::load_from(&config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
        let cwd = std::env::current_dir().context("Failed to read current directory")?;
        tracing::debug!(config = %config_path.display(), cwd = %cwd.display(), "context loaded");

        if !config.output.color {
            colored::control::set_override(false);
        }

        Ok(Self {
            config,
            config_path,
            cwd,
        })
    }
}

pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli
        .config
        .unwrap_or_else(|| Paths::new().resolve_config_file());

    // These must work even when the current config does not parse
    match &cli.command {
        Commands::Config {
            action: ConfigAction::Path,
        } => return cmd_config_path(&config_path),
        Commands::Config {
            action: ConfigAction::Init { force },
        } => return cmd_config_init(&config_path, *force),
        _ => {}
    }

    let ctx = Context::load(config_path)?;

    match cli.command {
        Commands::Gen { target } => match target {
            GenTarget::Sql {
                table,
                columns,
                out,
                force,
            } => cmd_gen_sql(&ctx, &table, &columns, out.as_deref(), force),
            GenTarget::Drift {
                table,
                columns,
                out,
                write,
                force,
            } => cmd_gen_drift(&ctx, &table, &columns, out.as_deref(), write, force),
            GenTarget::Migration {
                table,
                columns,
                dir,
                dry_run,
                force,
            } => cmd_gen_migration(&ctx, &table, &columns, dir.as_deref(), dry_run, force),
            GenTarget::Columns { columns, json } => cmd_gen_columns(&columns, json),
        },
        Commands::Check { value, kind } => cmd_check(&value, kind.into()),
        Commands::Types { json } => cmd_types(json),
        Commands::Config { action } => match action {
            ConfigAction::Show => cmd_config_show(&ctx),
            ConfigAction::Path => cmd_config_path(&ctx.config_path),
            ConfigAction::Init { force } => cmd_config_init(&ctx.config_path, force),
        },
    }
}

/// CREATE TABLE to stdout or a file
pub fn cmd_gen_sql(
    ctx: &Context,
    table: &str,
    spec: &str,
    out: Option<&Path>,
    force: bool,
) -> Result<()> {
    let columns = parse_column_spec(spec)?;
    let sql = columns_to_sql(table, &columns)?;

    match out {
        Some(path) => write_output(ctx, path, &format!("{}\n", sql), force),
        None => {
            println!("{}", sql);
            Ok(())
        }
    }
}

/// Drift class to stdout, a file, or the configured Drift directory
pub fn cmd_gen_drift(
    ctx: &Context,
    table: &str,
    spec: &str,
    out: Option<&Path>,
    write: bool,
    force: bool,
) -> Result<()> {
    let columns = parse_column_spec(spec)?;

    if let Some(path) = out {
        let file = render_drift_file(table, &columns)?;
        return write_output(ctx, path, &file.contents, force);
    }

    if write {
        let file = render_drift_file(table, &columns)?;
        let path = ctx.config.drift_dir()?.join(&file.file_name);
        return write_output(ctx, &path, &file.contents, force);
    }

    println!("{}", columns_to_drift(table, &columns)?);
    Ok(())
}

/// Timestamped migration into the migrations directory
pub fn cmd_gen_migration(
    ctx: &Context,
    table: &str,
    spec: &str,
    dir: Option<&Path>,
    dry_run: bool,
    force: bool,
) -> Result<()> {
    let columns = parse_column_spec(spec)?;
    let file = render_migration(table, &columns, chrono::Local::now())?;

    if dry_run {
        println!("-- {}", file.file_name);
        print!("{}", file.contents);
        return Ok(());
    }

    let dir = match dir {
        Some(dir) => dir.to_path_buf(),
        None => ctx.config.migrations_dir()?,
    };
    write_output(ctx, &dir.join(&file.file_name), &file.contents, force)
}

/// Parsed descriptors as a table or JSON
pub fn cmd_gen_columns(spec: &str, json: bool) -> Result<()> {
    let columns = parse_column_spec(spec)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&columns)?);
    } else {
        output::print_columns(&columns);
    }
    Ok(())
}

pub fn cmd_check(value: &str, kind: NameKind) -> Result<()> {
    kind.validate(value)?;
    println!("ok: '{}' is a valid {} name", value, kind.as_str());
    Ok(())
}

pub fn cmd_types(json: bool) -> Result<()> {
    if !json {
        output::print_types();
        return Ok(());
    }

    let types: Vec<serde_json::Value> = TYPE_ALIASES
        .iter()
        .map(|(name, aliases)| {
            let ty = ColumnType::normalize(name);
            serde_json::json!({
                "type": name,
                "aliases": aliases,
                "sql": ty.sql_type(),
                "drift": ty.drift_builder(),
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&types)?);
    Ok(())
}

pub fn cmd_config_show(ctx: &Context) -> Result<()> {
    println!("# {}", ctx.config_path.display());
    print!("{}", serde_yaml::to_string(&ctx.config)?);
    Ok(())
}

pub fn cmd_config_path(config_path: &Path) -> Result<()> {
    println!("{}", config_path.display());
    Ok(())
}

pub fn cmd_config_init(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        return Err(CliError::AlreadyExists(config_path.to_path_buf()).into());
    }

    Config::default().save_to(config_path)?;
    output::success(&format!("Config written: {}", config_path.display()));
    Ok(())
}

/// Write generated text below the working directory
fn write_output(ctx: &Context, path: &Path, contents: &str, force: bool) -> Result<()> {
    let written = write_within(&ctx.cwd, path, contents, force)?;
    output::success(&format!("Wrote {}", written.display()));
    Ok(())
}
