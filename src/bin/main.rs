//! aggsql CLI - Compose aggregate SQL from JSON query specs
//!
//! Usage:
//!   aggsql compile <spec.json> [--dialect <dialect>] [--output sql|verbose]
//!   aggsql validate <spec.json>
//!   aggsql fields <spec.json>
//!
//! Examples:
//!   aggsql compile specs/investments.json
//!   aggsql -v compile specs/investments.json --dialect duckdb

use aggsql::compose::Composer;
use aggsql::config::Settings;
use aggsql::sql::Dialect;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "aggsql")]
#[command(about = "aggsql - Compose aggregate SQL queries from JSON specs")]
#[command(version)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query spec to SQL
    Compile {
        /// Path to the JSON spec
        file: PathBuf,

        /// SQL dialect to generate (defaults to the configured dialect)
        #[arg(short, long)]
        dialect: Option<DialectArg>,

        /// Output format
        #[arg(short, long, default_value = "sql")]
        output: OutputFormat,
    },

    /// Validate a query spec without generating SQL
    Validate {
        /// Path to the JSON spec
        file: PathBuf,
    },

    /// List the projection fields of a query spec
    Fields {
        /// Path to the JSON spec
        file: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum DialectArg {
    Bigquery,
    Duckdb,
}

impl From<DialectArg> for Dialect {
    fn from(arg: DialectArg) -> Self {
        match arg {
            DialectArg::Bigquery => Dialect::BigQuery,
            DialectArg::Duckdb => Dialect::DuckDb,
        }
    }
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// Output SQL only
    Sql,
    /// Output SQL with comments
    Verbose,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    aggsql::logging::init(&settings.logging.level, cli.verbose);

    match cli.command {
        Commands::Compile {
            file,
            dialect,
            output,
        } => cmd_compile(&settings, file, dialect, output),
        Commands::Validate { file } => cmd_validate(&settings, file),
        Commands::Fields { file } => cmd_fields(&settings, file),
    }
}

fn open(settings: &Settings, file: PathBuf) -> Result<(PathBuf, Composer), ExitCode> {
    let path = settings.composer.resolve_spec_path(&file).map_err(|e| {
        eprintln!("Configuration error: {}", e);
        ExitCode::FAILURE
    })?;

    match Composer::from_path(&path) {
        Ok(composer) => Ok((path, composer.with_dialect(settings.composer.dialect))),
        Err(e) => {
            eprintln!("Compose error: {}", e);
            Err(ExitCode::FAILURE)
        }
    }
}

fn cmd_compile(
    settings: &Settings,
    file: PathBuf,
    dialect: Option<DialectArg>,
    output: OutputFormat,
) -> ExitCode {
    let (path, mut composer) = match open(settings, file) {
        Ok(opened) => opened,
        Err(code) => return code,
    };
    if let Some(arg) = dialect {
        composer = composer.with_dialect(arg.into());
    }

    let sql = composer.build_query();
    match output {
        OutputFormat::Sql => {
            println!("{}", sql);
        }
        OutputFormat::Verbose => {
            println!("-- aggsql composed SQL");
            println!("-- Source: {}", path.display());
            println!("-- Table: {}", composer.table());
            println!("-- Dialect: {}", composer.dialect());
            for skipped in composer.group_by_clauses().skipped() {
                println!("-- Skipped GROUP_BY[{}]: {}", skipped.source_index, skipped.error);
            }
            for skipped in composer.value_clauses().skipped() {
                println!("-- Skipped VALUES[{}]: {}", skipped.source_index, skipped.error);
            }
            println!();
            println!("{}", sql);
        }
    }
    ExitCode::SUCCESS
}

fn cmd_validate(settings: &Settings, file: PathBuf) -> ExitCode {
    let (path, composer) = match open(settings, file) {
        Ok(opened) => opened,
        Err(code) => return code,
    };

    let group_by = composer.group_by_clauses();
    let values = composer.value_clauses();

    println!("✓ {} is valid", path.display());
    println!("  table:     {}", composer.table());
    println!(
        "  group by:  {} ({} skipped)",
        group_by.len(),
        group_by.skipped().len()
    );
    println!(
        "  values:    {} ({} skipped)",
        values.len(),
        values.skipped().len()
    );
    if let Some(limit) = composer.limit() {
        println!("  limit:     {}", limit);
    }
    if let Some(offset) = composer.offset() {
        println!("  offset:    {}", offset);
    }
    ExitCode::SUCCESS
}

fn cmd_fields(settings: &Settings, file: PathBuf) -> ExitCode {
    let (_, composer) = match open(settings, file) {
        Ok(opened) => opened,
        Err(code) => return code,
    };

    for field in composer.fields() {
        println!("{:>3}  {:<24} {}", field.index(), field.output_name(), field.handle());
    }
    ExitCode::SUCCESS
}
