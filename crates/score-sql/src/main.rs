//! score-sql CLI
//!
//! Compiles JSON query documents to SQL for a chosen dialect.

mod document;

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use score_sql_core::{Binder, Builder, CompilerConfig, Dialect, Query, StatementKind};

use crate::document::QueryDocument;

/// Dialect-aware SQL statement compiler.
#[derive(Parser)]
#[command(name = "score-sql")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Target dialect: mysql, pgsql, sqlite or generic.
    #[arg(short, long, global = true, env = "SCORE_SQL_DIALECT")]
    dialect: Option<String>,

    /// Compiler configuration file (JSON).
    #[arg(short, long, global = true, env = "SCORE_SQL_CONFIG")]
    config: Option<PathBuf>,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a query document and print the SQL and its bindings.
    Compile {
        /// Query document, or `-` for stdin.
        file: PathBuf,

        /// Statement kind to compile.
        #[arg(short, long, value_enum, default_value_t = Kind::Select)]
        kind: Kind,
    },

    /// Show the clause steps each statement kind runs.
    Plan,
}

#[derive(Clone, Copy, ValueEnum)]
enum Kind {
    Select,
    Insert,
    Update,
    Delete,
}

impl From<Kind> for StatementKind {
    fn from(kind: Kind) -> Self {
        match kind {
            Kind::Select => Self::Select,
            Kind::Insert => Self::Insert,
            Kind::Update => Self::Update,
            Kind::Delete => Self::Delete,
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<CompilerConfig> {
    let mut config = match &cli.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            CompilerConfig::from_json(&text)?
        }
        None => CompilerConfig::default(),
    };
    if let Some(name) = &cli.dialect {
        config.dialect = Dialect::from_name(name);
    }
    Ok(config)
}

/// Builds the query a document describes and compiles it with the
/// configured dialect and placeholder prefix.
fn compile_document(
    config: &CompilerConfig,
    text: &str,
    kind: StatementKind,
) -> anyhow::Result<(String, Query)> {
    let builder = Builder::from_config(config);
    let binder = Binder::with_prefix(config.placeholder_prefix.as_str())?;
    let mut query = QueryDocument::from_json(text)?.into_query(binder)?;
    let sql = builder.compile(kind, &mut query)?;
    Ok((sql, query))
}

fn read_input(path: &Path) -> anyhow::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&cli)?;
    let builder = Builder::from_config(&config);
    info!(dialect = %builder.dialect(), "using dialect");

    match cli.command {
        Commands::Compile { file, kind } => {
            let text = read_input(&file)?;
            let (sql, query) = compile_document(&config, &text, kind.into())?;

            let bindings: serde_json::Map<String, serde_json::Value> = query
                .bindings()
                .iter()
                .map(|b| Ok((b.placeholder.clone(), serde_json::to_value(&b.value)?)))
                .collect::<anyhow::Result<_>>()?;

            println!("{sql}");
            println!("{}", serde_json::to_string_pretty(&bindings)?);
        }

        Commands::Plan => {
            for kind in [
                StatementKind::Select,
                StatementKind::Insert,
                StatementKind::Update,
                StatementKind::Delete,
            ] {
                let steps: Vec<String> = builder
                    .plan()
                    .clauses(kind)
                    .iter()
                    .map(|c| format!("{c:?}"))
                    .collect();
                println!("{kind}: {}", steps.join(" -> "));
            }
        }
    }

    Ok(())
}
