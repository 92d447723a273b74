//! graphdoc CLI
//!
//! Checks that `@aicontext-graph` blocks in Java Javadoc list every project
//! type a class depends on.
//!
//! ## Commands
//!
//! - `validate` - Scan tags, compare graphs with code, exit 1 on missing edges
//! - `suggest` - Write a starter graph per class under `target/suggested-graphs`
//! - `parse` - Print notation text as JSON nodes
//!
//! Settings come from `graphdoc.toml` in the base directory; flags win.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use graphdoc_analyzer::{scan_source_tree, SourceFilter};
use graphdoc_notation::parse_blocks;
use graphdoc_validator::{suggest_graphs, GraphValidator, ValidatorConfig, ValidatorError};
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

mod config;

use config::{Overrides, Settings};

#[derive(Parser)]
#[command(name = "graphdoc")]
#[command(about = "Validate @aicontext-graph documentation against Java dependencies")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Check documented graphs against the code
    Validate {
        /// Java source root (default: src/main/java)
        #[arg(long, value_name = "DIR")]
        source_dir: Option<PathBuf>,
        /// Project root for config lookup and relative paths
        #[arg(long, value_name = "DIR")]
        base_dir: Option<PathBuf>,
        /// Configuration file (default: <base-dir>/graphdoc.toml)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Write suggested graphs for every class
    Suggest {
        #[arg(long, value_name = "DIR")]
        source_dir: Option<PathBuf>,
        /// Output directory (default: target/suggested-graphs)
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
    /// Parse notation from FILE or stdin
    Parse {
        file: Option<PathBuf>,
    },
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Validate {
            source_dir,
            base_dir,
            config,
            json,
        } => validate(
            Overrides {
                base_dir,
                config,
                source_dir,
                out_dir: None,
            },
            json,
        ),
        Commands::Suggest {
            source_dir,
            out_dir,
            config,
        } => suggest(Overrides {
            base_dir: None,
            config,
            source_dir,
            out_dir,
        }),
        Commands::Parse { file } => parse(file),
    }
}

/// Logs go to stderr; stdout carries command output only
fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn validate(overrides: Overrides, json: bool) -> Result<ExitCode> {
    let settings = Settings::resolve(overrides)?;
    if !settings.validate_graph {
        log::info!("Graph validation disabled by configuration");
        return Ok(ExitCode::SUCCESS);
    }

    let filter = SourceFilter::new(settings.exclude.as_slice())?;
    let entries = if settings.source_dir.is_dir() {
        scan_source_tree(&settings.source_dir, &filter)?
    } else {
        log::warn!("Source directory does not exist: {}", settings.source_dir.display());
        Vec::new()
    };

    let validator = GraphValidator::new(ValidatorConfig {
        source_dir: settings.source_dir,
        base_dir: Some(settings.base_dir),
        exclude: settings.exclude,
    });
    let report = validator.validate(&entries)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for warning in &report.warnings {
            println!("warning: {warning}");
        }
        for error in &report.errors {
            println!("error: {error}");
        }
        println!(
            "{} graph(s) checked, {} skipped, {} error(s), {} warning(s)",
            report.checked,
            report.skipped,
            report.errors.len(),
            report.warnings.len()
        );
    }

    match report.into_verdict() {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(err @ ValidatorError::ValidationFailed { .. }) => {
            eprintln!("{err}");
            Ok(ExitCode::FAILURE)
        }
        Err(err) => Err(err.into()),
    }
}

fn suggest(overrides: Overrides) -> Result<ExitCode> {
    let settings = Settings::resolve(overrides)?;
    let filter = SourceFilter::new(settings.exclude.as_slice())?;

    let count = suggest_graphs(&settings.source_dir, &settings.suggested_graphs_dir, &filter)?;
    println!(
        "Wrote {count} suggested graph(s) to {}",
        settings.suggested_graphs_dir.display()
    );
    Ok(ExitCode::SUCCESS)
}

fn parse(file: Option<PathBuf>) -> Result<ExitCode> {
    let content = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let nodes = parse_blocks(&content);
    println!("{}", serde_json::to_string_pretty(&nodes)?);
    Ok(ExitCode::SUCCESS)
}
