//! Main CLI application structure

use std::io::{self, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use super::output::{Output, OutputFormat};
use crate::config::Config;
use crate::document::{FsLoader, Source};
use crate::export::Exporter;
use crate::pipeline;

#[derive(Parser)]
#[command(name = "burrito")]
#[command(author, version, about = "Turn Markdown task files into calendars and tables of contents")]
pub struct Cli {
    /// Task file to read, or - for standard input
    pub input: String,

    /// Report to produce (calendar, simple, full, plain), then exporter
    /// options as KEY=VALUE (summary=1|0, fold=1|0). The report may be left
    /// out when the config file names a `default_exporter`.
    #[arg(value_name = "EXPORTER|KEY=VALUE")]
    pub args: Vec<String>,

    /// Configuration file (defaults to the user configuration directory)
    #[arg(long, env = "BURRITO_CONFIG")]
    pub config: Option<PathBuf>,

    /// Diagnostic output format
    #[arg(long, short = 'f', default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the level
fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .try_init();
}

/// Splits the free arguments into an optional leading exporter and options
fn split_exporter(args: &[String]) -> Result<(Option<Exporter>, &[String])> {
    match args.split_first() {
        Some((first, rest)) if !first.contains('=') => {
            let exporter = <Exporter as ValueEnum>::from_str(first, true).map_err(|_| {
                anyhow::anyhow!(
                    "Unknown exporter '{}' (expected one of: calendar, simple, full, plain)",
                    first
                )
            })?;
            Ok((Some(exporter), rest))
        }
        _ => Ok((None, args)),
    }
}

fn read_source(input: &str) -> Result<Source> {
    if input == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .context("Failed to read standard input")?;
        return Ok(Source::from_stdin(text));
    }

    let path = PathBuf::from(input);
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read task file: {}", path.display()))?;
    Ok(Source::from_file(path, text))
}

/// Main entry point for the CLI
pub fn run() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let output = Output::new(cli.format);

    let (exporter, options) = split_exporter(&cli.args)?;
    let config = Config::load(cli.config.as_deref())?;
    let exporter = exporter
        .or(config.default_exporter)
        .ok_or_else(|| {
            anyhow::anyhow!("No exporter given (expected one of: calendar, simple, full, plain)")
        })?;

    if !exporter.takes_options() && !options.is_empty() {
        output.warning(&format!("The {} exporter ignores options", exporter));
    }
    let options = config.export.with_options(options)?;
    debug!(%exporter, summary = options.summary, fold = options.fold, "starting");

    let source = read_source(&cli.input)?;
    let report = pipeline::render(&source, &FsLoader, exporter, &options);

    for diagnostic in &report.diagnostics {
        output.diagnostic(diagnostic);
    }

    if report.is_success() {
        output.report(&report.text);
        Ok(ExitCode::SUCCESS)
    } else {
        output.failure_summary(report.errors().count());
        Ok(ExitCode::FAILURE)
    }
}
