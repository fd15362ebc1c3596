//! twp CLI - Tableau workbook SQL extraction tool
//!
//! Writes the worksheets, connections and custom SQL of a .twb or .twbx
//! workbook as a SQL-comment report.
//!
//!     $ twp input.twbx > output.sql

use clap::{Parser, ValueEnum};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use twp::render::{JsonFormat, ReportOptions};

/// Tableau workbook parser
#[derive(Parser)]
#[command(
    name = "twp",
    version,
    about = "Extract SQL and connection details from Tableau workbooks",
    long_about = "twp - Tableau workbook SQL extraction tool.\n\n\
                  Parses a .twb or .twbx workbook and writes its worksheets, \
                  datasource connections and custom SQL as a valid, readable SQL file."
)]
struct Cli {
    /// Workbook file path (.twb or .twbx)
    input: PathBuf,

    /// Output file path (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "sql")]
    format: OutputFormat,

    /// Output compact JSON (no indentation)
    #[arg(long)]
    compact: bool,

    /// Log extraction progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Output format
#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// SQL-comment report
    Sql,
    /// Extracted records as JSON
    Json,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_level.into()),
        )
        .with_writer(io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    tracing::debug!(input = %cli.input.display(), "converting workbook");
    let pb = create_spinner("Parsing workbook...");

    let workbook = match twp::parse_file(&cli.input) {
        Ok(workbook) => workbook,
        Err(e) => {
            pb.finish_and_clear();
            return Err(e.into());
        }
    };

    let rendered = match cli.format {
        OutputFormat::Sql => {
            pb.set_message("Rendering report...");
            twp::render::to_report(&workbook, &cli.input, &ReportOptions::default())
        }
        OutputFormat::Json => {
            pb.set_message("Rendering to JSON...");
            let format = if cli.compact {
                JsonFormat::Compact
            } else {
                JsonFormat::Pretty
            };
            twp::render::to_json(&workbook, format)
        }
    };

    pb.finish_and_clear();
    let rendered = rendered?;

    write_output(cli.output.as_ref(), &rendered)?;

    if let Some(path) = cli.output {
        eprintln!("{} Wrote {}", "✓".green().bold(), path.display());
    }

    Ok(())
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner()
        .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
        .template("{spinner:.blue} {msg}")
    {
        pb.set_style(style);
    }
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

fn write_output(path: Option<&PathBuf>, content: &str) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            write_report(&mut handle, content)?;
        }
    }
    Ok(())
}

fn write_report<W: Write>(writer: &mut W, content: &str) -> io::Result<()> {
    writer.write_all(content.as_bytes())?;
    writer.flush()
}
