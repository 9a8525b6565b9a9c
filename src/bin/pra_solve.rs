//! Command line front-end: load a PRA model from XML, evaluate all scenarios and write
//! the report next to the input (or to `--output`).

use anyhow::{bail, Context, Result};
use clap::Parser;
use fault_tree_pra::{load_model, report_path_for, write_report, SolverConfig};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

const DISCLAIMER: &str = "\
DISCLAIMER: This tool is intended for educational purposes only. The results must not be
used for safety-related decisions without independent verification.";

#[derive(Parser)]
#[command(name = "pra-solve")]
#[command(about = "Minimal cut sets and scenario probabilities for fault-tree PRA models")]
#[command(version)]
struct Cli {
    /// Path to the XML model (prompted for on stdin when omitted)
    input: Option<PathBuf>,

    /// Report file (defaults to `<input>_output.xml`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Solver configuration in TOML
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to install the log subscriber.");
    }

    println!("{}", DISCLAIMER);
    if let Err(e) = run(cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let input = match cli.input {
        Some(input) => input,
        None => prompt_input()?,
    };
    let config = match &cli.config {
        Some(path) => SolverConfig::from_file(path)
            .with_context(|| format!("Cannot load configuration {}", path.display()))?,
        None => SolverConfig::default(),
    };

    let model = load_model(&input).with_context(|| format!("Cannot load {}", input.display()))?;
    let report = model.evaluate(&config).context("Evaluation failed")?;
    for skipped in report.skipped() {
        info!("Skipped scenario {}: {}", skipped.name(), skipped.error());
    }

    let output = cli.output.unwrap_or_else(|| report_path_for(&input));
    write_report(&report, &output)
        .with_context(|| format!("Cannot write report {}", output.display()))?;
    println!("Results saved to: {}", output.display());
    Ok(())
}

fn prompt_input() -> Result<PathBuf> {
    print!("Path to the input XML file: ");
    std::io::stdout().flush().context("Cannot write to stdout")?;
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("Cannot read from stdin")?;
    let line = line.trim();
    if line.is_empty() {
        bail!("No input file given");
    }
    Ok(PathBuf::from(line))
}
