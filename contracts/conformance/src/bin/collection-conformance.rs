//! Collection conformance CLI
//!
//! Runs the sequence and mapping suites against the reference testees and
//! prints one report per testee. Exits non-zero when any testee fails.

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use collection_conformance::{ConformanceConfig, ConformanceReport, TestHarness};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Collection conformance CLI
#[derive(Parser)]
#[command(name = "collection-conformance")]
#[command(about = "Check collections against the Sequence and Mapping contracts", long_about = None)]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "COLLECTION_CONFORMANCE_CONFIG")]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    output: OutputFormat,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the suites (the default)
    Run {
        /// Only run these testees
        #[arg(short, long)]
        testee: Vec<String>,
    },

    /// List the registered testees
    List,

    /// Show the effective configuration
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut config = ConformanceConfig::load(cli.config.as_deref())
        .context("failed to load conformance configuration")?;
    config.verbose |= cli.verbose;

    match cli.command.unwrap_or(Commands::Run { testee: Vec::new() }) {
        Commands::Run { testee } => run(config, &testee, cli.output),
        Commands::List => {
            let mut harness = TestHarness::with_config(config);
            harness.register_reference_testees();
            for (testee, contract) in harness.testees() {
                println!("{:<16} {}", testee, contract);
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn run(
    config: ConformanceConfig,
    testees: &[String],
    output: OutputFormat,
) -> anyhow::Result<ExitCode> {
    let mut harness = TestHarness::with_config(config);
    harness.register_reference_testees();

    let reports = harness.run_testees(testees)?;
    print_reports(&reports, output)?;

    let failed: Vec<&str> = reports
        .iter()
        .filter(|report| !report.is_conformant())
        .map(|report| report.testee.as_str())
        .collect();

    if failed.is_empty() {
        tracing::info!("All {} testee(s) conformant", reports.len());
        Ok(ExitCode::SUCCESS)
    } else {
        tracing::error!("Non-conformant testee(s): {}", failed.join(", "));
        Ok(ExitCode::FAILURE)
    }
}

fn print_reports(reports: &[ConformanceReport], output: OutputFormat) -> anyhow::Result<()> {
    match output {
        OutputFormat::Text => {
            for report in reports {
                println!("{}", report.to_text());
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(reports).context("failed to encode reports")?;
            println!("{}", json);
        }
    }
    Ok(())
}
