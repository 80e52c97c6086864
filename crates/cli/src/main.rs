//! archsim command-line front end.
//!
//! This binary is the transport in front of the estimator. It provides:
//! 1. **simulate:** Validate a flat JSON configuration (file, preset or stdin) and print its metrics.
//! 2. **validate:** Only validate, reporting every offending field.
//! 3. **presets:** Print the predefined configuration catalog.
//! 4. **baseline:** Print the baseline configuration and its metrics.
//!
//! Logging goes to stderr and is controlled with `RUST_LOG` (e.g. `RUST_LOG=archsim_core=debug`).

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use archsim_core::common::{LoadError, ValidationErrors};
use archsim_core::config::{self, RawConfig, presets};
use archsim_core::sim::loader;
use archsim_core::stats::{REPORT_SECTIONS, Report};
use archsim_core::{Configuration, SimulationEngine};

/// Exit status for a rejected configuration.
const EXIT_INVALID: u8 = 2;

#[derive(Parser, Debug)]
#[command(
    name = "archsim",
    author,
    version,
    about = "Analytical CPU / cache / memory / power estimator",
    long_about = "Estimate performance, power and efficiency metrics from a flat JSON hardware description.\n\nExamples:\n  archsim simulate --config core.json\n  archsim simulate --preset high-perf --format text\n  echo '{\"cache_size_kb\": 64}' | archsim simulate\n  archsim presets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Validate a configuration and print its metrics.
    Simulate {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Validate a configuration without running it.
    Validate {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Print the predefined configurations.
    Presets,

    /// Print the baseline configuration and its metrics.
    Baseline {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Debug)]
struct InputArgs {
    /// Flat JSON configuration file; reads stdin when neither this nor --preset is given.
    #[arg(short, long, conflicts_with = "preset")]
    config: Option<PathBuf>,

    /// Id of a predefined configuration (see `archsim presets`).
    #[arg(short, long)]
    preset: Option<String>,
}

#[derive(clap::Args, Debug)]
struct OutputArgs {
    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Json)]
    format: Format,

    /// Text report sections to print (summary, cache, branch, power); all when omitted.
    #[arg(short, long, value_delimiter = ',')]
    sections: Vec<String>,

    /// Include the breakdown of intermediate quantities in JSON output.
    #[arg(long)]
    detail: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum Format {
    Json,
    Text,
}

/// Failure of a CLI command.
enum CliError {
    Load(LoadError),
    Invalid(ValidationErrors),
    UnknownPreset(String),
    Encode(serde_json::Error),
}

impl From<LoadError> for CliError {
    fn from(e: LoadError) -> Self {
        Self::Load(e)
    }
}

impl From<ValidationErrors> for CliError {
    fn from(e: ValidationErrors) -> Self {
        Self::Invalid(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encode(e)
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let engine = SimulationEngine::new();

    let outcome = match cli.command {
        Commands::Simulate { input, output } => cmd_simulate(&engine, &input, &output),
        Commands::Validate { input } => cmd_validate(&input),
        Commands::Presets => cmd_presets(),
        Commands::Baseline { output } => cmd_baseline(&engine, &output),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(CliError::Invalid(errors)) => {
            // Rejections are a normal response: print them like a result, on stdout.
            match serde_json::to_string_pretty(&errors) {
                Ok(json) => println!("{json}"),
                Err(e) => error!("failed to encode errors: {e}"),
            }
            ExitCode::from(EXIT_INVALID)
        }
        Err(CliError::Load(e)) => {
            eprintln!("[!] {e}");
            ExitCode::FAILURE
        }
        Err(CliError::UnknownPreset(id)) => {
            eprintln!("[!] unknown preset '{id}' (see `archsim presets`)");
            ExitCode::FAILURE
        }
        Err(CliError::Encode(e)) => {
            eprintln!("[!] failed to encode output: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Resolves the raw configuration named by the input arguments.
fn read_input(input: &InputArgs) -> Result<RawConfig, CliError> {
    if let Some(id) = &input.preset {
        let preset = presets::find(id).ok_or_else(|| CliError::UnknownPreset(id.clone()))?;
        return Ok(preset.config.to_raw());
    }
    match &input.config {
        Some(path) => {
            info!(path = %path.display(), "loading configuration");
            Ok(loader::load_raw(path)?)
        }
        None => {
            info!("reading configuration from stdin");
            Ok(loader::read_raw(io::stdin().lock())?)
        }
    }
}

fn cmd_simulate(engine: &SimulationEngine, input: &InputArgs, output: &OutputArgs) -> Result<(), CliError> {
    let raw = read_input(input)?;
    let config = config::validate(&raw)?;
    emit(&engine.run_detailed(&config), output)
}

fn cmd_validate(input: &InputArgs) -> Result<(), CliError> {
    let raw = read_input(input)?;
    let config = config::validate(&raw)?;
    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn cmd_presets() -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(&presets::predefined_configs())?);
    Ok(())
}

fn cmd_baseline(engine: &SimulationEngine, output: &OutputArgs) -> Result<(), CliError> {
    #[derive(Serialize)]
    struct BaselineOut<'a> {
        config: &'a Configuration,
        #[serde(flatten)]
        report: &'a Report,
    }

    let config = Configuration::baseline();
    let report = engine.run_detailed(&config);
    match output.format {
        Format::Json => {
            let out = BaselineOut {
                config: &config,
                report: &report,
            };
            println!("{}", serde_json::to_string_pretty(&out)?);
            Ok(())
        }
        Format::Text => emit(&report, output),
    }
}

/// Prints a report in the requested format.
fn emit(report: &Report, output: &OutputArgs) -> Result<(), CliError> {
    match output.format {
        Format::Json if output.detail => println!("{}", serde_json::to_string_pretty(report)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(&report.result)?),
        Format::Text => {
            for s in &output.sections {
                if !REPORT_SECTIONS.contains(&s.as_str()) {
                    eprintln!("[!] ignoring unknown section '{s}'");
                }
            }
            report.print_sections(&output.sections);
        }
    }
    Ok(())
}
