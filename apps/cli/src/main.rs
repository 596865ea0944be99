//! `generate-sources`: run sourcegen generators from the command line
//!
//! Method entries come from an optional TOML config file and from repeated
//! `--method KEY=PARAM` flags, in that order. Every failure is logged; the
//! exit status is non-zero when any failure was reported.

mod logging;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use sourcegen::{GenerateConfig, GenerateSources, GeneratorRegistry};

#[derive(Debug, Parser)]
#[command(
    name = "generate-sources",
    version,
    about = "Invoke source generators and write the files they return"
)]
struct Cli {
    /// TOML file with `output_path` and a `[method_parameters]` table
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output directory (overrides the config file)
    #[arg(short, long, value_name = "DIR")]
    path: Option<String>,

    /// Generator to run, as `type.member=parameter`; may be repeated
    #[arg(short, long = "method", value_name = "KEY=PARAM", value_parser = parse_method)]
    methods: Vec<(String, String)>,

    /// Print the available generators and exit
    #[arg(long)]
    list: bool,

    /// Log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    /// Also write logs to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

/// Split `KEY=PARAM` at the first `=`. The parameter may be empty or contain
/// further `=` characters.
fn parse_method(arg: &str) -> Result<(String, String), String> {
    match arg.split_once('=') {
        Some((key, parameter)) => Ok((key.to_string(), parameter.to_string())),
        None => Err(format!("expected KEY=PARAM, got '{arg}'")),
    }
}

impl Cli {
    /// Merge the config file (if any) with command-line overrides.
    ///
    /// Fails when neither source supplies a method table. An empty table is
    /// a valid, if idle, run.
    fn generate_config(&self) -> anyhow::Result<GenerateConfig> {
        let mut config = match &self.config {
            Some(path) => GenerateConfig::load(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => GenerateConfig::default(),
        };

        if let Some(path) = &self.path {
            config.output_path = Some(path.clone());
        }
        for (key, parameter) in &self.methods {
            config.set_method(key.clone(), parameter.clone());
        }

        if config.method_parameters.is_none() {
            bail!("no generators given; pass --method KEY=PARAM or a config file with [method_parameters]");
        }

        Ok(config)
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let _logging_guard = logging::init_logging(&logging::LoggingConfig {
        level: cli.log_level.clone(),
        json: cli.json_logs,
        file: cli.log_file.clone(),
    })
    .context("Failed to initialize logging")?;

    let registry = GeneratorRegistry::builtin();

    if cli.list {
        for key in registry.keys() {
            println!("{key}");
        }
        return Ok(ExitCode::SUCCESS);
    }

    let config = cli.generate_config()?;

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        path = config.output_path_or_default(),
        "Generating sources"
    );

    let errors = GenerateSources::new(registry).run(config)?;

    if errors.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
