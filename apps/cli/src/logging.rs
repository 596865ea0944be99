//! Logging initialization for the `generate-sources` binary
//!
//! Console output goes to stderr so that `--list` output on stdout stays
//! machine-readable. `RUST_LOG` overrides the configured level.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Default level for this binary and the `sourcegen` library.
    pub level: String,
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Also append logs to this file.
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            file: None,
        }
    }
}

/// Must be kept alive until the program exits so buffered file output is
/// flushed.
pub struct LoggingGuard {
    _file_guard: Option<tracing_appender::non_blocking::WorkerGuard>,
}

pub fn init_logging(config: &LoggingConfig) -> anyhow::Result<LoggingGuard> {
    let subscriber = tracing_subscriber::registry().with(build_env_filter(config));

    let (file_writer, file_guard) = match &config.file {
        Some(path) => {
            let (writer, guard) = create_file_writer(path)?;
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    if config.json {
        let console_layer = fmt::layer().json().with_writer(std::io::stderr);
        let file_layer = file_writer.map(|writer| fmt::layer().json().with_writer(writer));
        subscriber.with(console_layer).with(file_layer).try_init()?;
    } else {
        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr);
        let file_layer = file_writer.map(|writer| {
            fmt::layer()
                .with_target(true)
                .with_ansi(false) // No ANSI colors in files
                .with_writer(writer)
        });
        subscriber.with(console_layer).with(file_layer).try_init()?;
    }

    Ok(LoggingGuard {
        _file_guard: file_guard,
    })
}

fn build_env_filter(config: &LoggingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "generate_sources={},sourcegen={}",
            config.level, config.level
        ))
    })
}

fn create_file_writer(
    path: &Path,
) -> anyhow::Result<(
    tracing_appender::non_blocking::NonBlocking,
    tracing_appender::non_blocking::WorkerGuard,
)> {
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    let file_name = path
        .file_name()
        .with_context(|| format!("log file path {} has no file name", path.display()))?;

    fs::create_dir_all(&directory)
        .with_context(|| format!("creating log directory {}", directory.display()))?;

    let appender = tracing_appender::rolling::never(directory, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
