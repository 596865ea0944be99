//! The generation pipeline
//!
//! 1. Resolve the output directory; failing here ends the run with that
//!    single error.
//! 2. For every method entry, parse the key, invoke the generator and write
//!    each returned file. Entries are independent: a failed entry never stops
//!    its siblings, and a failed write never stops the next file.
//!    Two files mapping to the same path in one run are a conflict: the
//!    second is reported instead of replacing the first.
//! 3. Every error is accumulated, in entry order and then file order.

use std::collections::HashSet;
use std::io;
use std::path::PathBuf;

use crate::artifact::SourceFile;
use crate::config::{GenerateConfig, MethodParameters};
use crate::error::{ContractViolation, GenerationError};
use crate::key::MethodKey;
use crate::output::OutputDirectory;
use crate::registry::GeneratorRegistry;
use crate::validation::Validation;
use crate::writer::{ArtifactWriter, FsWriter};

/// Runs generators from a registry and writes their output.
#[derive(Debug, Clone)]
pub struct GenerateSources<W = FsWriter> {
    registry: GeneratorRegistry,
    writer: W,
}

impl GenerateSources<FsWriter> {
    pub fn new(registry: GeneratorRegistry) -> Self {
        Self::with_writer(registry, FsWriter)
    }
}

impl<W: ArtifactWriter> GenerateSources<W> {
    pub fn with_writer(registry: GeneratorRegistry, writer: W) -> Self {
        Self { registry, writer }
    }

    /// Run every generator in `methods` and write the results below `path`.
    ///
    /// Returns every failure encountered; an empty list means everything was
    /// written. Only a missing argument is reported as `Err`, before any work
    /// is done.
    pub fn execute(
        &self,
        path: Option<&str>,
        methods: Option<&MethodParameters>,
    ) -> Result<Vec<GenerationError>, ContractViolation> {
        let path = path.ok_or(ContractViolation::MissingPath)?;
        let methods = methods.ok_or(ContractViolation::MissingMethods)?;

        let directory = match OutputDirectory::resolve(path) {
            Ok(directory) => directory,
            Err(err) => return Ok(vec![err]),
        };

        let mut targets = HashSet::new();
        let outcome: Validation<()> = methods
            .iter()
            .map(|(key, parameter)| {
                self.generate(key, parameter)
                    .and_then(|files| self.write_all(&directory, &files, &mut targets))
            })
            .collect();

        Ok(outcome.into_errors())
    }

    /// Apply `config` and log every failure.
    ///
    /// The output path falls back to
    /// [`DEFAULT_OUTPUT_PATH`](crate::config::DEFAULT_OUTPUT_PATH); method
    /// parameters are required.
    pub fn run(&self, config: GenerateConfig) -> Result<Vec<GenerationError>, ContractViolation> {
        let path = config.output_path_or_default();
        let methods = config.method_parameters.as_ref();

        let errors = self.execute(Some(path), methods)?;

        for error in &errors {
            tracing::error!(kind = ?error.kind(), "{}", error);
        }
        tracing::info!(
            path,
            methods = methods.map_or(0, |m| m.len()),
            errors = errors.len(),
            "source generation finished"
        );

        Ok(errors)
    }

    fn generate(&self, key: &str, parameter: &str) -> Validation<Vec<SourceFile>> {
        MethodKey::parse(key)
            .and_then(|key| self.registry.invoke(&key, parameter))
            .into()
    }

    fn write_all(
        &self,
        directory: &OutputDirectory,
        files: &[SourceFile],
        targets: &mut HashSet<PathBuf>,
    ) -> Validation<()> {
        files
            .iter()
            .map(|file| {
                let relative = file.relative_path();
                if !targets.insert(relative.clone()) {
                    return Validation::failure(GenerationError::Io {
                        path: directory.path().join(relative),
                        source: io::Error::new(
                            io::ErrorKind::AlreadyExists,
                            format!(
                                "{} maps to a file already generated in this run",
                                file.qualified_name()
                            ),
                        ),
                    });
                }
                Validation::from(self.writer.write(directory, file).map(|path| {
                    tracing::debug!(
                        file = %file.qualified_name(),
                        path = %path.display(),
                        "wrote generated source"
                    );
                }))
            })
            .collect()
    }
}
