//! Writing generated files

use std::fs;
use std::io;
use std::path::{Component, PathBuf};

use crate::artifact::SourceFile;
use crate::error::{GenerationError, Result};
use crate::output::OutputDirectory;

/// Persists one generated file below an output directory.
///
/// Calls are independent: a failure for one file says nothing about the next.
pub trait ArtifactWriter {
    /// Write `file` and return the path it was written to.
    fn write(&self, directory: &OutputDirectory, file: &SourceFile) -> Result<PathBuf>;
}

/// Writes files to the local filesystem, creating package directories as
/// needed and replacing existing files.
///
/// A file whose relative path has a component that is not a plain name is
/// refused with [`io::ErrorKind::InvalidInput`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FsWriter;

impl ArtifactWriter for FsWriter {
    fn write(&self, directory: &OutputDirectory, file: &SourceFile) -> Result<PathBuf> {
        let relative = file.relative_path();
        let path = directory.path().join(&relative);

        if !relative
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
        {
            return Err(GenerationError::Io {
                path,
                source: io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("'{}' is outside the output directory", relative.display()),
                ),
            });
        }

        if let Some(parent) = path.parent() {
            if let Err(source) = fs::create_dir_all(parent) {
                return Err(GenerationError::Io {
                    path: parent.to_path_buf(),
                    source,
                });
            }
        }

        match fs::write(&path, file.contents()) {
            Ok(()) => Ok(path),
            Err(source) => Err(GenerationError::Io { path, source }),
        }
    }
}
