//! Output directory resolution

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::error::{GenerationError, Result};

/// A directory that exists and can receive generated files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDirectory {
    path: PathBuf,
}

impl OutputDirectory {
    /// Validate `path` as an output directory, creating it and any missing
    /// parents when it does not exist yet.
    pub fn resolve(path: &str) -> Result<Self> {
        let path = PathBuf::from(path);

        if path.is_file() {
            return Err(GenerationError::PathIsFile { path });
        }

        if !path.exists() {
            // `create_dir_all("")` reports success without creating anything.
            if path.as_os_str().is_empty() {
                return Err(GenerationError::DirectoryCreateFailed {
                    path,
                    source: io::Error::new(io::ErrorKind::InvalidInput, "empty path"),
                });
            }

            if let Err(source) = fs::create_dir_all(&path) {
                return Err(GenerationError::DirectoryCreateFailed { path, source });
            }
            tracing::debug!(path = %path.display(), "created output directory");
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    fn resolve(path: &Path) -> Result<OutputDirectory> {
        OutputDirectory::resolve(path.to_str().unwrap())
    }

    #[test]
    fn existing_directory_is_accepted() {
        let dir = tempfile::tempdir().unwrap();
        let output = resolve(dir.path()).unwrap();
        assert_eq!(output.path(), dir.path());
    }

    #[test]
    fn missing_directory_is_created_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b").join("c");

        let output = resolve(&nested).unwrap();

        assert!(output.path().is_dir());
    }

    #[test]
    fn file_is_rejected() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let err = resolve(file.path()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::PathIsFile);
    }

    #[test]
    fn empty_path_cannot_be_created() {
        let err = OutputDirectory::resolve("").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryCreateFailed);
    }

    #[test]
    fn creation_below_a_file_fails() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let below = file.path().join("child");
        let err = resolve(&below).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DirectoryCreateFailed);
    }
}
