//! Error types for source generation

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, GenerationError>;

/// A failure recorded while generating or writing sources.
///
/// Every variant except [`GenerationError::PathIsFile`] and
/// [`GenerationError::DirectoryCreateFailed`] is local to one method entry or
/// one artifact and is reported alongside the outcomes of its siblings.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("could not parse the method '{key}'")]
    MalformedKey { key: String },

    #[error("type not found: {type_name}")]
    TypeNotFound { type_name: String },

    #[error("no static generator '{member_name}(&str)' on type {type_name}")]
    MemberNotFound {
        type_name: String,
        member_name: String,
    },

    #[error("generator '{key}' failed: {source:#}")]
    InvocationFailed {
        key: String,
        #[source]
        source: anyhow::Error,
    },

    #[error("generator '{key}' is not accessible")]
    AccessDenied { key: String },

    #[error("the path exists and references a file '{}'", .path.display())]
    PathIsFile { path: PathBuf },

    #[error("could not create the directory '{}': {source}", .path.display())]
    DirectoryCreateFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Category of a [`GenerationError`], for callers that match on error identity
/// rather than on the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MalformedKey,
    TypeNotFound,
    MemberNotFound,
    InvocationFailed,
    AccessDenied,
    PathIsFile,
    DirectoryCreateFailed,
    Io,
}

impl GenerationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GenerationError::MalformedKey { .. } => ErrorKind::MalformedKey,
            GenerationError::TypeNotFound { .. } => ErrorKind::TypeNotFound,
            GenerationError::MemberNotFound { .. } => ErrorKind::MemberNotFound,
            GenerationError::InvocationFailed { .. } => ErrorKind::InvocationFailed,
            GenerationError::AccessDenied { .. } => ErrorKind::AccessDenied,
            GenerationError::PathIsFile { .. } => ErrorKind::PathIsFile,
            GenerationError::DirectoryCreateFailed { .. } => ErrorKind::DirectoryCreateFailed,
            GenerationError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// A required argument was missing from the call.
///
/// This is a caller bug, not a generation failure, and is raised before any
/// filesystem or generator work happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ContractViolation {
    #[error("output path is required")]
    MissingPath,

    #[error("method parameters are required")]
    MissingMethods,
}
