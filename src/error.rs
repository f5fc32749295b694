//! Error handling for crispin.
//! Defines the error taxonomy shared by the kickstart pipeline, the boot menu
//! builder and the cookbook operations.

use std::io;
use std::path::Path;
use thiserror::Error;

/// Errors produced while assembling, validating and rendering kickstarts.
#[derive(Error, Debug)]
pub enum Error {
    /// A recipe, fragment, answer or configuration file does not exist.
    #[error("File not found: '{path}'.")]
    NotFound { path: String },

    /// A path exists but cannot be read.
    #[error("Permission denied while reading '{path}'. Please check permissions.")]
    PermissionDenied { path: String },

    /// A structured document (recipe, answers, configuration) could not be parsed.
    #[error("Malformed input in '{path}': {reason}.")]
    MalformedInput { path: String, reason: String },

    /// The supplied answers do not cover every variable the template references.
    #[error("Answers are missing values for: {}.", .missing.join(", "))]
    ValidationError { missing: Vec<String> },

    /// Substitution failed after validation passed.
    #[error("Unable to render kickstart: {0}.")]
    RenderError(#[from] minijinja::Error),

    /// Any other file system failure.
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),
}

impl Error {
    /// Classifies an I/O error raised while reading `path`.
    pub fn from_io<P: AsRef<Path>>(err: io::Error, path: P) -> Self {
        let path = path.as_ref().display().to_string();
        match err.kind() {
            io::ErrorKind::NotFound => Error::NotFound { path },
            io::ErrorKind::PermissionDenied => Error::PermissionDenied { path },
            _ => Error::IoError(err),
        }
    }

    /// Status code a transport layer should answer with for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::ValidationError { .. } => 400,
            Error::NotFound { .. } => 404,
            _ => 500,
        }
    }
}

/// Convenience type alias for Results with crispin's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_classification() {
        let err = Error::from_io(io::Error::from(io::ErrorKind::NotFound), "a/b.ks");
        assert!(matches!(err, Error::NotFound { ref path } if path == "a/b.ks"));

        let err = Error::from_io(io::Error::from(io::ErrorKind::PermissionDenied), "a");
        assert!(matches!(err, Error::PermissionDenied { .. }));

        let err = Error::from_io(io::Error::from(io::ErrorKind::Interrupted), "a");
        assert!(matches!(err, Error::IoError(_)));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::ValidationError { missing: vec![] }.status_code(), 400);
        assert_eq!(Error::NotFound { path: "x".into() }.status_code(), 404);
        let err = Error::MalformedInput { path: "x".into(), reason: "y".into() };
        assert_eq!(err.status_code(), 500);
    }
}
