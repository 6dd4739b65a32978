use miette::Diagnostic;
use thiserror::Error;

/// Main error type for fdconv operations.
///
/// Every variant names the offending file: a conversion either completes or
/// fails outright, and the failing path is the one thing the user needs.
#[derive(Error, Diagnostic, Debug)]
pub enum FdError {
    #[error("IO error with {path}: {message}")]
    #[diagnostic(code(fdconv::io))]
    Io {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Parse error in {path}: {message}")]
    #[diagnostic(code(fdconv::parse))]
    Parse {
        path: std::path::PathBuf,
        message: String,
    },

    #[error("Invalid item {path}: {message}")]
    #[diagnostic(code(fdconv::input))]
    Input {
        path: std::path::PathBuf,
        message: String,
        #[help]
        help: Option<String>,
    },
}

impl FdError {
    /// Shorthand for an input error without help text.
    pub fn input(path: impl Into<std::path::PathBuf>, message: impl Into<String>) -> Self {
        FdError::Input {
            path: path.into(),
            message: message.into(),
            help: None,
        }
    }
}

pub type Result<T> = std::result::Result<T, FdError>;
