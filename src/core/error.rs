//! Domain-specific error types and the error presenter.
//!
//! This module defines [`LauncherError`] which covers every failure the launcher
//! can report. It uses `thiserror` for the definitions and includes constructors
//! for the collaborator failures that carry a free-form message.
//!
//! # Public API
//! - [`LauncherError`]: Main error enum covering all failure modes
//! - [`Result<T>`]: Type alias for `std::result::Result<T, LauncherError>`
//! - [`ErrorPresenter`]: Turns an error into the text shown to the user
//! - [`StdErrorPresenter`]: Default presenter used by the interaction loop
//!
//! # Error Categories
//! - **Validation**: malformed or out-of-range user input, recovered in place
//! - **Navigation**: state stack invariant violations, recovered by a reset
//! - **Collaborators**: speech and process failures, labelled and displayed
//! - **Configuration**: missing or invalid entries in the JSON files
//! - **Aggregate**: several errors reported together, one per line

use std::path::PathBuf;
use thiserror::Error;

/// Domain-specific error types for the launcher
#[derive(Error, Debug)]
pub enum LauncherError {
    // Validation errors
    #[error("You must enter an integer.")]
    NotAnInteger,

    #[error("The provided value is out of acceptable bounds.")]
    OutOfBounds,

    #[error("The provided number must not be less than {min}.")]
    BelowMinimum { min: i64 },

    #[error("The provided number must not exceed {max}.")]
    AboveMaximum { max: i64 },

    // Navigation errors
    #[error("State stack is empty.")]
    StackEmpty,

    #[error("State stack is insufficient.")]
    StackInsufficient,

    // Input errors
    #[error("End of input")]
    EndOfInput,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Collaborator errors
    #[error("{message}")]
    Speech { message: String },

    #[error("{message}")]
    Process { message: String },

    #[error("{message}")]
    Internal { message: String },

    // Configuration errors
    #[error("Required section \"{section}\" is missing.")]
    MissingSection { section: String },

    #[error("Field \"{field}\" is missing.")]
    MissingField { field: String },

    #[error("Invalid value in field \"{field}\": {reason}")]
    InvalidField { field: String, reason: String },

    #[error("Param with key {key} does not exist.")]
    UnknownParam { key: String },

    #[error("Invalid game entry \"{name}\": {reason}")]
    InvalidGame { name: String, reason: String },

    #[error("Error in file {path}: {source}")]
    File {
        path: PathBuf,
        source: Box<LauncherError>,
    },

    #[error("Could not determine the data directory")]
    DataDirectoryNotFound,

    #[error("Failed to create data directory '{path}': {source}")]
    DataDirectoryCreationFailed {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("GZDoom executable not found in the data directory or PATH")]
    GzdoomNotFound,

    #[error("{}", join_lines(.0))]
    Aggregate(Vec<LauncherError>),
}

/// Convenience type alias for Results using LauncherError
pub type Result<T> = std::result::Result<T, LauncherError>;

fn join_lines(errors: &[LauncherError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

impl LauncherError {
    /// Create a speech collaborator error
    pub fn speech(message: impl Into<String>) -> Self {
        Self::Speech {
            message: message.into(),
        }
    }

    /// Create a process collaborator error
    pub fn process(message: impl Into<String>) -> Self {
        Self::Process {
            message: message.into(),
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn missing_section(section: impl Into<String>) -> Self {
        Self::MissingSection {
            section: section.into(),
        }
    }

    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.into(),
        }
    }

    pub fn invalid_field(field: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.to_string(),
        }
    }

    pub fn unknown_param(key: impl Into<String>) -> Self {
        Self::UnknownParam { key: key.into() }
    }

    pub fn invalid_game(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidGame {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    /// Attach the file an error was found in
    pub fn in_file(path: impl Into<PathBuf>, source: LauncherError) -> Self {
        Self::File {
            path: path.into(),
            source: Box::new(source),
        }
    }

    /// Collapse a list of errors: `None` when empty, the error itself when alone
    pub fn aggregate(mut errors: Vec<LauncherError>) -> Option<Self> {
        match errors.len() {
            0 => None,
            1 => errors.pop(),
            _ => Some(Self::Aggregate(errors)),
        }
    }

    /// Malformed or out-of-range user input
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::NotAnInteger
                | Self::OutOfBounds
                | Self::BelowMinimum { .. }
                | Self::AboveMaximum { .. }
        )
    }

    /// State stack invariant violations that require a navigation reset
    pub fn is_navigation(&self) -> bool {
        matches!(self, Self::StackEmpty | Self::StackInsufficient)
    }
}

/// Renders errors into user-facing text
pub trait ErrorPresenter {
    fn render(&self, error: &LauncherError) -> String;
}

/// Default presenter: labels collaborator errors and flattens aggregates
#[derive(Debug, Default, Clone, Copy)]
pub struct StdErrorPresenter;

impl ErrorPresenter for StdErrorPresenter {
    fn render(&self, error: &LauncherError) -> String {
        match error {
            LauncherError::EndOfInput => String::new(),
            LauncherError::Aggregate(errors) => errors
                .iter()
                .map(|e| self.render(e))
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>()
                .join("\n"),
            LauncherError::File { path, source } => {
                format!("Error in file {}: {}", path.display(), self.render(source))
            }
            LauncherError::Speech { message } => format!("Speech error: {message}"),
            LauncherError::Process { message } => format!("Process error: {message}"),
            LauncherError::Internal { message } => format!("Internal error: {message}"),
            other => other.to_string(),
        }
    }
}
