/*!
 * Error types for the srtcheck application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 *
 * Rule checks themselves never fail; the only per-file error is a
 * `SubtitleError`, which the folder checker reports as a parse failure.
 */

use thiserror::Error;

/// Errors that can occur while reading a SubRip file
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubtitleError {
    /// The file could not be read
    #[error("Failed to read file: {0}")]
    Unreadable(String),

    /// The file is not valid UTF-8
    #[error("File is not valid UTF-8: {0}")]
    InvalidEncoding(String),

    /// A cue block does not start with a numeric index
    #[error("Expected cue index at line {line}, found: {found:?}")]
    MissingIndex {
        /// 1-based line number in the file
        line: usize,
        /// Offending line content
        found: String,
    },

    /// The line after a cue index is not a timing line
    #[error("Invalid timing line at line {line}: {found:?}")]
    InvalidTiming {
        /// 1-based line number in the file
        line: usize,
        /// Offending line content
        found: String,
    },

    /// A single timecode could not be parsed
    #[error("Invalid timecode: {0}")]
    InvalidTimecode(String),

    /// The file ended in the middle of a cue header
    #[error("Unexpected end of file after cue index at line {line}")]
    UnexpectedEof {
        /// 1-based line number of the dangling index
        line: usize,
    },
}

/// Errors that can occur when loading or validating configuration
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// No rule is enabled for any language
    #[error("At least one rule must be enabled for at least one language")]
    NothingEnabled,

    /// A numeric limit is out of range
    #[error("Invalid limit for {field}: {message}")]
    InvalidLimit {
        /// Name of the offending field
        field: String,
        /// What is wrong with it
        message: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from subtitle parsing
    #[error("Subtitle error: {0}")]
    Subtitle(#[from] SubtitleError),

    /// Error from configuration
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
