//! Exit codes for CLI operations following Unix conventions.
//!
//! # Exit Code Semantics
//!
//! - `0`: Success - every argument was extracted
//! - `3-125`: Specific errors, reported for the last failing argument
//! - `126-255`: Reserved by shell

use crate::error::{CollectError, ParseError, SourceError};

/// Standard exit codes for CLI operations.
///
/// These codes follow Unix conventions where 0 indicates success,
/// and non-zero values indicate various error conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Operation succeeded (code 0)
    Success = 0,

    /// File, directory or package path not found (code 3)
    NotFound = 3,

    /// Failed to parse or collect a file (code 4)
    ParseError = 4,

    /// File I/O or encoding error (code 5)
    IoError = 5,

    /// Configuration error (code 6)
    ConfigError = 6,
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> i32 {
        code as i32
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

impl ExitCode {
    /// Convert a `SourceError` to the appropriate exit code.
    pub fn from_error(error: &SourceError) -> Self {
        match error {
            SourceError::NotFound { .. } => ExitCode::NotFound,
            SourceError::ReadDir { .. } | SourceError::Encode { .. } => ExitCode::IoError,
            SourceError::Parse(ParseError::FileRead { .. }) => ExitCode::IoError,
            SourceError::Parse(_) => ExitCode::ParseError,
            SourceError::Collect(CollectError::NestingTooDeep { .. })
            | SourceError::Collect(CollectError::File { .. }) => ExitCode::ParseError,
        }
    }
}
