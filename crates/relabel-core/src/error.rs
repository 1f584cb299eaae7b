//! Error types and error code constants for relabel.
//!
//! `RelabelError` is the single error type every subsystem converts into.
//! Language front ends bridge their own errors with `impl From<X> for
//! RelabelError`, so `?` works across the adapter seam.
//!
//! ## Error Code Mapping
//!
//! - `2`: Invalid arguments (malformed mapping, bad CLI input)
//! - `3`: Parse errors (source text is not syntactically valid)
//! - `4`: Resolution errors (no symbol at a computed offset, lost identifier)
//! - `5`: Temp-name collisions that could not be resolved
//! - `6`: I/O errors (CLI file access)
//! - `10`: Internal errors (bugs, unexpected state)
//!
//! ## Fatal vs. recorded
//!
//! Every variant returned as `Err` aborts the batch and no text is produced.
//! A mapping key that never occurs in the source is not an error at all: it
//! is recorded as [`RenameStatus::SkippedNotFound`](crate::types::RenameStatus)
//! in the report.

use std::fmt;

use thiserror::Error;

/// Error codes for JSON output and process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum OutputErrorCode {
    /// Invalid arguments from caller.
    InvalidArguments = 2,
    /// Source text failed to parse.
    ParseError = 3,
    /// A symbol could not be resolved at a computed offset.
    ResolutionError = 4,
    /// No fresh temporary name could be generated.
    CollisionUnresolvable = 5,
    /// File could not be read or written.
    IoError = 6,
    /// Internal errors (bugs, unexpected state).
    InternalError = 10,
}

impl OutputErrorCode {
    /// Get the numeric code value.
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Unified error type for the rename engine and its front doors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RelabelError {
    /// Source text is not syntactically valid.
    #[error("parse error at {line}:{col}: {message}")]
    ParseError { message: String, line: u32, col: u32 },

    /// The rename primitive found no identifier at the offset.
    #[error("no identifier to rename to '{new_name}' at byte offset {offset}")]
    ResolutionError { offset: usize, new_name: String },

    /// A pending name no longer occurs in the buffer.
    #[error("identifier '{name}' not found in current text")]
    IdentifierNotFound { name: String },

    /// Temp-name generation ran out of attempts.
    #[error("could not find a free temporary name for '{name}' after {attempts} attempts")]
    TargetCollisionUnresolvable { name: String, attempts: usize },

    /// Invalid arguments from caller.
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    /// File access failed.
    #[error("I/O error on {path}: {message}")]
    Io { path: String, message: String },

    /// Internal error (bug or unexpected state).
    #[error("internal error: {message}")]
    InternalError { message: String },
}

impl From<&RelabelError> for OutputErrorCode {
    fn from(err: &RelabelError) -> Self {
        match err {
            RelabelError::ParseError { .. } => OutputErrorCode::ParseError,
            RelabelError::ResolutionError { .. } => OutputErrorCode::ResolutionError,
            RelabelError::IdentifierNotFound { .. } => OutputErrorCode::ResolutionError,
            RelabelError::TargetCollisionUnresolvable { .. } => {
                OutputErrorCode::CollisionUnresolvable
            }
            RelabelError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            RelabelError::Io { .. } => OutputErrorCode::IoError,
            RelabelError::InternalError { .. } => OutputErrorCode::InternalError,
        }
    }
}

impl RelabelError {
    /// Create an invalid arguments error.
    pub fn invalid_args(message: impl Into<String>) -> Self {
        RelabelError::InvalidArguments {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        RelabelError::InternalError {
            message: message.into(),
        }
    }

    /// Create an I/O error for a path.
    pub fn io(path: impl fmt::Display, err: std::io::Error) -> Self {
        RelabelError::Io {
            path: path.to_string(),
            message: err.to_string(),
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> OutputErrorCode {
        OutputErrorCode::from(self)
    }
}

/// Result type for relabel operations.
pub type RelabelResult<T> = Result<T, RelabelError>;

#[cfg(test)]
mod tests {
    use super::*;

    mod error_code_mapping {
        use super::*;

        #[test]
        fn parse_error_maps_to_three() {
            let err = RelabelError::ParseError {
                message: "unexpected token".to_string(),
                line: 1,
                col: 5,
            };
            assert_eq!(err.error_code(), OutputErrorCode::ParseError);
            assert_eq!(err.error_code().code(), 3);
        }

        #[test]
        fn lost_identifier_is_a_resolution_error() {
            let err = RelabelError::IdentifierNotFound {
                name: "a".to_string(),
            };
            assert_eq!(err.error_code(), OutputErrorCode::ResolutionError);
        }

        #[test]
        fn collision_maps_to_five() {
            let err = RelabelError::TargetCollisionUnresolvable {
                name: "a".to_string(),
                attempts: 3,
            };
            assert_eq!(err.error_code().code(), 5);
        }

        #[test]
        fn invalid_args_maps_to_two() {
            assert_eq!(RelabelError::invalid_args("x").error_code().code(), 2);
        }

        #[test]
        fn internal_maps_to_ten() {
            assert_eq!(RelabelError::internal("x").error_code().code(), 10);
        }
    }

    mod error_display {
        use super::*;

        #[test]
        fn parse_error_display() {
            let err = RelabelError::ParseError {
                message: "expected ';'".to_string(),
                line: 2,
                col: 7,
            };
            assert_eq!(err.to_string(), "parse error at 2:7: expected ';'");
        }

        #[test]
        fn resolution_error_display() {
            let err = RelabelError::ResolutionError {
                offset: 12,
                new_name: "b".to_string(),
            };
            assert_eq!(
                err.to_string(),
                "no identifier to rename to 'b' at byte offset 12"
            );
        }
    }
}
