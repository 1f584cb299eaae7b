// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Errors from the JavaScript front end and their bridge into `RelabelError`.

use relabel_core::error::RelabelError;
use relabel_core::patch::SpanEditError;
use relabel_core::text::byte_offset_to_position_str;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JsError {
    /// The tokenizer or parser rejected the source.
    #[error("{message} at {line}:{col}")]
    Syntax {
        message: String,
        offset: usize,
        line: u32,
        col: u32,
    },

    /// No identifier covers the requested offset.
    #[error("no identifier at byte offset {offset}")]
    NoIdentifierAt { offset: usize, new_name: String },

    /// Span rewriting failed.
    #[error(transparent)]
    Edit(#[from] SpanEditError),
}

impl JsError {
    /// A syntax error at `offset` in `source`.
    pub fn syntax(source: &str, offset: usize, message: impl Into<String>) -> Self {
        let (line, col) = byte_offset_to_position_str(source, offset);
        JsError::Syntax {
            message: message.into(),
            offset,
            line,
            col,
        }
    }
}

impl From<JsError> for RelabelError {
    fn from(err: JsError) -> Self {
        match err {
            JsError::Syntax {
                message, line, col, ..
            } => RelabelError::ParseError { message, line, col },
            JsError::NoIdentifierAt { offset, new_name } => {
                RelabelError::ResolutionError { offset, new_name }
            }
            JsError::Edit(e) => RelabelError::internal(e.to_string()),
        }
    }
}

pub type JsResult<T> = Result<T, JsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_has_position() {
        let err = JsError::syntax("var a;\nvar = 1;", 11, "expected identifier");
        assert_eq!(err.to_string(), "expected identifier at 2:5");
    }

    #[test]
    fn bridges_to_parse_error() {
        let err: RelabelError = JsError::syntax("x", 0, "boom").into();
        assert_eq!(
            err,
            RelabelError::ParseError {
                message: "boom".to_string(),
                line: 1,
                col: 1
            }
        );
    }

    #[test]
    fn bridges_to_resolution_error() {
        let err: RelabelError = JsError::NoIdentifierAt {
            offset: 3,
            new_name: "b".to_string(),
        }
        .into();
        assert!(matches!(err, RelabelError::ResolutionError { offset: 3, .. }));
    }
}
