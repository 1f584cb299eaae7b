//! JSON output types for CLI responses.
//!
//! Every response carries `status` and `schema_version`. Errors are emitted
//! on stdout as an [`ErrorResponse`] so callers always get parseable JSON.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::error::{OutputErrorCode, RelabelError};
use crate::patch::ContentHash;
use crate::plan::PlanStep;
use crate::symbols::SymbolTable;
use crate::text::byte_offset_to_position_str;
use crate::types::{EntryResult, RenameReport, RenameWarning};

/// Version of the JSON output schema.
pub const SCHEMA_VERSION: &str = "1";

/// Response for a rename batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameResponse {
    /// Status: "ok".
    pub status: String,
    pub schema_version: String,
    /// Adapter that parsed the source.
    pub language: String,
    /// SHA-256 of the input text.
    pub input_hash: ContentHash,
    /// SHA-256 of the output text.
    pub output_hash: ContentHash,
    pub entries: Vec<EntryResult>,
    pub steps: Vec<PlanStep>,
    pub warnings: Vec<RenameWarning>,
    /// Final text (absent when it was written back to the file).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// File written, when `--write` was used.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub written: Option<String>,
}

impl RenameResponse {
    /// Build a response from a report. The text is included unless
    /// `written` names the file it went to.
    pub fn from_report(
        language: &str,
        input: &str,
        report: RenameReport,
        written: Option<String>,
    ) -> Self {
        let output_hash = ContentHash::compute(report.text.as_bytes());
        RenameResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            language: language.to_string(),
            input_hash: ContentHash::compute(input.as_bytes()),
            output_hash,
            entries: report.entries,
            steps: report.steps,
            warnings: report.warnings,
            text: if written.is_some() {
                None
            } else {
                Some(report.text)
            },
            written,
        }
    }
}

/// One identifier in an identifier listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifierInfo {
    pub name: String,
    /// Byte offset of the first occurrence.
    pub offset: usize,
    /// 1-indexed line of the first occurrence.
    pub line: u32,
    /// 1-indexed column of the first occurrence.
    pub col: u32,
    pub occurrences: usize,
}

/// Response for an identifier listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentifiersResponse {
    pub status: String,
    pub schema_version: String,
    pub language: String,
    pub input_hash: ContentHash,
    pub identifiers: Vec<IdentifierInfo>,
}

impl IdentifiersResponse {
    pub fn from_table(language: &str, text: &str, table: &SymbolTable) -> Self {
        let identifiers = table
            .entries()
            .iter()
            .map(|entry| {
                let (line, col) = byte_offset_to_position_str(text, entry.offset);
                IdentifierInfo {
                    name: entry.name.clone(),
                    offset: entry.offset,
                    line,
                    col,
                    occurrences: entry.occurrences,
                }
            })
            .collect();
        IdentifiersResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            language: language.to_string(),
            input_hash: ContentHash::compute(text.as_bytes()),
            identifiers,
        }
    }
}

/// Error details in an error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Numeric error code.
    pub code: u8,
    /// Human-readable message.
    pub message: String,
}

/// Response for a failed command.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Status: "error".
    pub status: String,
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn from_error(err: &RelabelError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo {
                code: OutputErrorCode::from(err).code(),
                message: err.to_string(),
            },
        }
    }
}

/// Emit a response as pretty-printed JSON to a writer.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{IdentifierOccurrence, RenameStatus};

    fn report(text: &str) -> RenameReport {
        RenameReport {
            text: text.to_string(),
            entries: vec![EntryResult {
                old_name: "a".to_string(),
                new_name: "b".to_string(),
                status: RenameStatus::Renamed,
            }],
            steps: vec![],
            warnings: vec![],
        }
    }

    #[test]
    fn rename_response_includes_text_unless_written() {
        let response = RenameResponse::from_report("js", "a", report("b"), None);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "ok");
        assert_eq!(json["text"], "b");
        assert!(json.get("written").is_none());
        assert_eq!(json["entries"][0]["status"], "renamed");

        let response =
            RenameResponse::from_report("js", "a", report("b"), Some("f.js".to_string()));
        let json = serde_json::to_value(&response).unwrap();
        assert!(json.get("text").is_none());
        assert_eq!(json["written"], "f.js");
    }

    #[test]
    fn hashes_differ_when_text_changes() {
        let response = RenameResponse::from_report("js", "a", report("b"), None);
        assert_ne!(response.input_hash, response.output_hash);
    }

    #[test]
    fn identifiers_carry_positions() {
        let text = "x\n  y x";
        let table = SymbolTable::from_occurrences([
            IdentifierOccurrence::new("x", 0),
            IdentifierOccurrence::new("y", 4),
            IdentifierOccurrence::new("x", 6),
        ]);
        let response = IdentifiersResponse::from_table("js", text, &table);
        assert_eq!(response.identifiers.len(), 2);
        assert_eq!(response.identifiers[1].line, 2);
        assert_eq!(response.identifiers[1].col, 3);
        assert_eq!(response.identifiers[0].occurrences, 2);
    }

    #[test]
    fn error_response_carries_code() {
        let err = RelabelError::invalid_args("bad mapping");
        let response = ErrorResponse::from_error(&err);
        assert_eq!(response.status, "error");
        assert_eq!(response.error.code, 2);
        assert_eq!(response.error.message, "invalid arguments: bad mapping");
    }

    #[test]
    fn emit_response_is_pretty_json_line() {
        let mut out = Vec::new();
        emit_response(&ErrorResponse::from_error(&RelabelError::internal("x")), &mut out)
            .unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.ends_with("}\n"));
        assert!(text.contains("\"code\": 10"));
    }
}
