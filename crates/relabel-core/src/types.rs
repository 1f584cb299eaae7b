//! Data types shared by the engine and its JSON output.

use serde::{Deserialize, Serialize};

use crate::plan::PlanStep;

// ============================================================================
// Identifier Occurrence
// ============================================================================

/// A single identifier token located by byte offset in the current text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IdentifierOccurrence {
    /// Identifier spelling.
    pub name: String,
    /// Byte offset of the first byte of the token.
    pub offset: usize,
}

impl IdentifierOccurrence {
    /// Create a new occurrence.
    pub fn new(name: impl Into<String>, offset: usize) -> Self {
        IdentifierOccurrence {
            name: name.into(),
            offset,
        }
    }
}

// ============================================================================
// Per-entry Results
// ============================================================================

/// Outcome of one mapping entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenameStatus {
    /// The symbol was renamed.
    Renamed,
    /// The old name never occurs in the source.
    SkippedNotFound,
    /// The entry maps a name to itself.
    SkippedNoop,
}

impl RenameStatus {
    /// Returns the string representation used in output.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenameStatus::Renamed => "renamed",
            RenameStatus::SkippedNotFound => "skipped_not_found",
            RenameStatus::SkippedNoop => "skipped_noop",
        }
    }
}

impl std::fmt::Display for RenameStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result for one mapping entry, reported in mapping order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryResult {
    /// Original name.
    pub old_name: String,
    /// Requested name.
    pub new_name: String,
    /// What happened to the entry.
    pub status: RenameStatus,
}

// ============================================================================
// Warnings
// ============================================================================

/// Non-fatal conditions detected while planning a batch.
///
/// These describe mappings whose *final* state merges two symbols under one
/// spelling because the caller asked for it. The engine still runs the batch;
/// it only guarantees that no merge happens as an intermediate artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenameWarning {
    /// Two or more keys are renamed to the same target.
    DuplicateTarget { target: String, sources: Vec<String> },
    /// The target already names a symbol that this batch does not rename away.
    TargetShadowsExisting { old_name: String, target: String },
}

// ============================================================================
// Report
// ============================================================================

/// Output of one successful batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameReport {
    /// Final source text.
    pub text: String,
    /// One result per mapping entry, in mapping order.
    pub entries: Vec<EntryResult>,
    /// The primitive renames that were executed, in order.
    pub steps: Vec<PlanStep>,
    /// Planning warnings.
    pub warnings: Vec<RenameWarning>,
}

impl RenameReport {
    /// Number of entries with the given status.
    pub fn count(&self, status: RenameStatus) -> usize {
        self.entries.iter().filter(|e| e.status == status).count()
    }

    /// Status reported for `old_name`, if it was in the mapping.
    pub fn status_of(&self, old_name: &str) -> Option<RenameStatus> {
        self.entries
            .iter()
            .find(|e| e.old_name == old_name)
            .map(|e| e.status)
    }
}
