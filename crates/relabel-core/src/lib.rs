//! Core infrastructure for relabel.
//!
//! This crate provides the language-agnostic rename engine:
//! - Rename mapping and rename graph (chains vs. cycles)
//! - Execution planning with temporary names for cycles
//! - Offset-tracking buffer over the rename primitive
//! - Symbol table construction
//! - Error types and error codes
//! - JSON output types for CLI responses
//! - Language adapter trait for pluggable language support

pub mod adapter;
pub mod buffer;
pub mod error;
pub mod graph;
pub mod mapping;
pub mod options;
pub mod orchestrator;
pub mod output;
pub mod patch;
pub mod plan;
pub mod symbols;
pub mod text;
pub mod types;

#[cfg(test)]
pub(crate) mod test_support;

pub use adapter::LanguageAdapter;
pub use error::{RelabelError, RelabelResult};
pub use mapping::RenameMapping;
pub use options::{RenameOptions, VerifyMode};
pub use orchestrator::{rename_batch, Orchestrator};
pub use types::{RenameReport, RenameStatus};
