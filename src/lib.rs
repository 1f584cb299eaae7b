//! Relabel: cycle-safe batch identifier renaming.
//!
//! Applies a whole mapping of old-name to new-name renames to a program in
//! one pass. Chains are ordered so no rename reads a name another rename
//! just produced, and cycles (`a->b, b->a`) are broken with temporary names.

// Core infrastructure - re-exported from relabel-core
pub use relabel_core::adapter;
pub use relabel_core::buffer;
pub use relabel_core::error;
pub use relabel_core::graph;
pub use relabel_core::mapping;
pub use relabel_core::options;
pub use relabel_core::orchestrator;
pub use relabel_core::output;
pub use relabel_core::patch;
pub use relabel_core::plan;
pub use relabel_core::symbols;
pub use relabel_core::text;
pub use relabel_core::types;

// Language front end
pub use relabel_js as js;

// Front door
pub mod cli;

pub use relabel_core::{
    rename_batch, LanguageAdapter, Orchestrator, RelabelError, RelabelResult, RenameMapping,
    RenameOptions, RenameReport, RenameStatus, VerifyMode,
};
pub use relabel_js::JsAdapter;
