//! CLI command implementations.
//!
//! Each `run_*` function performs one command and returns its JSON response
//! as a string. The caller (`main.rs`) prints it, or turns an error into an
//! `ErrorResponse` with the matching exit code.
//!
//! ## Mapping Sources
//!
//! A rename mapping is assembled from a JSON object file
//! (`{"old": "new", ...}`) followed by repeated `old=new` arguments. A name
//! given twice, in either source, is an `InvalidArguments` error.

use std::fs;
use std::path::Path;

use relabel_core::error::{RelabelError, RelabelResult};
use relabel_core::output::{IdentifiersResponse, RenameResponse};
use relabel_core::symbols::SymbolTable;
use relabel_core::{rename_batch, LanguageAdapter, RenameMapping, RenameOptions};
use relabel_js::JsAdapter;
use serde::Serialize;
use tracing::info;

fn read_source(path: &Path) -> RelabelResult<String> {
    fs::read_to_string(path).map_err(|e| RelabelError::io(path.display(), e))
}

fn to_json<T: Serialize>(response: &T) -> RelabelResult<String> {
    serde_json::to_string_pretty(response).map_err(|e| RelabelError::internal(e.to_string()))
}

/// Build a mapping from an optional JSON file plus `old=new` arguments.
pub fn load_mapping(pairs: &[String], mapping_file: Option<&Path>) -> RelabelResult<RenameMapping> {
    let mut mapping = RenameMapping::new();

    if let Some(path) = mapping_file {
        let content = read_source(path)?;
        let object: serde_json::Map<String, serde_json::Value> = serde_json::from_str(&content)
            .map_err(|e| {
                RelabelError::invalid_args(format!(
                    "mapping file {} is not a JSON object: {}",
                    path.display(),
                    e
                ))
            })?;
        for (old, new) in object {
            let Some(new) = new.as_str() else {
                return Err(RelabelError::invalid_args(format!(
                    "mapping file {}: value for '{}' is not a string",
                    path.display(),
                    old
                )));
            };
            mapping.insert(old, new)?;
        }
    }

    for pair in pairs {
        let (old, new) = RenameMapping::parse_pair(pair)?;
        mapping.insert(old, new)?;
    }
    Ok(mapping)
}

/// Validate CLI-level options before any file is read.
pub fn check_options(options: &RenameOptions) -> RelabelResult<()> {
    if options.max_temp_attempts == 0 {
        return Err(RelabelError::invalid_args(
            "--max-temp-attempts must be at least 1",
        ));
    }
    Ok(())
}

/// Rename identifiers in `path` as one batch.
///
/// With `write`, the result is written back to `path` and omitted from the
/// response. Nothing is written if the batch fails.
pub fn run_rename(
    path: &Path,
    mapping: &RenameMapping,
    options: RenameOptions,
    write: bool,
) -> RelabelResult<String> {
    check_options(&options)?;
    let input = read_source(path)?;
    let report = rename_batch(&JsAdapter, &input, mapping, options)?;

    let written = if write {
        fs::write(path, &report.text).map_err(|e| RelabelError::io(path.display(), e))?;
        info!(path = %path.display(), "wrote renamed source");
        Some(path.display().to_string())
    } else {
        None
    };

    to_json(&RenameResponse::from_report(
        JsAdapter.name(),
        &input,
        report,
        written,
    ))
}

/// List the distinct identifiers in `path`.
pub fn run_idents(path: &Path) -> RelabelResult<String> {
    let text = read_source(path)?;
    let table = SymbolTable::build(&JsAdapter, &text)?;
    to_json(&IdentifiersResponse::from_table(
        JsAdapter.name(),
        &text,
        &table,
    ))
}
