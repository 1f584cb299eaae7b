//! Symbol table: distinct identifier names with a representative offset.
//!
//! The table is built from one parse of the source. Each distinct spelling
//! appears once, located at its first occurrence in traversal order, which
//! is all the rename primitive needs to resolve the whole symbol.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::adapter::LanguageAdapter;
use crate::error::RelabelResult;
use crate::types::IdentifierOccurrence;

/// One distinct name in the table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolEntry {
    /// Identifier spelling.
    pub name: String,
    /// Offset of the first occurrence in traversal order.
    pub offset: usize,
    /// Number of identifier nodes with this spelling.
    pub occurrences: usize,
}

/// Distinct identifier names of a program, in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SymbolTable {
    entries: Vec<SymbolEntry>,
    by_name: HashMap<String, usize>,
}

impl SymbolTable {
    /// Parse `text` and collect its identifiers.
    ///
    /// Fails with `ParseError` if the adapter cannot parse the text.
    pub fn build<A: LanguageAdapter>(adapter: &A, text: &str) -> RelabelResult<Self> {
        let tree = adapter.parse(text)?;
        Ok(Self::from_occurrences(adapter.identifiers(&tree)))
    }

    /// Build a table from occurrences already in traversal order.
    pub fn from_occurrences(occurrences: impl IntoIterator<Item = IdentifierOccurrence>) -> Self {
        let mut table = SymbolTable::default();
        for occ in occurrences {
            match table.by_name.get(&occ.name) {
                Some(&i) => table.entries[i].occurrences += 1,
                None => {
                    table.by_name.insert(occ.name.clone(), table.entries.len());
                    table.entries.push(SymbolEntry {
                        name: occ.name,
                        offset: occ.offset,
                        occurrences: 1,
                    });
                }
            }
        }
        table
    }

    /// Whether `name` occurs in the program.
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// First-occurrence offset of `name`.
    pub fn offset_of(&self, name: &str) -> Option<usize> {
        self.get(name).map(|e| e.offset)
    }

    /// Number of occurrences of `name` (0 if absent).
    pub fn occurrences_of(&self, name: &str) -> usize {
        self.get(name).map_or(0, |e| e.occurrences)
    }

    pub fn get(&self, name: &str) -> Option<&SymbolEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    /// Names in first-occurrence order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.name.as_str())
    }

    pub fn entries(&self) -> &[SymbolEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Offset of the first occurrence of `name` in `text`, by traversal order.
///
/// This is the single-name lookup used to re-resolve stale offsets.
pub fn locate_first<A: LanguageAdapter>(
    adapter: &A,
    text: &str,
    name: &str,
) -> RelabelResult<Option<usize>> {
    let tree = adapter.parse(text)?;
    Ok(adapter
        .identifiers(&tree)
        .into_iter()
        .find(|occ| occ.name == name)
        .map(|occ| occ.offset))
}
