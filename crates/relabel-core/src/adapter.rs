//! Language adapter trait and the rename primitive wrapper.
//!
//! This module defines the [`LanguageAdapter`] trait: the capability seam
//! between the language-agnostic engine and a concrete language front end.
//! An adapter provides three collaborators:
//!
//! 1. **Parser**: `parse(text)` produces a syntax tree or a `ParseError`
//! 2. **Traversal**: `identifiers(tree)` yields every identifier node as an
//!    [`IdentifierOccurrence`] in deterministic traversal order
//! 3. **Rename primitive**: `rename_edits_at(text, offset, new_name)` resolves
//!    the symbol at `offset` and returns one span edit per occurrence of it,
//!    scope-correctly; `rename_at` applies those edits
//!
//! The engine never inspects syntax trees or scopes itself. Everything it
//! knows about the program comes through these methods.
//!
//! # Atomicity
//!
//! `rename_at` either returns the fully rewritten text or an error; it never
//! renames some occurrences of a symbol but not others.
//!
//! # Example: a word-level adapter
//!
//! ```
//! use relabel_core::adapter::LanguageAdapter;
//! use relabel_core::error::{RelabelError, RelabelResult};
//! use relabel_core::patch::{Span, SpanRename};
//! use relabel_core::types::IdentifierOccurrence;
//!
//! /// Treats every word as one global symbol.
//! struct Words;
//!
//! impl LanguageAdapter for Words {
//!     type Tree = Vec<IdentifierOccurrence>;
//!
//!     fn name(&self) -> &'static str {
//!         "words"
//!     }
//!
//!     fn parse(&self, text: &str) -> RelabelResult<Self::Tree> {
//!         let mut out = Vec::new();
//!         let mut start = None;
//!         for (i, c) in text.char_indices().chain([(text.len(), ' ')]) {
//!             match (start, c.is_alphanumeric()) {
//!                 (None, true) => start = Some(i),
//!                 (Some(s), false) => {
//!                     out.push(IdentifierOccurrence::new(&text[s..i], s));
//!                     start = None;
//!                 }
//!                 _ => {}
//!             }
//!         }
//!         Ok(out)
//!     }
//!
//!     fn identifiers(&self, tree: &Self::Tree) -> Vec<IdentifierOccurrence> {
//!         tree.clone()
//!     }
//!
//!     fn rename_edits_at(
//!         &self,
//!         text: &str,
//!         offset: usize,
//!         new_name: &str,
//!     ) -> RelabelResult<Vec<SpanRename>> {
//!         let words = self.parse(text)?;
//!         let Some(target) = words.iter().find(|w| w.offset == offset) else {
//!             return Err(RelabelError::ResolutionError {
//!                 offset,
//!                 new_name: new_name.to_string(),
//!             });
//!         };
//!         Ok(words
//!             .iter()
//!             .filter(|w| w.name == target.name)
//!             .map(|w| SpanRename::new(Span::new(w.offset, w.offset + w.name.len()), new_name))
//!             .collect())
//!     }
//! }
//!
//! let text = Words.rename_at("a b a", 0, "xy").unwrap();
//! assert_eq!(text, "xy b xy");
//! ```

use crate::error::{RelabelError, RelabelResult};
use crate::patch::{apply_span_renames, SpanRename};
use crate::types::IdentifierOccurrence;

/// Capability interface for one source language.
pub trait LanguageAdapter {
    /// The syntax tree produced by [`parse`](LanguageAdapter::parse).
    type Tree;

    /// Short label for logs and output (e.g. `"js"`).
    fn name(&self) -> &'static str;

    /// Parse source text.
    ///
    /// Returns `RelabelError::ParseError` if the text is not syntactically valid.
    fn parse(&self, text: &str) -> RelabelResult<Self::Tree>;

    /// Every identifier node of `tree` in deterministic traversal order.
    fn identifiers(&self, tree: &Self::Tree) -> Vec<IdentifierOccurrence>;

    /// Span edits renaming the symbol whose occurrence contains `offset`.
    ///
    /// One edit per occurrence of the symbol, with spans in `text`.
    /// Returns `RelabelError::ResolutionError` if no identifier exists at `offset`.
    fn rename_edits_at(
        &self,
        text: &str,
        offset: usize,
        new_name: &str,
    ) -> RelabelResult<Vec<SpanRename>>;

    /// Rename the symbol whose occurrence contains `offset`.
    ///
    /// Returns `RelabelError::ResolutionError` if no identifier exists at `offset`.
    fn rename_at(&self, text: &str, offset: usize, new_name: &str) -> RelabelResult<String> {
        let edits = self.rename_edits_at(text, offset, new_name)?;
        apply_span_renames(text, edits).map_err(|e| RelabelError::internal(e.to_string()))
    }

    /// Whether `c` can appear inside an identifier.
    ///
    /// Used to check that a cached offset still starts a whole token.
    fn is_ident_char(&self, c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }
}

/// Result of one primitive rename.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenameEdit {
    /// Rewritten text.
    pub text: String,
    /// `new_name.len() - old_name.len()`, per renamed occurrence.
    pub delta: isize,
    /// The span edits that produced `text`, ordered by start offset.
    pub edits: Vec<SpanRename>,
}

impl RenameEdit {
    /// Where a byte offset of the old text lands in the new text.
    ///
    /// Only edits that end at or before `offset` move it, each by its own
    /// length change. `offset` must not fall strictly inside an edited span.
    pub fn shift(&self, offset: usize) -> usize {
        let (removed, inserted) = self
            .edits
            .iter()
            .filter(|e| e.span.end <= offset)
            .fold((0, 0), |(removed, inserted), e| {
                (removed + e.span.len(), inserted + e.new_text.len())
            });
        offset - removed + inserted
    }

    /// Start of `new_name` in the new text for the occurrence that covered
    /// `offset` in the old text.
    ///
    /// A replacement may carry text in front of the name (`{ a }` becomes
    /// `{ a: b }`), so the name is taken to end its replacement.
    pub fn renamed_offset(&self, offset: usize, new_name: &str) -> Option<usize> {
        let edit = self
            .edits
            .iter()
            .find(|e| e.span.start == offset)
            .or_else(|| self.edits.iter().find(|e| e.span.contains_offset(offset)))?;
        let lead = edit.new_text.len().checked_sub(new_name.len())?;
        Some(self.shift(edit.span.start) + lead)
    }
}

/// Thin wrapper that drives an adapter's rename primitive.
///
/// This is the only path through which the engine changes text.
pub struct PrimitiveAdapter<'a, A: LanguageAdapter> {
    adapter: &'a A,
}

impl<'a, A: LanguageAdapter> PrimitiveAdapter<'a, A> {
    pub fn new(adapter: &'a A) -> Self {
        PrimitiveAdapter { adapter }
    }

    /// The wrapped adapter.
    pub fn adapter(&self) -> &'a A {
        self.adapter
    }

    /// Rename the symbol located at `offset` from `old_name` to `new_name`.
    pub fn rename(
        &self,
        text: &str,
        offset: usize,
        old_name: &str,
        new_name: &str,
    ) -> RelabelResult<RenameEdit> {
        let mut edits = self.adapter.rename_edits_at(text, offset, new_name)?;
        edits.sort_by_key(|e| e.span.start);
        let text = apply_span_renames(text, edits.clone())
            .map_err(|e| RelabelError::internal(e.to_string()))?;
        let delta = new_name.len() as isize - old_name.len() as isize;
        Ok(RenameEdit { text, delta, edits })
    }
}
