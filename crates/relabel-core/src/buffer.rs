//! Offset-tracking buffer: the mutable text plus pending locating offsets.
//!
//! The buffer owns the source text for the duration of one batch and keeps a
//! table from "still-pending name" to its locating offset. Every text change
//! goes through [`OffsetTrackingBuffer::apply`], which moves each pending
//! offset by the length changes of the rewritten occurrences in front of it.
//! The primitive rewrites every occurrence of a symbol, so one edit point
//! and one delta are not enough: a pending offset past `k` rewritten
//! occurrences moves by the sum of their `k` length changes.
//!
//! [`OffsetTrackingBuffer::locate`] still checks that a cached offset spells
//! the name as a whole token. A mismatch means the bookkeeping went wrong;
//! the name is then re-resolved with a fresh single-name lookup.

use std::collections::HashMap;

use tracing::debug;

use crate::adapter::{LanguageAdapter, PrimitiveAdapter};
use crate::error::{RelabelError, RelabelResult};
use crate::symbols::locate_first;
use crate::text::spells_token_at;

/// Outcome of [`OffsetTrackingBuffer::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedRename {
    /// Where the renamed occurrence now starts.
    pub offset: usize,
    /// Length change per occurrence.
    pub delta: isize,
    /// Number of occurrences rewritten.
    pub occurrences: usize,
}

/// Mutable source text with a pending-offset table.
pub struct OffsetTrackingBuffer<'a, A: LanguageAdapter> {
    primitive: PrimitiveAdapter<'a, A>,
    text: String,
    pending: HashMap<String, usize>,
    relocations: usize,
}

impl<'a, A: LanguageAdapter> OffsetTrackingBuffer<'a, A> {
    /// Create a buffer over `text` with no pending names.
    pub fn new(adapter: &'a A, text: impl Into<String>) -> Self {
        OffsetTrackingBuffer {
            primitive: PrimitiveAdapter::new(adapter),
            text: text.into(),
            pending: HashMap::new(),
            relocations: 0,
        }
    }

    /// Register `name` as pending at `offset`.
    pub fn track(&mut self, name: impl Into<String>, offset: usize) {
        self.pending.insert(name.into(), offset);
    }

    /// Whether `name` is still pending.
    pub fn is_tracked(&self, name: &str) -> bool {
        self.pending.contains_key(name)
    }

    /// Current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Number of times a cached offset no longer spelled its name.
    pub fn relocations(&self) -> usize {
        self.relocations
    }

    /// Current locating offset of `name`.
    ///
    /// Uses the cached offset if it still spells `name` as a whole token,
    /// otherwise re-resolves against the current text and refreshes the cache.
    /// Fails with `IdentifierNotFound` if the name no longer occurs.
    pub fn locate(&mut self, name: &str) -> RelabelResult<usize> {
        let adapter = self.primitive.adapter();
        let cached = self.pending.get(name).copied();
        if let Some(offset) = cached {
            if spells_token_at(&self.text, offset, name, |c| adapter.is_ident_char(c)) {
                return Ok(offset);
            }
        }

        let Some(offset) = locate_first(adapter, &self.text, name)? else {
            return Err(RelabelError::IdentifierNotFound {
                name: name.to_string(),
            });
        };
        if let Some(stale) = cached {
            debug!(name, stale, offset, "re-resolved stale offset");
            self.relocations += 1;
        }
        self.pending.insert(name.to_string(), offset);
        Ok(offset)
    }

    /// Rename the symbol at `offset` from `old_name` to `new_name`.
    ///
    /// `old_name` stops being pending and every other pending offset moves to
    /// where its token now starts.
    pub fn apply(
        &mut self,
        offset: usize,
        old_name: &str,
        new_name: &str,
    ) -> RelabelResult<AppliedRename> {
        let edit = self
            .primitive
            .rename(&self.text, offset, old_name, new_name)?;
        let Some(renamed_at) = edit.renamed_offset(offset, new_name) else {
            return Err(RelabelError::internal(format!(
                "rename of '{}' at {} did not rewrite that occurrence",
                old_name, offset
            )));
        };

        self.pending.remove(old_name);
        for pending_offset in self.pending.values_mut() {
            *pending_offset = edit.shift(*pending_offset);
        }
        let applied = AppliedRename {
            offset: renamed_at,
            delta: edit.delta,
            occurrences: edit.edits.len(),
        };
        self.text = edit.text;
        Ok(applied)
    }

    /// Consume the buffer, returning the final text.
    pub fn into_text(self) -> String {
        self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::WordAdapter;

    #[test]
    fn apply_shifts_later_offsets_only() {
        let mut buffer = OffsetTrackingBuffer::new(&WordAdapter, "aa x bb y cc");
        buffer.track("aa", 0);
        buffer.track("bb", 5);
        buffer.track("cc", 10);

        let applied = buffer.apply(5, "bb", "b").unwrap();
        assert_eq!(applied.delta, -1);
        assert_eq!(applied.offset, 5);
        assert_eq!(buffer.text(), "aa x b y cc");
        assert!(!buffer.is_tracked("bb"));
        assert_eq!(buffer.locate("aa").unwrap(), 0);
        assert_eq!(buffer.locate("cc").unwrap(), 9);
        assert_eq!(buffer.relocations(), 0);
    }

    #[test]
    fn shift_counts_every_rewritten_occurrence() {
        // Renaming `a` rewrites two occurrences before `z`.
        let mut buffer = OffsetTrackingBuffer::new(&WordAdapter, "a a z a");
        buffer.track("a", 0);
        buffer.track("z", 4);

        let applied = buffer.apply(0, "a", "abc").unwrap();
        assert_eq!(applied.occurrences, 3);
        assert_eq!(buffer.text(), "abc abc z abc");
        assert_eq!(buffer.locate("z").unwrap(), 8);
        assert_eq!(buffer.relocations(), 0);
    }

    #[test]
    fn renamed_occurrence_offset_accounts_for_earlier_edits() {
        // The located occurrence is not the first one rewritten.
        let mut buffer = OffsetTrackingBuffer::new(&WordAdapter, "a b a");
        let applied = buffer.apply(4, "a", "xyz").unwrap();
        assert_eq!(buffer.text(), "xyz b xyz");
        assert_eq!(applied.offset, 6);
    }

    #[test]
    fn stale_offset_is_re_resolved() {
        let mut buffer = OffsetTrackingBuffer::new(&WordAdapter, "p q r");
        buffer.track("r", 1);
        assert_eq!(buffer.locate("r").unwrap(), 4);
        assert_eq!(buffer.relocations(), 1);
        // Cache refreshed: the second lookup is a hit.
        assert_eq!(buffer.locate("r").unwrap(), 4);
        assert_eq!(buffer.relocations(), 1);
    }

    #[test]
    fn untracked_name_is_resolved_on_demand() {
        let mut buffer = OffsetTrackingBuffer::new(&WordAdapter, "p q r");
        assert_eq!(buffer.locate("r").unwrap(), 4);
        assert_eq!(buffer.relocations(), 0);
    }

    #[test]
    fn missing_name_is_not_found() {
        let mut buffer = OffsetTrackingBuffer::new(&WordAdapter, "p q r");
        buffer.track("s", 2);
        let err = buffer.locate("s").unwrap_err();
        assert_eq!(
            err,
            RelabelError::IdentifierNotFound {
                name: "s".to_string()
            }
        );
    }

    #[test]
    fn apply_at_bad_offset_leaves_text_untouched() {
        let mut buffer = OffsetTrackingBuffer::new(&WordAdapter, "p q");
        assert!(buffer.apply(1, "p", "x").is_err());
        assert_eq!(buffer.into_text(), "p q");
    }
}
