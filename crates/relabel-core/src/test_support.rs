//! Test-only language adapter.
//!
//! `WordAdapter` treats every identifier-shaped word as an occurrence of one
//! global symbol per spelling. The character `@` is a syntax error, which
//! lets tests exercise parse failures.

use crate::adapter::LanguageAdapter;
use crate::error::{RelabelError, RelabelResult};
use crate::patch::{Span, SpanRename};
use crate::text::byte_offset_to_position_str;
use crate::types::IdentifierOccurrence;

pub(crate) struct WordAdapter;

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '$'
}

impl LanguageAdapter for WordAdapter {
    type Tree = Vec<IdentifierOccurrence>;

    fn name(&self) -> &'static str {
        "words"
    }

    fn parse(&self, text: &str) -> RelabelResult<Self::Tree> {
        if let Some(pos) = text.find('@') {
            let (line, col) = byte_offset_to_position_str(text, pos);
            return Err(RelabelError::ParseError {
                message: "unexpected '@'".to_string(),
                line,
                col,
            });
        }
        let mut words = Vec::new();
        let mut start: Option<usize> = None;
        for (i, c) in text.char_indices().chain([(text.len(), ' ')]) {
            match start {
                None if is_word_char(c) => start = Some(i),
                Some(s) if !is_word_char(c) => {
                    let word = &text[s..i];
                    if !word.starts_with(|c: char| c.is_ascii_digit()) {
                        words.push(IdentifierOccurrence::new(word, s));
                    }
                    start = None;
                }
                _ => {}
            }
        }
        Ok(words)
    }

    fn identifiers(&self, tree: &Self::Tree) -> Vec<IdentifierOccurrence> {
        tree.clone()
    }

    fn rename_edits_at(
        &self,
        text: &str,
        offset: usize,
        new_name: &str,
    ) -> RelabelResult<Vec<SpanRename>> {
        let words = self.parse(text)?;
        let target = words
            .iter()
            .find(|w| w.offset <= offset && offset < w.offset + w.name.len())
            .ok_or_else(|| RelabelError::ResolutionError {
                offset,
                new_name: new_name.to_string(),
            })?;
        Ok(words
            .iter()
            .filter(|w| w.name == target.name)
            .map(|w| SpanRename::new(Span::new(w.offset, w.offset + w.name.len()), new_name))
            .collect())
    }

    fn is_ident_char(&self, c: char) -> bool {
        is_word_char(c)
    }
}

/// Number of whole-word occurrences of `name` in `text`.
pub(crate) fn word_count(text: &str, name: &str) -> usize {
    WordAdapter
        .parse(text)
        .map(|words| words.iter().filter(|w| w.name == name).count())
        .unwrap_or(0)
}
