//! Span-level text edits: Span, ContentHash, and batched span replacement.
//!
//! Language front ends resolve a symbol to the set of byte spans it occupies
//! and hand those spans to [`apply_span_renames`], which rewrites them from
//! end to start so earlier spans stay valid while later text changes length.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Hash type for content verification (SHA-256, stored as hex string for JSON compatibility).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash(pub String);

impl ContentHash {
    /// Compute SHA-256 hash of the given bytes, returning hex-encoded string.
    pub fn compute(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        ContentHash(hex::encode(hasher.finalize()))
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Byte offsets into source text.
///
/// Spans are half-open intervals: `[start, end)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Span {
    /// Start byte offset (inclusive).
    pub start: usize,
    /// End byte offset (exclusive).
    pub end: usize,
}

impl Span {
    /// Create a new span.
    ///
    /// # Panics
    /// Panics if `start > end`.
    pub fn new(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "Span start ({}) must be <= end ({})",
            start,
            end
        );
        Span { start, end }
    }

    /// Length of the span in bytes.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if span is empty.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Check if this span overlaps with another.
    ///
    /// Adjacent spans (one ends where another starts) do NOT overlap.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Check if a byte offset falls inside this span.
    ///
    /// The end offset counts as inside so that a cursor placed just after an
    /// identifier still resolves to it.
    pub fn contains_offset(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

/// A request to replace a span of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpanRename {
    /// The byte span to replace.
    pub span: Span,
    /// The replacement text.
    pub new_text: String,
}

impl SpanRename {
    /// Create a new span rename.
    pub fn new(span: Span, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// Errors from [`apply_span_renames`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SpanEditError {
    /// A span extends beyond the source text length.
    #[error("span {span} is out of bounds for source of length {source_len}")]
    OutOfBounds { span: Span, source_len: usize },

    /// Two spans overlap, which is not allowed.
    #[error("overlapping spans: {first} and {second}")]
    Overlapping { first: Span, second: Span },

    /// A span does not fall on a character boundary.
    #[error("span {span} does not fall on a UTF-8 character boundary")]
    NotCharBoundary { span: Span },
}

/// Apply all span replacements and return the rewritten source.
///
/// Replacements are applied from end to start to preserve span validity.
/// An empty request list returns the source unchanged.
pub fn apply_span_renames(
    source: &str,
    mut requests: Vec<SpanRename>,
) -> Result<String, SpanEditError> {
    let source_len = source.len();

    for request in &requests {
        if request.span.end > source_len {
            return Err(SpanEditError::OutOfBounds {
                span: request.span,
                source_len,
            });
        }
        if !source.is_char_boundary(request.span.start) || !source.is_char_boundary(request.span.end)
        {
            return Err(SpanEditError::NotCharBoundary { span: request.span });
        }
    }

    // Reverse order: prev.start >= curr.start after sorting.
    requests.sort_by(|a, b| b.span.start.cmp(&a.span.start));

    for pair in requests.windows(2) {
        let (prev, curr) = (&pair[0], &pair[1]);
        if curr.span.end > prev.span.start {
            return Err(SpanEditError::Overlapping {
                first: curr.span,
                second: prev.span,
            });
        }
    }

    let mut result = source.to_string();
    for request in &requests {
        result.replace_range(request.span.start..request.span.end, &request.new_text);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    mod span {
        use super::*;

        #[test]
        fn overlap_excludes_adjacent() {
            let a = Span::new(0, 3);
            assert!(!a.overlaps(&Span::new(3, 5)));
            assert!(a.overlaps(&Span::new(2, 5)));
        }

        #[test]
        fn contains_offset_is_inclusive_of_end() {
            let s = Span::new(4, 7);
            assert!(s.contains_offset(4));
            assert!(s.contains_offset(7));
            assert!(!s.contains_offset(8));
            assert!(!s.contains_offset(3));
        }

        #[test]
        #[should_panic(expected = "must be <= end")]
        fn inverted_span_panics() {
            Span::new(5, 2);
        }
    }

    mod span_renames {
        use super::*;

        #[test]
        fn applies_back_to_front() {
            let source = "var a = 1; a + a";
            let requests = vec![
                SpanRename::new(Span::new(4, 5), "alpha"),
                SpanRename::new(Span::new(11, 12), "alpha"),
                SpanRename::new(Span::new(15, 16), "alpha"),
            ];
            let out = apply_span_renames(source, requests).unwrap();
            assert_eq!(out, "var alpha = 1; alpha + alpha");
        }

        #[test]
        fn empty_request_list_is_identity() {
            assert_eq!(apply_span_renames("x", vec![]).unwrap(), "x");
        }

        #[test]
        fn rejects_out_of_bounds() {
            let err = apply_span_renames("ab", vec![SpanRename::new(Span::new(1, 5), "z")])
                .unwrap_err();
            assert!(matches!(err, SpanEditError::OutOfBounds { source_len: 2, .. }));
        }

        #[test]
        fn rejects_overlap() {
            let err = apply_span_renames(
                "abcdef",
                vec![
                    SpanRename::new(Span::new(0, 3), "x"),
                    SpanRename::new(Span::new(2, 4), "y"),
                ],
            )
            .unwrap_err();
            assert!(matches!(err, SpanEditError::Overlapping { .. }));
        }
    }

    #[test]
    fn content_hash_is_hex_sha256() {
        let hash = ContentHash::compute(b"");
        assert_eq!(
            hash.to_string(),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
