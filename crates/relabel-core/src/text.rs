//! Text position utilities.
//!
//! ## Coordinate Conventions
//!
//! - Lines and columns are **1-indexed** (matching editor conventions)
//! - Byte offsets are **0-indexed**
//! - Columns count Unicode scalar values, not bytes

/// Convert a byte offset to 1-indexed line and column (Unicode-aware).
///
/// If `offset` exceeds the content length, returns the position at end of content.
pub fn byte_offset_to_position_str(content: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;
    let mut current_offset = 0usize;

    for ch in content.chars() {
        if current_offset >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
        current_offset += ch.len_utf8();
    }

    (line, col)
}

/// Check whether `name` appears at `offset` as a whole token.
///
/// The characters immediately before and after must not be identifier
/// characters according to `is_ident_char`, so `ab` is not found inside
/// `cab` or `abc`.
pub fn spells_token_at(
    content: &str,
    offset: usize,
    name: &str,
    is_ident_char: impl Fn(char) -> bool,
) -> bool {
    let Some(end) = offset.checked_add(name.len()) else {
        return false;
    };
    if content.get(offset..end) != Some(name) {
        return false;
    }
    let before_ok = content[..offset]
        .chars()
        .next_back()
        .is_none_or(|c| !is_ident_char(c));
    let after_ok = content[end..].chars().next().is_none_or(|c| !is_ident_char(c));
    before_ok && after_ok
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_'
    }

    mod positions {
        use super::*;

        #[test]
        fn offset_to_position_simple() {
            let content = "var a = 1;\nvar b = 2;\n";
            assert_eq!(byte_offset_to_position_str(content, 0), (1, 1));
            assert_eq!(byte_offset_to_position_str(content, 4), (1, 5));
            assert_eq!(byte_offset_to_position_str(content, 11), (2, 1));
        }

        #[test]
        fn offset_beyond_content() {
            assert_eq!(byte_offset_to_position_str("short", 100), (1, 6));
        }

        #[test]
        fn multibyte_columns_count_chars() {
            let content = "é = x";
            // 'é' is two bytes; 'x' is at byte 5 but column 5.
            assert_eq!(byte_offset_to_position_str(content, 5), (1, 5));
        }

        #[test]
        fn empty_content() {
            assert_eq!(byte_offset_to_position_str("", 0), (1, 1));
        }
    }

    mod tokens {
        use super::*;

        #[test]
        fn whole_token_matches() {
            assert!(spells_token_at("a + ab", 0, "a", word_char));
            assert!(spells_token_at("a + ab", 4, "ab", word_char));
        }

        #[test]
        fn prefix_of_longer_token_rejected() {
            assert!(!spells_token_at("a + ab", 4, "a", word_char));
        }

        #[test]
        fn suffix_of_longer_token_rejected() {
            assert!(!spells_token_at("cab", 1, "ab", word_char));
        }

        #[test]
        fn out_of_range_rejected() {
            assert!(!spells_token_at("ab", 1, "abc", word_char));
            assert!(!spells_token_at("ab", usize::MAX, "a", word_char));
        }
    }
}
