// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Tokenizer for the supported JavaScript subset.
//!
//! The tokenizer produces a flat token vector. Whitespace and comments are
//! dropped, but each token remembers whether a line terminator preceded it so
//! the parser can apply automatic semicolon insertion.
//!
//! Regular expression literals and template substitutions (`${...}`) are not
//! supported: `/` always lexes as division and a template containing `${` is
//! rejected.

use relabel_core::patch::Span;

use crate::error::{JsError, JsResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Identifier,
    Keyword,
    Number,
    String,
    Template,
    Punct,
    Eof,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Span,
    /// A line terminator appeared between the previous token and this one.
    pub newline_before: bool,
}

impl Token<'_> {
    /// True for a punctuator spelled `p`.
    pub fn is_punct(&self, p: &str) -> bool {
        self.kind == TokenKind::Punct && self.text == p
    }

    /// True for a keyword spelled `kw`.
    pub fn is_keyword(&self, kw: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == kw
    }
}

pub const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "class",
    "const",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "export",
    "extends",
    "false",
    "finally",
    "for",
    "function",
    "if",
    "import",
    "in",
    "instanceof",
    "let",
    "new",
    "null",
    "return",
    "super",
    "switch",
    "this",
    "throw",
    "true",
    "try",
    "typeof",
    "var",
    "void",
    "while",
    "with",
    "yield",
];

pub fn is_keyword(word: &str) -> bool {
    KEYWORDS.contains(&word)
}

// Longest first within each leading character.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "...", "===", "!==", "**=", "<<=", ">>=", ">>>", "&&=", "||=", "??=", "=>", "==",
    "!=", "<=", ">=", "&&", "||", "??", "++", "--", "+=", "-=", "*=", "/=", "%=", "&=", "|=",
    "^=", "**", "<<", ">>", "{", "}", "(", ")", "[", "]", ";", ",", "<", ">", "+", "-", "*",
    "/", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".",
];

/// Whether `c` can start an identifier.
pub fn is_ident_start(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphabetic()
}

/// Whether `c` can continue an identifier.
pub fn is_ident_part(c: char) -> bool {
    c == '_' || c == '$' || c.is_alphanumeric()
}

struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    newline_before: bool,
}

/// Tokenize `source`. The returned vector always ends with an `Eof` token.
pub fn tokenize(source: &str) -> JsResult<Vec<Token<'_>>> {
    let mut lexer = Lexer {
        source,
        pos: 0,
        newline_before: false,
    };
    let mut tokens = Vec::new();
    loop {
        lexer.skip_trivia()?;
        let token = lexer.next_token()?;
        let done = token.kind == TokenKind::Eof;
        tokens.push(token);
        if done {
            return Ok(tokens);
        }
    }
}

impl<'a> Lexer<'a> {
    fn rest(&self) -> &'a str {
        &self.source[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn peek_second(&self) -> Option<char> {
        self.rest().chars().nth(1)
    }

    fn error(&self, offset: usize, message: impl Into<String>) -> JsError {
        JsError::syntax(self.source, offset, message)
    }

    fn skip_trivia(&mut self) -> JsResult<()> {
        loop {
            let rest = self.rest();
            if let Some(c) = self.peek() {
                if c.is_whitespace() || c == '\u{feff}' {
                    if c == '\n' || c == '\r' || c == '\u{2028}' || c == '\u{2029}' {
                        self.newline_before = true;
                    }
                    self.pos += c.len_utf8();
                    continue;
                }
            }
            if rest.starts_with("//") {
                let len = rest.find('\n').unwrap_or(rest.len());
                self.pos += len;
                continue;
            }
            if rest.starts_with("/*") {
                let Some(close) = rest[2..].find("*/") else {
                    return Err(self.error(self.pos, "unterminated block comment"));
                };
                if rest[2..2 + close].contains('\n') {
                    self.newline_before = true;
                }
                self.pos += close + 4;
                continue;
            }
            return Ok(());
        }
    }

    fn token(&mut self, kind: TokenKind, start: usize) -> Token<'a> {
        let newline_before = std::mem::take(&mut self.newline_before);
        Token {
            kind,
            text: &self.source[start..self.pos],
            span: Span::new(start, self.pos),
            newline_before,
        }
    }

    fn next_token(&mut self) -> JsResult<Token<'a>> {
        let start = self.pos;
        let Some(c) = self.peek() else {
            return Ok(self.token(TokenKind::Eof, start));
        };

        if is_ident_start(c) {
            self.eat_while(is_ident_part);
            let word = &self.source[start..self.pos];
            let kind = if is_keyword(word) {
                TokenKind::Keyword
            } else {
                TokenKind::Identifier
            };
            return Ok(self.token(kind, start));
        }

        if c.is_ascii_digit() || (c == '.' && self.peek_second().is_some_and(|d| d.is_ascii_digit()))
        {
            self.lex_number()?;
            return Ok(self.token(TokenKind::Number, start));
        }

        match c {
            '"' | '\'' => {
                self.lex_string(c)?;
                Ok(self.token(TokenKind::String, start))
            }
            '`' => {
                self.lex_template()?;
                Ok(self.token(TokenKind::Template, start))
            }
            _ => {
                let rest = self.rest();
                match PUNCTUATORS.iter().find(|p| rest.starts_with(**p)) {
                    Some(p) => {
                        self.pos += p.len();
                        Ok(self.token(TokenKind::Punct, start))
                    }
                    None => Err(self.error(start, format!("unexpected character '{}'", c))),
                }
            }
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn eat_digits(&mut self, is_digit: impl Fn(char) -> bool) -> usize {
        let before = self.pos;
        self.eat_while(|c| is_digit(c) || c == '_');
        self.pos - before
    }

    fn lex_number(&mut self) -> JsResult<()> {
        let start = self.pos;
        let radix = match self.rest().as_bytes() {
            [b'0', b'x' | b'X', ..] => Some(16),
            [b'0', b'o' | b'O', ..] => Some(8),
            [b'0', b'b' | b'B', ..] => Some(2),
            _ => None,
        };
        if let Some(radix) = radix {
            self.pos += 2;
            if self.eat_digits(|c| c.is_digit(radix)) == 0 {
                return Err(self.error(start, "missing digits after radix prefix"));
            }
        } else {
            self.eat_digits(|c| c.is_ascii_digit());
            if self.peek() == Some('.') {
                self.pos += 1;
                self.eat_digits(|c| c.is_ascii_digit());
            }
            if matches!(self.peek(), Some('e' | 'E')) {
                self.pos += 1;
                if matches!(self.peek(), Some('+' | '-')) {
                    self.pos += 1;
                }
                if self.eat_digits(|c| c.is_ascii_digit()) == 0 {
                    return Err(self.error(start, "missing exponent digits"));
                }
            }
        }
        // BigInt suffix
        if self.peek() == Some('n') {
            self.pos += 1;
        }
        if self.peek().is_some_and(is_ident_part) {
            return Err(self.error(self.pos, "identifier starts immediately after number"));
        }
        Ok(())
    }

    fn lex_string(&mut self, quote: char) -> JsResult<()> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None | Some('\n') => return Err(self.error(start, "unterminated string literal")),
                Some('\\') => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek() {
                        self.pos += escaped.len_utf8();
                    }
                }
                Some(c) => {
                    self.pos += c.len_utf8();
                    if c == quote {
                        return Ok(());
                    }
                }
            }
        }
    }

    fn lex_template(&mut self) -> JsResult<()> {
        let start = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None => return Err(self.error(start, "unterminated template literal")),
                Some('\\') => {
                    self.pos += 1;
                    if let Some(escaped) = self.peek() {
                        self.pos += escaped.len_utf8();
                    }
                }
                Some('$') if self.peek_second() == Some('{') => {
                    return Err(self.error(self.pos, "template substitutions are not supported"));
                }
                Some(c) => {
                    self.pos += c.len_utf8();
                    if c == '`' {
                        return Ok(());
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<(TokenKind, &str)> {
        tokenize(source)
            .unwrap()
            .into_iter()
            .map(|t| (t.kind, t.text))
            .collect()
    }

    #[test]
    fn identifiers_and_keywords() {
        assert_eq!(
            kinds("var $a = _b;"),
            vec![
                (TokenKind::Keyword, "var"),
                (TokenKind::Identifier, "$a"),
                (TokenKind::Punct, "="),
                (TokenKind::Identifier, "_b"),
                (TokenKind::Punct, ";"),
                (TokenKind::Eof, ""),
            ]
        );
    }

    #[test]
    fn longest_punctuator_wins() {
        let toks = kinds("a >>>= b === c => d");
        let puncts: Vec<_> = toks
            .iter()
            .filter(|(k, _)| *k == TokenKind::Punct)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(puncts, vec![">>>=", "===", "=>"]);
    }

    #[test]
    fn numbers() {
        let toks = kinds("1 2.5 .5 0xff 1e+10 3e-2");
        let nums: Vec<_> = toks
            .iter()
            .filter(|(k, _)| *k == TokenKind::Number)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(nums, vec!["1", "2.5", ".5", "0xff", "1e+10", "3e-2"]);
    }

    #[test]
    fn number_forms() {
        let toks = kinds("1_000 0o17 0B101 10n 1.e3 1..x");
        let nums: Vec<_> = toks
            .iter()
            .filter(|(k, _)| *k == TokenKind::Number)
            .map(|(_, t)| *t)
            .collect();
        assert_eq!(nums, vec!["1_000", "0o17", "0B101", "10n", "1.e3", "1."]);
    }

    #[test]
    fn byte_order_mark_is_whitespace() {
        let toks = tokenize("\u{feff}var a;").unwrap();
        assert_eq!(toks[0].text, "var");
        assert_eq!(toks[0].span, Span::new(3, 6));
    }

    #[test]
    fn strings_with_escapes() {
        let toks = kinds(r#"'it\'s' "a\"b" `t`"#);
        assert_eq!(toks[0], (TokenKind::String, r"'it\'s'"));
        assert_eq!(toks[1], (TokenKind::String, r#""a\"b""#));
        assert_eq!(toks[2], (TokenKind::Template, "`t`"));
    }

    #[test]
    fn comments_are_skipped_and_mark_newlines() {
        let toks = tokenize("a // x\nb /* y */ c /*\n*/ d").unwrap();
        let names: Vec<_> = toks.iter().map(|t| t.text).collect();
        assert_eq!(names, vec!["a", "b", "c", "d", ""]);
        assert!(!toks[0].newline_before);
        assert!(toks[1].newline_before);
        assert!(!toks[2].newline_before);
        assert!(toks[3].newline_before);
    }

    #[test]
    fn spans_are_byte_offsets() {
        let toks = tokenize("é = x").unwrap();
        assert_eq!(toks[0].span, Span::new(0, 2));
        assert_eq!(toks[2].span, Span::new(5, 6));
    }

    mod errors {
        use super::*;

        #[test]
        fn unterminated_string() {
            let err = tokenize("var a = 'abc").unwrap_err();
            assert!(matches!(err, JsError::Syntax { offset: 8, .. }));
        }

        #[test]
        fn template_substitution_rejected() {
            assert!(tokenize("`a ${b}`").is_err());
        }

        #[test]
        fn unexpected_character() {
            let err = tokenize("a # b").unwrap_err();
            assert!(err.to_string().contains("unexpected character '#'"));
        }

        #[test]
        fn incomplete_numbers_rejected() {
            for source in ["var a=.5e", "0x", "1e+", "0b2", "3in"] {
                assert!(
                    matches!(tokenize(source), Err(JsError::Syntax { .. })),
                    "{source} should not lex"
                );
            }
        }

        #[test]
        fn unterminated_comment() {
            assert!(tokenize("a /* b").is_err());
        }
    }
}
