// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! JavaScript front end for relabel.
//!
//! This crate parses a practical subset of JavaScript, resolves scopes, and
//! exposes the result through [`JsAdapter`], the [`LanguageAdapter`] the
//! rename engine drives.
//!
//! # Supported Subset
//!
//! - `var`, `let`, `const` and function declarations
//! - `if`, `for` (classic, `in`, `of`), `while`, `do`, `try`/`catch`/`finally`,
//!   `return`, `throw`, `break`, `continue`
//! - Function expressions, arrow functions, methods in object literals,
//!   default and rest parameters
//! - Object and array literals, spread, member access, calls, `new`
//! - Automatic semicolon insertion at line breaks, `}` and end of input
//!
//! Regular expression literals, template substitutions, classes,
//! destructuring and modules are rejected with a parse error.

pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod rename;
pub mod scope;
pub mod visitor;

use relabel_core::adapter::LanguageAdapter;
use relabel_core::error::RelabelResult;
use relabel_core::patch::SpanRename;
use relabel_core::types::IdentifierOccurrence;

pub use error::{JsError, JsResult};
pub use parser::parse_program;
pub use scope::Resolution;

/// [`LanguageAdapter`] for JavaScript source.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsAdapter;

impl LanguageAdapter for JsAdapter {
    type Tree = ast::Program;

    fn name(&self) -> &'static str {
        "js"
    }

    fn parse(&self, text: &str) -> RelabelResult<Self::Tree> {
        Ok(parse_program(text)?)
    }

    fn identifiers(&self, tree: &Self::Tree) -> Vec<IdentifierOccurrence> {
        visitor::IdentifierCollector::collect(tree)
    }

    fn rename_edits_at(
        &self,
        text: &str,
        offset: usize,
        new_name: &str,
    ) -> RelabelResult<Vec<SpanRename>> {
        let program = parse_program(text)?;
        let resolution = Resolution::resolve(&program);
        Ok(rename::rename_edits(text, &resolution, offset, new_name)?)
    }

    fn is_ident_char(&self, c: char) -> bool {
        lexer::is_ident_part(c)
    }
}
