// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Scope-correct rename of the symbol under a byte offset.
//!
//! The occurrence covering the offset is resolved to its symbol and every
//! occurrence of that symbol is rewritten in one pass. Occurrences of other
//! symbols with the same spelling are left alone.
//!
//! A shorthand property `{ a }` both references `a` and spells the key
//! `a`. Renaming it to `b` writes `{ a: b }` so the object keeps its shape.
//!
//! # Usage
//!
//! ```
//! use relabel_js::rename::rename_symbol_at;
//!
//! let source = "var a = 1; function f(a) { return a; } a;";
//! let renamed = rename_symbol_at(source, 4, "top").unwrap();
//! assert_eq!(renamed, "var top = 1; function f(a) { return a; } top;");
//! ```

use relabel_core::patch::{apply_span_renames, SpanRename};
use tracing::debug;

use crate::error::{JsError, JsResult};
use crate::parser::parse_program;
use crate::scope::Resolution;
use crate::visitor::IdentRole;

/// Span edits that rename the symbol under `offset` to `new_name`.
pub fn rename_edits(
    source: &str,
    resolution: &Resolution,
    offset: usize,
    new_name: &str,
) -> JsResult<Vec<SpanRename>> {
    let Some(target) = resolution.occurrence_at(offset) else {
        return Err(JsError::NoIdentifierAt {
            offset,
            new_name: new_name.to_string(),
        });
    };
    let symbol = resolution.symbol(target.symbol);
    let edits: Vec<SpanRename> = resolution
        .occurrences_of(target.symbol)
        .map(|o| {
            let text = match o.role {
                IdentRole::ShorthandReference => {
                    format!("{}: {}", &source[o.span.start..o.span.end], new_name)
                }
                _ => new_name.to_string(),
            };
            SpanRename::new(o.span, text)
        })
        .collect();
    debug!(
        symbol = %symbol.name,
        global = symbol.scope.is_none(),
        occurrences = edits.len(),
        offset,
        "resolved rename target"
    );
    Ok(edits)
}

/// Rename the symbol whose occurrence covers `offset`.
pub fn rename_symbol_at(source: &str, offset: usize, new_name: &str) -> JsResult<String> {
    let program = parse_program(source)?;
    let resolution = Resolution::resolve(&program);
    let edits = rename_edits(source, &resolution, offset, new_name)?;
    Ok(apply_span_renames(source, edits)?)
}
