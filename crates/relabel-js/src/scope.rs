// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Scope resolution: which identifier occurrences denote the same symbol.
//!
//! [`ScopeCollector`] walks a program, building the scope tree and
//! declaring bindings as it goes. References are resolved only after the
//! walk finishes, so hoisted declarations (`var`, function declarations) and
//! block bindings declared later in their block are visible to every
//! reference in scope.
//!
//! # Scoping Rules
//!
//! - `var` and function declarations bind in the nearest function or program
//!   scope
//! - `let` and `const` bind in the innermost block
//! - Parameters and a function expression's own name bind in the function
//! - A `catch` parameter binds in its clause
//! - A `for` head opens a block scope around the whole loop
//! - A reference that reaches the program scope unresolved is an implicit
//!   global; all implicit globals with the same spelling are one symbol

use std::collections::HashMap;

use relabel_core::patch::Span;

use crate::ast::{Identifier, Program};
use crate::visitor::{walk_program, BindingKind, IdentRole, ScopeKind, Visitor};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SymbolId(pub usize);

/// One scope in the scope tree.
#[derive(Debug, Clone)]
pub struct ScopeInfo {
    pub id: ScopeId,
    pub kind: ScopeKind,
    /// None for the program scope.
    pub parent: Option<ScopeId>,
    pub span: Span,
    bindings: HashMap<String, SymbolId>,
}

impl ScopeInfo {
    /// The symbol `name` is bound to directly in this scope.
    pub fn binding(&self, name: &str) -> Option<SymbolId> {
        self.bindings.get(name).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub id: SymbolId,
    pub name: String,
    /// Declaring scope; None for an implicit global.
    pub scope: Option<ScopeId>,
    /// How the first declaration introduced it; None for an implicit global.
    pub kind: Option<BindingKind>,
}

/// An identifier occurrence and the symbol it denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Occurrence {
    pub symbol: SymbolId,
    pub span: Span,
    pub role: IdentRole,
}

/// Scope tree, symbols, and resolved occurrences of one program.
#[derive(Debug, Clone)]
pub struct Resolution {
    scopes: Vec<ScopeInfo>,
    symbols: Vec<Symbol>,
    occurrences: Vec<Occurrence>,
}

impl Resolution {
    pub fn resolve(program: &Program) -> Self {
        ScopeCollector::collect(program)
    }

    pub fn scopes(&self) -> &[ScopeInfo] {
        &self.scopes
    }

    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Occurrences in traversal order.
    pub fn occurrences(&self) -> &[Occurrence] {
        &self.occurrences
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// The occurrence whose span covers `offset`.
    ///
    /// An occurrence starting at or spanning `offset` wins over one that
    /// merely ends there.
    pub fn occurrence_at(&self, offset: usize) -> Option<&Occurrence> {
        self.occurrences
            .iter()
            .find(|o| o.span.start <= offset && offset < o.span.end)
            .or_else(|| {
                self.occurrences
                    .iter()
                    .find(|o| o.span.contains_offset(offset))
            })
    }

    pub fn occurrences_of(&self, symbol: SymbolId) -> impl Iterator<Item = &Occurrence> {
        self.occurrences.iter().filter(move |o| o.symbol == symbol)
    }
}

#[derive(Debug)]
struct Pending {
    name: String,
    span: Span,
    role: IdentRole,
    scope: ScopeId,
    symbol: Option<SymbolId>,
}

/// Visitor that builds a [`Resolution`].
#[derive(Debug, Default)]
pub struct ScopeCollector {
    scopes: Vec<ScopeInfo>,
    symbols: Vec<Symbol>,
    stack: Vec<ScopeId>,
    pending: Vec<Pending>,
    globals: HashMap<String, SymbolId>,
}

impl ScopeCollector {
    pub fn collect(program: &Program) -> Resolution {
        let mut collector = ScopeCollector::default();
        walk_program(&mut collector, program);
        collector.finish()
    }

    fn current(&self) -> ScopeId {
        self.stack.last().copied().unwrap_or(ScopeId(0))
    }

    /// Nearest enclosing function or program scope.
    fn hoist_target(&self) -> ScopeId {
        self.stack
            .iter()
            .rev()
            .copied()
            .find(|id| self.scopes[id.0].kind.is_function_like())
            .unwrap_or(ScopeId(0))
    }

    fn new_symbol(
        &mut self,
        name: &str,
        scope: Option<ScopeId>,
        kind: Option<BindingKind>,
    ) -> SymbolId {
        let id = SymbolId(self.symbols.len());
        self.symbols.push(Symbol {
            id,
            name: name.to_string(),
            scope,
            kind,
        });
        id
    }

    /// Bind `name` in `scope`. A redeclaration reuses the existing symbol.
    fn declare(&mut self, scope: ScopeId, name: &str, kind: BindingKind) -> SymbolId {
        if let Some(existing) = self.scopes[scope.0].binding(name) {
            return existing;
        }
        let id = self.new_symbol(name, Some(scope), Some(kind));
        self.scopes[scope.0].bindings.insert(name.to_string(), id);
        id
    }

    fn lookup(&mut self, from: ScopeId, name: &str) -> SymbolId {
        let mut scope = Some(from);
        while let Some(id) = scope {
            let info = &self.scopes[id.0];
            if let Some(symbol) = info.binding(name) {
                return symbol;
            }
            scope = info.parent;
        }
        if let Some(&global) = self.globals.get(name) {
            return global;
        }
        let global = self.new_symbol(name, None, None);
        self.globals.insert(name.to_string(), global);
        global
    }

    fn finish(mut self) -> Resolution {
        let pending = std::mem::take(&mut self.pending);
        let occurrences = pending
            .into_iter()
            .map(|p| {
                let symbol = match p.symbol {
                    Some(symbol) => symbol,
                    None => self.lookup(p.scope, &p.name),
                };
                Occurrence {
                    symbol,
                    span: p.span,
                    role: p.role,
                }
            })
            .collect();
        Resolution {
            scopes: self.scopes,
            symbols: self.symbols,
            occurrences,
        }
    }
}

impl<'a> Visitor<'a> for ScopeCollector {
    fn enter_scope(&mut self, kind: ScopeKind, span: Span) {
        let id = ScopeId(self.scopes.len());
        let parent = self.stack.last().copied();
        self.scopes.push(ScopeInfo {
            id,
            kind,
            parent,
            span,
            bindings: HashMap::new(),
        });
        self.stack.push(id);
    }

    fn leave_scope(&mut self, _kind: ScopeKind) {
        self.stack.pop();
    }

    fn visit_identifier(&mut self, node: &'a Identifier, role: IdentRole) {
        let scope = self.current();
        let symbol = match role {
            IdentRole::Binding(kind) => {
                let target = if kind.hoists() {
                    self.hoist_target()
                } else {
                    scope
                };
                Some(self.declare(target, &node.name, kind))
            }
            IdentRole::Reference | IdentRole::ShorthandReference => None,
        };
        self.pending.push(Pending {
            name: node.name.clone(),
            span: node.span,
            role,
            scope,
            symbol,
        });
    }
}
