// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Visitor infrastructure for syntax tree traversal.
//!
//! # Traversal Order
//!
//! - **Depth-first, pre-order**
//! - Children are visited in source order (left-to-right, top-to-bottom)
//! - `enter_scope` / `leave_scope` bracket every construct that opens a scope
//!
//! Identifiers are reported through [`Visitor::visit_identifier`] together
//! with their [`IdentRole`], so a visitor never needs to know which syntactic
//! position it came from.

use relabel_core::patch::Span;
use relabel_core::types::IdentifierOccurrence;

use crate::ast::*;

/// Result of visiting a node - controls traversal behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum VisitResult {
    /// Visit children.
    #[default]
    Continue,
    /// Skip the children of this node.
    SkipChildren,
}

/// The construct that opened a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// Top level of the file.
    Program,
    /// Function, method or arrow body (parameters included).
    Function,
    /// Block, `for` head, or `catch` clause.
    Block,
}

impl ScopeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScopeKind::Program => "program",
            ScopeKind::Function => "function",
            ScopeKind::Block => "block",
        }
    }

    /// Whether `var` and function declarations bind here.
    pub fn is_function_like(&self) -> bool {
        matches!(self, ScopeKind::Program | ScopeKind::Function)
    }
}

impl std::fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a declaration introduces its name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    Var,
    Let,
    Const,
    /// `function f() {}` as a statement.
    FunctionDeclaration,
    /// The name of a function expression, visible only inside it.
    FunctionName,
    Param,
    CatchParam,
}

impl BindingKind {
    /// Whether the binding hoists to the nearest function or program scope.
    pub fn hoists(&self) -> bool {
        matches!(self, BindingKind::Var | BindingKind::FunctionDeclaration)
    }
}

impl From<DeclKind> for BindingKind {
    fn from(kind: DeclKind) -> Self {
        match kind {
            DeclKind::Var => BindingKind::Var,
            DeclKind::Let => BindingKind::Let,
            DeclKind::Const => BindingKind::Const,
        }
    }
}

/// What an identifier does at its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentRole {
    Binding(BindingKind),
    Reference,
    /// `{ a }` in an object literal: a reference that also spells the key.
    ShorthandReference,
}

/// Read-only traversal over a [`Program`].
pub trait Visitor<'a> {
    fn enter_scope(&mut self, _kind: ScopeKind, _span: Span) {}

    fn leave_scope(&mut self, _kind: ScopeKind) {}

    fn visit_identifier(&mut self, _node: &'a Identifier, _role: IdentRole) {}

    fn visit_statement(&mut self, _node: &'a Statement) -> VisitResult {
        VisitResult::Continue
    }

    fn visit_expression(&mut self, _node: &'a Expression) -> VisitResult {
        VisitResult::Continue
    }
}

/// Walk a whole program, opening the program scope around it.
pub fn walk_program<'a, V: Visitor<'a>>(visitor: &mut V, program: &'a Program) {
    visitor.enter_scope(ScopeKind::Program, program.span);
    walk_statements(visitor, &program.body);
    visitor.leave_scope(ScopeKind::Program);
}

fn walk_statements<'a, V: Visitor<'a>>(visitor: &mut V, statements: &'a [Statement]) {
    for statement in statements {
        walk_statement(visitor, statement);
    }
}

fn walk_block<'a, V: Visitor<'a>>(visitor: &mut V, block: &'a Block) {
    visitor.enter_scope(ScopeKind::Block, block.span);
    walk_statements(visitor, &block.body);
    visitor.leave_scope(ScopeKind::Block);
}

fn walk_declaration<'a, V: Visitor<'a>>(visitor: &mut V, decl: &'a VariableDeclaration) {
    let role = IdentRole::Binding(decl.kind.into());
    for declarator in &decl.declarators {
        visitor.visit_identifier(&declarator.id, role);
        if let Some(init) = &declarator.init {
            walk_expression(visitor, init);
        }
    }
}

fn walk_for_init<'a, V: Visitor<'a>>(visitor: &mut V, init: &'a ForInit) {
    match init {
        ForInit::Declaration(decl) => walk_declaration(visitor, decl),
        ForInit::Expression(expr) => walk_expression(visitor, expr),
    }
}

pub fn walk_statement<'a, V: Visitor<'a>>(visitor: &mut V, statement: &'a Statement) {
    if visitor.visit_statement(statement) == VisitResult::SkipChildren {
        return;
    }
    match statement {
        Statement::VariableDeclaration(decl) => walk_declaration(visitor, decl),
        Statement::FunctionDeclaration(function) => walk_function(visitor, function, true),
        Statement::Return(argument) => {
            if let Some(argument) = argument {
                walk_expression(visitor, argument);
            }
        }
        Statement::If {
            test,
            consequent,
            alternate,
        } => {
            walk_expression(visitor, test);
            walk_statement(visitor, consequent);
            if let Some(alternate) = alternate {
                walk_statement(visitor, alternate);
            }
        }
        Statement::For {
            init,
            test,
            update,
            body,
            span,
        } => {
            visitor.enter_scope(ScopeKind::Block, *span);
            if let Some(init) = init {
                walk_for_init(visitor, init);
            }
            if let Some(test) = test {
                walk_expression(visitor, test);
            }
            if let Some(update) = update {
                walk_expression(visitor, update);
            }
            walk_statement(visitor, body);
            visitor.leave_scope(ScopeKind::Block);
        }
        Statement::ForIn {
            left,
            right,
            body,
            span,
            ..
        } => {
            visitor.enter_scope(ScopeKind::Block, *span);
            walk_for_init(visitor, left);
            walk_expression(visitor, right);
            walk_statement(visitor, body);
            visitor.leave_scope(ScopeKind::Block);
        }
        Statement::While { test, body } => {
            walk_expression(visitor, test);
            walk_statement(visitor, body);
        }
        Statement::DoWhile { body, test } => {
            walk_statement(visitor, body);
            walk_expression(visitor, test);
        }
        Statement::Throw(argument) | Statement::Expression(argument) => {
            walk_expression(visitor, argument)
        }
        Statement::Try {
            block,
            handler,
            finalizer,
        } => {
            walk_block(visitor, block);
            if let Some(handler) = handler {
                visitor.enter_scope(ScopeKind::Block, handler.body.span);
                if let Some(param) = &handler.param {
                    visitor.visit_identifier(param, IdentRole::Binding(BindingKind::CatchParam));
                }
                walk_statements(visitor, &handler.body.body);
                visitor.leave_scope(ScopeKind::Block);
            }
            if let Some(finalizer) = finalizer {
                walk_block(visitor, finalizer);
            }
        }
        Statement::Block(block) => walk_block(visitor, block),
        Statement::Break | Statement::Continue | Statement::Empty => {}
    }
}

/// Walk a function. A declaration's name binds in the enclosing scope; an
/// expression's name binds inside the function's own scope.
fn walk_function<'a, V: Visitor<'a>>(visitor: &mut V, function: &'a Function, declaration: bool) {
    if declaration {
        if let Some(name) = &function.name {
            visitor.visit_identifier(name, IdentRole::Binding(BindingKind::FunctionDeclaration));
        }
    }
    visitor.enter_scope(ScopeKind::Function, function.span);
    if !declaration {
        if let Some(name) = &function.name {
            visitor.visit_identifier(name, IdentRole::Binding(BindingKind::FunctionName));
        }
    }
    for param in &function.params {
        visitor.visit_identifier(&param.id, IdentRole::Binding(BindingKind::Param));
        if let Some(default) = &param.default {
            walk_expression(visitor, default);
        }
    }
    match &function.body {
        FunctionBody::Block(body) => walk_statements(visitor, body),
        FunctionBody::Expression(expr) => walk_expression(visitor, expr),
    }
    visitor.leave_scope(ScopeKind::Function);
}

pub fn walk_expression<'a, V: Visitor<'a>>(visitor: &mut V, expr: &'a Expression) {
    if visitor.visit_expression(expr) == VisitResult::SkipChildren {
        return;
    }
    match expr {
        Expression::Identifier(id) => visitor.visit_identifier(id, IdentRole::Reference),
        Expression::Literal(_) | Expression::This(_) => {}
        Expression::Array(elements) | Expression::Sequence(elements) => {
            for element in elements {
                walk_expression(visitor, element);
            }
        }
        Expression::Object(properties) => {
            for property in properties {
                match property {
                    Property::KeyValue { key, value } => {
                        if let PropertyKey::Computed(key) = key {
                            walk_expression(visitor, key);
                        }
                        walk_expression(visitor, value);
                    }
                    Property::Shorthand(id) => {
                        visitor.visit_identifier(id, IdentRole::ShorthandReference)
                    }
                    Property::Spread(value) => walk_expression(visitor, value),
                }
            }
        }
        Expression::Function(function) => walk_function(visitor, function, false),
        Expression::Unary { argument, .. }
        | Expression::Update { argument, .. }
        | Expression::Spread(argument) => walk_expression(visitor, argument),
        Expression::Binary { left, right, .. } => {
            walk_expression(visitor, left);
            walk_expression(visitor, right);
        }
        Expression::Assignment { target, value, .. } => {
            walk_expression(visitor, target);
            walk_expression(visitor, value);
        }
        Expression::Conditional {
            test,
            consequent,
            alternate,
        } => {
            walk_expression(visitor, test);
            walk_expression(visitor, consequent);
            walk_expression(visitor, alternate);
        }
        Expression::Call { callee, arguments } | Expression::New { callee, arguments } => {
            walk_expression(visitor, callee);
            for argument in arguments {
                walk_expression(visitor, argument);
            }
        }
        Expression::Member { object, .. } => walk_expression(visitor, object),
        Expression::Index { object, index } => {
            walk_expression(visitor, object);
            walk_expression(visitor, index);
        }
    }
}

/// Collects every identifier node in traversal order.
#[derive(Debug, Default)]
pub struct IdentifierCollector {
    occurrences: Vec<IdentifierOccurrence>,
}

impl IdentifierCollector {
    pub fn collect(program: &Program) -> Vec<IdentifierOccurrence> {
        let mut collector = IdentifierCollector::default();
        walk_program(&mut collector, program);
        collector.occurrences
    }
}

impl<'a> Visitor<'a> for IdentifierCollector {
    fn visit_identifier(&mut self, node: &'a Identifier, _role: IdentRole) {
        self.occurrences
            .push(IdentifierOccurrence::new(node.name.as_str(), node.span.start));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_program;

    fn names(source: &str) -> Vec<(String, usize)> {
        let program = parse_program(source).unwrap();
        IdentifierCollector::collect(&program)
            .into_iter()
            .map(|o| (o.name, o.offset))
            .collect()
    }

    #[test]
    fn source_order() {
        assert_eq!(
            names("var a = b + c; f(a);"),
            vec![
                ("a".to_string(), 4),
                ("b".to_string(), 8),
                ("c".to_string(), 12),
                ("f".to_string(), 15),
                ("a".to_string(), 17),
            ]
        );
    }

    #[test]
    fn property_names_are_not_identifiers() {
        let found: Vec<_> = names("o.p = { q: r, s };")
            .into_iter()
            .map(|(n, _)| n)
            .collect();
        assert_eq!(found, vec!["o", "r", "s"]);
    }

    #[derive(Default)]
    struct ScopeRecorder {
        events: Vec<String>,
    }

    impl<'a> Visitor<'a> for ScopeRecorder {
        fn enter_scope(&mut self, kind: ScopeKind, _span: Span) {
            self.events.push(format!("enter {}", kind));
        }

        fn leave_scope(&mut self, kind: ScopeKind) {
            self.events.push(format!("leave {}", kind));
        }

        fn visit_identifier(&mut self, node: &'a Identifier, role: IdentRole) {
            let role = match role {
                IdentRole::Binding(kind) => format!("{:?}", kind),
                IdentRole::Reference => "ref".to_string(),
                IdentRole::ShorthandReference => "shorthand".to_string(),
            };
            self.events.push(format!("{} {}", node.name, role));
        }
    }

    #[test]
    fn scopes_bracket_functions_and_blocks() {
        let program = parse_program("function f(a) { { let b; } } var g = function h() {};").unwrap();
        let mut recorder = ScopeRecorder::default();
        walk_program(&mut recorder, &program);
        assert_eq!(
            recorder.events,
            vec![
                "enter program",
                "f FunctionDeclaration",
                "enter function",
                "a Param",
                "enter block",
                "b Let",
                "leave block",
                "leave function",
                "g Var",
                "enter function",
                "h FunctionName",
                "leave function",
                "leave program",
            ]
        );
    }

    #[test]
    fn skip_children_prunes_subtree() {
        struct SkipFunctions(Vec<String>);
        impl<'a> Visitor<'a> for SkipFunctions {
            fn visit_expression(&mut self, node: &'a Expression) -> VisitResult {
                match node {
                    Expression::Function(_) => VisitResult::SkipChildren,
                    _ => VisitResult::Continue,
                }
            }
            fn visit_identifier(&mut self, node: &'a Identifier, _role: IdentRole) {
                self.0.push(node.name.clone());
            }
        }
        let program = parse_program("var a = function (b) { c; }; d;").unwrap();
        let mut visitor = SkipFunctions(Vec::new());
        walk_program(&mut visitor, &program);
        assert_eq!(visitor.0, vec!["a", "d"]);
    }
}
