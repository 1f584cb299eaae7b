// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Syntax tree for the supported JavaScript subset.
//!
//! Only [`Identifier`] nodes name bindings or references. Property names in
//! member accesses and object keys are [`PropertyName`]s and are never
//! renamed.

use relabel_core::patch::Span;

/// An identifier that names a binding or refers to one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
    pub span: Span,
}

/// A property name (`o.name`, `{ name: v }`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyName {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub kind: DeclKind,
    pub declarators: Vec<Declarator>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Declarator {
    pub id: Identifier,
    pub init: Option<Expression>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub id: Identifier,
    pub default: Option<Expression>,
    pub rest: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Block(Vec<Statement>),
    /// Arrow function with an expression body.
    Expression(Box<Expression>),
}

/// Function declarations, function expressions, methods and arrows.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub name: Option<Identifier>,
    pub params: Vec<Param>,
    pub body: FunctionBody,
    pub is_arrow: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Statement>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Option<Identifier>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ForInit {
    Declaration(VariableDeclaration),
    Expression(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    VariableDeclaration(VariableDeclaration),
    FunctionDeclaration(Function),
    Return(Option<Expression>),
    If {
        test: Expression,
        consequent: Box<Statement>,
        alternate: Option<Box<Statement>>,
    },
    For {
        init: Option<ForInit>,
        test: Option<Expression>,
        update: Option<Expression>,
        body: Box<Statement>,
        span: Span,
    },
    /// `for (left in right)` or, when `of` is set, `for (left of right)`.
    ForIn {
        left: ForInit,
        right: Expression,
        body: Box<Statement>,
        of: bool,
        span: Span,
    },
    While {
        test: Expression,
        body: Box<Statement>,
    },
    DoWhile {
        body: Box<Statement>,
        test: Expression,
    },
    Break,
    Continue,
    Throw(Expression),
    Try {
        block: Block,
        handler: Option<CatchClause>,
        finalizer: Option<Block>,
    },
    Block(Block),
    Expression(Expression),
    Empty,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PropertyKey {
    Name(PropertyName),
    Literal(Span),
    Computed(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    KeyValue { key: PropertyKey, value: Expression },
    /// `{ a }`, a reference to `a` that also supplies the key `a`.
    Shorthand(Identifier),
    Spread(Expression),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
    Identifier(Identifier),
    /// Number, string, template, boolean or null literal.
    Literal(Span),
    This(Span),
    Array(Vec<Expression>),
    Object(Vec<Property>),
    Function(Box<Function>),
    Unary {
        op: String,
        argument: Box<Expression>,
    },
    Update {
        op: String,
        prefix: bool,
        argument: Box<Expression>,
    },
    Binary {
        op: String,
        left: Box<Expression>,
        right: Box<Expression>,
    },
    Assignment {
        op: String,
        target: Box<Expression>,
        value: Box<Expression>,
    },
    Conditional {
        test: Box<Expression>,
        consequent: Box<Expression>,
        alternate: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    New {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    Member {
        object: Box<Expression>,
        property: PropertyName,
    },
    Index {
        object: Box<Expression>,
        index: Box<Expression>,
    },
    Sequence(Vec<Expression>),
    Spread(Box<Expression>),
}

impl Expression {
    /// Whether this expression may appear on the left of `=` or `++`.
    pub fn is_assignment_target(&self) -> bool {
        matches!(
            self,
            Expression::Identifier(_) | Expression::Member { .. } | Expression::Index { .. }
        )
    }
}
