// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Recursive-descent parser for the supported JavaScript subset.
//!
//! Covers declarations (`var`, `let`, `const`, `function`), the usual
//! control-flow statements, and expressions including arrow functions,
//! object and array literals, member access, calls and `new`. Semicolons may
//! be omitted before `}`, at end of input, or after a line break.

use relabel_core::patch::Span;

use crate::ast::*;
use crate::error::{JsError, JsResult};
use crate::lexer::{tokenize, Token, TokenKind};

const ASSIGN_OPS: &[&str] = &[
    "=", "+=", "-=", "*=", "/=", "%=", "**=", "<<=", ">>=", ">>>=", "&=", "|=", "^=", "&&=",
    "||=", "??=",
];

/// Parse `source` into a [`Program`].
pub fn parse_program(source: &str) -> JsResult<Program> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        no_in: false,
    };
    let mut body = Vec::new();
    while parser.peek().kind != TokenKind::Eof {
        body.push(parser.parse_statement()?);
    }
    Ok(Program {
        body,
        span: Span::new(0, source.len()),
    })
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token<'a>>,
    pos: usize,
    /// Inside a `for` head, where `in` ends the init expression.
    no_in: bool,
}

fn binary_precedence(token: &Token<'_>) -> Option<u8> {
    let prec = match (token.kind, token.text) {
        (TokenKind::Punct, "??") => 1,
        (TokenKind::Punct, "||") => 2,
        (TokenKind::Punct, "&&") => 3,
        (TokenKind::Punct, "|") => 4,
        (TokenKind::Punct, "^") => 5,
        (TokenKind::Punct, "&") => 6,
        (TokenKind::Punct, "==" | "!=" | "===" | "!==") => 7,
        (TokenKind::Punct, "<" | ">" | "<=" | ">=") => 8,
        (TokenKind::Keyword, "instanceof" | "in") => 8,
        (TokenKind::Punct, "<<" | ">>" | ">>>") => 9,
        (TokenKind::Punct, "+" | "-") => 10,
        (TokenKind::Punct, "*" | "/" | "%") => 11,
        (TokenKind::Punct, "**") => 12,
        _ => return None,
    };
    Some(prec)
}

impl<'a> Parser<'a> {
    // ---------------------------------------------------------------------
    // Token cursor
    // ---------------------------------------------------------------------

    fn peek(&self) -> &Token<'a> {
        self.peek_at(0)
    }

    fn peek_at(&self, n: usize) -> &Token<'a> {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + n).min(last)]
    }

    fn advance(&mut self) -> Token<'a> {
        let token = *self.peek();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    /// End offset of the last consumed token.
    fn prev_end(&self) -> usize {
        match self.pos.checked_sub(1) {
            Some(i) => self.tokens[i].span.end,
            None => 0,
        }
    }

    fn eat_punct(&mut self, p: &str) -> bool {
        if self.peek().is_punct(p) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.peek().is_keyword(kw) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, p: &str) -> JsResult<Token<'a>> {
        if self.peek().is_punct(p) {
            Ok(self.advance())
        } else {
            Err(self.expected(&format!("'{}'", p)))
        }
    }

    fn expected(&self, what: &str) -> JsError {
        let token = self.peek();
        let found = match token.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", token.text),
        };
        JsError::syntax(
            self.source,
            token.span.start,
            format!("expected {}, found {}", what, found),
        )
    }

    fn unexpected(&self) -> JsError {
        let token = self.peek();
        let message = match token.kind {
            TokenKind::Eof => "unexpected end of input".to_string(),
            _ => format!("unexpected token '{}'", token.text),
        };
        JsError::syntax(self.source, token.span.start, message)
    }

    fn consume_semicolon(&mut self) -> JsResult<()> {
        if self.eat_punct(";") {
            return Ok(());
        }
        let token = self.peek();
        if token.is_punct("}") || token.kind == TokenKind::Eof || token.newline_before {
            Ok(())
        } else {
            Err(self.expected("';'"))
        }
    }

    /// Run `f` with `in` accepted as a binary operator.
    fn allow_in<T>(&mut self, f: impl FnOnce(&mut Self) -> JsResult<T>) -> JsResult<T> {
        let saved = std::mem::replace(&mut self.no_in, false);
        let result = f(self);
        self.no_in = saved;
        result
    }

    fn identifier(&mut self) -> JsResult<Identifier> {
        let token = *self.peek();
        if token.kind != TokenKind::Identifier {
            return Err(self.expected("identifier"));
        }
        self.advance();
        Ok(Identifier {
            name: token.text.to_string(),
            span: token.span,
        })
    }

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------

    fn parse_statement(&mut self) -> JsResult<Statement> {
        let token = *self.peek();
        match (token.kind, token.text) {
            (TokenKind::Punct, "{") => Ok(Statement::Block(self.parse_block()?)),
            (TokenKind::Punct, ";") => {
                self.advance();
                Ok(Statement::Empty)
            }
            (TokenKind::Keyword, "var" | "let" | "const") => {
                let decl = self.parse_variable_declaration()?;
                self.consume_semicolon()?;
                Ok(Statement::VariableDeclaration(decl))
            }
            (TokenKind::Keyword, "function") => {
                Ok(Statement::FunctionDeclaration(self.parse_function(true)?))
            }
            (TokenKind::Keyword, "return") => {
                self.advance();
                let next = self.peek();
                let argument = if next.is_punct(";")
                    || next.is_punct("}")
                    || next.kind == TokenKind::Eof
                    || next.newline_before
                {
                    None
                } else {
                    Some(self.parse_expression()?)
                };
                self.consume_semicolon()?;
                Ok(Statement::Return(argument))
            }
            (TokenKind::Keyword, "if") => {
                self.advance();
                self.expect_punct("(")?;
                let test = self.allow_in(Self::parse_expression)?;
                self.expect_punct(")")?;
                let consequent = Box::new(self.parse_statement()?);
                let alternate = if self.eat_keyword("else") {
                    Some(Box::new(self.parse_statement()?))
                } else {
                    None
                };
                Ok(Statement::If {
                    test,
                    consequent,
                    alternate,
                })
            }
            (TokenKind::Keyword, "for") => self.parse_for(),
            (TokenKind::Keyword, "while") => {
                self.advance();
                self.expect_punct("(")?;
                let test = self.allow_in(Self::parse_expression)?;
                self.expect_punct(")")?;
                let body = Box::new(self.parse_statement()?);
                Ok(Statement::While { test, body })
            }
            (TokenKind::Keyword, "do") => {
                self.advance();
                let body = Box::new(self.parse_statement()?);
                if !self.eat_keyword("while") {
                    return Err(self.expected("'while'"));
                }
                self.expect_punct("(")?;
                let test = self.allow_in(Self::parse_expression)?;
                self.expect_punct(")")?;
                self.eat_punct(";");
                Ok(Statement::DoWhile { body, test })
            }
            (TokenKind::Keyword, "break") => {
                self.advance();
                self.consume_semicolon()?;
                Ok(Statement::Break)
            }
            (TokenKind::Keyword, "continue") => {
                self.advance();
                self.consume_semicolon()?;
                Ok(Statement::Continue)
            }
            (TokenKind::Keyword, "throw") => {
                self.advance();
                if self.peek().newline_before {
                    return Err(JsError::syntax(
                        self.source,
                        self.peek().span.start,
                        "illegal newline after throw",
                    ));
                }
                let argument = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(Statement::Throw(argument))
            }
            (TokenKind::Keyword, "try") => self.parse_try(),
            _ => {
                let expr = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(Statement::Expression(expr))
            }
        }
    }

    fn parse_block(&mut self) -> JsResult<Block> {
        let start = self.expect_punct("{")?.span.start;
        let body = self.allow_in(|p| {
            let mut body = Vec::new();
            while !p.peek().is_punct("}") {
                if p.peek().kind == TokenKind::Eof {
                    return Err(p.expected("'}'"));
                }
                body.push(p.parse_statement()?);
            }
            Ok(body)
        })?;
        let end = self.expect_punct("}")?.span.end;
        Ok(Block {
            body,
            span: Span::new(start, end),
        })
    }

    fn parse_variable_declaration(&mut self) -> JsResult<VariableDeclaration> {
        let kind = match self.advance().text {
            "var" => DeclKind::Var,
            "let" => DeclKind::Let,
            _ => DeclKind::Const,
        };
        let mut declarators = Vec::new();
        loop {
            let id = self.identifier()?;
            let init = if self.eat_punct("=") {
                Some(self.parse_assignment()?)
            } else {
                None
            };
            declarators.push(Declarator { id, init });
            if !self.eat_punct(",") {
                break;
            }
        }
        Ok(VariableDeclaration { kind, declarators })
    }

    fn parse_for(&mut self) -> JsResult<Statement> {
        let start = self.advance().span.start;
        self.expect_punct("(")?;

        let saved = std::mem::replace(&mut self.no_in, true);
        let init = if self.peek().is_punct(";") {
            Ok(None)
        } else if matches!(self.peek().text, "var" | "let" | "const")
            && self.peek().kind == TokenKind::Keyword
        {
            self.parse_variable_declaration()
                .map(|d| Some(ForInit::Declaration(d)))
        } else {
            self.parse_expression().map(|e| Some(ForInit::Expression(e)))
        };
        self.no_in = saved;
        let init = init?;

        let next = *self.peek();
        let is_in = next.is_keyword("in");
        let is_of = next.kind == TokenKind::Identifier && next.text == "of";
        if is_in || is_of {
            let valid = match &init {
                Some(ForInit::Declaration(d)) => d.declarators.len() == 1,
                Some(ForInit::Expression(e)) => e.is_assignment_target(),
                None => false,
            };
            let (true, Some(left)) = (valid, init) else {
                return Err(JsError::syntax(
                    self.source,
                    next.span.start,
                    "invalid left-hand side in for-in/of",
                ));
            };
            self.advance();
            let right = if is_of {
                self.allow_in(Self::parse_assignment)?
            } else {
                self.allow_in(Self::parse_expression)?
            };
            self.expect_punct(")")?;
            let body = Box::new(self.parse_statement()?);
            return Ok(Statement::ForIn {
                left,
                right,
                body,
                of: is_of,
                span: Span::new(start, self.prev_end()),
            });
        }

        self.expect_punct(";")?;
        let test = if self.peek().is_punct(";") {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect_punct(";")?;
        let update = if self.peek().is_punct(")") {
            None
        } else {
            Some(self.allow_in(Self::parse_expression)?)
        };
        self.expect_punct(")")?;
        let body = Box::new(self.parse_statement()?);
        Ok(Statement::For {
            init,
            test,
            update,
            body,
            span: Span::new(start, self.prev_end()),
        })
    }

    fn parse_try(&mut self) -> JsResult<Statement> {
        self.advance();
        let block = self.parse_block()?;
        let handler = if self.eat_keyword("catch") {
            let param = if self.eat_punct("(") {
                let id = self.identifier()?;
                self.expect_punct(")")?;
                Some(id)
            } else {
                None
            };
            let body = self.parse_block()?;
            Some(CatchClause { param, body })
        } else {
            None
        };
        let finalizer = if self.eat_keyword("finally") {
            Some(self.parse_block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.expected("'catch' or 'finally'"));
        }
        Ok(Statement::Try {
            block,
            handler,
            finalizer,
        })
    }

    // ---------------------------------------------------------------------
    // Functions
    // ---------------------------------------------------------------------

    fn parse_function(&mut self, require_name: bool) -> JsResult<Function> {
        let start = self.advance().span.start;
        let name = if self.peek().kind == TokenKind::Identifier {
            Some(self.identifier()?)
        } else if require_name {
            return Err(self.expected("function name"));
        } else {
            None
        };
        self.parse_function_rest(start, name)
    }

    /// Parameters and body, starting at `(`.
    fn parse_function_rest(&mut self, start: usize, name: Option<Identifier>) -> JsResult<Function> {
        self.expect_punct("(")?;
        let params = self.parse_params()?;
        let body = self.parse_function_body()?;
        Ok(Function {
            name,
            params,
            body: FunctionBody::Block(body),
            is_arrow: false,
            span: Span::new(start, self.prev_end()),
        })
    }

    /// Parameter list after the opening `(`, through the closing `)`.
    fn parse_params(&mut self) -> JsResult<Vec<Param>> {
        let mut params = Vec::new();
        while !self.peek().is_punct(")") {
            let rest = self.eat_punct("...");
            let id = self.identifier()?;
            let default = if !rest && self.eat_punct("=") {
                Some(self.allow_in(Self::parse_assignment)?)
            } else {
                None
            };
            params.push(Param { id, default, rest });
            if !self.eat_punct(",") {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(params)
    }

    fn parse_function_body(&mut self) -> JsResult<Vec<Statement>> {
        Ok(self.parse_block()?.body)
    }

    /// Whether the `(` at the cursor closes before an `=>`.
    fn arrow_follows_paren(&self) -> bool {
        let mut depth = 0usize;
        for (i, token) in self.tokens[self.pos..].iter().enumerate() {
            match (token.kind, token.text) {
                (TokenKind::Eof, _) => return false,
                (TokenKind::Punct, "(" | "[" | "{") => depth += 1,
                (TokenKind::Punct, ")" | "]" | "}") => {
                    let Some(d) = depth.checked_sub(1) else {
                        return false;
                    };
                    depth = d;
                    if depth == 0 {
                        return self.peek_at(i + 1).is_punct("=>");
                    }
                }
                _ => {}
            }
        }
        false
    }

    fn try_arrow(&mut self) -> JsResult<Option<Expression>> {
        let token = *self.peek();
        let params = if token.kind == TokenKind::Identifier && self.peek_at(1).is_punct("=>") {
            let id = self.identifier()?;
            vec![Param {
                id,
                default: None,
                rest: false,
            }]
        } else if token.is_punct("(") && self.arrow_follows_paren() {
            self.advance();
            self.parse_params()?
        } else {
            return Ok(None);
        };
        self.expect_punct("=>")?;
        let body = if self.peek().is_punct("{") {
            FunctionBody::Block(self.parse_function_body()?)
        } else {
            FunctionBody::Expression(Box::new(self.parse_assignment()?))
        };
        Ok(Some(Expression::Function(Box::new(Function {
            name: None,
            params,
            body,
            is_arrow: true,
            span: Span::new(token.span.start, self.prev_end()),
        }))))
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    fn parse_expression(&mut self) -> JsResult<Expression> {
        let first = self.parse_assignment()?;
        if !self.peek().is_punct(",") {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.eat_punct(",") {
            items.push(self.parse_assignment()?);
        }
        Ok(Expression::Sequence(items))
    }

    fn parse_assignment(&mut self) -> JsResult<Expression> {
        if let Some(arrow) = self.try_arrow()? {
            return Ok(arrow);
        }
        let target_start = self.peek().span.start;
        let target = self.parse_conditional()?;
        let token = *self.peek();
        if token.kind == TokenKind::Punct && ASSIGN_OPS.contains(&token.text) {
            if !target.is_assignment_target() {
                return Err(JsError::syntax(
                    self.source,
                    target_start,
                    "invalid assignment target",
                ));
            }
            self.advance();
            let value = self.parse_assignment()?;
            return Ok(Expression::Assignment {
                op: token.text.to_string(),
                target: Box::new(target),
                value: Box::new(value),
            });
        }
        Ok(target)
    }

    fn parse_conditional(&mut self) -> JsResult<Expression> {
        let test = self.parse_binary(1)?;
        if !self.eat_punct("?") {
            return Ok(test);
        }
        let consequent = self.allow_in(Self::parse_assignment)?;
        self.expect_punct(":")?;
        let alternate = self.parse_assignment()?;
        Ok(Expression::Conditional {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    fn parse_binary(&mut self, min_prec: u8) -> JsResult<Expression> {
        let mut left = self.parse_unary()?;
        loop {
            let token = *self.peek();
            let Some(prec) = binary_precedence(&token) else {
                break;
            };
            if prec < min_prec || (self.no_in && token.is_keyword("in")) {
                break;
            }
            self.advance();
            // `**` is right-associative.
            let next_min = if token.text == "**" { prec } else { prec + 1 };
            let right = self.parse_binary(next_min)?;
            left = Expression::Binary {
                op: token.text.to_string(),
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> JsResult<Expression> {
        let token = *self.peek();
        let is_unary = match token.kind {
            TokenKind::Punct => matches!(token.text, "!" | "-" | "+" | "~"),
            TokenKind::Keyword => matches!(token.text, "typeof" | "void" | "delete"),
            _ => false,
        };
        if is_unary {
            self.advance();
            let argument = self.parse_unary()?;
            return Ok(Expression::Unary {
                op: token.text.to_string(),
                argument: Box::new(argument),
            });
        }
        if token.is_punct("++") || token.is_punct("--") {
            self.advance();
            let argument = self.parse_unary()?;
            if !argument.is_assignment_target() {
                return Err(JsError::syntax(
                    self.source,
                    token.span.end,
                    "invalid update target",
                ));
            }
            return Ok(Expression::Update {
                op: token.text.to_string(),
                prefix: true,
                argument: Box::new(argument),
            });
        }
        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> JsResult<Expression> {
        let start = self.peek().span.start;
        let expr = self.parse_call_member()?;
        let token = *self.peek();
        if (token.is_punct("++") || token.is_punct("--")) && !token.newline_before {
            if !expr.is_assignment_target() {
                return Err(JsError::syntax(self.source, start, "invalid update target"));
            }
            self.advance();
            return Ok(Expression::Update {
                op: token.text.to_string(),
                prefix: false,
                argument: Box::new(expr),
            });
        }
        Ok(expr)
    }

    fn parse_call_member(&mut self) -> JsResult<Expression> {
        let mut expr = if self.peek().is_keyword("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        loop {
            if self.peek().is_punct("(") {
                let arguments = self.parse_arguments()?;
                expr = Expression::Call {
                    callee: Box::new(expr),
                    arguments,
                };
            } else if self.at_member_suffix() {
                expr = self.parse_member_suffix(expr)?;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    fn at_member_suffix(&self) -> bool {
        self.peek().is_punct(".") || self.peek().is_punct("[")
    }

    /// `.name` or `[index]` applied to `object`.
    fn parse_member_suffix(&mut self, object: Expression) -> JsResult<Expression> {
        if self.eat_punct(".") {
            let token = *self.peek();
            if !matches!(token.kind, TokenKind::Identifier | TokenKind::Keyword) {
                return Err(self.expected("property name"));
            }
            self.advance();
            return Ok(Expression::Member {
                object: Box::new(object),
                property: PropertyName {
                    name: token.text.to_string(),
                    span: token.span,
                },
            });
        }
        self.expect_punct("[")?;
        let index = self.allow_in(Self::parse_expression)?;
        self.expect_punct("]")?;
        Ok(Expression::Index {
            object: Box::new(object),
            index: Box::new(index),
        })
    }

    fn parse_new(&mut self) -> JsResult<Expression> {
        self.advance();
        let mut callee = if self.peek().is_keyword("new") {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        while self.at_member_suffix() {
            callee = self.parse_member_suffix(callee)?;
        }
        let arguments = if self.peek().is_punct("(") {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        Ok(Expression::New {
            callee: Box::new(callee),
            arguments,
        })
    }

    fn parse_arguments(&mut self) -> JsResult<Vec<Expression>> {
        self.expect_punct("(")?;
        let arguments = self.allow_in(|p| {
            let mut arguments = Vec::new();
            while !p.peek().is_punct(")") {
                arguments.push(p.parse_spread_or_assignment()?);
                if !p.eat_punct(",") {
                    break;
                }
            }
            Ok(arguments)
        })?;
        self.expect_punct(")")?;
        Ok(arguments)
    }

    fn parse_spread_or_assignment(&mut self) -> JsResult<Expression> {
        if self.eat_punct("...") {
            Ok(Expression::Spread(Box::new(self.parse_assignment()?)))
        } else {
            self.parse_assignment()
        }
    }

    fn parse_primary(&mut self) -> JsResult<Expression> {
        let token = *self.peek();
        match (token.kind, token.text) {
            (TokenKind::Identifier, _) => {
                self.advance();
                Ok(Expression::Identifier(Identifier {
                    name: token.text.to_string(),
                    span: token.span,
                }))
            }
            (TokenKind::Number | TokenKind::String | TokenKind::Template, _)
            | (TokenKind::Keyword, "true" | "false" | "null") => {
                self.advance();
                Ok(Expression::Literal(token.span))
            }
            (TokenKind::Keyword, "this") => {
                self.advance();
                Ok(Expression::This(token.span))
            }
            (TokenKind::Keyword, "function") => {
                Ok(Expression::Function(Box::new(self.parse_function(false)?)))
            }
            (TokenKind::Punct, "(") => {
                self.advance();
                let expr = self.allow_in(Self::parse_expression)?;
                self.expect_punct(")")?;
                Ok(expr)
            }
            (TokenKind::Punct, "[") => self.parse_array(),
            (TokenKind::Punct, "{") => self.parse_object(),
            _ => Err(self.unexpected()),
        }
    }

    fn parse_array(&mut self) -> JsResult<Expression> {
        self.advance();
        let elements = self.allow_in(|p| {
            let mut elements = Vec::new();
            loop {
                if p.eat_punct("]") {
                    return Ok(elements);
                }
                // Holes
                if p.eat_punct(",") {
                    continue;
                }
                elements.push(p.parse_spread_or_assignment()?);
                if !p.peek().is_punct("]") {
                    p.expect_punct(",")?;
                }
            }
        })?;
        Ok(Expression::Array(elements))
    }

    fn parse_object(&mut self) -> JsResult<Expression> {
        self.advance();
        let properties = self.allow_in(|p| {
            let mut properties = Vec::new();
            loop {
                if p.eat_punct("}") {
                    return Ok(properties);
                }
                properties.push(p.parse_property()?);
                if !p.peek().is_punct("}") {
                    p.expect_punct(",")?;
                }
            }
        })?;
        Ok(Expression::Object(properties))
    }

    fn parse_property(&mut self) -> JsResult<Property> {
        if self.eat_punct("...") {
            return Ok(Property::Spread(self.parse_assignment()?));
        }
        let token = *self.peek();
        let key = match token.kind {
            TokenKind::Punct if token.text == "[" => {
                self.advance();
                let key = self.parse_assignment()?;
                self.expect_punct("]")?;
                PropertyKey::Computed(key)
            }
            TokenKind::Identifier
                if self.peek_at(1).is_punct(",") || self.peek_at(1).is_punct("}") =>
            {
                return Ok(Property::Shorthand(self.identifier()?));
            }
            TokenKind::Identifier | TokenKind::Keyword => {
                self.advance();
                PropertyKey::Name(PropertyName {
                    name: token.text.to_string(),
                    span: token.span,
                })
            }
            TokenKind::String | TokenKind::Number => {
                self.advance();
                PropertyKey::Literal(token.span)
            }
            _ => return Err(self.expected("property name")),
        };
        let value = if self.peek().is_punct("(") {
            Expression::Function(Box::new(self.parse_function_rest(token.span.start, None)?))
        } else {
            self.expect_punct(":")?;
            self.parse_assignment()?
        };
        Ok(Property::KeyValue { key, value })
    }
}
