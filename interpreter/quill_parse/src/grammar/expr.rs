//! Expression grammar.
//!
//! Precedence climbing: `parse_expression` parses a prefix form, then
//! folds infix operators onto it while the lookahead binds tighter than
//! the caller's level. Both dispatch tables are static `match`es on the
//! token kind.

use crate::{Diagnostic, Parser, Precedence};
use quill_ir::{BinaryOp, Expr, TokenKind, UnaryOp};

impl Parser<'_> {
    /// Parse an expression at the given binding power.
    ///
    /// Always yields an expression; failed sub-parses come back as
    /// `Expr::Illegal` with the diagnostic recorded.
    pub(crate) fn parse_expression(&mut self, precedence: Precedence) -> Expr {
        let mut left = self.parse_prefix();

        while !self.peek_is(TokenKind::Semicolon) && precedence < Precedence::of(self.peek_kind())
        {
            self.advance();
            left = self.parse_infix(left);
        }

        left
    }

    /// Dispatch on the current token in prefix position.
    fn parse_prefix(&mut self) -> Expr {
        match self.current_kind() {
            TokenKind::Ident => Expr::Ident(self.current().literal.clone()),
            TokenKind::Int => self.parse_integer_literal(),
            TokenKind::String => Expr::Str(self.current().literal.clone()),
            TokenKind::True => Expr::Bool(true),
            TokenKind::False => Expr::Bool(false),
            TokenKind::Bang => self.parse_prefix_operator(UnaryOp::Not),
            TokenKind::Minus => self.parse_prefix_operator(UnaryOp::Neg),
            TokenKind::LParen => self.parse_paren_prefix(),
            TokenKind::If => self.parse_if_expression(),
            TokenKind::Function => self.parse_function_literal(),
            kind => {
                self.report(Diagnostic {
                    message: format!(
                        "no prefix parse function for {} found",
                        kind.display_name()
                    ),
                    span: self.current_span(),
                });
                Expr::Illegal
            }
        }
    }

    /// Dispatch on the current token in infix position. The climbing
    /// loop only lands here for tokens with real binding power.
    fn parse_infix(&mut self, left: Expr) -> Expr {
        let kind = self.current_kind();
        if kind == TokenKind::LParen {
            return self.parse_call_expression(left);
        }

        let Some(op) = binary_op(kind) else {
            return left;
        };
        let precedence = Precedence::of(kind);
        self.advance();
        let right = self.parse_expression(precedence);
        Expr::Infix {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    fn parse_integer_literal(&mut self) -> Expr {
        let literal = self.current().literal.clone();
        match literal.parse::<i64>() {
            Ok(value) => Expr::Int(value),
            Err(_) => {
                self.report(Diagnostic {
                    message: format!("could not parse {literal:?} as integer"),
                    span: self.current_span(),
                });
                Expr::Illegal
            }
        }
    }

    fn parse_prefix_operator(&mut self, op: UnaryOp) -> Expr {
        self.advance();
        let right = self.parse_expression(Precedence::Prefix);
        Expr::Prefix {
            op,
            right: Box::new(right),
        }
    }

    /// `(` in prefix position: grouped expression or arrow function.
    ///
    /// One token of lookahead decides:
    /// - `()` must open an empty arrow parameter list
    /// - `,` after the first inner expression means a parameter list
    /// - `)` followed by `=>` means a single-parameter arrow
    /// - plain `)` closes a grouped expression
    fn parse_paren_prefix(&mut self) -> Expr {
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            if !self.expect_peek(TokenKind::FatArrow) {
                return Expr::Illegal;
            }
            return self.parse_arrow_body(Vec::new());
        }

        self.advance();
        let first = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Comma) {
            return self.parse_arrow_parameters(first);
        }

        if !self.expect_peek(TokenKind::RParen) {
            return Expr::Illegal;
        }

        if self.peek_is(TokenKind::FatArrow) {
            self.advance();
            let Some(name) = identifier_name(&first) else {
                return self.bad_arrow_parameter();
            };
            return self.parse_arrow_body(vec![name]);
        }

        first
    }

    /// Parameter list of a multi-parameter arrow function. The first
    /// "parameter" arrived as a parsed expression and must turn out to
    /// be an identifier.
    fn parse_arrow_parameters(&mut self, first: Expr) -> Expr {
        let mut parameters = Vec::new();
        let first_ok = match identifier_name(&first) {
            Some(name) => {
                parameters.push(name);
                true
            }
            None => false,
        };

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            if !self.expect_peek(TokenKind::Ident) {
                return Expr::Illegal;
            }
            parameters.push(self.current().literal.clone());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return Expr::Illegal;
        }
        if !self.expect_peek(TokenKind::FatArrow) {
            return Expr::Illegal;
        }
        if !first_ok {
            return self.bad_arrow_parameter();
        }
        self.parse_arrow_body(parameters)
    }

    /// The body of an arrow function. The cursor sits on `=>`.
    fn parse_arrow_body(&mut self, parameters: Vec<String>) -> Expr {
        if !self.expect_peek(TokenKind::LBrace) {
            return Expr::Illegal;
        }
        let body = self.parse_block();
        Expr::Function { parameters, body }
    }

    #[cold]
    fn bad_arrow_parameter(&mut self) -> Expr {
        self.report(Diagnostic {
            message: "arrow function parameters must be identifiers".to_string(),
            span: self.current_span(),
        });
        Expr::Illegal
    }

    /// `if (<cond>) { ... }` with an optional `else { ... }`.
    fn parse_if_expression(&mut self) -> Expr {
        if !self.expect_peek(TokenKind::LParen) {
            return Expr::Illegal;
        }
        self.advance();
        let condition = Box::new(self.parse_expression(Precedence::Lowest));

        if !self.expect_peek(TokenKind::RParen) {
            return Expr::Illegal;
        }
        if !self.expect_peek(TokenKind::LBrace) {
            return Expr::Illegal;
        }
        let consequence = self.parse_block();

        let alternative = if self.peek_is(TokenKind::Else) {
            self.advance();
            if !self.expect_peek(TokenKind::LBrace) {
                return Expr::Illegal;
            }
            Some(self.parse_block())
        } else {
            None
        };

        Expr::If {
            condition,
            consequence,
            alternative,
        }
    }

    /// `fn(<params>) { ... }`
    fn parse_function_literal(&mut self) -> Expr {
        if !self.expect_peek(TokenKind::LParen) {
            return Expr::Illegal;
        }
        let Some(parameters) = self.parse_function_parameters() else {
            return Expr::Illegal;
        };
        if !self.expect_peek(TokenKind::LBrace) {
            return Expr::Illegal;
        }
        let body = self.parse_block();
        Expr::Function { parameters, body }
    }

    /// `<callee>(<args>)`; the cursor sits on `(`.
    fn parse_call_expression(&mut self, callee: Expr) -> Expr {
        let Some(arguments) = self.parse_call_arguments() else {
            return Expr::Illegal;
        };
        Expr::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    fn parse_call_arguments(&mut self) -> Option<Vec<Expr>> {
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Some(Vec::new());
        }

        self.advance();
        let mut arguments = vec![self.parse_expression(Precedence::Lowest)];

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            self.advance();
            arguments.push(self.parse_expression(Precedence::Lowest));
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(arguments)
    }
}

/// Infix operator for a token kind, if it has one.
#[inline]
fn binary_op(kind: TokenKind) -> Option<BinaryOp> {
    match kind {
        TokenKind::Plus => Some(BinaryOp::Add),
        TokenKind::Minus => Some(BinaryOp::Sub),
        TokenKind::Asterisk => Some(BinaryOp::Mul),
        TokenKind::Slash => Some(BinaryOp::Div),
        TokenKind::Lt => Some(BinaryOp::Lt),
        TokenKind::Gt => Some(BinaryOp::Gt),
        TokenKind::Eq => Some(BinaryOp::Eq),
        TokenKind::NotEq => Some(BinaryOp::NotEq),
        _ => None,
    }
}

fn identifier_name(expr: &Expr) -> Option<String> {
    match expr {
        Expr::Ident(name) => Some(name.clone()),
        _ => None,
    }
}
