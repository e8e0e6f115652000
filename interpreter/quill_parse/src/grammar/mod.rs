//! Statement and block grammar.
//!
//! Expression grammar lives in [`expr`]. Statement parsers leave the
//! cursor on the last token of the statement; the program loop advances
//! past it.

mod expr;

use crate::{Parser, Precedence};
use quill_ir::{Block, Stmt, TokenKind};

impl Parser<'_> {
    /// Parse one statement, or `None` if its shape was broken badly
    /// enough to drop it (the diagnostic is already recorded).
    pub(crate) fn parse_statement(&mut self) -> Option<Stmt> {
        tracing::trace!(token = %self.current_kind(), "parse_statement");
        match self.current_kind() {
            TokenKind::Let => self.parse_let_statement(),
            TokenKind::Return => Some(self.parse_return_statement()),
            _ => Some(self.parse_expression_statement()),
        }
    }

    /// `let <ident> = <expr>;`
    fn parse_let_statement(&mut self) -> Option<Stmt> {
        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let name = self.current().literal.clone();

        if !self.expect_peek(TokenKind::Assign) {
            return None;
        }

        self.advance();
        let value = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Some(Stmt::Let { name, value })
    }

    /// `return <expr>;`
    fn parse_return_statement(&mut self) -> Stmt {
        self.advance();
        let value = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Stmt::Return { value }
    }

    /// A bare expression; the trailing semicolon is optional so REPL
    /// input like `5 + 5` works.
    fn parse_expression_statement(&mut self) -> Stmt {
        let expr = self.parse_expression(Precedence::Lowest);

        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }

        Stmt::Expr { expr }
    }

    /// Parse a brace-delimited block. The cursor must be on `{`; on
    /// return it sits on the closing `}` (or `Eof` for unclosed input).
    pub(crate) fn parse_block(&mut self) -> Block {
        let mut statements = Vec::new();
        self.advance();
        while !self.cursor.check(TokenKind::RBrace) && !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_statement() {
                statements.push(stmt);
            }
            self.advance();
        }
        Block { statements }
    }
}

// Shared by the function-literal and arrow paths in `expr`.
impl Parser<'_> {
    /// Parse `(a, b, c)` parameter names. The cursor must be on `(`;
    /// on success it ends on `)`.
    pub(crate) fn parse_function_parameters(&mut self) -> Option<Vec<String>> {
        if self.peek_is(TokenKind::RParen) {
            self.advance();
            return Some(Vec::new());
        }

        if !self.expect_peek(TokenKind::Ident) {
            return None;
        }
        let mut parameters = vec![self.current().literal.clone()];

        while self.peek_is(TokenKind::Comma) {
            self.advance();
            if !self.expect_peek(TokenKind::Ident) {
                return None;
            }
            parameters.push(self.current().literal.clone());
        }

        if !self.expect_peek(TokenKind::RParen) {
            return None;
        }
        Some(parameters)
    }
}
