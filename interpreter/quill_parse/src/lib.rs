//! Pratt parser for Quill.
//!
//! Single-pass precedence climbing over the scanner's token stream.
//! Parsing never aborts: errors are accumulated as [`Diagnostic`]s and
//! unrecognizable sub-expressions become `Expr::Illegal` sentinels, so
//! every parse yields a complete [`Program`].

mod cursor;
mod grammar;
mod precedence;


pub use cursor::Cursor;
pub use precedence::Precedence;

use quill_ir::{Program, Span, Token, TokenKind};
use quill_lexer::Lexer;
use std::fmt;

/// A parse error with its source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub message: String,
    pub span: Span,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// What a parse produces: the program plus everything that went wrong.
#[derive(Debug)]
pub struct ParseResult {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseResult {
    /// Check if any errors were recorded.
    #[inline]
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// The diagnostic messages, in the order they were recorded.
    pub fn error_messages(&self) -> Vec<&str> {
        self.diagnostics
            .iter()
            .map(|d| d.message.as_str())
            .collect()
    }
}

/// Parser state.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
    diagnostics: Vec<Diagnostic>,
}

impl<'a> Parser<'a> {
    /// Create a new parser over the given source.
    pub fn new(source: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(Lexer::new(source)),
            diagnostics: Vec::new(),
        }
    }

    /// Parse the whole input.
    ///
    /// Consumes the parser; the result always contains a program, with
    /// diagnostics for whatever did not parse.
    pub fn parse(mut self) -> ParseResult {
        let program = self.parse_program();
        ParseResult {
            program,
            diagnostics: self.diagnostics,
        }
    }

    fn parse_program(&mut self) -> Program {
        let mut program = Program::new();
        while !self.cursor.is_at_end() {
            if let Some(stmt) = self.parse_statement() {
                program.statements.push(stmt);
            }
            self.advance();
        }
        program
    }

    /// Record a diagnostic.
    fn report(&mut self, diagnostic: Diagnostic) {
        tracing::trace!(message = %diagnostic.message, span = %diagnostic.span, "parse error");
        self.diagnostics.push(diagnostic);
    }

    // Cursor delegation - token navigation for the grammar modules.

    #[inline]
    fn current(&self) -> &Token {
        self.cursor.current()
    }

    #[inline]
    fn current_kind(&self) -> TokenKind {
        self.cursor.current_kind()
    }

    #[inline]
    fn current_span(&self) -> Span {
        self.cursor.current_span()
    }

    #[inline]
    fn peek_kind(&self) -> TokenKind {
        self.cursor.peek_kind()
    }

    #[inline]
    fn peek_is(&self, kind: TokenKind) -> bool {
        self.cursor.peek_is(kind)
    }

    #[inline]
    fn advance(&mut self) {
        self.cursor.advance();
    }

    /// Consume the lookahead if it matches, recording the mismatch
    /// diagnostic otherwise. Returns whether it matched.
    fn expect_peek(&mut self, expected: TokenKind) -> bool {
        match self.cursor.expect_peek(expected) {
            Ok(()) => true,
            Err(diagnostic) => {
                self.report(diagnostic);
                false
            }
        }
    }
}

/// Parse source text into a program plus diagnostics.
pub fn parse(source: &str) -> ParseResult {
    Parser::new(source).parse()
}
