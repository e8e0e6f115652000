//! Token cursor for navigating the token stream.
//!
//! Maintains the parser's two-token window (current + peek) over the
//! on-demand scanner, with consumption and expectation methods.

use super::Diagnostic;
use quill_lexer::Lexer;
use quill_ir::{Span, Token, TokenKind};

/// Cursor over the scanner.
///
/// Pulls tokens lazily; exactly one token of lookahead is available,
/// which is all the grammar needs.
pub struct Cursor<'a> {
    lexer: Lexer<'a>,
    current: Token,
    peek: Token,
}

impl<'a> Cursor<'a> {
    /// Create a new cursor with the window primed.
    pub fn new(mut lexer: Lexer<'a>) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Cursor {
            lexer,
            current,
            peek,
        }
    }

    /// Get the current token.
    #[inline]
    pub fn current(&self) -> &Token {
        &self.current
    }

    /// Get the current token's kind.
    #[inline]
    pub fn current_kind(&self) -> TokenKind {
        self.current.kind
    }

    /// Get the current token's span.
    #[inline]
    pub fn current_span(&self) -> Span {
        self.current.span
    }

    /// Get the lookahead token.
    #[inline]
    pub fn peek(&self) -> &Token {
        &self.peek
    }

    /// Get the lookahead token's kind.
    #[inline]
    pub fn peek_kind(&self) -> TokenKind {
        self.peek.kind
    }

    /// Check if the current token matches the given kind.
    #[inline]
    pub fn check(&self, kind: TokenKind) -> bool {
        self.current.kind == kind
    }

    /// Check if the lookahead token matches the given kind.
    #[inline]
    pub fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.kind == kind
    }

    /// Check if at end of input.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    /// Slide the window forward by one token.
    ///
    /// Past the end of input this is a no-op apart from churning `Eof`
    /// tokens, so callers never need an end guard.
    pub fn advance(&mut self) {
        self.current = std::mem::replace(&mut self.peek, self.lexer.next_token());
    }

    /// Consume the lookahead token if it matches, or report a mismatch.
    ///
    /// On success the expected token becomes current. On failure the
    /// window is untouched and the caller gets the diagnostic to record.
    pub fn expect_peek(&mut self, expected: TokenKind) -> Result<(), Diagnostic> {
        if self.peek.kind == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.make_expect_error(expected))
        }
    }

    /// Create the mismatch diagnostic for `expect_peek`.
    ///
    /// Split out and marked cold: expectation failures are rare, and
    /// keeping the formatting off the happy path keeps `expect_peek`
    /// small enough to inline.
    #[cold]
    #[inline(never)]
    fn make_expect_error(&self, expected: TokenKind) -> Diagnostic {
        Diagnostic {
            message: format!(
                "expected next token to be {}, got {} instead",
                expected.display_name(),
                self.peek.kind.display_name()
            ),
            span: self.peek.span,
        }
    }
}
