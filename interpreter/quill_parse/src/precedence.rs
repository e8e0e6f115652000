//! Operator binding power.

use quill_ir::TokenKind;

/// Binding power for expression parsing, weakest first.
///
/// The derived `Ord` gives the climbing loop its comparison: parsing
/// continues while the lookahead operator binds tighter than the
/// current level.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    Lowest,
    /// `==` `!=`
    Equals,
    /// `<` `>`
    LessGreater,
    /// `+` `-`
    Sum,
    /// `*` `/`
    Product,
    /// `-x` `!x`
    Prefix,
    /// `f(x)`
    Call,
}

impl Precedence {
    /// Binding power of a token in infix position.
    ///
    /// Tokens that are not infix operators bind at `Lowest`, which
    /// stops the climbing loop.
    #[inline]
    pub fn of(kind: TokenKind) -> Precedence {
        match kind {
            TokenKind::Eq | TokenKind::NotEq => Precedence::Equals,
            TokenKind::Lt | TokenKind::Gt => Precedence::LessGreater,
            TokenKind::Plus | TokenKind::Minus => Precedence::Sum,
            TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
            TokenKind::LParen => Precedence::Call,
            _ => Precedence::Lowest,
        }
    }
}
