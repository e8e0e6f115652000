//! Keyword resolution.
//!
//! The lookup function uses the identifier's length as a first-pass
//! filter (keywords range from 2-6 chars), then matches against the
//! specific keywords of that length.

use quill_ir::TokenKind;

/// Look up a keyword by text.
///
/// Returns the corresponding `TokenKind` if the text is a keyword,
/// `None` if it's a regular identifier.
#[inline]
pub(crate) fn lookup(text: &str) -> Option<TokenKind> {
    let len = text.len();

    // Guard: all keywords are 2-6 chars
    if !(2..=6).contains(&len) {
        return None;
    }

    match len {
        2 => match text {
            "fn" => Some(TokenKind::Function),
            "if" => Some(TokenKind::If),
            _ => None,
        },
        3 => match text {
            "let" => Some(TokenKind::Let),
            _ => None,
        },
        4 => match text {
            "else" => Some(TokenKind::Else),
            "true" => Some(TokenKind::True),
            _ => None,
        },
        5 => match text {
            "false" => Some(TokenKind::False),
            _ => None,
        },
        6 => match text {
            "return" => Some(TokenKind::Return),
            _ => None,
        },
        _ => None,
    }
}
