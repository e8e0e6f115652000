//! On-demand scanner for Quill.
//!
//! Byte-dispatch over the raw input: the parser pulls one token at a
//! time with [`Lexer::next_token`]. The scanner never fails and never
//! allocates ahead; unclassifiable input becomes `Illegal` tokens and
//! the end of input yields `Eof` forever.

mod keywords;

use quill_ir::{Span, Token, TokenKind};

/// Sentinel byte for "no more input".
const EOF_BYTE: u8 = 0;

/// The scanner.
///
/// Holds a window of one byte (`ch`) plus single-byte lookahead via
/// [`peek_char`](Lexer::peek_char). Positions are byte offsets.
pub struct Lexer<'a> {
    source: &'a str,
    bytes: &'a [u8],
    /// Byte offset of `ch`.
    pos: usize,
    /// Byte offset one past `ch`.
    read_pos: usize,
    /// Current byte, `EOF_BYTE` once input is exhausted.
    ch: u8,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer {
            source,
            bytes: source.as_bytes(),
            pos: 0,
            read_pos: 0,
            ch: EOF_BYTE,
        };
        lexer.read_char();
        lexer
    }

    /// Scan the next token.
    ///
    /// Subsequent calls after the end of input continue to return `Eof`.
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let start = self.pos;
        match self.ch {
            b'=' => match self.peek_char() {
                b'=' => self.two_char_token(TokenKind::Eq),
                b'>' => self.two_char_token(TokenKind::FatArrow),
                _ => self.single_char_token(TokenKind::Assign),
            },
            b'!' => match self.peek_char() {
                b'=' => self.two_char_token(TokenKind::NotEq),
                _ => self.single_char_token(TokenKind::Bang),
            },
            b'+' => self.single_char_token(TokenKind::Plus),
            b'-' => self.single_char_token(TokenKind::Minus),
            b'*' => self.single_char_token(TokenKind::Asterisk),
            b'/' => self.single_char_token(TokenKind::Slash),
            b'<' => self.single_char_token(TokenKind::Lt),
            b'>' => self.single_char_token(TokenKind::Gt),
            b',' => self.single_char_token(TokenKind::Comma),
            b';' => self.single_char_token(TokenKind::Semicolon),
            b'(' => self.single_char_token(TokenKind::LParen),
            b')' => self.single_char_token(TokenKind::RParen),
            b'{' => self.single_char_token(TokenKind::LBrace),
            b'}' => self.single_char_token(TokenKind::RBrace),
            b'"' => self.read_string(start),
            EOF_BYTE => Token::new(TokenKind::Eof, "", self.span_from(start)),
            b if is_letter(b) => {
                let literal = self.read_identifier();
                let kind = keywords::lookup(literal).unwrap_or(TokenKind::Ident);
                Token::new(kind, literal, self.span_from(start))
            }
            b if b.is_ascii_digit() => {
                let literal = self.read_number();
                Token::new(TokenKind::Int, literal, self.span_from(start))
            }
            _ => self.illegal_token(start),
        }
    }

    /// Advance the byte window by one.
    fn read_char(&mut self) {
        self.ch = if self.read_pos < self.bytes.len() {
            self.bytes[self.read_pos]
        } else {
            EOF_BYTE
        };
        self.pos = self.read_pos;
        self.read_pos = (self.read_pos + 1).min(self.bytes.len() + 1);
    }

    /// Look at the next byte without consuming it.
    #[inline]
    fn peek_char(&self) -> u8 {
        if self.read_pos < self.bytes.len() {
            self.bytes[self.read_pos]
        } else {
            EOF_BYTE
        }
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.ch, b' ' | b'\t' | b'\n' | b'\r') {
            self.read_char();
        }
    }

    fn single_char_token(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        let literal = &self.source[start..self.read_pos.min(self.bytes.len())];
        self.read_char();
        Token::new(kind, literal, self.span_from(start))
    }

    fn two_char_token(&mut self, kind: TokenKind) -> Token {
        let start = self.pos;
        self.read_char();
        self.read_char();
        let literal = &self.source[start..self.pos];
        Token::new(kind, literal, self.span_from(start))
    }

    /// Consume `[A-Za-z_]+` starting at the current byte.
    fn read_identifier(&mut self) -> &'a str {
        let start = self.pos;
        while is_letter(self.ch) {
            self.read_char();
        }
        &self.source[start..self.pos]
    }

    /// Consume `[0-9]+` starting at the current byte.
    fn read_number(&mut self) -> &'a str {
        let start = self.pos;
        while self.ch.is_ascii_digit() {
            self.read_char();
        }
        &self.source[start..self.pos]
    }

    /// Consume a string literal starting at the opening quote.
    ///
    /// No escape sequences: the literal runs to the next `"` or to the
    /// end of input. The token's literal excludes the quotes.
    fn read_string(&mut self, start: usize) -> Token {
        // Skip the opening quote.
        self.read_char();
        let content_start = self.pos;
        while self.ch != b'"' && self.ch != EOF_BYTE {
            self.read_char();
        }
        let literal = &self.source[content_start..self.pos];
        if self.ch == b'"' {
            self.read_char();
        }
        Token::new(TokenKind::String, literal, self.span_from(start))
    }

    /// Produce an `Illegal` token covering one full character.
    ///
    /// Non-ASCII input is consumed as a whole `char`, never split into
    /// continuation bytes.
    fn illegal_token(&mut self, start: usize) -> Token {
        let c = self.source[start..].chars().next().unwrap_or('\u{FFFD}');
        for _ in 0..c.len_utf8() {
            self.read_char();
        }
        Token::new(TokenKind::Illegal, &self.source[start..self.pos], self.span_from(start))
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(clamp_u32(start), clamp_u32(self.pos))
    }
}

#[inline]
fn is_letter(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}

#[inline]
fn clamp_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, clippy::expect_used)]

    use super::*;
    use pretty_assertions::assert_eq;

    fn collect_kinds_and_literals(source: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token();
            let done = token.kind == TokenKind::Eof;
            out.push((token.kind, token.literal));
            if done {
                break;
            }
        }
        out
    }

    #[test]
    fn punctuation_stream() {
        let tokens = collect_kinds_and_literals("=+(){},;");
        let expected = vec![
            (TokenKind::Assign, "=".to_string()),
            (TokenKind::Plus, "+".to_string()),
            (TokenKind::LParen, "(".to_string()),
            (TokenKind::RParen, ")".to_string()),
            (TokenKind::LBrace, "{".to_string()),
            (TokenKind::RBrace, "}".to_string()),
            (TokenKind::Comma, ",".to_string()),
            (TokenKind::Semicolon, ";".to_string()),
            (TokenKind::Eof, String::new()),
        ];
        assert_eq!(tokens, expected);
    }

    #[test]
    fn full_program_stream() {
        let source = "let five = 5;\n\
                      let ten = 10;\n\
                      let add = fn(x, y) {\n\
                        x + y;\n\
                      };\n\
                      let result = add(five, ten);\n\
                      !-/*5;\n\
                      5 < 10 > 5;\n\
                      if (5 < 10) {\n\
                        return true;\n\
                      } else {\n\
                        return false;\n\
                      }\n\
                      10 == 10;\n\
                      10 != 9;\n\
                      \"foobar\"\n\
                      \"foo bar\"\n";

        let expected: Vec<(TokenKind, &str)> = vec![
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "five"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "ten"),
            (TokenKind::Assign, "="),
            (TokenKind::Int, "10"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "add"),
            (TokenKind::Assign, "="),
            (TokenKind::Function, "fn"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "x"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "y"),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Ident, "x"),
            (TokenKind::Plus, "+"),
            (TokenKind::Ident, "y"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Let, "let"),
            (TokenKind::Ident, "result"),
            (TokenKind::Assign, "="),
            (TokenKind::Ident, "add"),
            (TokenKind::LParen, "("),
            (TokenKind::Ident, "five"),
            (TokenKind::Comma, ","),
            (TokenKind::Ident, "ten"),
            (TokenKind::RParen, ")"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Bang, "!"),
            (TokenKind::Minus, "-"),
            (TokenKind::Slash, "/"),
            (TokenKind::Asterisk, "*"),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Int, "5"),
            (TokenKind::Lt, "<"),
            (TokenKind::Int, "10"),
            (TokenKind::Gt, ">"),
            (TokenKind::Int, "5"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::If, "if"),
            (TokenKind::LParen, "("),
            (TokenKind::Int, "5"),
            (TokenKind::Lt, "<"),
            (TokenKind::Int, "10"),
            (TokenKind::RParen, ")"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::True, "true"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Else, "else"),
            (TokenKind::LBrace, "{"),
            (TokenKind::Return, "return"),
            (TokenKind::False, "false"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::RBrace, "}"),
            (TokenKind::Int, "10"),
            (TokenKind::Eq, "=="),
            (TokenKind::Int, "10"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::Int, "10"),
            (TokenKind::NotEq, "!="),
            (TokenKind::Int, "9"),
            (TokenKind::Semicolon, ";"),
            (TokenKind::String, "foobar"),
            (TokenKind::String, "foo bar"),
            (TokenKind::Eof, ""),
        ];

        let tokens = collect_kinds_and_literals(source);
        let expected: Vec<(TokenKind, String)> = expected
            .into_iter()
            .map(|(kind, literal)| (kind, literal.to_string()))
            .collect();
        assert_eq!(tokens, expected);
    }

    #[test]
    fn fat_arrow_is_not_assign() {
        let tokens = collect_kinds_and_literals("(x) => { x };");
        let kinds: Vec<TokenKind> = tokens.iter().map(|(kind, _)| *kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::LParen,
                TokenKind::Ident,
                TokenKind::RParen,
                TokenKind::FatArrow,
                TokenKind::LBrace,
                TokenKind::Ident,
                TokenKind::RBrace,
                TokenKind::Semicolon,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn unterminated_string_runs_to_eof() {
        let tokens = collect_kinds_and_literals("\"never closed");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::String, "never closed".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn illegal_tokens_do_not_stop_the_scanner() {
        let tokens = collect_kinds_and_literals("5 @ #");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Int, "5".to_string()),
                (TokenKind::Illegal, "@".to_string()),
                (TokenKind::Illegal, "#".to_string()),
                (TokenKind::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn non_ascii_illegal_is_one_whole_char() {
        let tokens = collect_kinds_and_literals("let λ = 1;");
        assert_eq!(tokens[1], (TokenKind::Illegal, "λ".to_string()));
        // The scanner resumes cleanly after the bad char.
        assert_eq!(tokens[2], (TokenKind::Assign, "=".to_string()));
    }

    #[test]
    fn eof_repeats_forever() {
        let mut lexer = Lexer::new("1");
        assert_eq!(lexer.next_token().kind, TokenKind::Int);
        for _ in 0..5 {
            assert_eq!(lexer.next_token().kind, TokenKind::Eof);
        }
    }

    #[test]
    fn spans_are_byte_offsets() {
        let mut lexer = Lexer::new("let x = 42;");
        assert_eq!(lexer.next_token().span, Span::new(0, 3));
        assert_eq!(lexer.next_token().span, Span::new(4, 5));
        assert_eq!(lexer.next_token().span, Span::new(6, 7));
        assert_eq!(lexer.next_token().span, Span::new(8, 10));
        assert_eq!(lexer.next_token().span, Span::new(10, 11));
    }
}
