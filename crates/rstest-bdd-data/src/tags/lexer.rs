//! Tokenises a single scenario tag into markers, separators, and words.
//!
//! Words are maximal runs of characters other than `@`, `:` and `=`. Every
//! token records its byte offset so the parser can take the untokenised
//! remainder of a tag verbatim, which keeps paths containing `=` or `:`
//! intact.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) enum TokenKind<'a> {
    At,
    Colon,
    Equals,
    Word(&'a str),
    End,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(super) struct Token<'a> {
    pub(super) kind: TokenKind<'a>,
    pub(super) start: usize,
}

pub(super) struct Lexer<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub(super) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub(super) fn next_token(&mut self) -> Token<'a> {
        let start = self.pos;
        let Some(ch) = self.bump_char() else {
            return Token {
                kind: TokenKind::End,
                start,
            };
        };
        let kind = match ch {
            '@' => TokenKind::At,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Equals,
            _ => self.lex_word(start),
        };
        Token { kind, start }
    }

    /// Text from `offset` to the end of the input.
    pub(super) fn rest_from(&self, offset: usize) -> &'a str {
        self.input.get(offset..).unwrap_or_default()
    }

    fn peek_char(&self) -> Option<char> {
        self.input.get(self.pos..).and_then(|s| s.chars().next())
    }

    fn bump_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn lex_word(&mut self, start: usize) -> TokenKind<'a> {
        while let Some(ch) = self.peek_char() {
            if is_separator(ch) {
                break;
            }
            self.bump_char();
        }
        TokenKind::Word(self.input.get(start..self.pos).unwrap_or_default())
    }
}

fn is_separator(ch: char) -> bool {
    matches!(ch, '@' | ':' | '=')
}
