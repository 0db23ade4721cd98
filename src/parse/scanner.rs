use super::{
    error::ParseError,
    lexer::{lexer, Spanned, TokenKind},
    PResult,
};
use crate::common::Int;
use logos::Span;

/// One-lexeme lookahead cursor over an input string.
pub(crate) struct Scanner<'a> {
    source: &'a str,
    tokens: Spanned<'a>,
    last_end: Option<usize>,
}

impl<'a> Scanner<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: lexer(source),
            last_end: None,
        }
    }

    pub fn has_next(&mut self) -> bool {
        self.tokens.peek().is_some()
    }

    pub fn peek(&mut self) -> Option<TokenKind> {
        self.tokens.peek().map(|(kind, _)| *kind)
    }

    /// Like [`Scanner::peek`], but only sees a lexeme that starts exactly where the
    /// previously read one ended.
    pub fn peek_adjacent(&mut self) -> Option<TokenKind> {
        let last_end = self.last_end;
        match self.tokens.peek() {
            Some((kind, span)) if Some(span.start) == last_end => Some(*kind),
            _ => None,
        }
    }

    /// The text of the next lexeme, if any.
    pub fn peek_slice(&mut self) -> Option<&'a str> {
        let source = self.source;
        self.tokens.peek().map(|(_, span)| &source[span.clone()])
    }

    pub fn read(&mut self) -> Option<(TokenKind, &'a str)> {
        let (kind, span) = self.tokens.next()?;
        self.last_end = Some(span.end);
        Some((kind, &self.source[span]))
    }

    pub fn try_skip(&mut self) {
        self.read();
    }

    /// Consumes a digit run and returns its value.
    pub fn read_int(&mut self) -> PResult<Int> {
        match self.read() {
            Some((TokenKind::Integer, slice)) => {
                slice.parse().map_err(|_| ParseError::invalid_symbol(slice))
            }
            Some((_, slice)) => Err(ParseError::invalid_symbol(slice)),
            None => Err(ParseError::Empty),
        }
    }

    /// Consumes and returns a digit run if one comes next; otherwise consumes nothing.
    pub fn try_read_int(&mut self) -> Option<Int> {
        match self.peek() {
            Some(TokenKind::Integer) => self.read().and_then(|(_, slice)| slice.parse().ok()),
            _ => None,
        }
    }

    /// [`Scanner::try_read_int`] restricted to a digit run adjacent to the previous lexeme.
    pub fn try_read_adjacent_int(&mut self) -> Option<Int> {
        match self.peek_adjacent() {
            Some(TokenKind::Integer) => self.try_read_int(),
            _ => None,
        }
    }

    /// Consumes a parenthesized group starting at the next `(` and returns the text
    /// between it and its matching `)`.
    pub fn extract_group(&mut self) -> PResult<&'a str> {
        let open = match self.tokens.next() {
            Some((TokenKind::LeftParen, span)) => span,
            _ => return Err(ParseError::MismatchedParentheses),
        };
        let mut depth = 1usize;
        while let Some((kind, span)) = self.tokens.next() {
            match kind {
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth == 1 => {
                    self.last_end = Some(span.end);
                    return Ok(self.slice_between(&open, &span));
                }
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
        }
        Err(ParseError::MismatchedParentheses)
    }

    fn slice_between(&self, open: &Span, close: &Span) -> &'a str {
        &self.source[open.end..close.start]
    }
}
