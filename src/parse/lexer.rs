use crate::common::BinaryOperator;
use logos::Logos;
use std::fmt;

pub(crate) type Spanned<'a> = std::iter::Peekable<logos::SpannedIter<'a, TokenKind>>;

pub(crate) fn lexer(s: &str) -> Spanned<'_> {
    TokenKind::lexer(s).spanned().peekable()
}

#[derive(Logos, Debug, Copy, Clone, Eq, PartialEq)]
pub(crate) enum TokenKind {
    #[regex(r"[0-9]+")]
    Integer,

    #[regex(r"[dD]")]
    Die,
    #[regex(r"[hH]")]
    Highest,
    #[regex(r"[lL]")]
    Lowest,

    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,

    #[token("(")]
    LeftParen,
    #[token(")")]
    RightParen,

    #[regex(r"\[[^\]]*\]")]
    Formula,
    #[regex(r"\[[^\]]*")]
    ErrUnclosedBracket,

    #[regex(r"[ \t]+", logos::skip)]
    #[error]
    Error,
}

impl TokenKind {
    /// Lexemes a unary minus may negate.
    pub const NEGATABLE: &'static [Self] = &[
        Self::Integer,
        Self::Die,
        Self::LeftParen,
        Self::Formula,
        Self::ErrUnclosedBracket,
    ];

    pub fn as_binary_op(&self) -> Option<BinaryOperator> {
        use BinaryOperator::*;
        Some(match self {
            Self::Plus => Add,
            Self::Minus => Sub,
            Self::Star => Mul,
            Self::Slash => Div,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        use TokenKind::*;

        match self {
            Integer => "<integer>",
            Die => "'d'",
            Highest => "'h'",
            Lowest => "'l'",
            Plus => "'+'",
            Minus => "'-'",
            Star => "'*'",
            Slash => "'/'",
            LeftParen => "'('",
            RightParen => "')'",
            Formula => "<formula>",
            ErrUnclosedBracket | Error => "<error>",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(s: &str) -> Vec<TokenKind> {
        lexer(s).map(|(kind, _)| kind).collect()
    }

    #[test]
    fn test_lex_dice() {
        use TokenKind::*;
        assert_eq!(kinds("3d6h2"), vec![Integer, Die, Integer, Highest, Integer]);
        assert_eq!(kinds("D20L"), vec![Die, Integer, Lowest]);
    }

    #[test]
    fn test_lex_skips_blanks() {
        use TokenKind::*;
        assert_eq!(kinds(" 1 +\t2 "), vec![Integer, Plus, Integer]);
    }

    #[test]
    fn test_lex_formula() {
        use TokenKind::*;
        assert_eq!(kinds("2[Fire Bolt]"), vec![Integer, Formula]);
        assert_eq!(kinds("[a)b]"), vec![Formula]);
        assert_eq!(kinds("1+[open"), vec![Integer, Plus, ErrUnclosedBracket]);
    }

    #[test]
    fn test_lex_errors() {
        assert_eq!(kinds("x"), vec![TokenKind::Error]);
        assert_eq!(kinds("]"), vec![TokenKind::Error]);
    }
}
