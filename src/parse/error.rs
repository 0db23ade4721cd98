use crate::common::{BinaryOperator, Int};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("invalid symbol: {0}")]
    InvalidSymbol(String),
    #[error("mismatched parentheses")]
    MismatchedParentheses,
    #[error("mismatched brackets")]
    MismatchedBrackets,
    #[error("misplaced operator: {0}")]
    MisplacedOperator(BinaryOperator),
    #[error("no die type given")]
    MissingDieType,
    #[error("invalid die extension: {0}")]
    InvalidDieExtension(char),
    #[error("no formula named {0:?}")]
    UnknownFormula(String),
    #[error("[{0}] is self-referential")]
    SelfReferentialFormula(String),
    #[error("{0} is too many dice")]
    TooManyDice(Int),
    #[error("d{0} has too many sides")]
    TooManySides(Int),
    #[error("expression nested more than {0} levels deep")]
    TooDeep(usize),
    #[error("empty expression")]
    Empty,
}

impl ParseError {
    pub(crate) fn invalid_symbol(slice: &str) -> Self {
        Self::InvalidSymbol(slice.chars().next().map(String::from).unwrap_or_default())
    }
}
