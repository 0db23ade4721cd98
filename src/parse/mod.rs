mod error;
mod lexer;
mod nest;
mod parser;
mod scanner;

use crate::formula::FormulaStore;
use crate::limits::Limits;
use crate::roll::Postfix;

pub use error::ParseError;

type PResult<T> = Result<T, ParseError>;

/// Converts `input` to postfix, expanding `[name]` references through `formulas`.
pub fn parse<S: FormulaStore + ?Sized>(
    input: &str,
    formulas: &S,
    limits: Limits,
) -> Result<Postfix, ParseError> {
    parser::Parser::new(formulas, limits).parse(input)
}
