//! Dice expression evaluation.
//!
//! Expressions combine integers, dice (`4d6h3`), parenthesized groups and
//! references to named formulas (`[attack]`) with `+ - * /`. All four operators
//! share one precedence and associate to the left, so `1 + 2 * 3` is `9`.

mod common;
mod engine;
mod error;
mod formula;
mod limits;
pub mod parse;
pub mod roll;

pub use common::{BinaryOperator, Int, Keep, NonEmpty, UInt};
pub use engine::Engine;
pub use error::Error;
pub use formula::{Formula, FormulaStore, Formulas};
pub use limits::Limits;

/// Evaluates `input` with default limits, rolling with the thread-local RNG.
pub fn evaluate<S: FormulaStore + ?Sized>(input: &str, formulas: &S) -> Result<Int, Error> {
    Engine::new(formulas).evaluate(input)
}
