use crate::{parse::ParseError, roll::RollError};

/// Anything that can go wrong between reading an expression and producing its total.
#[derive(thiserror::Error, Debug, PartialEq)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Roll(#[from] RollError),
}
