use crate::common::Int;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum RollError {
    #[error("division by zero")]
    ZeroDivision,
    #[error("{0} is too many dice")]
    TooManyDice(Int),
    #[error("invalid die: d{0}")]
    InvalidDie(Int),
    #[error("malformed expression: evaluation left {remaining} values instead of one")]
    Malformed { remaining: usize },
}
