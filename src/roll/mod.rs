mod ctx;
mod error;
mod roller;
mod token;

use crate::common::Int;
use crate::limits::Limits;

type RResult<T> = Result<T, RollError>;

pub use ctx::{DefaultRoller, RollContext};
pub use error::RollError;
pub use roller::Roller;
pub use token::{Dice, Group, Literal, Operate, Postfix, Token};

#[cfg(test)]
pub(crate) use roller::StepRoller;

pub fn eval<R: Roller>(postfix: &Postfix, roller: &mut R, limits: Limits) -> RResult<Int> {
    RollContext::new(limits, roller).eval(postfix)
}
