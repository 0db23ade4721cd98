use super::{error::RollError, roller::Roller, token::*, RResult};
use crate::common::*;
use crate::limits::Limits;
use num_bigint::Sign;
use num_traits::ToPrimitive;

pub type DefaultRoller = rand::prelude::ThreadRng;

/// Stack machine that evaluates postfix programs.
pub struct RollContext<'r, R> {
    limits: Limits,
    roller: &'r mut R,
}

impl<'r, R: Roller> RollContext<'r, R> {
    pub fn new(limits: Limits, roller: &'r mut R) -> Self {
        Self { limits, roller }
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    /// Runs `postfix` against a fresh stack, which must end up holding exactly one value.
    pub fn eval(&mut self, postfix: &[Token]) -> RResult<Int> {
        let mut stack = Vec::new();
        for token in postfix {
            token.operate(self, &mut stack)?;
        }
        match (stack.pop(), stack.len()) {
            (Some(value), 0) => Ok(value),
            (top, rest) => Err(RollError::Malformed {
                remaining: rest + top.is_some() as usize,
            }),
        }
    }

    /// Rolls `count` dice with `sides` faces and sums the ones `keep` selects.
    ///
    /// A negative count rolls `|count|` dice and negates the total.
    pub fn roll_dice(&mut self, count: &Int, sides: &Int, keep: Keep) -> RResult<Int> {
        if !self.limits.allows_dice(count.magnitude()) {
            return Err(RollError::TooManyDice(count.clone()));
        }
        if *sides <= Int::from(1) {
            return Err(RollError::InvalidDie(sides.clone()));
        }
        let num = count
            .magnitude()
            .to_usize()
            .ok_or_else(|| RollError::TooManyDice(count.clone()))?;

        let mut rolls = self.roller.roll_n(num, sides.magnitude());
        let total: UInt = match keep {
            Keep::All => rolls.iter().sum(),
            Keep::Highest(n) => {
                rolls.sort_unstable();
                rolls.iter().rev().take(n).sum()
            }
            Keep::Lowest(n) => {
                rolls.sort_unstable();
                rolls.iter().take(n).sum()
            }
        };
        log::trace!("rolled {}d{}{}: {}", count, sides, keep, total);

        let total = Int::from(total);
        Ok(if count.sign() == Sign::Minus { -total } else { total })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::StepRoller;

    fn mock_roller() -> StepRoller {
        StepRoller::new(1, 1)
    }

    fn roll(count: i64, sides: i64, keep: Keep) -> RResult<Int> {
        let mut roller = mock_roller();
        RollContext::new(Limits::default(), &mut roller).roll_dice(&count.into(), &sides.into(), keep)
    }

    fn eval(tokens: NonEmpty<Token>) -> RResult<Int> {
        let mut roller = mock_roller();
        RollContext::new(Limits::default(), &mut roller).eval(&tokens)
    }

    #[test]
    fn test_roll_all() {
        assert_eq!(roll(3, 6, Keep::All), Ok(Int::from(1 + 2 + 3)));
        assert_eq!(roll(8, 6, Keep::All), Ok(Int::from(1 + 2 + 3 + 4 + 5 + 6 + 1 + 2)));
    }

    #[test]
    fn test_roll_keep() {
        assert_eq!(roll(4, 6, Keep::Highest(2)), Ok(Int::from(3 + 4)));
        assert_eq!(roll(4, 6, Keep::Lowest(2)), Ok(Int::from(1 + 2)));
        assert_eq!(roll(8, 6, Keep::Highest(3)), Ok(Int::from(6 + 5 + 4)));
        assert_eq!(roll(2, 6, Keep::Lowest(10)), Ok(Int::from(1 + 2)));
        assert_eq!(roll(3, 6, Keep::Highest(0)), Ok(Int::from(0)));
    }

    #[test]
    fn test_roll_negative_and_zero() {
        assert_eq!(roll(-2, 6, Keep::All), Ok(Int::from(-3)));
        assert_eq!(roll(-4, 6, Keep::Highest(1)), Ok(Int::from(-4)));
        assert_eq!(roll(0, 6, Keep::All), Ok(Int::from(0)));
    }

    #[test]
    fn test_roll_invalid_die() {
        assert_eq!(roll(3, 1, Keep::All), Err(RollError::InvalidDie(1.into())));
        assert_eq!(roll(0, 0, Keep::All), Err(RollError::InvalidDie(0.into())));
        assert_eq!(roll(1, -6, Keep::All), Err(RollError::InvalidDie((-6).into())));
    }

    #[test]
    fn test_roll_count_boundary() {
        let mut roller = mock_roller();
        let mut ctx = RollContext::new(Limits::default().with_max_dice(10), &mut roller);
        assert_eq!(ctx.roll_dice(&10.into(), &2.into(), Keep::Lowest(1)), Ok(Int::from(1)));
        assert_eq!(
            ctx.roll_dice(&11.into(), &2.into(), Keep::All),
            Err(RollError::TooManyDice(11.into()))
        );
        assert_eq!(
            ctx.roll_dice(&(-11).into(), &2.into(), Keep::All),
            Err(RollError::TooManyDice((-11).into()))
        );
    }

    #[test]
    fn test_roll_default_max_dice() {
        assert!(roll(1_000_000, 2, Keep::All).is_ok());
        assert_eq!(
            roll(1_000_001, 2, Keep::All),
            Err(RollError::TooManyDice(1_000_001.into()))
        );
    }

    #[test]
    fn test_eval_operators() {
        let tokens = vec1![
            Literal::new(10).into(),
            Literal::new(4).into(),
            BinaryOperator::Sub.into(),
            Literal::new(3).into(),
            BinaryOperator::Div.into()
        ];
        assert_eq!(eval(tokens), Ok(Int::from(2)));
    }

    #[test]
    fn test_eval_zero_division() {
        let tokens = vec1![
            Literal::new(1).into(),
            Literal::new(0).into(),
            BinaryOperator::Div.into()
        ];
        assert_eq!(eval(tokens), Err(RollError::ZeroDivision));
    }

    #[test]
    fn test_eval_malformed() {
        let two_values = vec1![Literal::new(1).into(), Literal::new(2).into()];
        assert_eq!(eval(two_values), Err(RollError::Malformed { remaining: 2 }));
        let missing_operand = vec1![Literal::new(1).into(), BinaryOperator::Add.into()];
        assert_eq!(eval(missing_operand), Err(RollError::Malformed { remaining: 1 }));
    }

    #[test]
    fn test_eval_dice_count_subexpression() {
        let count = Postfix::new(vec1![
            Literal::new(1).into(),
            Literal::new(2).into(),
            BinaryOperator::Add.into()
        ]);
        let tokens = vec1![Dice::new(count, 6, Keep::All).into()];
        assert_eq!(eval(tokens), Ok(Int::from(1 + 2 + 3)));
    }

    #[test]
    fn test_eval_group_rerolls_body() {
        let body = Postfix::single(Dice::new(Postfix::literal(1), 6, Keep::All).into());
        let tokens = vec1![Group::new(Postfix::literal(3), body.clone()).into()];
        assert_eq!(eval(tokens), Ok(Int::from(1 + 2 + 3)));

        let tokens = vec1![Group::new(Postfix::literal(-2), body).into()];
        assert_eq!(eval(tokens), Ok(Int::from(-(1 + 2))));
    }

    #[test]
    fn test_eval_group_zero_times_skips_body() {
        let body = Postfix::new(vec1![
            Literal::new(1).into(),
            Literal::new(0).into(),
            BinaryOperator::Div.into()
        ]);
        let tokens = vec1![Group::new(Postfix::literal(0), body).into()];
        assert_eq!(eval(tokens), Ok(Int::from(0)));
    }
}
