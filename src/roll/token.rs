use super::{error::RollError, roller::Roller, RResult, RollContext};
use crate::common::*;
use std::fmt;
use std::ops::Deref;

#[enum_dispatch::enum_dispatch]
pub trait Operate {
    /// Applies this token to the evaluation stack.
    fn operate<R: Roller>(&self, ctx: &mut RollContext<'_, R>, stack: &mut Vec<Int>) -> RResult<()>;
}

/// One step of a postfix program.
#[derive(Debug, Clone, PartialEq)]
#[enum_dispatch::enum_dispatch(Operate)]
pub enum Token {
    Literal(Literal),
    Operator(BinaryOperator),
    Dice(Dice),
    Group(Group),
}

impl Token {
    /// How many dice and group levels this token nests. Plain values are 0.
    pub fn depth(&self) -> usize {
        match self {
            Self::Literal(_) | Self::Operator(_) => 0,
            Self::Dice(dice) => 1 + dice.count.depth(),
            Self::Group(group) => 1 + group.multiplier.depth().max(group.body.depth()),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(x) => x.fmt(f),
            Self::Operator(x) => x.fmt(f),
            Self::Dice(x) => x.fmt(f),
            Self::Group(x) => x.fmt(f),
        }
    }
}

/// A token sequence in reverse-polish order. Never empty.
#[derive(Debug, Clone, PartialEq)]
pub struct Postfix(NonEmpty<Token>);

impl Postfix {
    pub fn new(tokens: NonEmpty<Token>) -> Self {
        Self(tokens)
    }

    /// A sequence holding the single literal `x`.
    pub fn literal(x: impl Into<Int>) -> Self {
        Self::single(Literal::new(x).into())
    }

    pub fn single(token: Token) -> Self {
        Self(vec1![token])
    }

    pub fn into_inner(self) -> NonEmpty<Token> {
        self.0
    }

    pub fn depth(&self) -> usize {
        self.0.iter().map(Token::depth).max().unwrap_or(0)
    }
}

impl Deref for Postfix {
    type Target = [Token];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Postfix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, token) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", token)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Literal(pub Int);

impl Literal {
    pub fn new(x: impl Into<Int>) -> Self {
        Self(x.into())
    }
}

impl Operate for Literal {
    fn operate<R: Roller>(&self, _: &mut RollContext<'_, R>, stack: &mut Vec<Int>) -> RResult<()> {
        stack.push(self.0.clone());
        Ok(())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Operate for BinaryOperator {
    fn operate<R: Roller>(&self, _: &mut RollContext<'_, R>, stack: &mut Vec<Int>) -> RResult<()> {
        let (b, a) = match (stack.pop(), stack.pop()) {
            (Some(b), Some(a)) => (b, a),
            (b, _) => {
                return Err(RollError::Malformed {
                    remaining: b.is_some() as usize,
                })
            }
        };
        stack.push(self.apply(a, b).ok_or(RollError::ZeroDivision)?);
        Ok(())
    }
}

/// A die definition: `count` dice with `sides` faces, some of which are kept.
#[derive(Debug, Clone, PartialEq)]
pub struct Dice {
    pub count: Postfix,
    pub sides: Int,
    pub keep: Keep,
}

impl Dice {
    pub fn new(count: Postfix, sides: impl Into<Int>, keep: Keep) -> Self {
        Self {
            count,
            sides: sides.into(),
            keep,
        }
    }
}

impl Operate for Dice {
    fn operate<R: Roller>(&self, ctx: &mut RollContext<'_, R>, stack: &mut Vec<Int>) -> RResult<()> {
        let count = ctx.eval(&self.count)?;
        stack.push(ctx.roll_dice(&count, &self.sides, self.keep)?);
        Ok(())
    }
}

impl fmt::Display for Dice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}d{}{}", self.count, self.sides, self.keep)
    }
}

/// A body evaluated `multiplier` times and summed, redrawing any dice inside on
/// every repetition. A negative multiplier negates the sum.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub multiplier: Postfix,
    pub body: Postfix,
}

impl Group {
    pub fn new(multiplier: Postfix, body: Postfix) -> Self {
        Self { multiplier, body }
    }
}

impl Operate for Group {
    fn operate<R: Roller>(&self, ctx: &mut RollContext<'_, R>, stack: &mut Vec<Int>) -> RResult<()> {
        let times = ctx.eval(&self.multiplier)?;
        let mut total = Int::from(0);
        let mut done = UInt::from(0u32);
        while &done < times.magnitude() {
            total += ctx.eval(&self.body)?;
            done += 1u32;
        }
        if times.sign() == num_bigint::Sign::Minus {
            total = -total;
        }
        stack.push(total);
        Ok(())
    }
}

impl fmt::Display for Group {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.multiplier, self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn add(a: i64, b: i64) -> Postfix {
        Postfix::new(vec1![
            Literal::new(a).into(),
            Literal::new(b).into(),
            BinaryOperator::Add.into()
        ])
    }

    #[test]
    fn test_display_postfix() {
        assert_eq!(add(2, 3).to_string(), "2 3 +");
        let dice = Dice::new(Postfix::literal(4), 6, Keep::Highest(3));
        assert_eq!(Token::from(dice).to_string(), "4d6h3");
        let group = Group::new(Postfix::literal(-1), add(1, 2));
        assert_eq!(Token::from(group).to_string(), "-1(1 2 +)");
    }

    #[test]
    fn test_depth() {
        assert_eq!(add(2, 3).depth(), 0);
        let dice = Dice::new(Postfix::literal(2), 6, Keep::All);
        let chained = Dice::new(Postfix::single(dice.into()), 8, Keep::All);
        assert_eq!(Token::from(chained.clone()).depth(), 2);
        let group = Group::new(Postfix::literal(1), Postfix::single(chained.into()));
        assert_eq!(Token::from(group).depth(), 3);
    }
}
