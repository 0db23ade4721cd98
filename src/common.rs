use std::fmt::{self, Write};

pub use vec1::vec1;

/// Signed arbitrary-precision integer every expression evaluates to.
pub type Int = num_bigint::BigInt;
/// Magnitude type used for die faces and individual draws.
pub type UInt = num_bigint::BigUint;

pub type NonEmpty<T> = vec1::Vec1<T>;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinaryOperator {
    /// All four operators share one tier, so evaluation is strictly left to right.
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Add | Self::Sub | Self::Mul | Self::Div => 1,
        }
    }

    pub const fn symbol(&self) -> char {
        match self {
            Self::Add => '+',
            Self::Sub => '-',
            Self::Mul => '*',
            Self::Div => '/',
        }
    }

    /// Computes `a op b`. Returns `None` on division by zero.
    pub fn apply(&self, a: Int, b: Int) -> Option<Int> {
        Some(match self {
            Self::Add => a + b,
            Self::Sub => a - b,
            Self::Mul => a * b,
            Self::Div => {
                if num_traits::Zero::is_zero(&b) {
                    return None;
                }
                a / b
            }
        })
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char(self.symbol())
    }
}

/// Which of the rolled dice contribute to a roll's total.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Keep {
    All,
    Highest(usize),
    Lowest(usize),
}

impl Default for Keep {
    fn default() -> Self {
        Self::All
    }
}

impl fmt::Display for Keep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => Ok(()),
            Self::Highest(n) => write!(f, "h{}", n),
            Self::Lowest(n) => write!(f, "l{}", n),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_keeps_operand_order() {
        assert_eq!(BinaryOperator::Sub.apply(7.into(), 2.into()), Some(5.into()));
        assert_eq!(BinaryOperator::Div.apply(7.into(), 2.into()), Some(3.into()));
        assert_eq!(BinaryOperator::Div.apply((-7).into(), 2.into()), Some((-3).into()));
        assert_eq!(BinaryOperator::Div.apply(7.into(), 0.into()), None);
    }

    #[test]
    fn test_display_keep() {
        assert_eq!(Keep::All.to_string(), "");
        assert_eq!(Keep::Highest(2).to_string(), "h2");
        assert_eq!(Keep::Lowest(1).to_string(), "l1");
    }
}
