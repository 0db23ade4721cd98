use crate::common::{Int, UInt};

/// Upper bounds applied while parsing and rolling.
///
/// All bounds are inclusive: a roll of exactly `max_dice` dice with exactly
/// `max_sides` faces is allowed.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Limits {
    /// Largest number of dice a single die definition may roll.
    pub max_dice: u64,
    /// Largest face count a die may have.
    pub max_sides: u64,
    /// Deepest nesting of groups, formula references and chained dice.
    pub max_depth: usize,
}

impl Limits {
    pub const DEFAULT_MAX_DICE: u64 = 1_000_000;
    pub const DEFAULT_MAX_SIDES: u64 = 1_000_000_000_000_000;
    pub const DEFAULT_MAX_DEPTH: usize = 128;

    pub const fn new(max_dice: u64, max_sides: u64) -> Self {
        Self {
            max_dice,
            max_sides,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }

    pub const fn with_max_dice(mut self, max_dice: u64) -> Self {
        self.max_dice = max_dice;
        self
    }

    pub const fn with_max_sides(mut self, max_sides: u64) -> Self {
        self.max_sides = max_sides;
        self
    }

    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub(crate) fn allows_dice(&self, count: &UInt) -> bool {
        *count <= UInt::from(self.max_dice)
    }

    pub(crate) fn allows_sides(&self, sides: &Int) -> bool {
        *sides <= Int::from(self.max_sides)
    }

    pub(crate) fn allows_depth(&self, depth: usize) -> bool {
        depth <= self.max_depth
    }
}

impl Default for Limits {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_DICE, Self::DEFAULT_MAX_SIDES)
    }
}
