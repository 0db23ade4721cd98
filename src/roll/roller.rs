use crate::common::UInt;
use num_bigint::RandBigInt;
use rand::Rng;

/// Source of individual die results.
pub trait Roller {
    /// Rolls one die with `sides` faces, returning a value in `1..=sides`.
    ///
    /// `sides` must be greater than one.
    fn roll(&mut self, sides: &UInt) -> UInt;

    fn roll_n(&mut self, num: usize, sides: &UInt) -> Vec<UInt> {
        (0..num).map(|_| self.roll(sides)).collect()
    }
}

impl<R: Rng> Roller for R {
    fn roll(&mut self, sides: &UInt) -> UInt {
        // Draw bits(sides - 1) bits and reject anything past the last face.
        let max = sides - 1u32;
        let bits = max.bits();
        loop {
            let x = self.gen_biguint(bits);
            if x <= max {
                return x + 1u32;
            }
        }
    }
}

#[cfg(test)]
pub(crate) use step::StepRoller;

#[cfg(test)]
mod step {
    use super::*;

    /// Deterministic roller: yields `initial`, `initial + step`, ... wrapped into `1..=sides`.
    pub(crate) struct StepRoller {
        current: UInt,
        step: UInt,
    }

    impl StepRoller {
        pub fn new(initial: u32, step: u32) -> Self {
            Self {
                current: initial.into(),
                step: step.into(),
            }
        }
    }

    impl Roller for StepRoller {
        fn roll(&mut self, sides: &UInt) -> UInt {
            let ret = (&self.current - 1u32) % sides + 1u32;
            self.current += &self.step;
            ret
        }
    }
}
