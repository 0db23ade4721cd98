use crate::common::Int;
use crate::error::Error;
use crate::formula::FormulaStore;
use crate::limits::Limits;
use crate::parse::{self, ParseError};
use crate::roll::{self, DefaultRoller, Postfix, Roller};

/// Parses and rolls expressions against a formula store.
///
/// ```
/// use rollify::{Engine, Formula, Formulas, Int};
///
/// let formulas: Formulas = vec![Formula::new("atk", "1d20 + 5")].into_iter().collect();
/// let mut engine = Engine::new(formulas);
/// let total = engine.evaluate("[atk] + 2").unwrap();
/// assert!(total >= Int::from(8) && total <= Int::from(27));
/// ```
#[derive(Debug)]
pub struct Engine<S, R = DefaultRoller> {
    formulas: S,
    limits: Limits,
    roller: R,
}

impl<S: FormulaStore> Engine<S> {
    /// Creates an engine rolling with the thread-local RNG.
    pub fn new(formulas: S) -> Self {
        Self::with_roller(formulas, rand::thread_rng())
    }
}

impl<S: FormulaStore, R: Roller> Engine<S, R> {
    pub fn with_roller(formulas: S, roller: R) -> Self {
        Self {
            formulas,
            limits: Limits::default(),
            roller,
        }
    }

    pub fn limits(mut self, limits: Limits) -> Self {
        self.limits = limits;
        self
    }

    pub fn formulas(&self) -> &S {
        &self.formulas
    }

    pub fn formulas_mut(&mut self) -> &mut S {
        &mut self.formulas
    }

    /// Parses `input` without rolling anything.
    pub fn parse(&self, input: &str) -> Result<Postfix, ParseError> {
        parse::parse(input, &self.formulas, self.limits)
    }

    /// Parses `input` and rolls it, returning the total.
    pub fn evaluate(&mut self, input: &str) -> Result<Int, Error> {
        let postfix = self.parse(input)?;
        let total = roll::eval(&postfix, &mut self.roller, self.limits)?;
        log::debug!("{:?} = {}", input, total);
        Ok(total)
    }
}
