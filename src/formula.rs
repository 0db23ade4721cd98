use std::collections::HashMap;

/// A named expression that other expressions can reference as `[name]`.
#[derive(Debug, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Formula {
    pub name: String,
    pub expression: String,
}

impl Formula {
    pub fn new(name: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            expression: expression.into(),
        }
    }
}

/// Read-only lookup of formulas by (case-sensitive) name.
pub trait FormulaStore {
    fn formula(&self, name: &str) -> Option<&Formula>;
}

impl<S: FormulaStore + ?Sized> FormulaStore for &S {
    fn formula(&self, name: &str) -> Option<&Formula> {
        (**self).formula(name)
    }
}

/// In-memory formula store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Formulas {
    by_name: HashMap<String, Formula>,
}

impl Formulas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `formula`, returning the formula it replaced, if any.
    pub fn insert(&mut self, formula: Formula) -> Option<Formula> {
        self.by_name.insert(formula.name.clone(), formula)
    }

    pub fn remove(&mut self, name: &str) -> Option<Formula> {
        self.by_name.remove(name)
    }

    pub fn len(&self) -> usize {
        self.by_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_name.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Formula> + '_ {
        self.by_name.values()
    }
}

impl FormulaStore for Formulas {
    fn formula(&self, name: &str) -> Option<&Formula> {
        self.by_name.get(name)
    }
}

impl FromIterator<Formula> for Formulas {
    fn from_iter<I: IntoIterator<Item = Formula>>(iter: I) -> Self {
        let mut ret = Self::new();
        ret.extend(iter);
        ret
    }
}

impl Extend<Formula> for Formulas {
    fn extend<I: IntoIterator<Item = Formula>>(&mut self, iter: I) {
        for formula in iter {
            self.insert(formula);
        }
    }
}
