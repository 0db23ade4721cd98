use super::{error::ParseError, PResult};

/// Names of the formulas whose bodies are currently being parsed, outermost first.
#[derive(Debug, Default)]
pub(crate) struct FormulaNest {
    names: Vec<String>,
}

impl FormulaNest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Marks `name` as being expanded, failing if it already is.
    pub fn enter(&mut self, name: &str) -> PResult<()> {
        if self.contains(name) {
            return Err(ParseError::SelfReferentialFormula(name.to_string()));
        }
        self.names.push(name.to_string());
        Ok(())
    }

    pub fn leave(&mut self) {
        self.names.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enter_rejects_active_name() {
        let mut nest = FormulaNest::new();
        nest.enter("a").unwrap();
        nest.enter("b").unwrap();
        assert_eq!(
            nest.enter("a"),
            Err(ParseError::SelfReferentialFormula("a".to_string()))
        );
        assert!(nest.contains("b"));
        nest.leave();
        nest.leave();
        assert!(!nest.contains("a"));
        assert!(nest.enter("a").is_ok());
    }
}
