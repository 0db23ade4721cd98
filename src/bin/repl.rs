use rollify::{parse::ParseError, roll::Roller, Engine, Formula, Formulas};
use std::io::{self, BufRead, Write};

fn prompt() -> io::Result<()> {
    print!("> ");
    io::stdout().flush()
}

/// Splits `[name] = expression` into a formula definition.
fn definition(line: &str) -> Option<Formula> {
    let rest = line.strip_prefix('[')?;
    let (name, rest) = rest.split_once(']')?;
    let expression = rest.trim_start().strip_prefix('=')?;
    Some(Formula::new(name, expression.trim()))
}

/// Saves `formula`, returning why its expression does not parse yet. Formulas may
/// name others that are defined later, so a failure does not stop the save.
fn define<R: Roller>(engine: &mut Engine<Formulas, R>, formula: Formula) -> Option<ParseError> {
    let expression = formula.expression.clone();
    engine.formulas_mut().insert(formula);
    engine.parse(&expression).err()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut engine = Engine::new(Formulas::new());
    let stdin = io::stdin();

    prompt()?;
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line == ":list" {
            let mut formulas: Vec<_> = engine.formulas().iter().collect();
            formulas.sort_by(|a, b| a.name.cmp(&b.name));
            for formula in formulas {
                println!("[{}] = {}", formula.name, formula.expression);
            }
        } else if let Some(formula) = definition(line) {
            let name = formula.name.clone();
            match define(&mut engine, formula) {
                Some(why) => eprintln!("Warning: [{}] saved, but {}", name, why),
                None => println!("[{}] saved", name),
            }
        } else if !line.is_empty() {
            match engine.evaluate(line) {
                Ok(total) => println!("{}", total),
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        prompt()?;
    }
    Ok(())
}
