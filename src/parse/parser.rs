use super::{error::ParseError, lexer::TokenKind, nest::FormulaNest, scanner::Scanner, PResult};
use crate::common::*;
use crate::formula::FormulaStore;
use crate::limits::Limits;
use crate::roll::{Dice, Group, Literal, Postfix, Token};
use log::{debug, trace};
use num_traits::ToPrimitive;

/// Converts infix expressions into postfix token trees, expanding formula
/// references from `formulas` as it goes.
pub(crate) struct Parser<'a, S: ?Sized> {
    formulas: &'a S,
    limits: Limits,
    nest: FormulaNest,
    /// Group and formula bodies currently being parsed.
    depth: usize,
}

/// State of a single infix-to-postfix pass.
struct Conversion<'s> {
    scanner: Scanner<'s>,
    output: Vec<Token>,
    operators: Vec<BinaryOperator>,
    last_was_value: bool,
}

impl<'s> Conversion<'s> {
    fn new(input: &'s str) -> Self {
        Self {
            scanner: Scanner::new(input),
            output: Vec::new(),
            operators: Vec::new(),
            last_was_value: false,
        }
    }

    /// Takes the value emitted just before the current lexeme as a dice count or
    /// group multiplier. Defaults to 1 when the previous lexeme was not a value.
    fn take_multiplier(&mut self) -> Postfix {
        match self.last_was_value.then(|| self.output.pop()).flatten() {
            Some(token) => Postfix::single(token),
            None => Postfix::literal(1),
        }
    }

    fn push_operator(&mut self, op: BinaryOperator) {
        while let Some(&top) = self.operators.last() {
            if top.precedence() < op.precedence() {
                break;
            }
            self.operators.pop();
            self.output.push(top.into());
        }
        self.operators.push(op);
    }

    /// Handles an operator that was just consumed. Returns whether it produced a value,
    /// which is the case for a unary minus.
    fn parse_operator(&mut self, op: BinaryOperator) -> PResult<bool> {
        if self.last_was_value {
            self.push_operator(op);
            return Ok(false);
        }
        if op != BinaryOperator::Sub || !self.scanner.has_next() {
            return Err(ParseError::MisplacedOperator(op));
        }

        // A negative literal, or -1 as the count/multiplier of what follows.
        match self.scanner.peek() {
            Some(TokenKind::Integer) => {
                let x = self.scanner.read_int()?;
                self.output.push(Literal::new(-x).into());
            }
            Some(kind) if TokenKind::NEGATABLE.contains(&kind) => {
                self.output.push(Literal::new(-1).into());
            }
            _ => return Err(ParseError::MisplacedOperator(op)),
        }
        Ok(true)
    }

    fn finish(mut self) -> PResult<Postfix> {
        if !self.last_was_value {
            if let Some(&op) = self.operators.last() {
                return Err(ParseError::MisplacedOperator(op));
            }
        }
        while let Some(op) = self.operators.pop() {
            self.output.push(op.into());
        }
        NonEmpty::try_from_vec(self.output)
            .map(Postfix::new)
            .map_err(|_| ParseError::Empty)
    }
}

impl<'a, S: FormulaStore + ?Sized> Parser<'a, S> {
    pub fn new(formulas: &'a S, limits: Limits) -> Self {
        Self {
            formulas,
            limits,
            nest: FormulaNest::new(),
            depth: 0,
        }
    }

    pub fn parse(mut self, input: &str) -> PResult<Postfix> {
        self.infix_to_postfix(input)
    }

    fn infix_to_postfix(&mut self, input: &str) -> PResult<Postfix> {
        let mut conv = Conversion::new(input);

        while let Some(kind) = conv.scanner.peek() {
            trace!("infix_to_postfix: next lexeme = {}", kind);
            let is_value = match (kind, kind.as_binary_op()) {
                (_, Some(op)) => {
                    conv.scanner.try_skip();
                    conv.parse_operator(op)?
                }
                (TokenKind::Integer, _) => {
                    let x = conv.scanner.read_int()?;
                    conv.output.push(Literal::new(x).into());
                    true
                }
                (TokenKind::Die, _) => {
                    let dice = self.parse_dice(&mut conv)?;
                    self.push_nested(&mut conv, dice.into())?;
                    true
                }
                (TokenKind::LeftParen, _) => {
                    self.parse_parentheses(&mut conv)?;
                    true
                }
                (TokenKind::Formula, _) => {
                    self.parse_formula(&mut conv)?;
                    true
                }
                // Matching close-parens are consumed by `extract_group`.
                (TokenKind::RightParen, _) => return Err(ParseError::MismatchedParentheses),
                (TokenKind::ErrUnclosedBracket, _) => return Err(ParseError::MismatchedBrackets),
                (_, None) => {
                    let slice = conv.scanner.peek_slice().unwrap_or_default();
                    return Err(ParseError::invalid_symbol(slice));
                }
            };
            conv.last_was_value = is_value;
        }

        let postfix = conv.finish()?;
        debug!("{:?} in postfix: {}", input, postfix);
        Ok(postfix)
    }

    /// Parses the body of a group or formula one level further down.
    fn parse_nested(&mut self, input: &str) -> PResult<Postfix> {
        if !self.limits.allows_depth(self.depth + 1) {
            return Err(ParseError::TooDeep(self.limits.max_depth));
        }
        self.depth += 1;
        let body = self.infix_to_postfix(input);
        self.depth -= 1;
        body
    }

    /// Emits a dice or group token, rejecting chains of counts and multipliers
    /// that nest too deeply.
    fn push_nested(&self, conv: &mut Conversion<'_>, token: Token) -> PResult<()> {
        if !self.limits.allows_depth(token.depth()) {
            return Err(ParseError::TooDeep(self.limits.max_depth));
        }
        conv.output.push(token);
        Ok(())
    }

    fn parse_dice(&mut self, conv: &mut Conversion<'_>) -> PResult<Dice> {
        conv.scanner.try_skip();
        let sides = conv
            .scanner
            .try_read_adjacent_int()
            .ok_or(ParseError::MissingDieType)?;
        if !self.limits.allows_sides(&sides) {
            return Err(ParseError::TooManySides(sides));
        }
        let count = conv.take_multiplier();

        let keep = match conv.scanner.peek_adjacent() {
            Some(TokenKind::Highest) => {
                conv.scanner.try_skip();
                Keep::Highest(self.parse_keep_count(conv)?)
            }
            Some(TokenKind::Lowest) => {
                conv.scanner.try_skip();
                Keep::Lowest(self.parse_keep_count(conv)?)
            }
            Some(TokenKind::Error) => {
                let first = conv.scanner.peek_slice().and_then(|s| s.chars().next());
                match first {
                    Some(c) if c.is_alphabetic() => {
                        return Err(ParseError::InvalidDieExtension(c.to_ascii_lowercase()))
                    }
                    _ => Keep::All,
                }
            }
            _ => Keep::All,
        };

        Ok(Dice::new(count, sides, keep))
    }

    fn parse_keep_count(&self, conv: &mut Conversion<'_>) -> PResult<usize> {
        let n = match conv.scanner.try_read_adjacent_int() {
            Some(n) => n,
            None => return Ok(1),
        };
        match n.to_usize() {
            Some(k) if self.limits.allows_dice(n.magnitude()) => Ok(k),
            _ => Err(ParseError::TooManyDice(n)),
        }
    }

    fn parse_parentheses(&mut self, conv: &mut Conversion<'_>) -> PResult<()> {
        let inner = conv.scanner.extract_group()?;
        let multiplier = conv.take_multiplier();
        trace!("parse_parentheses: {:?}", inner);
        let body = self.parse_nested(inner)?;
        self.push_nested(conv, Group::new(multiplier, body).into())
    }

    fn parse_formula(&mut self, conv: &mut Conversion<'_>) -> PResult<()> {
        let slice = match conv.scanner.read() {
            Some((TokenKind::Formula, slice)) => slice,
            _ => return Err(ParseError::MismatchedBrackets),
        };
        let name = &slice[1..slice.len() - 1];
        let formulas = self.formulas;
        let formula = formulas
            .formula(name)
            .ok_or_else(|| ParseError::UnknownFormula(name.to_string()))?;
        let multiplier = conv.take_multiplier();

        trace!("parse_formula: [{}] = {:?}", formula.name, formula.expression);
        self.nest.enter(&formula.name)?;
        let body = self.parse_nested(&formula.expression);
        self.nest.leave();

        self.push_nested(conv, Group::new(multiplier, body?).into())
    }
}
