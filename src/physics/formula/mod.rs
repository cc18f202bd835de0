//! User-supplied force formulas
//!
//! A formula is a small arithmetic expression over four bound variables:
//!
//! | Variable | Aliases              | Bound to                              |
//! |----------|----------------------|---------------------------------------|
//! | `G`      |                      | gravitational constant                |
//! | `m1`     | `M`, `centralMass`   | mass of the central body (kg)         |
//! | `m2`     | `m`, `mass`          | mass of the orbiting body (kg)        |
//! | `r`      | `distance`           | separation from the center (m)        |
//!
//! The constants `pi` and `e`, the operators `+ - * / % ^`, parentheses and the
//! functions `abs sqrt cbrt exp ln log log10 log2 sin cos tan asin acos atan sinh
//! cosh tanh floor ceil signum pow min max` are also available. Writing two
//! operands next to each other multiplies them, so `4 G m1 m2 / r^2` works.
//!
//! Formulas are limited to [`MAX_NESTING`] levels of nesting and [`MAX_TOKENS`]
//! tokens, which keeps parsing and evaluation off the end of the stack.
//!
//! Parsing happens once, when a formula is configured. Problems found then are
//! [`FormulaError`]s. Problems that only show up when the formula is evaluated
//! (division by zero, a non-finite result) are [`EvaluationFault`]s.

mod ast;
mod lexer;
mod parser;

pub use parser::{MAX_NESTING, MAX_TOKENS};

use crate::physics::math::Scalar;
use std::fmt;
use std::str::FromStr;

/// A formula variable, after alias resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variable {
    GravitationalConstant,
    CentralMass,
    BodyMass,
    Distance,
}

impl Variable {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "G" => Some(Variable::GravitationalConstant),
            "m1" | "M" | "centralMass" => Some(Variable::CentralMass),
            "m2" | "m" | "mass" => Some(Variable::BodyMass),
            "r" | "distance" => Some(Variable::Distance),
            _ => None,
        }
    }

    /// Canonical binding name
    pub fn name(self) -> &'static str {
        match self {
            Variable::GravitationalConstant => "G",
            Variable::CentralMass => "m1",
            Variable::BodyMass => "m2",
            Variable::Distance => "r",
        }
    }
}

/// Values bound to the formula variables for one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bindings {
    pub g: Scalar,
    pub m1: Scalar,
    pub m2: Scalar,
    pub r: Scalar,
}

impl Bindings {
    fn value_of(&self, variable: Variable) -> Scalar {
        match variable {
            Variable::GravitationalConstant => self.g,
            Variable::CentralMass => self.m1,
            Variable::BodyMass => self.m2,
            Variable::Distance => self.r,
        }
    }
}

/// Reasons a formula is rejected when it is configured
#[derive(Debug, Clone, PartialEq)]
pub enum FormulaError {
    /// The formula text is empty or only whitespace
    Empty,
    UnexpectedCharacter {
        character: char,
        position: usize,
    },
    MalformedNumber {
        text: String,
        position: usize,
    },
    UnexpectedToken {
        found: String,
        position: usize,
    },
    /// The formula ends where an operand or closing parenthesis was expected
    UnexpectedEnd,
    UnknownVariable {
        name: String,
        position: usize,
    },
    UnknownFunction {
        name: String,
        position: usize,
    },
    WrongArity {
        function: String,
        expected: usize,
        found: usize,
    },
    /// Parentheses, signs or exponents nest deeper than the parser allows
    TooDeep {
        position: usize,
        limit: usize,
    },
    TooLong {
        tokens: usize,
        limit: usize,
    },
}

impl fmt::Display for FormulaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormulaError::Empty => write!(f, "formula is empty"),
            FormulaError::UnexpectedCharacter {
                character,
                position,
            } => write!(f, "unexpected character '{character}' at {position}"),
            FormulaError::MalformedNumber { text, position } => {
                write!(f, "malformed number '{text}' at {position}")
            }
            FormulaError::UnexpectedToken { found, position } => {
                write!(f, "unexpected '{found}' at {position}")
            }
            FormulaError::UnexpectedEnd => write!(f, "formula ends unexpectedly"),
            FormulaError::UnknownVariable { name, position } => write!(
                f,
                "unknown variable '{name}' at {position} (use G, m1, m2, r)"
            ),
            FormulaError::UnknownFunction { name, position } => {
                write!(f, "unknown function '{name}' at {position}")
            }
            FormulaError::WrongArity {
                function,
                expected,
                found,
            } => write!(
                f,
                "function '{function}' takes {expected} argument(s), got {found}"
            ),
            FormulaError::TooDeep { position, limit } => {
                write!(f, "formula nests deeper than {limit} levels at {position}")
            }
            FormulaError::TooLong { tokens, limit } => {
                write!(f, "formula has {tokens} tokens, at most {limit} are allowed")
            }
        }
    }
}

impl std::error::Error for FormulaError {}

/// Reasons a parsed formula fails to produce a usable value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvaluationFault {
    DivisionByZero,
    NonFinite,
}

impl fmt::Display for EvaluationFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationFault::DivisionByZero => write!(f, "division by zero"),
            EvaluationFault::NonFinite => write!(f, "result is not a finite number"),
        }
    }
}

impl std::error::Error for EvaluationFault {}

/// A parsed formula together with the text it came from
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    root: ast::Expr,
}

impl Formula {
    pub fn parse(source: &str) -> Result<Self, FormulaError> {
        let trimmed = source.trim();
        if trimmed.is_empty() {
            return Err(FormulaError::Empty);
        }

        let tokens = lexer::tokenize(trimmed)?;
        let root = parser::parse(&tokens)?;

        Ok(Self {
            source: trimmed.to_string(),
            root,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn evaluate(&self, bindings: &Bindings) -> Result<Scalar, EvaluationFault> {
        let value = self.root.evaluate(bindings)?;
        if value.is_finite() {
            Ok(value)
        } else {
            Err(EvaluationFault::NonFinite)
        }
    }
}

impl FromStr for Formula {
    type Err = FormulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Formula::parse(s)
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARTH: Bindings = Bindings {
        g: 6.674_30e-11,
        m1: 1.989e30,
        m2: 5.972e24,
        r: 1.496e11,
    };

    fn newton(b: &Bindings) -> Scalar {
        b.g * b.m1 * b.m2 / (b.r * b.r)
    }

    #[test]
    fn test_equivalent_spellings_of_newton() {
        let expected = newton(&EARTH);
        for source in [
            "G * m1 * m2 / (r * r)",
            "G * m1 * m2 / pow(r, 2)",
            "G*M*m/r^2",
            "G * centralMass * mass / distance^2",
        ] {
            let formula = Formula::parse(source).unwrap();
            let value = formula.evaluate(&EARTH).unwrap();
            assert!(
                ((value - expected) / expected).abs() < 1e-12,
                "{source} evaluated to {value}, expected {expected}"
            );
        }
    }

    #[test]
    fn test_source_is_trimmed() {
        let formula: Formula = "  G * m1 / r  ".parse().unwrap();
        assert_eq!(formula.source(), "G * m1 / r");
        assert_eq!(formula.to_string(), "G * m1 / r");
    }

    #[test]
    fn test_empty_rejected() {
        assert_eq!(Formula::parse(""), Err(FormulaError::Empty));
        assert_eq!(Formula::parse("   \n"), Err(FormulaError::Empty));
    }

    #[test]
    fn test_constant_formula() {
        let formula = Formula::parse("0").unwrap();
        assert_eq!(formula.evaluate(&EARTH), Ok(0.0));
    }

    #[test]
    fn test_runtime_division_by_zero() {
        let formula = Formula::parse("G * m1 * m2 / (r - r)").unwrap();
        assert_eq!(
            formula.evaluate(&EARTH),
            Err(EvaluationFault::DivisionByZero)
        );
    }

    #[test]
    fn test_non_finite_result() {
        let formula = Formula::parse("sqrt(-r)").unwrap();
        assert_eq!(formula.evaluate(&EARTH), Err(EvaluationFault::NonFinite));

        let formula = Formula::parse("exp(r)").unwrap();
        assert_eq!(formula.evaluate(&EARTH), Err(EvaluationFault::NonFinite));
    }

    #[test]
    fn test_constants() {
        let formula = Formula::parse("pi * e").unwrap();
        let value = formula.evaluate(&EARTH).unwrap();
        assert!((value - std::f64::consts::PI * std::f64::consts::E).abs() < 1e-12);
    }

    #[test]
    fn test_error_messages() {
        let err = Formula::parse("G * x").unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown variable 'x' at 4 (use G, m1, m2, r)"
        );
        assert_eq!(FormulaError::Empty.to_string(), "formula is empty");
    }

    #[test]
    fn test_variable_names() {
        assert_eq!(Variable::from_name("centralMass"), Some(Variable::CentralMass));
        assert_eq!(Variable::from_name("g"), None);
        assert_eq!(Variable::Distance.name(), "r");
    }
}
