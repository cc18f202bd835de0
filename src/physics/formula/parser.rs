//! Recursive-descent parser for force formulas
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! expression := term (('+' | '-') term)*
//! term       := unary (('*' | '/' | '%') unary)*
//! unary      := ('+' | '-') unary | power
//! power      := primary ('^' unary)?
//! primary    := number | identifier | identifier '(' arguments ')' | '(' expression ')'
//! ```
//!
//! `^` is right-associative and binds tighter than unary minus, so `-r^2` is `-(r^2)`.
//! An operand directly following another (`2G`, `4 r`, `2(r + 1)`) multiplies it,
//! with the same precedence as `*`.
//!
//! Every recursive path passes through `unary`, which is capped at [`MAX_NESTING`]
//! levels. The token count is capped at [`MAX_TOKENS`], which also bounds how deep
//! long operator chains make the tree.

use super::FormulaError;
use super::Variable;
use super::ast::{BinaryOp, Expr, Function};
use super::lexer::{Token, TokenKind};

/// Deepest nesting of parentheses, signs and exponents accepted
pub const MAX_NESTING: usize = 256;

/// Longest formula accepted, in tokens
pub const MAX_TOKENS: usize = 4096;

pub(super) fn parse(tokens: &[Token]) -> Result<Expr, FormulaError> {
    if tokens.len() > MAX_TOKENS {
        return Err(FormulaError::TooLong {
            tokens: tokens.len(),
            limit: MAX_TOKENS,
        });
    }

    let mut parser = Parser {
        tokens,
        cursor: 0,
        depth: 0,
    };
    let expr = parser.expression()?;
    match parser.peek() {
        None => Ok(expr),
        Some(token) => Err(FormulaError::UnexpectedToken {
            found: token.kind.describe(),
            position: token.position,
        }),
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    cursor: usize,
    depth: usize,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> Option<&'a Token> {
        self.tokens.get(self.cursor)
    }

    fn advance(&mut self) -> Option<&'a Token> {
        let token = self.tokens.get(self.cursor);
        if token.is_some() {
            self.cursor += 1;
        }
        token
    }

    fn next_is(&self, kind: &TokenKind) -> bool {
        self.peek().is_some_and(|token| &token.kind == kind)
    }

    fn expect(&mut self, kind: TokenKind) -> Result<(), FormulaError> {
        match self.advance() {
            Some(token) if token.kind == kind => Ok(()),
            Some(token) => Err(FormulaError::UnexpectedToken {
                found: token.kind.describe(),
                position: token.position,
            }),
            None => Err(FormulaError::UnexpectedEnd),
        }
    }

    fn expression(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.term()?;
        loop {
            let op = match self.peek().map(|token| &token.kind) {
                Some(TokenKind::Plus) => BinaryOp::Add,
                Some(TokenKind::Minus) => BinaryOp::Subtract,
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.term()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn term(&mut self) -> Result<Expr, FormulaError> {
        let mut lhs = self.unary()?;
        loop {
            let op = match self.peek().map(|token| &token.kind) {
                Some(TokenKind::Star) => BinaryOp::Multiply,
                Some(TokenKind::Slash) => BinaryOp::Divide,
                Some(TokenKind::Percent) => BinaryOp::Remainder,
                Some(TokenKind::Number(_) | TokenKind::Identifier(_) | TokenKind::LeftParen) => {
                    let rhs = self.unary()?;
                    lhs = binary(BinaryOp::Multiply, lhs, rhs);
                    continue;
                }
                _ => return Ok(lhs),
            };
            self.advance();
            let rhs = self.unary()?;
            lhs = binary(op, lhs, rhs);
        }
    }

    fn unary(&mut self) -> Result<Expr, FormulaError> {
        if self.depth >= MAX_NESTING {
            return Err(FormulaError::TooDeep {
                position: self.peek().map_or(0, |token| token.position),
                limit: MAX_NESTING,
            });
        }
        self.depth += 1;
        let result = self.signed();
        self.depth -= 1;
        result
    }

    fn signed(&mut self) -> Result<Expr, FormulaError> {
        match self.peek().map(|token| &token.kind) {
            Some(TokenKind::Minus) => {
                self.advance();
                Ok(Expr::Negate(Box::new(self.unary()?)))
            }
            Some(TokenKind::Plus) => {
                self.advance();
                self.unary()
            }
            _ => self.power(),
        }
    }

    fn power(&mut self) -> Result<Expr, FormulaError> {
        let base = self.primary()?;
        if self.next_is(&TokenKind::Caret) {
            self.advance();
            let exponent = self.unary()?;
            return Ok(binary(BinaryOp::Power, base, exponent));
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Expr, FormulaError> {
        let token = self.advance().ok_or(FormulaError::UnexpectedEnd)?;
        match &token.kind {
            TokenKind::Number(value) => Ok(Expr::Number(*value)),
            TokenKind::LeftParen => {
                let inner = self.expression()?;
                self.expect(TokenKind::RightParen)?;
                Ok(inner)
            }
            TokenKind::Identifier(name) if self.next_is(&TokenKind::LeftParen) => {
                self.call(name, token.position)
            }
            TokenKind::Identifier(name) => identifier(name, token.position),
            other => Err(FormulaError::UnexpectedToken {
                found: other.describe(),
                position: token.position,
            }),
        }
    }

    fn call(&mut self, name: &str, position: usize) -> Result<Expr, FormulaError> {
        let function = Function::from_name(name).ok_or_else(|| FormulaError::UnknownFunction {
            name: name.to_string(),
            position,
        })?;

        self.expect(TokenKind::LeftParen)?;
        let mut args = Vec::new();
        if !self.next_is(&TokenKind::RightParen) {
            args.push(self.expression()?);
            while self.next_is(&TokenKind::Comma) {
                self.advance();
                args.push(self.expression()?);
            }
        }
        self.expect(TokenKind::RightParen)?;

        if args.len() != function.arity() {
            return Err(FormulaError::WrongArity {
                function: name.to_string(),
                expected: function.arity(),
                found: args.len(),
            });
        }

        Ok(Expr::Call { function, args })
    }
}

fn binary(op: BinaryOp, lhs: Expr, rhs: Expr) -> Expr {
    Expr::Binary {
        op,
        lhs: Box::new(lhs),
        rhs: Box::new(rhs),
    }
}

fn identifier(name: &str, position: usize) -> Result<Expr, FormulaError> {
    match name {
        "pi" => Ok(Expr::Number(std::f64::consts::PI)),
        "e" => Ok(Expr::Number(std::f64::consts::E)),
        _ => Variable::from_name(name)
            .map(Expr::Variable)
            .ok_or_else(|| FormulaError::UnknownVariable {
                name: name.to_string(),
                position,
            }),
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn parse_str(source: &str) -> Result<Expr, FormulaError> {
        parse(&tokenize(source)?)
    }

    #[test]
    fn test_precedence() {
        // 1 + 2 * 3 parses as 1 + (2 * 3)
        let expr = parse_str("1 + 2 * 3").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOp::Add,
                Expr::Number(1.0),
                binary(BinaryOp::Multiply, Expr::Number(2.0), Expr::Number(3.0))
            )
        );
    }

    #[test]
    fn test_power_is_right_associative() {
        let expr = parse_str("2 ^ 3 ^ 2").unwrap();
        assert_eq!(
            expr,
            binary(
                BinaryOp::Power,
                Expr::Number(2.0),
                binary(BinaryOp::Power, Expr::Number(3.0), Expr::Number(2.0))
            )
        );
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        let expr = parse_str("-r^2").unwrap();
        assert_eq!(
            expr,
            Expr::Negate(Box::new(binary(
                BinaryOp::Power,
                Expr::Variable(Variable::Distance),
                Expr::Number(2.0)
            )))
        );
    }

    #[test]
    fn test_function_call() {
        let expr = parse_str("pow(r, 2)").unwrap();
        assert_eq!(
            expr,
            Expr::Call {
                function: Function::Pow,
                args: vec![Expr::Variable(Variable::Distance), Expr::Number(2.0)],
            }
        );
    }

    #[test]
    fn test_unknown_variable() {
        assert_eq!(
            parse_str("G * x"),
            Err(FormulaError::UnknownVariable {
                name: "x".into(),
                position: 4
            })
        );
    }

    #[test]
    fn test_unknown_function() {
        assert_eq!(
            parse_str("gamma(r)"),
            Err(FormulaError::UnknownFunction {
                name: "gamma".into(),
                position: 0
            })
        );
    }

    #[test]
    fn test_wrong_arity() {
        assert_eq!(
            parse_str("pow(r)"),
            Err(FormulaError::WrongArity {
                function: "pow".into(),
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            parse_str("sqrt()"),
            Err(FormulaError::WrongArity {
                function: "sqrt".into(),
                expected: 1,
                found: 0
            })
        );
    }

    #[test]
    fn test_dangling_operator() {
        assert_eq!(parse_str("G * m1 *"), Err(FormulaError::UnexpectedEnd));
    }

    #[test]
    fn test_unbalanced_parentheses() {
        assert_eq!(parse_str("(r * r"), Err(FormulaError::UnexpectedEnd));
        assert_eq!(
            parse_str("r * r)"),
            Err(FormulaError::UnexpectedToken {
                found: ")".into(),
                position: 5
            })
        );
    }

    #[test]
    fn test_implicit_multiplication() {
        let two_r = binary(
            BinaryOp::Multiply,
            Expr::Number(2.0),
            Expr::Variable(Variable::Distance),
        );
        assert_eq!(parse_str("2 r"), Ok(two_r.clone()));
        assert_eq!(parse_str("2r"), Ok(two_r));

        // Same precedence as `*`, so the exponent still binds first
        assert_eq!(
            parse_str("4r^2"),
            Ok(binary(
                BinaryOp::Multiply,
                Expr::Number(4.0),
                binary(
                    BinaryOp::Power,
                    Expr::Variable(Variable::Distance),
                    Expr::Number(2.0)
                )
            ))
        );

        // A following sign is still subtraction
        assert_eq!(
            parse_str("2 -r"),
            Ok(binary(
                BinaryOp::Subtract,
                Expr::Number(2.0),
                Expr::Variable(Variable::Distance)
            ))
        );
    }

    #[test]
    fn test_nesting_limit() {
        let within = MAX_NESTING - 1;
        let source = format!("{}r{}", "(".repeat(within), ")".repeat(within));
        assert_eq!(parse_str(&source), Ok(Expr::Variable(Variable::Distance)));

        let depth = 1_000;
        for source in [
            format!("{}r{}", "(".repeat(depth), ")".repeat(depth)),
            format!("{}r", "-".repeat(depth)),
            vec!["2"; depth].join("^"),
            format!("{}r{}", "sqrt(".repeat(depth), ")".repeat(depth)),
        ] {
            assert!(
                matches!(
                    parse_str(&source),
                    Err(FormulaError::TooDeep {
                        limit: MAX_NESTING,
                        ..
                    })
                ),
                "{} accepted",
                &source[..16]
            );
        }
    }

    #[test]
    fn test_very_deep_nesting_is_rejected() {
        let depth = 10_000;
        let source = format!("{}r{}", "(".repeat(depth), ")".repeat(depth));
        assert!(matches!(
            parse_str(&source),
            Err(FormulaError::TooLong { .. })
        ));
    }

    #[test]
    fn test_token_limit() {
        let source = vec!["r"; MAX_TOKENS].join("+");
        assert_eq!(
            parse_str(&source),
            Err(FormulaError::TooLong {
                tokens: 2 * MAX_TOKENS - 1,
                limit: MAX_TOKENS
            })
        );

        let source = vec!["r"; MAX_TOKENS / 2].join("+");
        assert!(parse_str(&source).is_ok());
    }
}
