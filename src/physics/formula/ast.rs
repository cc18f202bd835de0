//! Expression tree and its evaluation

use super::{Bindings, EvaluationFault, Variable};
use crate::physics::math::Scalar;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum Expr {
    Number(Scalar),
    Variable(Variable),
    Negate(Box<Expr>),
    Binary {
        op: BinaryOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        function: Function,
        args: Vec<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum BinaryOp {
    Add,
    Subtract,
    Multiply,
    Divide,
    Remainder,
    Power,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Function {
    Abs,
    Sqrt,
    Cbrt,
    Exp,
    Ln,
    Log10,
    Log2,
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Floor,
    Ceil,
    Signum,
    Pow,
    Min,
    Max,
}

impl Function {
    pub(super) fn from_name(name: &str) -> Option<Self> {
        let function = match name {
            "abs" => Function::Abs,
            "sqrt" => Function::Sqrt,
            "cbrt" => Function::Cbrt,
            "exp" => Function::Exp,
            "ln" | "log" => Function::Ln,
            "log10" => Function::Log10,
            "log2" => Function::Log2,
            "sin" => Function::Sin,
            "cos" => Function::Cos,
            "tan" => Function::Tan,
            "asin" => Function::Asin,
            "acos" => Function::Acos,
            "atan" => Function::Atan,
            "sinh" => Function::Sinh,
            "cosh" => Function::Cosh,
            "tanh" => Function::Tanh,
            "floor" => Function::Floor,
            "ceil" => Function::Ceil,
            "signum" => Function::Signum,
            "pow" => Function::Pow,
            "min" => Function::Min,
            "max" => Function::Max,
            _ => return None,
        };
        Some(function)
    }

    pub(super) fn arity(self) -> usize {
        match self {
            Function::Pow | Function::Min | Function::Max => 2,
            _ => 1,
        }
    }

    /// `args.len()` has already been checked against [`Function::arity`] by the parser.
    fn apply(self, args: &[Scalar]) -> Scalar {
        let x = args[0];
        match self {
            Function::Abs => x.abs(),
            Function::Sqrt => x.sqrt(),
            Function::Cbrt => x.cbrt(),
            Function::Exp => x.exp(),
            Function::Ln => x.ln(),
            Function::Log10 => x.log10(),
            Function::Log2 => x.log2(),
            Function::Sin => x.sin(),
            Function::Cos => x.cos(),
            Function::Tan => x.tan(),
            Function::Asin => x.asin(),
            Function::Acos => x.acos(),
            Function::Atan => x.atan(),
            Function::Sinh => x.sinh(),
            Function::Cosh => x.cosh(),
            Function::Tanh => x.tanh(),
            Function::Floor => x.floor(),
            Function::Ceil => x.ceil(),
            Function::Signum => {
                if x == 0.0 {
                    0.0
                } else {
                    x.signum()
                }
            }
            Function::Pow => x.powf(args[1]),
            Function::Min => x.min(args[1]),
            Function::Max => x.max(args[1]),
        }
    }
}

impl Expr {
    pub(super) fn evaluate(&self, bindings: &Bindings) -> Result<Scalar, EvaluationFault> {
        match self {
            Expr::Number(value) => Ok(*value),
            Expr::Variable(variable) => Ok(bindings.value_of(*variable)),
            Expr::Negate(inner) => Ok(-inner.evaluate(bindings)?),
            Expr::Binary { op, lhs, rhs } => {
                let lhs = lhs.evaluate(bindings)?;
                let rhs = rhs.evaluate(bindings)?;
                match op {
                    BinaryOp::Add => Ok(lhs + rhs),
                    BinaryOp::Subtract => Ok(lhs - rhs),
                    BinaryOp::Multiply => Ok(lhs * rhs),
                    BinaryOp::Divide if rhs == 0.0 => Err(EvaluationFault::DivisionByZero),
                    BinaryOp::Divide => Ok(lhs / rhs),
                    BinaryOp::Remainder if rhs == 0.0 => Err(EvaluationFault::DivisionByZero),
                    BinaryOp::Remainder => Ok(lhs % rhs),
                    BinaryOp::Power => Ok(lhs.powf(rhs)),
                }
            }
            Expr::Call { function, args } => {
                let values = args
                    .iter()
                    .map(|arg| arg.evaluate(bindings))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(function.apply(&values))
            }
        }
    }
}
