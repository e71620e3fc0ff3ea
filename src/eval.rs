// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;

use crate::ast::*;
use crate::{parse, scan};

/// Why a value text could not be reduced to a number.
///
/// `UnknownParameter` is the ordinary "retry later" signal during
/// resolution; the other variants describe inputs that will never
/// evaluate.
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    NotArithmetic,
    UnknownParameter(ParId),
    Malformed(String),
    DivisionByZero,
    NonFinite,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EvalError::NotArithmetic =>
                write!(f, "Not an arithmetic expression"),
            EvalError::UnknownParameter(id) =>
                write!(f, "The parameter {} has no known value here", id),
            EvalError::Malformed(msg) =>
                write!(f, "{}", msg),
            EvalError::DivisionByZero =>
                write!(f, "Division by zero attempted"),
            EvalError::NonFinite =>
                write!(f, "The result is not a finite number"),
        }
    }
}

/// Evaluate an R-parameter value expression to a number.
///
/// `lookup` supplies numeric values for referenced parameters; `None`
/// fails the evaluation with `UnknownParameter`.  Trigonometric functions
/// take and return degrees, as the control does.  Non-finite results are
/// rejected, so a returned number is always storable.
pub fn evaluate(text: &str, lookup: impl Fn(&ParId) -> Option<f64>) -> Result<f64, EvalError> {
    let text = text.trim();
    if scan::is_flow_text(text) {
        return Err(EvalError::NotArithmetic);
    }
    let expr = parse::parse_expr(text).map_err(|e| EvalError::Malformed(e.to_string()))?;
    let value = eval_expr(&expr, &lookup)?;
    if !value.is_finite() {
        return Err(EvalError::NonFinite);
    }
    Ok(value)
}

fn eval_expr<F>(expr: &Expr, lookup: &F) -> Result<f64, EvalError>
    where F: Fn(&ParId) -> Option<f64>
{
    Ok(match expr {
        Expr::Num(n) => *n,
        Expr::Const(Constant::Pi) => std::f64::consts::PI,
        Expr::Const(Constant::E) => std::f64::consts::E,
        Expr::Par(id) => match lookup(id) {
            Some(v) => v,
            None => return Err(EvalError::UnknownParameter(id.clone())),
        },
        Expr::UnOp(op, arg) => {
            let v = eval_expr(arg, lookup)?;
            match op {
                UnOp::Plus => v,
                UnOp::Minus => -v,
            }
        }
        Expr::BinOp(op, lhs, rhs) => {
            let lhs = eval_expr(lhs, lookup)?;
            let rhs = eval_expr(rhs, lookup)?;
            match op {
                Op::Mul => lhs * rhs,
                Op::Div => if rhs == 0. {
                    return Err(EvalError::DivisionByZero);
                } else {
                    lhs / rhs
                },
                Op::Add => lhs + rhs,
                Op::Sub => lhs - rhs,
            }
        }
        Expr::Call(func, args) => {
            // Invariant: arity is checked at parse time.
            let x = eval_expr(&args[0], lookup)?;
            match func {
                Func::Sin => x.to_radians().sin(),
                Func::Cos => x.to_radians().cos(),
                Func::Tan => x.to_radians().tan(),
                Func::Atan => x.atan().to_degrees(),
                Func::Atan2 => x.atan2(eval_expr(&args[1], lookup)?).to_degrees(),
                Func::Sqrt => x.sqrt(),
                Func::Abs => x.abs(),
                Func::Round => x.round(),
                Func::Ceil => x.ceil(),
                Func::Floor => x.floor(),
            }
        }
    })
}
