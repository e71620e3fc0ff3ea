// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Display, Formatter};

/// Identifier of an R-parameter.
///
/// Programs only ever produce numeric ids (`R12`), but named global
/// parameters can enter a store through the library API.  Numeric ids
/// order before named ones.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ParId {
    Numeric(u32),
    Named(String),
}

#[derive(Debug, Clone)]
pub enum Expr {
    Num(f64),
    Const(Constant),
    Par(ParId),
    Call(Func, Vec<Expr>),
    UnOp(UnOp, Box<Expr>),
    BinOp(Op, Box<Expr>, Box<Expr>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Mul,
    Div,
    Add,
    Sub,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnOp {
    Plus,
    Minus,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Atan,
    Atan2,
    Sqrt,
    Abs,
    Round,
    Ceil,
    Floor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constant {
    Pi,
    E,
}

impl Display for ParId {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ParId::Numeric(n) => write!(f, "R{}", n),
            ParId::Named(n) => write!(f, "{}", n),
        }
    }
}

impl Display for Expr {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Const(c) => write!(f, "{}", c),
            Expr::Par(id) => write!(f, "{}", id),
            Expr::Call(func, args) => if args.len() == 2 {
                write!(f, "{}({}, {})", func, args[0], args[1])
            } else {
                write!(f, "{}({})", func, args[0])
            },
            Expr::UnOp(op, arg) => {
                match **arg {
                    Expr::BinOp(..) => write!(f, "{}({})", op, arg),
                    _ => write!(f, "{}{}", op, arg),
                }
            }
            Expr::BinOp(op, lhs, rhs) => {
                match **lhs {
                    Expr::BinOp(..) => write!(f, "({}) {} ", lhs, op)?,
                    _ => write!(f, "{} {} ", lhs, op)?,
                }
                match **rhs {
                    Expr::BinOp(..) => write!(f, "({})", rhs),
                    _ => write!(f, "{}", rhs),
                }
            }
        }
    }
}

impl Display for Op {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Op::Mul => "*",
            Op::Div => "/",
            Op::Add => "+",
            Op::Sub => "-",
        })
    }
}

impl Display for UnOp {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            UnOp::Plus => "+",
            UnOp::Minus => "-",
        })
    }
}

impl Display for Func {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Func::Sin => "SIN",
            Func::Cos => "COS",
            Func::Tan => "TAN",
            Func::Atan => "ATAN",
            Func::Atan2 => "ATAN2",
            Func::Sqrt => "SQRT",
            Func::Abs => "ABS",
            Func::Round => "ROUND",
            Func::Ceil => "CEIL",
            Func::Floor => "FLOOR",
        })
    }
}

impl Display for Constant {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", match self {
            Constant::Pi => "PI",
            Constant::E => "E",
        })
    }
}
