// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use itertools::Itertools;
use pest_derive::Parser;
use pest::{Parser, Span, error::{Error, ErrorVariant}, iterators::Pair};

use crate::ast::*;

#[derive(Parser)]
#[grammar = "expr.pest"]
pub struct ExprParser;

type ParseResult<T> = Result<T, Error<Rule>>;

fn err<T>(span: Span, msg: impl Into<String>) -> ParseResult<T> {
    Err(Error::new_from_span(ErrorVariant::CustomError { message: msg.into() }, span))
}

fn make_par_ref(pair: Pair<Rule>) -> ParseResult<ParId> {
    let (num,) = pair.into_inner().collect_tuple().expect("one child");
    let span = num.as_span();
    match num.as_str().parse() {
        Ok(n) => Ok(ParId::Numeric(n)),
        Err(_) => err(span, "parameter number out of range"),
    }
}

fn make_call(pair: Pair<Rule>) -> ParseResult<Expr> {
    let span = pair.as_span();
    let mut pairs = pair.into_inner();
    let name = pairs.next().expect("function name");
    let func = match name.as_str() {
        x if x.eq_ignore_ascii_case("SIN")   => Func::Sin,
        x if x.eq_ignore_ascii_case("COS")   => Func::Cos,
        x if x.eq_ignore_ascii_case("TAN")   => Func::Tan,
        x if x.eq_ignore_ascii_case("ATAN")  => Func::Atan,
        x if x.eq_ignore_ascii_case("ATAN2") => Func::Atan2,
        x if x.eq_ignore_ascii_case("SQRT")  => Func::Sqrt,
        x if x.eq_ignore_ascii_case("ABS")   => Func::Abs,
        x if x.eq_ignore_ascii_case("ROUND") => Func::Round,
        x if x.eq_ignore_ascii_case("CEIL")  => Func::Ceil,
        _                                    => Func::Floor,
    };
    let args = pairs.map(make_expr).collect::<ParseResult<Vec<_>>>()?;
    let arity = if func == Func::Atan2 { 2 } else { 1 };
    if args.len() != arity {
        return err(span, format!("{} expects {} argument(s)", func, arity));
    }
    Ok(Expr::Call(func, args))
}

fn make_expr(expr_pair: Pair<Rule>) -> ParseResult<Expr> {
    let mut lhs = None;
    let mut op = None;
    let mut sign = None;
    for pair in expr_pair.into_inner() {
        match pair.as_rule() {
            // singletons inside "expr_atom"
            Rule::expr => return make_expr(pair),
            Rule::num => return Ok(Expr::Num(pair.as_str().parse().expect("valid parse"))),
            Rule::constant => return Ok(Expr::Const(match pair.as_str() {
                x if x.eq_ignore_ascii_case("PI") => Constant::Pi,
                _ => Constant::E,
            })),
            Rule::par_ref => return Ok(Expr::Par(make_par_ref(pair)?)),
            Rule::expr_call => return make_call(pair),
            // rules inside (left-associative) binops
            Rule::expr_add |
            Rule::expr_mul |
            Rule::expr_un |
            Rule::expr_atom => {
                let mut sub = make_expr(pair)?;
                if let Some(un) = sign.take() {
                    sub = Expr::UnOp(un, Box::new(sub));
                }
                if let Some(op) = op.take() {
                    let lhs_expr = lhs.take().expect("LHS expected before op");
                    lhs = Some(Expr::BinOp(op, Box::new(lhs_expr), Box::new(sub)));
                } else {
                    lhs = Some(sub);
                }
            }
            // operators inside binops
            Rule::op_mul => op = Some(match pair.as_str() {
                "*" => Op::Mul, _ => Op::Div,
            }),
            Rule::op_add => op = Some(match pair.as_str() {
                "+" => Op::Add, _ => Op::Sub,
            }),
            Rule::op_sign => sign = Some(match pair.as_str() {
                "+" => UnOp::Plus, _ => UnOp::Minus,
            }),
            _ => unreachable!()
        }
    }
    Ok(lhs.expect("no children in expr?"))
}

/// Parse a single R-parameter value expression into its AST.
pub fn parse_expr(input: &str) -> ParseResult<Expr> {
    let mut pairs = ExprParser::parse(Rule::input, input)?;
    make_expr(pairs.next().expect("expr pair"))
}
