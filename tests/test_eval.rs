// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use assert_matches::assert_matches;
use rpar::ast::ParId;
use rpar::eval::{evaluate, EvalError};

fn eval(text: &str) -> Result<f64, EvalError> {
    evaluate(text, |_| None)
}

fn assert_approx(actual: Result<f64, EvalError>, expected: f64) {
    let actual = actual.unwrap();
    assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
}

#[test]
fn test_arithmetic() {
    assert_approx(eval("2+3*4"), 14.);
    assert_approx(eval("(2+3)*4"), 20.);
    assert_approx(eval("10/4"), 2.5);
    assert_approx(eval("2*-3"), -6.);
    assert_approx(eval("-(2+3)"), -5.);
    assert_approx(eval("1-2-3"), -4.);
}

#[test]
fn test_functions() {
    // trigonometry is in degrees, like on the control
    assert_approx(eval("SIN(90)"), 1.);
    assert_approx(eval("SIN(30)"), 0.5);
    assert_approx(eval("COS(60)"), 0.5);
    assert_approx(eval("TAN(45)"), 1.);
    assert_approx(eval("ATAN(1)"), 45.);
    assert_approx(eval("ATAN2(1, 1)"), 45.);

    assert_approx(eval("SQRT(16)"), 4.);
    assert_approx(eval("ABS(-3.5)"), 3.5);
    assert_approx(eval("CEIL(2.1)"), 3.);
    assert_approx(eval("FLOOR(2.9)"), 2.);
    assert_approx(eval("SQRT(ABS(-16))"), 4.);
    assert_approx(eval("sqrt(16)"), 4.);
}

#[test]
fn test_round_ties() {
    // ties round away from zero
    assert_approx(eval("ROUND(2.5)"), 3.);
    assert_approx(eval("ROUND(-2.5)"), -3.);
    assert_approx(eval("ROUND(2.4)"), 2.);
}

#[test]
fn test_constants() {
    assert_approx(eval("PI"), std::f64::consts::PI);
    assert_approx(eval("E"), std::f64::consts::E);
    assert_approx(eval("2*PI"), 2. * std::f64::consts::PI);
}

#[test]
fn test_lookup() {
    let lookup = |id: &ParId| match id {
        ParId::Numeric(1) => Some(10.),
        ParId::Numeric(2) => Some(20.),
        _ => None,
    };
    assert!((evaluate("R1+R2", lookup).unwrap() - 30.).abs() < 1e-9);
    assert_eq!(evaluate("R1+R7", lookup),
               Err(EvalError::UnknownParameter(ParId::Numeric(7))));
}

#[test]
fn test_errors() {
    assert_eq!(eval("GOTOF END"), Err(EvalError::NotArithmetic));
    assert_eq!(eval("IF R1==0 GOTOF MARK"), Err(EvalError::NotArithmetic));
    assert_eq!(eval("=R5+1"), Err(EvalError::NotArithmetic));

    assert_matches!(eval("1+"), Err(EvalError::Malformed(_)));
    assert_matches!(eval("FOO(1)"), Err(EvalError::Malformed(_)));

    assert_eq!(eval("1/0"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("1/(2-2)"), Err(EvalError::DivisionByZero));
    assert_eq!(eval("SQRT(-16)"), Err(EvalError::NonFinite));
}
