// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use rpar::ast::ParId;
use rpar::classify::LineKind;
use rpar::program::parse;
use rpar::report::ParamTable;
use rpar::store::{ParamValue, ParameterStore};

fn num(n: u32) -> ParId {
    ParId::Numeric(n)
}

#[test]
fn test_listing() {
    let src = r#"; roughing cycle
N10 G17 G90
G0 X0 Y0 Z50
G1 Z-2 F100
M3 S1200
R1=10 R2=R1*2
T1 D1
L123
M30
"#;
    let prog = parse(src);
    let kinds: Vec<_> = prog.lines().iter().map(|l| l.kind).collect();
    assert_eq!(kinds, vec![
        LineKind::Comment,
        LineKind::PlaneSelect,
        LineKind::RapidMove,
        LineKind::LinearMove,
        LineKind::SpindleControl,
        LineKind::Assignment,
        LineKind::ToolSelect,
        LineKind::SubprogramCall,
        LineKind::ProgramEndRewind,
    ]);

    assert_eq!(prog.lines()[0].comment.as_deref(), Some("roughing cycle"));
    assert_eq!(prog.lines()[1].block_number, Some(10));
    assert_eq!(prog.lines()[1].gcodes, vec![170, 900]);
    assert_eq!(prog.lines()[4].mcodes, vec![3]);
    assert_eq!(prog.lines()[5].assignments, vec![num(1), num(2)]);
    assert_eq!(prog.lines()[5].lineno, 6);
}

#[test]
fn test_blank_lines_skipped() {
    let prog = parse("R1=1\n\n   \nR2=2\n");
    assert_eq!(prog.lines().len(), 2);
    assert_eq!(prog.lines()[1].lineno, 4);
}

#[test]
fn test_comments_stripped_from_code() {
    let prog = parse("R1=5 ; R2=6");
    assert_eq!(prog.store().len(), 1);
    assert_eq!(prog.lines()[0].assignments, vec![num(1)]);
    assert_eq!(prog.lines()[0].comment.as_deref(), Some("R2=6"));
}

#[test]
fn test_issues_collected() {
    let prog = parse("R99999=1\nR5=");
    let issues: Vec<_> = prog.issues().iter().map(|i| i.to_string()).collect();
    assert_eq!(issues, vec![
        "line 1: parameter number R99999 is out of range",
        "line 2: assignment to R5 has no value text",
    ]);
    assert!(prog.store().is_empty());
}

#[test]
fn test_table_output() {
    let src = "R1=10\nR2=R1*2\nR3=GOTOF END\nR2=7";
    let table = ParamTable::new(parse(src).store()).to_string();

    assert!(table.contains("R1 = 10"), "table was:\n{}", table);
    assert!(table.contains("R2 = 7"), "table was:\n{}", table);
    assert!(table.contains("(2 changes)"), "table was:\n{}", table);
    // the history row keeps the resolved value and its explanation
    assert!(table.contains("line 2: 20  (R1=10)"), "table was:\n{}", table);
    assert!(table.contains("flow statements:"), "table was:\n{}", table);
    assert!(table.contains("R3 = GOTOF END"), "table was:\n{}", table);
}

#[test]
fn test_table_marks_unresolved() {
    let table = ParamTable::new(parse("R2=R7+1").store()).to_string();
    assert!(table.contains("R2 = R7+1  (unresolved)"), "table was:\n{}", table);
}

#[test]
fn test_table_ordering() {
    // numeric parameters sort numerically and before named ones
    let src = "R10=1\nR2=2";
    let table = ParamTable::new(parse(src).store()).to_string();
    let r2 = table.find("R2").unwrap();
    let r10 = table.find("R10").unwrap();
    assert!(r2 < r10, "table was:\n{}", table);
}

#[test]
fn test_table_named_after_numeric() {
    let mut store = ParameterStore::new();
    store.record_assignment(ParId::Named("DEPTH".into()), ParamValue::Number(2.), 1);
    store.record_assignment(num(5), ParamValue::Number(1.), 2);
    let table = ParamTable::new(&store).to_string();
    assert!(table.find("R5").unwrap() < table.find("DEPTH").unwrap(),
            "table was:\n{}", table);
}

#[test]
fn test_empty_program() {
    let prog = parse("");
    assert!(prog.store().is_empty());
    assert!(prog.lines().is_empty());
    assert_eq!(ParamTable::new(prog.store()).to_string(), "no parameters\n");
}
