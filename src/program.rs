// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Display, Formatter};

use crate::classify::{self, ClassifiedLine, LineKind};
use crate::resolve::{self, ResolveOptions, ResolveReport};
use crate::scan::{self, ScanIssue};
use crate::store::{ParamValue, ParameterStore};

/// A scan problem together with the line it occurred on.
#[derive(Debug, Clone, PartialEq)]
pub struct LineIssue {
    pub lineno: u32,
    pub issue: ScanIssue,
}

/// Result of running a whole program through scanning, classification
/// and resolution.
#[derive(Debug)]
pub struct ParsedProgram {
    store: ParameterStore,
    lines: Vec<ClassifiedLine>,
    issues: Vec<LineIssue>,
    report: ResolveReport,
}

impl ParsedProgram {
    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    pub fn lines(&self) -> &[ClassifiedLine] {
        &self.lines
    }

    pub fn issues(&self) -> &[LineIssue] {
        &self.issues
    }

    pub fn report(&self) -> &ResolveReport {
        &self.report
    }

    /// Parameters that still lack a numeric value.  Flow statements do
    /// not count; they are never meant to evaluate.
    pub fn unresolved_count(&self) -> usize {
        self.report.unresolved_count()
    }
}

/// Parse a program with default resolution options.
pub fn parse(source: &str) -> ParsedProgram {
    parse_with(source, &ResolveOptions::default())
}

/// Scan the source line by line, record all R-parameter assignments and
/// resolve them to a fixed point.
///
/// Lines are numbered from 1, and everything after a `;` is a comment.
/// This never fails: scan problems are collected per line, and
/// unresolvable expressions are reported rather than raised.
pub fn parse_with(source: &str, options: &ResolveOptions) -> ParsedProgram {
    let mut store = ParameterStore::new();
    let mut lines = Vec::new();
    let mut issues = Vec::new();
    for (idx, raw) in source.lines().enumerate() {
        let lineno = (idx + 1) as u32;
        let (code, comment) = split_comment(raw);
        let code = code.trim();
        let comment = comment.map(str::trim).filter(|c| !c.is_empty()).map(str::to_string);
        if code.is_empty() && comment.is_none() {
            continue;
        }
        if code.is_empty() {
            lines.push(ClassifiedLine {
                lineno,
                kind: LineKind::Comment,
                gcodes: vec![],
                mcodes: vec![],
                block_number: None,
                assignments: vec![],
                comment,
            });
            continue;
        }
        let (defs, scan_issues) = scan::scan_line(code);
        for issue in scan_issues {
            log::warn!("line {}: {}", lineno, issue);
            issues.push(LineIssue { lineno, issue });
        }
        let mut assignments = Vec::with_capacity(defs.len());
        for def in defs {
            let value = classify_value(&def.text, lineno);
            assignments.push(def.id.clone());
            store.record_assignment(def.id, value, lineno);
        }
        let class = classify::classify_line(code, assignments.len());
        lines.push(ClassifiedLine {
            lineno,
            kind: class.kind,
            gcodes: class.gcodes,
            mcodes: class.mcodes,
            block_number: class.block_number,
            assignments,
            comment,
        });
    }
    let report = resolve::resolve(&mut store, options);
    ParsedProgram { store, lines, issues, report }
}

/// Sort raw value text into the three value states: flow statements stay
/// verbatim, plain literals become numbers right away, everything else
/// is an expression for the resolver.
fn classify_value(text: &str, line: u32) -> ParamValue {
    if scan::is_flow_text(text) {
        ParamValue::Flow(text.to_string())
    } else if let Some(n) = scan::number_literal(text) {
        ParamValue::Number(n)
    } else {
        ParamValue::Expression { text: text.to_string(), line }
    }
}

fn split_comment(line: &str) -> (&str, Option<&str>) {
    match line.find(';') {
        Some(idx) => (&line[..idx], Some(&line[idx + 1..])),
        None => (line, None),
    }
}

impl Display for LineIssue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "line {}: {}", self.lineno, self.issue)
    }
}
