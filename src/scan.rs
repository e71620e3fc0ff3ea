// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Display, Formatter};

use crate::ast::ParId;

/// Largest accepted R-parameter number.
pub const MAX_PARAM_NUM: u32 = 9999;

const FLOW_WORDS: &[&str] = &["GOTOF", "GOTOB", "IF", "WHILE", "REPEAT"];

/// A single `R<n>=<value>` definition found in a line of code.
#[derive(Debug, Clone, PartialEq)]
pub struct ParDef {
    pub id: ParId,
    pub text: String,
}

/// A definition that was recognized but could not be recorded.
#[derive(Debug, Clone, PartialEq)]
pub enum ScanIssue {
    EmptyValue(ParId),
    ParamNumberRange(String),
}

struct Target {
    digits_start: usize,
    digits_end: usize,
    value_start: usize,
}

enum Stop {
    Target,
    Semicolon,
    Eol,
}

/// Extract all R-parameter definitions from one line of code, in textual
/// order.  Comment stripping is the caller's job.
///
/// A definition target is `R<digits>` directly followed by `=` (whitespace
/// around the `=` is allowed).  The value text runs until the next
/// definition target, a `;`, or the end of the line; an open parenthesis
/// suspends those stops until it is balanced again.
pub fn scan_line(line: &str) -> (Vec<ParDef>, Vec<ScanIssue>) {
    let bytes = line.as_bytes();
    let mut defs = Vec::new();
    let mut issues = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b';' {
            // rest of the line is commentary
            break;
        }
        let target = match target_at(bytes, pos) {
            Some(t) => t,
            None => { pos += 1; continue }
        };
        let digits = &line[target.digits_start..target.digits_end];
        let id = match digits.parse::<u32>() {
            Ok(n) if n <= MAX_PARAM_NUM => Some(ParId::Numeric(n)),
            _ => {
                issues.push(ScanIssue::ParamNumberRange(digits.to_string()));
                None
            }
        };
        let (end, stop) = value_end(bytes, target.value_start);
        if let Some(id) = id {
            let text = line[target.value_start..end].trim();
            if text.is_empty() {
                issues.push(ScanIssue::EmptyValue(id));
            } else {
                defs.push(ParDef { id, text: text.to_string() });
            }
        }
        match stop {
            Stop::Semicolon => break,
            _ => pos = end,
        }
    }
    (defs, issues)
}

/// Collect the distinct R-parameters referenced in an expression text, in
/// order of first appearance.
pub fn referenced_params(text: &str) -> Vec<ParId> {
    let bytes = text.as_bytes();
    let mut found = Vec::new();
    let mut pos = 0;
    while pos < bytes.len() {
        if bytes[pos] == b'R' && (pos == 0 || !bytes[pos - 1].is_ascii_alphanumeric()) {
            let digits_start = pos + 1;
            let mut i = digits_start;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i > digits_start {
                if let Ok(n) = text[digits_start..i].parse::<u32>() {
                    let id = ParId::Numeric(n);
                    if !found.contains(&id) {
                        found.push(id);
                    }
                }
                pos = i;
                continue;
            }
        }
        pos += 1;
    }
    found
}

/// Parse value text as a plain numeric literal (`42`, `-3.5`, `.25`).
pub fn number_literal(text: &str) -> Option<f64> {
    let text = text.trim();
    let rest = text.strip_prefix('-').or_else(|| text.strip_prefix('+')).unwrap_or(text);
    let mut digits = 0;
    let mut dots = 0;
    for ch in rest.chars() {
        match ch {
            '0'..='9' => digits += 1,
            '.' => dots += 1,
            _ => return None,
        }
    }
    if digits == 0 || dots > 1 {
        return None;
    }
    text.parse().ok().filter(|v: &f64| v.is_finite())
}

/// Check for value text that is a control-flow statement rather than an
/// arithmetic expression: a flow keyword on a word boundary, or a bare `=`
/// continuation.  Such values are kept verbatim and never evaluated.
pub fn is_flow_text(text: &str) -> bool {
    let text = text.trim_start();
    if text.starts_with('=') {
        return true;
    }
    FLOW_WORDS.iter().any(|w| contains_word(text, w))
}

fn contains_word(text: &str, word: &str) -> bool {
    let bytes = text.as_bytes();
    let mut start = 0;
    while let Some(idx) = text[start..].find(word) {
        let at = start + idx;
        let end = at + word.len();
        let before_ok = at == 0 || !bytes[at - 1].is_ascii_alphanumeric();
        let after_ok = end >= bytes.len() || !bytes[end].is_ascii_alphanumeric();
        if before_ok && after_ok {
            return true;
        }
        start = at + 1;
    }
    false
}

fn target_at(bytes: &[u8], pos: usize) -> Option<Target> {
    if bytes[pos] != b'R' {
        return None;
    }
    if pos > 0 && bytes[pos - 1].is_ascii_alphanumeric() {
        return None;
    }
    let digits_start = pos + 1;
    let mut i = digits_start;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i == digits_start {
        return None;
    }
    let digits_end = i;
    while i < bytes.len() && (bytes[i] == b' ' || bytes[i] == b'\t') {
        i += 1;
    }
    if i >= bytes.len() || bytes[i] != b'=' {
        return None;
    }
    // `R1==0` is a comparison inside a flow condition, not a definition
    if i + 1 < bytes.len() && bytes[i + 1] == b'=' {
        return None;
    }
    let mut value_start = i + 1;
    while value_start < bytes.len() &&
        (bytes[value_start] == b' ' || bytes[value_start] == b'\t')
    {
        value_start += 1;
    }
    Some(Target { digits_start, digits_end, value_start })
}

fn value_end(bytes: &[u8], start: usize) -> (usize, Stop) {
    let mut depth = 0usize;
    let mut i = start;
    while i < bytes.len() {
        match bytes[i] {
            b'(' => depth += 1,
            b')' => depth = depth.saturating_sub(1),
            b';' if depth == 0 => return (i, Stop::Semicolon),
            b'R' if depth == 0 && target_at(bytes, i).is_some() => return (i, Stop::Target),
            _ => (),
        }
        i += 1;
    }
    (bytes.len(), Stop::Eol)
}

impl Display for ScanIssue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ScanIssue::EmptyValue(id) => {
                write!(f, "assignment to {} has no value text", id)
            }
            ScanIssue::ParamNumberRange(digits) => {
                write!(f, "parameter number R{} is out of range", digits)
            }
        }
    }
}
