// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use crate::ast::ParId;
use crate::scan;
use crate::util::format_num;

/// Value state of one assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Number(f64),
    Expression { text: String, line: u32 },
    Flow(String),
}

/// One recorded assignment to a parameter.
///
/// `sequence` is globally monotonic over the whole store and fixes the
/// textual order of assignments sharing a line.  `dependencies` is a
/// snapshot of the numeric values known for referenced parameters at the
/// moment of definition; it is never updated afterwards.
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub value: ParamValue,
    pub line: u32,
    pub sequence: u64,
    pub dependencies: HashMap<ParId, f64>,
}

/// Append-only store of every parameter assignment in a program.
///
/// The current value of a parameter is its most recent history entry;
/// resolution rewrites pending entries in place, so the current value
/// follows automatically.
#[derive(Debug, Default)]
pub struct ParameterStore {
    history: HashMap<ParId, Vec<HistoryEntry>>,
    order: Vec<ParId>,
    next_seq: u64,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one assignment.
    ///
    /// For expression values, the dependency snapshot captures the
    /// currently numeric values of all referenced parameters, including a
    /// prior value of the assigned one.
    pub fn record_assignment(&mut self, id: ParId, value: ParamValue, line: u32) {
        let mut dependencies = HashMap::new();
        if let ParamValue::Expression { text, .. } = &value {
            for dep in scan::referenced_params(text) {
                if let Some(&ParamValue::Number(n)) = self.current_value(&dep) {
                    dependencies.insert(dep, n);
                }
            }
        }
        let sequence = self.next_seq;
        self.next_seq += 1;
        let entries = self.history.entry(id.clone()).or_insert_with(Vec::new);
        if entries.is_empty() {
            self.order.push(id);
        }
        entries.push(HistoryEntry { value, line, sequence, dependencies });
    }

    /// The most recent assignment's value, refined in place by resolution.
    pub fn current_value(&self, id: &ParId) -> Option<&ParamValue> {
        self.history.get(id).and_then(|h| h.last()).map(|e| &e.value)
    }

    /// Full assignment history of a parameter; empty if never assigned.
    pub fn history_of(&self, id: &ParId) -> &[HistoryEntry] {
        self.history.get(id).map_or(&[], |h| h.as_slice())
    }

    /// Line of the first assignment to this parameter.
    pub fn first_line(&self, id: &ParId) -> Option<u32> {
        self.history.get(id).and_then(|h| h.first()).map(|e| e.line)
    }

    /// All known parameters, in first-definition order.
    pub fn all_ids(&self) -> impl Iterator<Item = &ParId> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Replace a pending expression entry with its resolved number.
    ///
    /// Returns false (and changes nothing) for non-finite values, out of
    /// range indices and entries that are not pending expressions.  Line,
    /// sequence and dependency snapshot are preserved.
    pub fn update_resolved_value(&mut self, id: &ParId, entry: usize, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        match self.history.get_mut(id).and_then(|h| h.get_mut(entry)) {
            Some(e) => {
                if let ParamValue::Expression { .. } = e.value {
                    e.value = ParamValue::Number(value);
                    true
                } else {
                    false
                }
            }
            None => false,
        }
    }
}

impl Display for ParamValue {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ParamValue::Number(n) => write!(f, "{}", format_num(*n)),
            ParamValue::Expression { text, .. } => write!(f, "{}", text),
            ParamValue::Flow(text) => write!(f, "{}", text),
        }
    }
}
