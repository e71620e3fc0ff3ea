// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::collections::HashMap;
use std::fmt::{self, Display, Formatter};

use crate::ast::ParId;
use crate::eval::{self, EvalError};
use crate::store::{ParamValue, ParameterStore};

/// Default number of evaluation passes before giving up.
pub const MAX_PASSES: u32 = 10;

/// Tunables for `resolve`.
#[derive(Debug, Clone)]
pub struct ResolveOptions {
    /// Upper bound on evaluation passes.  Values below 1 act as 1.
    pub max_passes: u32,
    /// Treat a still-unknown parameter first defined on the same line as
    /// the referencing one as 0 once no other progress is possible.  A
    /// true same-line cycle cannot be ordered, so this recovers a value
    /// for it; when disabled, such entries stay unresolved.
    pub same_line_zero_fallback: bool,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        ResolveOptions { max_passes: MAX_PASSES, same_line_zero_fallback: true }
    }
}

/// A parameter entry still pending after resolution.
#[derive(Debug, Clone)]
pub struct UnresolvedParam {
    pub id: ParId,
    pub line: u32,
    pub text: String,
    pub reason: EvalError,
}

/// Outcome of a resolution run.
#[derive(Debug, Clone)]
pub struct ResolveReport {
    pub passes: u32,
    pub resolved: usize,
    pub unresolved: Vec<UnresolvedParam>,
}

impl ResolveReport {
    pub fn unresolved_count(&self) -> usize {
        self.unresolved.len()
    }
}

struct Pending {
    id: ParId,
    idx: usize,
    line: u32,
    seq: u64,
    last_err: Option<EvalError>,
}

/// Iteratively evaluate all pending expression entries to a fixed point.
///
/// Entries are attempted in program order (line, then textual order
/// within a line).  A resolved entry is written back immediately, so
/// later entries of the same pass already see its value.  The run stops
/// when everything is resolved, a whole pass makes no progress, or the
/// pass budget is spent; flow entries are never touched.
pub fn resolve(store: &mut ParameterStore, options: &ResolveOptions) -> ResolveReport {
    let mut pending = collect_pending(store);
    let first_lines: HashMap<ParId, u32> = store.all_ids()
        .filter_map(|id| store.first_line(id).map(|line| (id.clone(), line)))
        .collect();
    let budget = options.max_passes.max(1);
    let mut passes = 0;
    let mut resolved = 0;
    let mut zero_fallback = false;
    while passes < budget && !pending.is_empty() {
        passes += 1;
        let mut progress = false;
        let mut remaining = Vec::with_capacity(pending.len());
        for mut item in pending {
            match attempt(store, &item, &first_lines, zero_fallback) {
                Ok(value) => {
                    if store.update_resolved_value(&item.id, item.idx, value) {
                        resolved += 1;
                        progress = true;
                    } else {
                        item.last_err = Some(EvalError::NonFinite);
                        remaining.push(item);
                    }
                }
                Err(err) => {
                    item.last_err = Some(err);
                    remaining.push(item);
                }
            }
        }
        pending = remaining;
        log::debug!("resolution pass {}: {} entries left", passes, pending.len());
        if !progress {
            // Same-line values are mutually visible; once inter-line
            // ordering is exhausted, unknown ones default to zero.
            if options.same_line_zero_fallback && !zero_fallback {
                zero_fallback = true;
                continue;
            }
            break;
        }
    }
    let unresolved = pending.into_iter().map(|p| {
        let text = match &store.history_of(&p.id)[p.idx].value {
            ParamValue::Expression { text, .. } => text.clone(),
            _ => String::new(),
        };
        let reason = p.last_err.expect("attempted at least once");
        log::warn!("unresolved parameter {} = {} (line {}): {}", p.id, text, p.line, reason);
        UnresolvedParam { id: p.id, line: p.line, text, reason }
    }).collect();
    ResolveReport { passes, resolved, unresolved }
}

fn collect_pending(store: &ParameterStore) -> Vec<Pending> {
    let mut pending = Vec::new();
    for id in store.all_ids() {
        for (idx, entry) in store.history_of(id).iter().enumerate() {
            if let ParamValue::Expression { .. } = entry.value {
                pending.push(Pending {
                    id: id.clone(),
                    idx,
                    line: entry.line,
                    seq: entry.sequence,
                    last_err: None,
                });
            }
        }
    }
    pending.sort_by_key(|p| p.seq);
    pending
}

fn attempt(store: &ParameterStore, item: &Pending, first_lines: &HashMap<ParId, u32>,
           zero_fallback: bool) -> Result<f64, EvalError> {
    let entry = &store.history_of(&item.id)[item.idx];
    let text = match &entry.value {
        ParamValue::Expression { text, .. } => text,
        // pending entries are expressions by construction
        _ => return Err(EvalError::NotArithmetic),
    };
    let snapshot = &entry.dependencies;
    eval::evaluate(text, |dep| {
        lookup_dep(store, item, dep, snapshot, first_lines, zero_fallback)
    })
}

/// Find the value of `dep` as visible from the entry being resolved.
///
/// In order: a self reference uses the previous entry of the same
/// parameter; then the definition-time snapshot; then the latest history
/// entry of `dep` on an earlier or the same line.  Parameters first
/// defined on a later line are invisible even once they have a value.
fn lookup_dep(store: &ParameterStore, item: &Pending, dep: &ParId,
              snapshot: &HashMap<ParId, f64>, first_lines: &HashMap<ParId, u32>,
              zero_fallback: bool) -> Option<f64> {
    if dep == &item.id {
        return prior_own_value(store, item);
    }
    if let Some(&v) = snapshot.get(dep) {
        return Some(v);
    }
    let latest = store.history_of(dep).iter().rev().find(|e| e.line <= item.line)?;
    match &latest.value {
        ParamValue::Number(n) => Some(*n),
        _ => {
            let born_together = first_lines.get(dep) == Some(&item.line) &&
                first_lines.get(&item.id) == Some(&item.line);
            if born_together && zero_fallback {
                Some(0.0)
            } else {
                None
            }
        }
    }
}

/// Previous value for a self reference: the nearest earlier entry of the
/// same parameter.  A still-pending predecessor defers this entry; flow
/// entries are skipped over.
fn prior_own_value(store: &ParameterStore, item: &Pending) -> Option<f64> {
    for entry in store.history_of(&item.id)[..item.idx].iter().rev() {
        match &entry.value {
            ParamValue::Number(n) => return Some(*n),
            ParamValue::Expression { .. } => return None,
            ParamValue::Flow(_) => (),
        }
    }
    // first assignment referencing itself
    Some(0.0)
}

impl Display for UnresolvedParam {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} = {} (line {}): {}", self.id, self.text, self.line, self.reason)
    }
}

impl Display for ResolveReport {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        writeln!(f, "resolved {} expression(s) in {} pass(es), {} left",
                 self.resolved, self.passes, self.unresolved.len())?;
        for unres in &self.unresolved {
            writeln!(f, "  {}", unres)?;
        }
        Ok(())
    }
}
