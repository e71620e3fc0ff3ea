// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt::{self, Display, Formatter};

use itertools::Itertools;

use crate::ast::ParId;
use crate::store::{HistoryEntry, ParamValue, ParameterStore};
use crate::util::format_num;

/// Read-only table view of a parameter store.
///
/// Numeric ids come first, then named ones.  Parameters whose latest
/// value is a flow statement are listed in a separate section at the
/// end; expressions the resolver could not finish are marked.
pub struct ParamTable<'a> {
    store: &'a ParameterStore,
}

impl<'a> ParamTable<'a> {
    pub fn new(store: &'a ParameterStore) -> Self {
        ParamTable { store }
    }
}

/// Render the dependency snapshot of a history entry, e.g. `(R2=20, R1=10)`.
///
/// Snapshots are unordered, so the ids are sorted for stable output.
/// Entries without dependencies give an empty string.
pub fn explanation(entry: &HistoryEntry) -> String {
    if entry.dependencies.is_empty() {
        return String::new();
    }
    let deps = entry.dependencies.iter()
        .sorted_by(|a, b| a.0.cmp(b.0))
        .map(|(id, &v)| format!("{}={}", id, format_num(v)))
        .join(", ");
    format!("({})", deps)
}

impl Display for ParamTable<'_> {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.store.is_empty() {
            return writeln!(f, "no parameters");
        }
        let mut ids: Vec<&ParId> = self.store.all_ids().collect();
        ids.sort();
        let (flow, value): (Vec<&ParId>, Vec<&ParId>) = ids.into_iter()
            .partition(|&id| matches!(self.store.current_value(id),
                                      Some(ParamValue::Flow(_))));
        if !value.is_empty() {
            writeln!(f, "parameters:")?;
        }
        for id in value {
            let hist = self.store.history_of(id);
            let last = hist.last().expect("listed ids have history");
            write!(f, "{:>8} = {}", id.to_string(), last.value)?;
            if let ParamValue::Expression { .. } = last.value {
                write!(f, "  (unresolved)")?;
            }
            write!(f, "   line {}", last.line)?;
            if hist.len() > 1 {
                write!(f, " ({} changes)", hist.len())?;
            }
            writeln!(f)?;
            if hist.len() > 1 {
                for entry in hist {
                    write!(f, "{:10} line {}: {}", "", entry.line, entry.value)?;
                    let expl = explanation(entry);
                    if !expl.is_empty() {
                        write!(f, "  {}", expl)?;
                    }
                    writeln!(f)?;
                }
            }
        }
        if !flow.is_empty() {
            writeln!(f, "flow statements:")?;
            for id in flow {
                let hist = self.store.history_of(id);
                let last = hist.last().expect("listed ids have history");
                writeln!(f, "{:>8} = {}   line {}", id.to_string(), last.value, last.line)?;
            }
        }
        Ok(())
    }
}
