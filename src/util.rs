// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.


/// Helper for converting a floating code number to a scaled integer.
pub fn num_to_int(inp: f64, figures: i32, max: f64) -> Option<u16> {
    let v = inp * 10f64.powi(figures);
    if (v.round() - v).abs() < 0.0001 && v >= 0. && v.round() < max {
        Some(v.round() as u16)
    } else {
        None
    }
}

/// Format a parameter value with at most four decimal places, dropping
/// trailing zeros.
pub fn format_num(v: f64) -> String {
    let s = format!("{:.4}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
