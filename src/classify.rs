// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

use std::fmt;
use itertools::Itertools;
use fixedbitset::FixedBitSet as BitSet;
use strum_macros::Display;

use crate::ast::ParId;
use crate::util::num_to_int;

/// Broad category of a source line, as shown in a program listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum LineKind {
    Comment,
    RapidMove,
    LinearMove,
    ArcCw,
    ArcCcw,
    PlaneSelect,
    WorkOffset,
    AbsoluteMode,
    IncrementalMode,
    Gcode,
    ProgramStop,
    OptionalStop,
    ProgramEnd,
    ProgramEndRewind,
    SpindleControl,
    SpindleStop,
    ToolChange,
    CoolantControl,
    CoolantStop,
    Mcode,
    PositionData,
    ToolSelect,
    SubprogramCall,
    BlockNumber,
    Assignment,
    Other,
}

/// Category and machine words of one tokenized line.
#[derive(Debug)]
pub struct LineClass {
    pub kind: LineKind,
    /// G numbers scaled by 10, so G17.5 is stored as 175.
    pub gcodes: Vec<u16>,
    pub mcodes: Vec<u16>,
    pub block_number: Option<u32>,
}

/// One source line of the listing with its scan results attached.
#[derive(Debug, Clone)]
pub struct ClassifiedLine {
    pub lineno: u32,
    pub kind: LineKind,
    pub gcodes: Vec<u16>,
    pub mcodes: Vec<u16>,
    pub block_number: Option<u32>,
    pub assignments: Vec<ParId>,
    pub comment: Option<String>,
}

struct CodeSet(BitSet);

impl CodeSet {
    fn insert(&mut self, code: u16) {
        self.0.insert(code as usize);
    }

    fn contains(&self, code: u16) -> bool {
        self.0[code as usize]
    }

    fn first_of(&self, codes: &[u16]) -> Option<u16> {
        codes.iter().cloned().find(|&c| self.contains(c))
    }

    fn is_empty(&self) -> bool {
        self.0.count_ones(..) == 0
    }

    fn to_vec(&self) -> Vec<u16> {
        self.0.ones().map(|c| c as u16).collect()
    }
}

/// Tokenize one comment-stripped line and determine its listing category.
///
/// `assignments` is the number of R-parameter definitions the scanner
/// found in the same line; machine words take precedence over it when
/// picking the category.
pub fn classify_line(code: &str, assignments: usize) -> LineClass {
    let mut gcodes = CodeSet(BitSet::with_capacity(1000));
    let mut mcodes = CodeSet(BitSet::with_capacity(100));
    let mut block_number = None;
    let mut has_coords = false;
    let mut has_tool = false;
    let mut has_sub = false;
    for token in code.split_whitespace() {
        if token.len() < 2 || !token.is_char_boundary(1) {
            continue;
        }
        let value = &token[1..];
        match token.as_bytes()[0].to_ascii_uppercase() {
            b'N' => block_number = value.parse().ok().or(block_number),
            b'G' => if let Some(code) = value.parse().ok().and_then(|v| num_to_int(v, 1, 1000.)) {
                gcodes.insert(code);
            },
            b'M' => if let Some(code) = value.parse().ok().and_then(|v| num_to_int(v, 0, 100.)) {
                mcodes.insert(code);
            },
            b'X' | b'Y' | b'Z' => has_coords = true,
            b'T' => has_tool = true,
            b'L' => has_sub = value.bytes().all(|b| b.is_ascii_digit()),
            _ => (),
        }
    }
    let kind = if has_sub {
        LineKind::SubprogramCall
    } else if !gcodes.is_empty() {
        if let Some(motion) = gcodes.first_of(&[0, 10, 20, 30]) {
            match motion {
                0 => LineKind::RapidMove,
                10 => LineKind::LinearMove,
                20 => LineKind::ArcCw,
                _ => LineKind::ArcCcw,
            }
        } else if gcodes.first_of(&[170, 180, 190]).is_some() {
            LineKind::PlaneSelect
        } else if gcodes.contains(900) {
            LineKind::AbsoluteMode
        } else if gcodes.contains(910) {
            LineKind::IncrementalMode
        } else if gcodes.first_of(&[540, 550, 560, 570, 580, 590]).is_some() {
            LineKind::WorkOffset
        } else {
            LineKind::Gcode
        }
    } else if !mcodes.is_empty() {
        if mcodes.contains(0) {
            LineKind::ProgramStop
        } else if mcodes.contains(1) {
            LineKind::OptionalStop
        } else if mcodes.contains(2) {
            LineKind::ProgramEnd
        } else if mcodes.first_of(&[3, 4]).is_some() {
            LineKind::SpindleControl
        } else if mcodes.contains(5) {
            LineKind::SpindleStop
        } else if mcodes.contains(6) {
            LineKind::ToolChange
        } else if mcodes.first_of(&[7, 8]).is_some() {
            LineKind::CoolantControl
        } else if mcodes.contains(9) {
            LineKind::CoolantStop
        } else if mcodes.contains(30) {
            LineKind::ProgramEndRewind
        } else {
            LineKind::Mcode
        }
    } else if has_coords {
        LineKind::PositionData
    } else if has_tool {
        LineKind::ToolSelect
    } else if assignments > 0 {
        LineKind::Assignment
    } else if block_number.is_some() {
        LineKind::BlockNumber
    } else {
        LineKind::Other
    };
    LineClass { kind, gcodes: gcodes.to_vec(), mcodes: mcodes.to_vec(), block_number }
}

impl fmt::Display for ClassifiedLine {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:>4}  {:<17}", self.lineno, self.kind.to_string())?;
        for g in &self.gcodes {
            write!(f, " G{}", *g as f64 / 10.)?;
        }
        for m in &self.mcodes {
            write!(f, " M{}", m)?;
        }
        if !self.assignments.is_empty() {
            write!(f, " defs: {}", self.assignments.iter().join(" "))?;
        }
        if let Some(comment) = &self.comment {
            write!(f, "  ; {}", comment)?;
        }
        Ok(())
    }
}
