// Copyright (c) 2019 Georg Brandl.  Licensed under the Apache License,
// Version 2.0 <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0>
// or the MIT license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at
// your option. This file may not be copied, modified, or distributed except
// according to those terms.

//! A library to parse Sinumerik-dialect CNC part programs and resolve the
//! values of their R-parameters.
//!
//! R-parameters are the numbered arithmetic variables of the Sinumerik
//! dialect (`R11=R12*2`).  A program may assign them in any order, reassign
//! them, and refer from one assignment to another, so finding the value a
//! parameter ends up with takes more than a single scan: the assignments
//! form a dependency graph that is evaluated iteratively until a fixed
//! point is reached.
//!
//! The crate scans program text line by line (`scan`), records every
//! assignment together with a dependency snapshot in a
//! `store::ParameterStore`, evaluates the arithmetic subset of the dialect
//! (`eval`, with a Pest grammar behind `parse`), and resolves
//! interdependent assignments in program order (`resolve`).
//! `program::parse` ties all of this together and classifies each source
//! line for display (`classify`, `report`).
//!
//! ## Basic usage
//!
//! The following code (the same as the "rpar-table" demo binary) takes a
//! file as an argument, parses it and prints the resolved parameter table.
//!
//! ```rust,no_run
//! use std::{env, fs};
//! use rpar::{program, report::ParamTable};
//!
//! fn main() {
//!     let filename = env::args().nth(1).unwrap();
//!     let input = fs::read_to_string(&filename).unwrap();
//!
//!     let prog = program::parse(&input);
//!     print!("{}", ParamTable::new(prog.store()));
//!     if prog.unresolved_count() > 0 {
//!         eprint!("{}", prog.report());
//!     }
//! }
//! ```
//!
//! ## Unsupported features
//!
//! Control flow statements (`GOTOF`, `IF`, ...) are recognized and listed,
//! but never executed: parameters assigned inside a loop resolve as if
//! every assignment ran once, in textual order.


pub mod ast;
pub mod classify;
pub mod eval;
pub mod parse;
pub mod program;
pub mod report;
pub mod resolve;
pub mod scan;
pub mod store;

// internal helpers
pub(crate) mod util;
