use std::{env, fs};
use rpar::program;
use rpar::report::ParamTable;

fn main() {
    let filename = env::args().nth(1).expect("file name required");
    let input = fs::read_to_string(&filename).unwrap();

    let prog = program::parse(&input);
    print!("{}", ParamTable::new(prog.store()));
    if prog.unresolved_count() > 0 {
        eprint!("{}", prog.report());
    }
}
