use std::{env, fs};
use rpar::program;

fn main() {
    let filename = env::args().nth(1).expect("file name required");
    let input = fs::read_to_string(&filename).unwrap();

    let prog = program::parse(&input);
    for line in prog.lines() {
        println!("{}", line);
    }
    for issue in prog.issues() {
        eprintln!("{}", issue);
    }
}
