//! # Tape
//!
//! Command line driver: check and run one program.
//!

mod term;

fn main() {
    term::main();
}
