//! # Tape
//!
//! A small stack language with a static stack-effect checker.
//!
//! Source is split into words, the words are associated into one flat
//! instruction tape with every jump already resolved, the tape is checked so
//! that every path leaves the stack in the same shape, and then a virtual
//! machine with a simulated heap runs it.
//!
//! ```text
//! fn double n : n do dup + end
//! 5 double pr
//! ```
//!
//! Run a program with `tape program.tape`. Modules named by `import` are
//! found in the standard library directory, `$TAPE_STD` or the `std`
//! directory next to the crate.

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

#[path = "doc/chapter_2.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_2;

#[path = "doc/appendix_a.rs"]
#[allow(non_snake_case)]
pub mod ___Appendix_A;

pub mod lang;
pub mod mach;
