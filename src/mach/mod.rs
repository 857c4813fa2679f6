/*!
## Rust Machine Module

This Rust module associates tokens into an instruction tape, checks the
stack effects of the tape, and runs it on a virtual machine.

*/

pub type Address = usize;

mod assoc;
mod context;
mod function;
mod heap;
mod listing;
mod opcode;
mod operation;
mod runtime;
mod scope;
mod stack;
mod typecheck;
mod types;
mod val;

pub use assoc::{associate, associate_module, compile};
pub use context::{Config, Context};
pub use function::{Builtin, Callable, Effect, Functions, InputKind, UserFunction, BUILTINS};
pub use heap::{Heap, Region};
pub use listing::Listing;
pub use opcode::{FunctionDef, Instruction, Opcode, Tape};
pub use operation::Operation;
pub use runtime::{Event, Runtime};
pub use scope::Scope;
pub use stack::Stack;
pub use typecheck::{typecheck, Signature, TypeChecker};
pub use types::Type;
pub use val::Val;
