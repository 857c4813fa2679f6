/*!
# Rust Language Module

This Rust module provides the source side of the toolchain: the file table,
lexical analysis, module loading, and error reporting.

*/

#[macro_use]
mod error;
mod lex;
mod loader;
pub mod report;
mod source;
mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use lex::lex;
pub use loader::{DirLoader, Loader, MemoryLoader};
pub use source::{FileId, Location, SourceFile, Sources, Span};
pub use token::{Keyword, Token, TokenKind};
