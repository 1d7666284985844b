//! Indentation-aware external scanner for the tree-sitter Mojo grammar.
//!
//! The grammar's static rules cannot express indentation-delimited blocks, so
//! the host parser hands control to this crate at positions where one of four
//! structural tokens may appear: `NEWLINE`, `INDENT`, `DEDENT` and `COMMENT`.
//!
//! # Layers
//!
//! - [`IndentStack`]: strictly increasing widths of the open blocks.
//! - [`state`]: the compact byte snapshot the host stores between re-lexes.
//! - [`Scanner`]: classifies the upcoming input against the admissible
//!   [`TokenSet`] and mutates the stack.
//! - [`Lexer`]: the host cursor the scanner reads from. [`SourceLexer`] is a
//!   string-backed implementation; [`ffi`] adapts tree-sitter's `TSLexer`.
//! - [`driver`]: a reference host loop with checkpoint/resume support.
//!
//! No component owns global state: every scanner instance carries its own
//! stack, so parses of different documents never interfere.

pub mod driver;
pub mod ffi;
mod indent_stack;
mod lexer;
mod scanner;
pub mod state;
mod token_kind;

pub use driver::{Checkpoint, Driver, DriverError, DriverOptions, Lexeme, LexemeKind, Tokenized};
pub use indent_stack::IndentStack;
pub use lexer::{Lexer, SourceLexer};
pub use scanner::{Scanner, COMMENT_START, TAB_WIDTH};
pub use token_kind::{Span, TokenKind, TokenSet};
