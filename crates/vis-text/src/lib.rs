//! Reference implementation of the text-model interface the editing core
//! consumes (position-stable ranges, snapshot undo, navigation primitives).
//!
//! A host embedding `vis-core` against a real piece-table buffer is free to
//! implement the same surface directly; this crate exists so the core is
//! buildable and testable on its own.

mod buffer;
mod error;
mod history;

pub use buffer::{max_cursor_pos, visible_line_count, Buffer};
pub use error::TextError;
