//! Errors surfaced by the reference text model.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TextError {
	#[error("range {start}..{end} is out of bounds for a buffer of {len} characters")]
	OutOfBounds { start: usize, end: usize, len: usize },
	#[error("no history to undo")]
	NoUndo,
	#[error("no history to redo")]
	NoRedo,
}
