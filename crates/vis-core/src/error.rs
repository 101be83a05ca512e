//! The five recoverable error kinds §7 names, plus the `thiserror` glue the
//! dispatcher uses to discard a failed command uniformly at one call site.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum CoreError {
	#[error("invalid input for the current mode")]
	InvalidInput,
	#[error("operator produced an empty range")]
	EmptyRange,
	#[error("no more history in that direction")]
	NoHistory,
	#[error("register '{0}' is unset")]
	MissingRegister(char),
	#[error("mark '{0}' is unset")]
	MissingMark(char),
	#[error("operation would split a UTF-8 character")]
	InvalidUtf8,
}

impl From<vis_text::TextError> for CoreError {
	fn from(e: vis_text::TextError) -> Self {
		match e {
			vis_text::TextError::NoUndo | vis_text::TextError::NoRedo => CoreError::NoHistory,
			vis_text::TextError::OutOfBounds { .. } => CoreError::EmptyRange,
		}
	}
}
