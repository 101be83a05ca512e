//! The reference text model: a `ropey::Rope` plus undo history and the
//! navigation primitives motions are built on.

use ropey::{Rope, RopeSlice};
use tracing::trace;
use vis_primitives::graphemes::{next_grapheme_boundary, prev_grapheme_boundary};
use vis_primitives::CharIdx;

use crate::error::TextError;
use crate::history::History;

pub struct Buffer {
	content: Rope,
	history: History,
}

impl Buffer {
	pub fn new(text: impl AsRef<str>) -> Self {
		Self {
			content: Rope::from_str(text.as_ref()),
			history: History::new(),
		}
	}

	pub fn slice(&self) -> RopeSlice<'_> {
		self.content.slice(..)
	}

	pub fn len_chars(&self) -> usize {
		self.content.len_chars()
	}

	/// The last valid cursor position: one past the last character unless
	/// the buffer ends in a newline, in which case the newline itself.
	pub fn max_cursor_pos(&self) -> CharIdx {
		max_cursor_pos(self.slice())
	}

	pub fn to_string(&self) -> String {
		self.content.to_string()
	}

	/// Reads the text within `[start, end)`, clamped to buffer bounds.
	pub fn read(&self, start: CharIdx, end: CharIdx) -> String {
		let len = self.len_chars();
		let start = start.min(len);
		let end = end.min(len).max(start);
		self.content.slice(start..end).to_string()
	}

	/// Replaces `[start, end)` with `text`, without touching undo history.
	/// Callers bracket a sequence of these with `begin_group`/`commit_group`.
	pub fn replace(&mut self, start: CharIdx, end: CharIdx, text: &str) -> Result<(), TextError> {
		let len = self.len_chars();
		if start > len || end > len || start > end {
			return Err(TextError::OutOfBounds { start, end, len });
		}
		if end > start {
			self.content.remove(start..end);
		}
		if !text.is_empty() {
			self.content.insert(start, text);
		}
		trace!(start, end, inserted = text.len(), "buffer.replace");
		Ok(())
	}

	// -- undo history -------------------------------------------------

	pub fn begin_group(&mut self, cursor: CharIdx) {
		self.history.begin_group(&self.content, cursor);
	}

	pub fn commit_group(&mut self) {
		self.history.commit_group(&self.content);
	}

	pub fn abort_group(&mut self) {
		self.history.abort_group();
	}

	pub fn can_undo(&self) -> bool {
		self.history.can_undo()
	}

	pub fn can_redo(&self) -> bool {
		self.history.can_redo()
	}

	pub fn undo(&mut self, cursor: CharIdx) -> Result<CharIdx, TextError> {
		let (rope, pos) = self.history.undo(&self.content, cursor).ok_or(TextError::NoUndo)?;
		self.content = rope;
		Ok(pos)
	}

	pub fn redo(&mut self, cursor: CharIdx) -> Result<CharIdx, TextError> {
		let (rope, pos) = self.history.redo(&self.content, cursor).ok_or(TextError::NoRedo)?;
		self.content = rope;
		Ok(pos)
	}

	pub fn earlier(&mut self, cursor: CharIdx) -> Result<CharIdx, TextError> {
		let (rope, pos) = self.history.earlier(&self.content, cursor).ok_or(TextError::NoUndo)?;
		self.content = rope;
		Ok(pos)
	}

	pub fn later(&mut self, cursor: CharIdx) -> Result<CharIdx, TextError> {
		let (rope, pos) = self.history.later(&self.content, cursor).ok_or(TextError::NoRedo)?;
		self.content = rope;
		Ok(pos)
	}

	// -- navigation primitives -----------------------------------------

	pub fn char_next(&self, pos: CharIdx) -> CharIdx {
		next_grapheme_boundary(self.slice(), pos)
	}

	pub fn char_prev(&self, pos: CharIdx) -> CharIdx {
		prev_grapheme_boundary(self.slice(), pos)
	}

	pub fn line_of(&self, pos: CharIdx) -> usize {
		self.content.char_to_line(pos.min(self.len_chars()))
	}

	pub fn col_of(&self, pos: CharIdx) -> usize {
		let line = self.line_of(pos);
		pos - self.content.line_to_char(line)
	}

	pub fn line_to_char(&self, line: usize) -> CharIdx {
		self.content.line_to_char(line.min(self.visible_line_count().saturating_sub(1)))
	}

	pub fn visible_line_count(&self) -> usize {
		visible_line_count(self.slice())
	}

	pub fn line_up(&self, pos: CharIdx, count: usize) -> CharIdx {
		self.move_vertical(pos, count, true)
	}

	pub fn line_down(&self, pos: CharIdx, count: usize) -> CharIdx {
		self.move_vertical(pos, count, false)
	}

	fn move_vertical(&self, pos: CharIdx, count: usize, up: bool) -> CharIdx {
		let line = self.line_of(pos);
		let col = self.col_of(pos);
		let total = self.visible_line_count();
		let new_line = if up { line.saturating_sub(count) } else { (line + count).min(total.saturating_sub(1)) };
		let line_start = self.line_to_char(new_line);
		let line_content = self.content.line(new_line);
		let line_len = line_content.len_chars();
		let has_newline = line_len > 0 && line_content.char(line_len - 1) == '\n';
		let line_end_offset = if has_newline { line_len - 1 } else { line_len };
		line_start + col.min(line_end_offset)
	}
}

/// The last position a cursor may occupy: one past the final character, or
/// at the trailing newline for lines that end with one (vi never parks the
/// cursor *after* a line's own newline).
pub fn max_cursor_pos(text: RopeSlice) -> CharIdx {
	let len = text.len_chars();
	if len == 0 {
		return 0;
	}
	if text.char(len - 1) == '\n' {
		len - 1
	} else {
		len
	}
}

/// Number of lines a cursor can land on: `Rope::len_lines` counts a
/// trailing empty line after a final `\n`, which is not a navigable line.
pub fn visible_line_count(text: RopeSlice) -> usize {
	let total = text.len_lines();
	if total > 1 && text.len_chars() > 0 && text.char(text.len_chars() - 1) == '\n' {
		total - 1
	} else {
		total
	}
}
