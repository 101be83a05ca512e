//! The view and cursor set: §4.2. A view owns an ordered, non-overlapping
//! list of cursors with a designated primary, plus the scroll position the
//! UI layer reads. Everything here is pure bookkeeping over `CharIdx`
//! positions — no text mutation happens in this module.

use ropey::RopeSlice;
use smallvec::{smallvec, SmallVec};
use tracing::trace;
use vis_primitives::range::{CharIdx, Range};
use vis_text::Buffer;

/// One insertion point, with an optional live selection and the selection
/// most recently cleared from it (restorable with `cursor_selection_restore`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
	pub pos: CharIdx,
	pub selection: Option<Range>,
	pub saved_selection: Option<Range>,
}

impl Cursor {
	pub fn new(pos: CharIdx) -> Self {
		Self { pos, selection: None, saved_selection: None }
	}
}

/// A window onto a buffer: the cursor set plus the scroll anchor. `width`
/// and `height` are supplied by the UI layer and only consulted by
/// `cursors_align`-adjacent scrolling, never by this crate's own logic.
pub struct View {
	cursors: SmallVec<[Cursor; 1]>,
	primary: usize,
	pub top_line: usize,
	pub width: usize,
	pub height: usize,
}

impl View {
	pub fn new(pos: CharIdx) -> Self {
		Self { cursors: smallvec![Cursor::new(pos)], primary: 0, top_line: 0, width: 80, height: 24 }
	}

	pub fn cursors(&self) -> &[Cursor] {
		&self.cursors
	}

	pub fn cursors_mut(&mut self) -> &mut [Cursor] {
		&mut self.cursors
	}

	pub fn primary(&self) -> &Cursor {
		&self.cursors[self.primary]
	}

	pub fn primary_mut(&mut self) -> &mut Cursor {
		&mut self.cursors[self.primary]
	}

	pub fn primary_index(&self) -> usize {
		self.primary
	}

	pub fn len(&self) -> usize {
		self.cursors.len()
	}

	/// `cursor_new`: adds a cursor at the current primary's position.
	/// Returns `None` if a *different* cursor already sits there.
	pub fn cursor_new(&mut self) -> Option<usize> {
		let pos = self.primary().pos;
		let primary = self.primary;
		if self.cursors.iter().enumerate().any(|(i, c)| i != primary && c.pos == pos) {
			return None;
		}
		self.cursors.push(Cursor::new(pos));
		self.sort_and_merge();
		self.cursors.iter().position(|c| c.pos == pos)
	}

	/// `cursor_dispose`: removes the cursor at `idx`, keeping at least one.
	/// Disposing the primary promotes the next cursor in order.
	pub fn cursor_dispose(&mut self, idx: usize) {
		if self.cursors.len() <= 1 || idx >= self.cursors.len() {
			return;
		}
		self.cursors.remove(idx);
		if self.primary >= self.cursors.len() {
			self.primary = self.cursors.len() - 1;
		} else if idx < self.primary {
			self.primary -= 1;
		}
	}

	pub fn cursor_selection_set(&mut self, idx: usize, range: Range) {
		if let Some(c) = self.cursors.get_mut(idx) {
			c.selection = Some(range);
		}
		self.sort_and_merge();
	}

	pub fn cursor_selection_get(&self, idx: usize) -> Option<Range> {
		self.cursors.get(idx).and_then(|c| c.selection)
	}

	pub fn cursor_selection_swap(&mut self, idx: usize) {
		if let Some(c) = self.cursors.get_mut(idx) {
			if let Some(r) = c.selection.as_mut() {
				*r = r.swap();
			}
		}
	}

	/// Clears the selection, stashing it as `saved_selection`.
	pub fn cursor_selection_clear(&mut self, idx: usize) {
		if let Some(c) = self.cursors.get_mut(idx) {
			if let Some(r) = c.selection.take() {
				c.saved_selection = Some(r);
			}
		}
	}

	pub fn cursor_selection_restore(&mut self, idx: usize) {
		if let Some(c) = self.cursors.get_mut(idx) {
			if let Some(r) = c.saved_selection {
				c.selection = Some(r);
			}
		}
	}

	/// `cursors_clear`: with multiple cursors, drop every non-primary one;
	/// otherwise just clear the primary's selection.
	pub fn cursors_clear(&mut self) {
		if self.cursors.len() > 1 {
			let primary = self.cursors[self.primary];
			self.cursors = smallvec![primary];
			self.primary = 0;
		} else {
			self.cursor_selection_clear(0);
		}
	}

	/// `cursors_align`: move every cursor to the minimum column among them,
	/// on each cursor's own line. Pure navigation — clamps on short lines.
	pub fn cursors_align(&mut self, buffer: &Buffer) {
		if self.cursors.len() < 2 {
			return;
		}
		let min_col = self.cursors.iter().map(|c| buffer.col_of(c.pos)).min().unwrap_or(0);
		for c in &mut self.cursors {
			let line = buffer.line_of(c.pos);
			let line_start = buffer.line_to_char(line);
			let next_line_start = buffer.line_to_char(line + 1);
			let line_len = if next_line_start > line_start { next_line_start - line_start } else { buffer.len_chars() - line_start };
			c.pos = line_start + min_col.min(line_len);
		}
		self.sort_and_merge();
	}

	/// `cursor_select_word`: for cursors without a selection that currently
	/// sit over a word, select that word. Returns whether any selection was
	/// made (the mode engine switches to Visual when it is).
	pub fn cursor_select_word(&mut self, text: RopeSlice) -> bool {
		let len = text.len_chars();
		let mut changed = false;
		for c in &mut self.cursors {
			if c.selection.is_some() || c.pos >= len {
				continue;
			}
			if !crate::movement::is_word_char(text.char(c.pos)) {
				continue;
			}
			let range = crate::textobject::select_word(text, Range::point(c.pos), crate::movement::WordType::Word, true);
			c.selection = Some(range);
			changed = true;
		}
		if changed {
			self.sort_and_merge();
		}
		changed
	}

	/// `cursor_select_next`: search forward of the primary's selection end
	/// for the next literal occurrence of its text, case-sensitively — this
	/// never goes through the regex search path, so search case-sensitivity
	/// settings do not apply here (decided and pinned by a test). The new
	/// cursor becomes primary, so a repeated call walks forward through
	/// occurrences one at a time instead of re-finding the same one.
	pub fn cursor_select_next(&mut self, text: RopeSlice) -> bool {
		let Some(sel) = self.primary().selection else { return false };
		let needle = text.slice(sel.min()..=sel.max()).to_string();
		if needle.is_empty() {
			return false;
		}
		let haystack = text.to_string();
		let start_byte = {
			let mut acc = 0usize;
			for (i, _) in haystack.char_indices().take(sel.max() + 1) {
				acc = i;
			}
			acc
		};
		let search_from = start_byte + haystack[start_byte..].chars().next().map(|c| c.len_utf8()).unwrap_or(0);
		if let Some(found_byte) = haystack[search_from..].find(&needle) {
			let abs_byte = search_from + found_byte;
			let char_start = haystack[..abs_byte].chars().count();
			let char_end = char_start + needle.chars().count() - 1;
			self.cursors.push(Cursor { pos: char_end, selection: Some(Range::new(char_start, char_end)), saved_selection: None });
			self.primary = self.cursors.len() - 1;
			self.sort_and_merge();
			trace!(char_start, char_end, "view.cursor_select_next");
			true
		} else {
			false
		}
	}

	/// `cursor_select_skip`: `cursor_select_next` then drop the old primary.
	pub fn cursor_select_skip(&mut self, text: RopeSlice) -> bool {
		let old_primary_pos = self.primary().pos;
		if !self.cursor_select_next(text) {
			return false;
		}
		if let Some(idx) = self.cursors.iter().position(|c| c.pos == old_primary_pos) {
			self.cursor_dispose(idx);
		}
		true
	}

	/// Re-sorts and merges the cursor set after a dispatcher-level batch
	/// mutation (multiple cursors repositioned or re-selected outside the
	/// per-cursor helpers above, which already call this internally).
	pub fn normalize(&mut self) {
		self.sort_and_merge();
	}

	/// Restores the cursors-never-overlap invariant: sorts by position and
	/// merges any cursors whose selections now touch or overlap, keeping the
	/// primary alive across the merge.
	fn sort_and_merge(&mut self) {
		if self.cursors.is_empty() {
			self.cursors.push(Cursor::new(0));
			self.primary = 0;
			return;
		}
		let primary_pos = self.cursors[self.primary].pos;
		self.cursors.sort_by_key(|c| c.pos);

		let mut merged: SmallVec<[Cursor; 1]> = SmallVec::with_capacity(self.cursors.len());
		for c in self.cursors.drain(..) {
			if let Some(last) = merged.last_mut() {
				let overlap = match (last.selection, c.selection) {
					(Some(a), Some(b)) => a.overlaps(&b),
					_ => false,
				};
				if overlap {
					*last = c;
					continue;
				}
			}
			merged.push(c);
		}
		self.cursors = merged;
		self.primary = self
			.cursors
			.iter()
			.position(|c| c.pos == primary_pos)
			.unwrap_or(0);
	}
}

#[cfg(test)]
mod tests;
