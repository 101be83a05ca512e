//! `is`/`as` sentence objects, built on the same boundary rule as the
//! `)`/`(` sentence motions.

use ropey::RopeSlice;
use vis_primitives::range::{Direction, Range};

use crate::movement::move_to_sentence;

pub fn select_sentence(text: RopeSlice, pos: usize, inner: bool) -> Option<Range> {
	let len = text.len_chars();
	if len == 0 {
		return None;
	}
	let pos = pos.min(len - 1);

	let start = move_to_sentence(text, Range::point(pos + 1), Direction::Backward, 1, false).head;
	let mut end = move_to_sentence(text, Range::point(start), Direction::Forward, 1, false).head;
	if end <= start {
		end = len;
	}

	if inner {
		// Trim the trailing whitespace the motion swallowed.
		let mut trimmed_end = end;
		while trimmed_end > start && text.char(trimmed_end - 1).is_whitespace() {
			trimmed_end -= 1;
		}
		Some(Range::new(start, trimmed_end.saturating_sub(1).max(start)))
	} else {
		Some(Range::new(start, end.saturating_sub(1).max(start)))
	}
}
