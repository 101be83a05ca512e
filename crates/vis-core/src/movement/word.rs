//! Word/WORD movement (`w`, `b`, `e`).

use ropey::RopeSlice;
use vis_primitives::range::{CharIdx, Range};

use super::{char_class, make_range_select, WordType};

pub fn move_to_next_word_start(text: RopeSlice, range: Range, count: usize, word_type: WordType, extend: bool) -> Range {
	let len = text.len_chars();
	if len == 0 {
		return range;
	}

	let mut pos: CharIdx = range.head;

	for _ in 0..count {
		if pos >= len {
			break;
		}

		let start_is_word = char_class(text.char(pos.min(len - 1)), word_type);

		while pos < len && char_class(text.char(pos), word_type) == start_is_word {
			pos += 1;
		}

		while pos < len && text.char(pos).is_whitespace() {
			if text.char(pos) == '\n' {
				pos += 1;
				break;
			}
			pos += 1;
		}
	}

	make_range_select(range, pos.min(len), extend)
}

pub fn move_to_next_word_end(text: RopeSlice, range: Range, count: usize, word_type: WordType, extend: bool) -> Range {
	let len = text.len_chars();
	if len == 0 {
		return range;
	}

	let mut pos: CharIdx = range.head;

	for _ in 0..count {
		if pos < len {
			pos += 1;
		}

		while pos < len && text.char(pos).is_whitespace() {
			pos += 1;
		}

		if pos >= len {
			break;
		}

		let start_is_word = char_class(text.char(pos), word_type);
		while pos < len && char_class(text.char(pos), word_type) == start_is_word {
			pos += 1;
		}
	}

	let end_pos = pos.saturating_sub(1).min(len.saturating_sub(1));
	make_range_select(range, end_pos, extend)
}

pub fn move_to_prev_word_start(text: RopeSlice, range: Range, count: usize, word_type: WordType, extend: bool) -> Range {
	let len = text.len_chars();
	if len == 0 {
		return range;
	}

	let mut pos: CharIdx = range.head;

	for _ in 0..count {
		pos = pos.saturating_sub(1);

		while pos > 0 && text.char(pos).is_whitespace() {
			pos -= 1;
		}

		if pos == 0 {
			break;
		}

		let start_is_word = char_class(text.char(pos), word_type);
		while pos > 0 && char_class(text.char(pos - 1), word_type) == start_is_word {
			pos -= 1;
		}
	}

	make_range_select(range, pos, extend)
}
