//! `iw`/`aw`/`iW`/`aW` word objects.

use ropey::RopeSlice;
use vis_primitives::range::Range;

use crate::movement::WordType;

/// `inner` selects only the run of word characters under the cursor.
/// The outer (`around`) variant extends to include trailing whitespace, or
/// leading whitespace when no trailing space exists.
pub fn select_word(text: RopeSlice, range: Range, word_type: WordType, inner: bool) -> Range {
	let len = text.len_chars();
	if len == 0 {
		return range;
	}

	let pos = range.head.min(len - 1);
	let is_word = |c: char| match word_type {
		WordType::Word => crate::movement::is_word_char(c),
		WordType::WORD => !c.is_whitespace(),
	};

	let c = text.char(pos);

	if !is_word(c) {
		let mut start = pos;
		let mut end = pos;
		while start > 0 && !is_word(text.char(start - 1)) {
			start -= 1;
		}
		while end + 1 < len && !is_word(text.char(end + 1)) {
			end += 1;
		}
		return Range::new(start, end);
	}

	let mut start = pos;
	let mut end = pos;
	while start > 0 && is_word(text.char(start - 1)) {
		start -= 1;
	}
	while end + 1 < len && is_word(text.char(end + 1)) {
		end += 1;
	}

	if inner {
		return Range::new(start, end);
	}

	let mut around_end = end;
	while around_end + 1 < len {
		let next_c = text.char(around_end + 1);
		if next_c.is_whitespace() && next_c != '\n' {
			around_end += 1;
		} else {
			break;
		}
	}

	if around_end > end {
		Range::new(start, around_end)
	} else {
		let mut around_start = start;
		while around_start > 0 {
			let prev_c = text.char(around_start - 1);
			if prev_c.is_whitespace() && prev_c != '\n' {
				around_start -= 1;
			} else {
				break;
			}
		}
		Range::new(around_start, end)
	}
}
