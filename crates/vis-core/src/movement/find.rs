//! `f`/`F`/`t`/`T` character search on the current line, and the `;`/`,`
//! repeat-last-find motions.

use ropey::RopeSlice;
use vis_primitives::range::{CharIdx, Direction, Range};

use super::make_range_select;

/// A remembered `f`/`F`/`t`/`T` invocation, replayed by `;` and `,`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LastFind {
	pub ch: char,
	pub direction: Direction,
	/// `t`/`T` stop one short of the match; `f`/`F` land on it.
	pub till: bool,
}

/// Finds `ch` on the current line in `direction`, stopping `count` matches
/// away. `till` lands one character short of the match (`t`/`T`).
pub fn find_char(text: RopeSlice, range: Range, ch: char, direction: Direction, till: bool, count: usize, extend: bool) -> Range {
	let pos = range.head;
	let line = text.char_to_line(pos);
	let line_start = text.line_to_char(line);
	let line_content = text.line(line);
	let line_len = line_content.len_chars();
	let has_newline = line_len > 0 && line_content.char(line_len - 1) == '\n';
	let line_end: CharIdx = line_start + if has_newline { line_len - 1 } else { line_len };

	let mut cursor = pos;
	let mut remaining = count;
	let mut last_match = None;

	match direction {
		Direction::Forward => {
			let mut i = cursor + 1;
			while i < line_end {
				if text.char(i) == ch {
					remaining -= 1;
					if remaining == 0 {
						last_match = Some(i);
						break;
					}
				}
				i += 1;
			}
			cursor = last_match.map(|m| if till { m - 1 } else { m }).unwrap_or(pos);
		}
		Direction::Backward => {
			if cursor > line_start {
				let mut i = cursor;
				while i > line_start {
					i -= 1;
					if text.char(i) == ch {
						remaining -= 1;
						if remaining == 0 {
							last_match = Some(i);
							break;
						}
					}
				}
			}
			cursor = last_match.map(|m| if till { m + 1 } else { m }).unwrap_or(pos);
		}
	}

	make_range_select(range, cursor, extend)
}

/// Replays `last` (`;`), or its mirror image (`,`) when `reverse` is set.
pub fn repeat_find(text: RopeSlice, range: Range, last: LastFind, reverse: bool, count: usize, extend: bool) -> Range {
	let direction = if reverse {
		match last.direction {
			Direction::Forward => Direction::Backward,
			Direction::Backward => Direction::Forward,
		}
	} else {
		last.direction
	};
	find_char(text, range, last.ch, direction, last.till, count, extend)
}
