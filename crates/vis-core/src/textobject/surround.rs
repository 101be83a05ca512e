//! Bracket-pair and quote text objects: `i(`/`a(`, `i"`/`a"`, etc.
//!
//! `inner` selects the content between delimiters (exclusive); `around`
//! includes the delimiters themselves. Returns `None` when no matching
//! delimiter pair encloses the cursor.

use ropey::RopeSlice;
use vis_primitives::range::Range;

/// Resolves a surround object. For symmetric delimiters (quotes, `open ==
/// close`) the search is confined to the current line, matching vi: quotes
/// don't span lines. Bracket pairs search the whole buffer and track
/// nesting depth.
pub fn select_surround(text: RopeSlice, range: Range, open: char, close: char, inner: bool) -> Option<Range> {
	if open == close {
		select_quote(text, range, open, inner)
	} else {
		select_bracket(text, range, open, close, inner)
	}
}

fn select_bracket(text: RopeSlice, range: Range, open: char, close: char, inner: bool) -> Option<Range> {
	let len = text.len_chars();
	if len == 0 {
		return None;
	}

	let pos = range.head.min(len - 1);
	let mut open_pos = None;

	if text.char(pos) == open {
		open_pos = Some(pos);
	} else {
		let mut depth = 0i32;
		let mut search_pos = pos;
		if text.char(pos) == close {
			depth = 1;
		}
		while search_pos > 0 {
			search_pos -= 1;
			let c = text.char(search_pos);
			if c == close {
				depth += 1;
			} else if c == open {
				if depth == 0 {
					open_pos = Some(search_pos);
					break;
				}
				depth -= 1;
			}
		}
	}

	let open_pos = open_pos?;

	let mut close_pos = None;
	let mut depth = 0i32;
	let mut search_pos = open_pos + 1;
	while search_pos < len {
		let c = text.char(search_pos);
		if c == open {
			depth += 1;
		} else if c == close {
			if depth == 0 {
				close_pos = Some(search_pos);
				break;
			}
			depth -= 1;
		}
		search_pos += 1;
	}
	let close_pos = close_pos?;

	Some(if inner {
		if close_pos > open_pos + 1 {
			Range::new(open_pos + 1, close_pos - 1)
		} else {
			Range::point(open_pos + 1)
		}
	} else {
		Range::new(open_pos, close_pos)
	})
}

fn select_quote(text: RopeSlice, range: Range, quote: char, inner: bool) -> Option<Range> {
	let len = text.len_chars();
	if len == 0 {
		return None;
	}
	let pos = range.head.min(len - 1);

	let line = text.char_to_line(pos);
	let line_start = text.line_to_char(line);
	let line_content = text.line(line);
	let line_len = line_content.len_chars();
	let has_newline = line_len > 0 && line_content.char(line_len - 1) == '\n';
	let line_end = line_start + if has_newline { line_len - 1 } else { line_len };

	let mut quote_positions = Vec::new();
	let mut i = line_start;
	while i < line_end {
		if text.char(i) == quote {
			quote_positions.push(i);
		}
		i += 1;
	}

	for pair in quote_positions.chunks_exact(2) {
		let (open_pos, close_pos) = (pair[0], pair[1]);
		if pos >= open_pos && pos <= close_pos {
			return Some(if inner {
				if close_pos > open_pos + 1 {
					Range::new(open_pos + 1, close_pos - 1)
				} else {
					Range::point(open_pos + 1)
				}
			} else {
				Range::new(open_pos, close_pos)
			});
		}
	}
	None
}
