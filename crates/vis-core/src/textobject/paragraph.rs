//! `ip`/`ap` paragraph objects: a paragraph is a maximal run of non-blank
//! lines. `inner` stops at the blank line; `around` swallows one trailing
//! (or, failing that, leading) blank run.

use ropey::RopeSlice;
use vis_primitives::range::Range;
use vis_text::visible_line_count;

fn is_blank_line(text: RopeSlice, line: usize) -> bool {
	text.line(line).chars().all(|c| c == '\n' || c.is_whitespace())
}

pub fn select_paragraph(text: RopeSlice, pos: usize, inner: bool) -> Option<Range> {
	let total = visible_line_count(text);
	if total == 0 {
		return None;
	}
	let cursor_line = text.char_to_line(pos.min(text.len_chars().saturating_sub(1).max(0)));
	if is_blank_line(text, cursor_line) {
		return None;
	}

	let mut first = cursor_line;
	while first > 0 && !is_blank_line(text, first - 1) {
		first -= 1;
	}
	let mut last = cursor_line;
	while last + 1 < total && !is_blank_line(text, last + 1) {
		last += 1;
	}

	let start = text.line_to_char(first);

	if inner {
		let end = line_end_char(text, last);
		return Some(Range::new(start, end));
	}

	let mut trailing = last;
	while trailing + 1 < total && is_blank_line(text, trailing + 1) {
		trailing += 1;
	}
	if trailing > last {
		let end = line_end_char(text, trailing);
		return Some(Range::new(start, end));
	}

	let mut leading_first = first;
	while leading_first > 0 && is_blank_line(text, leading_first - 1) {
		leading_first -= 1;
	}
	let start = text.line_to_char(leading_first);
	let end = line_end_char(text, last);
	Some(Range::new(start, end))
}

fn line_end_char(text: RopeSlice, line: usize) -> usize {
	let line_start = text.line_to_char(line);
	let content = text.line(line);
	let len = content.len_chars();
	let has_newline = len > 0 && content.char(len - 1) == '\n';
	let content_end = line_start + if has_newline { len - 1 } else { len };
	content_end.saturating_sub(1).max(line_start)
}

#[cfg(test)]
mod tests {
	use ropey::Rope;

	use super::*;

	#[test]
	fn inner_paragraph_stops_before_blank_line() {
		let text = Rope::from("a\nb\n\nc\nd");
		let r = select_paragraph(text.slice(..), 0, true).unwrap();
		assert_eq!(&text.slice(r.min()..=r.max()).to_string(), "a\nb");
	}

	#[test]
	fn around_paragraph_swallows_trailing_blank_run() {
		let text = Rope::from("a\nb\n\nc");
		let r = select_paragraph(text.slice(..), 0, false).unwrap();
		assert_eq!(&text.slice(r.min()..=r.max()).to_string(), "a\nb\n\n");
	}

	#[test]
	fn blank_cursor_line_has_no_paragraph() {
		let text = Rope::from("a\n\nb");
		assert_eq!(select_paragraph(text.slice(..), 2, true), None);
	}
}
