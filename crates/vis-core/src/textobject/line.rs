//! The current-line text object (used by the `cc`/`dd`/`yy` operator
//! doubling shortcut as well as directly as `il`/`al` if bound).

use ropey::RopeSlice;
use vis_primitives::range::Range;

/// `inner` excludes the trailing newline; `around` includes it so a
/// delete removes the line itself, not just its content.
pub fn select_line(text: RopeSlice, pos: usize, inner: bool) -> Range {
	let len = text.len_chars();
	let line = text.char_to_line(pos.min(len.saturating_sub(1).max(0)));
	let line_start = text.line_to_char(line);
	let content = text.line(line);
	let content_len = content.len_chars();
	let has_newline = content_len > 0 && content.char(content_len - 1) == '\n';
	let content_end = line_start + if has_newline { content_len - 1 } else { content_len };

	if inner || !has_newline {
		Range::new(line_start, content_end.saturating_sub(1).max(line_start))
	} else {
		Range::new(line_start, content_end) // includes the newline index itself
	}
}
