//! `i{`/`a{`-style function objects for C-like bodies: a brace block
//! together with the header line that precedes it.

use ropey::RopeSlice;
use vis_primitives::range::Range;

use super::surround::select_surround;

/// `inner` is the brace-delimited body; `around` additionally swallows the
/// header line the opening brace sits on (the `fn foo() {` line).
pub fn select_function(text: RopeSlice, pos: usize, inner: bool) -> Option<Range> {
	let outer = select_surround(text, Range::point(pos), '{', '}', false)?;
	let open_pos = outer.min();
	let close_pos = outer.max();

	if inner {
		return Some(if close_pos > open_pos + 1 {
			Range::new(open_pos + 1, close_pos - 1)
		} else {
			Range::point(open_pos + 1)
		});
	}

	let line = text.char_to_line(open_pos);
	let header_start = text.line_to_char(line);
	Some(Range::new(header_start, close_pos))
}
