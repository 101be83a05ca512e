//! The whole-buffer text object, `ig`/`ag` in this grammar — there is no
//! inner/around distinction since there's nothing to exclude.

use ropey::RopeSlice;
use vis_primitives::range::Range;

pub fn select_buffer(text: RopeSlice, _inner: bool) -> Option<Range> {
	let len = text.len_chars();
	if len == 0 {
		return None;
	}
	Some(Range::new(0, len - 1))
}
