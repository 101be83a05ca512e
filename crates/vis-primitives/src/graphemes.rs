//! Grapheme-cluster-aware cursor movement and char/byte offset conversion.
//!
//! Positions elsewhere in this workspace are char indices; `GraphemeCursor`
//! from `unicode-segmentation` operates on byte offsets into a `&str`, so
//! these helpers bridge the two. The conversion materializes the slice into
//! a `String`, which is fine for the line-sized slices motions actually
//! operate on but would need revisiting for multi-megabyte single lines.

use ropey::RopeSlice;
use unicode_segmentation::GraphemeCursor;

use crate::range::CharIdx;

/// Converts a byte offset within `s` to a char offset.
pub fn byte_to_char(s: &str, byte_idx: usize) -> CharIdx {
	s[..byte_idx].chars().count()
}

/// Converts a char offset within `s` to a byte offset.
pub fn char_to_byte(s: &str, char_idx: CharIdx) -> usize {
	s.char_indices().nth(char_idx).map(|(b, _)| b).unwrap_or(s.len())
}

/// Returns the char index of the next grapheme-cluster boundary at or after
/// `char_idx`, clamped to `slice.len_chars()`.
pub fn next_grapheme_boundary(slice: RopeSlice, char_idx: CharIdx) -> CharIdx {
	let len_chars = slice.len_chars();
	if char_idx >= len_chars {
		return len_chars;
	}
	let text: String = slice.chars().collect();
	let byte_idx = char_to_byte(&text, char_idx);
	let mut cursor = GraphemeCursor::new(byte_idx, text.len(), true);
	match cursor.next_boundary(&text, 0) {
		Ok(Some(b)) => byte_to_char(&text, b),
		_ => len_chars,
	}
}

/// Returns the char index of the previous grapheme-cluster boundary before
/// `char_idx`, clamped to `0`.
pub fn prev_grapheme_boundary(slice: RopeSlice, char_idx: CharIdx) -> CharIdx {
	if char_idx == 0 {
		return 0;
	}
	let text: String = slice.chars().collect();
	let byte_idx = char_to_byte(&text, char_idx.min(text.chars().count()));
	let mut cursor = GraphemeCursor::new(byte_idx, text.len(), true);
	match cursor.prev_boundary(&text, 0) {
		Ok(Some(b)) => byte_to_char(&text, b),
		_ => 0,
	}
}
