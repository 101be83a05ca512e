//! Regex-based search motions. Reuses whatever pattern the dispatcher last
//! compiled (`InputHandler::last_search` in the teacher) — this module only
//! does the positional search, not pattern storage.

use regex::Regex;
use ropey::RopeSlice;
use vis_primitives::range::{CharIdx, Range};

/// Finds the next match of `re` strictly after `pos`, wrapping to the start
/// of the document if none is found before the end.
pub fn find_next_match(text: RopeSlice, re: &Regex, pos: CharIdx) -> Option<Range> {
	let text_str: String = text.chars().collect();
	let byte_pos = char_to_byte(&text_str, pos + 1);

	if byte_pos <= text_str.len()
		&& let Some(m) = re.find(&text_str[byte_pos..])
	{
		let start = byte_to_char(&text_str, byte_pos + m.start());
		let end = byte_to_char(&text_str, byte_pos + m.end());
		return Some(Range::new(start, end));
	}

	re.find(&text_str).map(|m| Range::new(byte_to_char(&text_str, m.start()), byte_to_char(&text_str, m.end())))
}

/// Finds the previous match strictly before `pos`, wrapping to the end of
/// the document if none is found before it.
pub fn find_prev_match(text: RopeSlice, re: &Regex, pos: CharIdx) -> Option<Range> {
	let text_str: String = text.chars().collect();

	let mut last_before = None;
	for m in re.find_iter(&text_str) {
		let start = byte_to_char(&text_str, m.start());
		if start < pos {
			last_before = Some(Range::new(start, byte_to_char(&text_str, m.end())));
		} else {
			break;
		}
	}
	if last_before.is_some() {
		return last_before;
	}

	re.find_iter(&text_str).last().map(|m| Range::new(byte_to_char(&text_str, m.start()), byte_to_char(&text_str, m.end())))
}

/// Returns the word under the cursor (by the `Word` character class),
/// quoted for literal regex matching (`*`/`#`).
pub fn word_under_cursor(text: RopeSlice, pos: CharIdx) -> Option<String> {
	use super::{is_word_char, WordType};
	let len = text.len_chars();
	if len == 0 {
		return None;
	}
	let pos = pos.min(len - 1);
	if !is_word_char(text.char(pos)) {
		return None;
	}
	let mut start = pos;
	let mut end = pos;
	while start > 0 && is_word_char(text.char(start - 1)) {
		start -= 1;
	}
	while end + 1 < len && is_word_char(text.char(end + 1)) {
		end += 1;
	}
	let _ = WordType::Word;
	Some(text.slice(start..=end).to_string())
}

fn byte_to_char(s: &str, byte_idx: usize) -> CharIdx {
	s[..byte_idx].chars().count()
}

fn char_to_byte(s: &str, char_idx: CharIdx) -> usize {
	s.char_indices().nth(char_idx).map(|(b, _)| b).unwrap_or(s.len())
}
