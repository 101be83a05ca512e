//! Pure motion functions: `(text, position) -> position`, parametrised by a
//! motion kind. Every function here is total (clamped results, never a
//! failure) per the contract in SPEC_FULL.md §4.1.

mod find;
mod search;
mod word;

pub use find::{find_char, repeat_find, LastFind};
pub use search::{find_next_match, find_prev_match, word_under_cursor};
pub use word::{move_to_next_word_end, move_to_next_word_start, move_to_prev_word_start};

use ropey::RopeSlice;
use vis_primitives::range::{CharIdx, Direction, Range, TextKind};
use vis_text::{max_cursor_pos, visible_line_count};

/// vi word-boundary classification: `Word` is `alnum|_` runs, `WORD` is any
/// non-whitespace run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordType {
	Word,
	WORD,
}

pub(crate) fn is_word_char(c: char) -> bool {
	c.is_alphanumeric() || c == '_'
}

pub(crate) fn char_class(c: char, word_type: WordType) -> bool {
	match word_type {
		WordType::Word => is_word_char(c),
		WordType::WORD => !c.is_whitespace(),
	}
}

/// Every concrete motion, each carrying its default [`TextKind`] and any
/// argument it needs (a repeat count is supplied separately by the
/// dispatcher, see `vis_core::pending`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionKind {
	CharPrev,
	CharNext,
	WordStart(WordType),
	WordEnd(WordType),
	WordStartPrev(WordType),
	LineUp,
	LineDown,
	LineBegin,
	LineFirstNonBlank,
	LineLastNonBlank,
	LineEnd,
	ParagraphPrev,
	ParagraphNext,
	SentencePrev,
	SentenceNext,
	BracketMatch,
	FindCharForward { till: bool },
	FindCharBackward { till: bool },
	RepeatFindLast,
	RepeatFindLastReverse,
	SearchNext,
	SearchPrev,
	FileBegin,
	GotoLine,
	FileEnd,
	/// Jumplist/changelist navigation (`C-o`/`C-i`, `g;`/`g,`). Resolved
	/// directly against `Editor`'s history lists rather than the text, so
	/// `Editor::eval_motion` never reaches these arms — see
	/// `Editor::run_list_motion`.
	JumpPrev,
	JumpNext,
	ChangePrev,
	ChangeNext,
}

impl MotionKind {
	/// The kind an operator applies when the user has not overridden it via
	/// `v`/`V` in operator-pending mode (SPEC_FULL.md §4.5).
	pub fn default_text_kind(&self) -> TextKind {
		use MotionKind::*;
		match self {
			LineUp | LineDown | LineBegin | LineFirstNonBlank | LineLastNonBlank | ParagraphPrev | ParagraphNext | FileBegin | GotoLine | FileEnd => {
				TextKind::Linewise
			}
			_ => TextKind::Charwise,
		}
	}

	/// Whether an operator's range should include the character the motion
	/// landed on. Most motions are exclusive (the operator stops just
	/// before the new head); a handful of "land on a specific character"
	/// motions (`e`, `f`, `F`, `%`) are inclusive, matching vi.
	pub fn is_inclusive(&self) -> bool {
		use MotionKind::*;
		matches!(self, WordEnd(_) | BracketMatch | FindCharForward { till: false } | FindCharBackward { till: false })
	}
}

/// Builds the result range for a motion that moves the cursor without
/// creating a new selection span (`j`, `0`, `gg`, …): collapses to a point
/// unless `extend` (visual mode / Shift) is set.
pub(crate) fn make_range(range: Range, new_head: CharIdx, extend: bool) -> Range {
	if extend { Range::new(range.anchor, new_head) } else { Range::point(new_head) }
}

/// Builds the result range for a motion that inherently creates a span from
/// the old position to the new one (`w`, `f`, …): anchors at the old head
/// when not extending, so the operator sees `[old_head, new_head)`.
pub(crate) fn make_range_select(range: Range, new_head: CharIdx, extend: bool) -> Range {
	if extend { Range::new(range.anchor, new_head) } else { Range::new(range.head, new_head) }
}

pub fn move_horizontally(text: RopeSlice, range: Range, direction: Direction, count: usize, extend: bool) -> Range {
	use vis_primitives::graphemes::{next_grapheme_boundary, prev_grapheme_boundary};
	let max_pos = max_cursor_pos(text);
	let mut pos = range.head;
	match direction {
		Direction::Forward => {
			for _ in 0..count {
				let next = next_grapheme_boundary(text, pos);
				if next > max_pos {
					break;
				}
				pos = next;
			}
		}
		Direction::Backward => {
			for _ in 0..count {
				pos = prev_grapheme_boundary(text, pos);
			}
		}
	}
	make_range(range, pos, extend)
}

pub fn move_vertically(text: RopeSlice, range: Range, direction: Direction, count: usize, extend: bool) -> Range {
	let pos = range.head;
	let line = text.char_to_line(pos);
	let line_start = text.line_to_char(line);
	let col = pos - line_start;

	let total_lines = visible_line_count(text);
	let new_line = match direction {
		Direction::Forward => (line + count).min(total_lines.saturating_sub(1)),
		Direction::Backward => line.saturating_sub(count),
	};

	let new_line_start = text.line_to_char(new_line);
	let new_line_content = text.line(new_line);
	let new_line_len = new_line_content.len_chars();
	let has_newline = new_line_len > 0 && new_line_content.char(new_line_len - 1) == '\n';
	let line_end_offset = if has_newline { new_line_len - 1 } else { new_line_len };

	let new_col = col.min(line_end_offset);
	make_range(range, new_line_start + new_col, extend)
}

pub fn move_to_line_start(text: RopeSlice, range: Range, extend: bool) -> Range {
	let line = text.char_to_line(range.head);
	make_range(range, text.line_to_char(line), extend)
}

pub fn move_to_line_end(text: RopeSlice, range: Range, extend: bool) -> Range {
	let line = text.char_to_line(range.head);
	let line_start = text.line_to_char(line);
	let line_content = text.line(line);
	let line_len = line_content.len_chars();
	let has_newline = line_len > 0 && line_content.char(line_len - 1) == '\n';
	let line_end = line_start + if has_newline { line_len - 1 } else { line_len };
	make_range(range, line_end, extend)
}

pub fn move_to_first_nonwhitespace(text: RopeSlice, range: Range, extend: bool) -> Range {
	let line = text.char_to_line(range.head);
	let line_start = text.line_to_char(line);
	let line_text = text.line(line);

	let mut first_non_ws = line_start;
	for (i, ch) in line_text.chars().enumerate() {
		if !ch.is_whitespace() {
			first_non_ws = line_start + i;
			break;
		}
	}
	make_range(range, first_non_ws, extend)
}

/// Last non-blank character on the current line (`g_`); defaults to the
/// line start if the line is entirely blank.
pub fn move_to_last_nonwhitespace(text: RopeSlice, range: Range, extend: bool) -> Range {
	let line = text.char_to_line(range.head);
	let line_start = text.line_to_char(line);
	let line_text = text.line(line);
	let chars: Vec<char> = line_text.chars().collect();

	let mut last_non_ws = line_start;
	for (i, ch) in chars.iter().enumerate() {
		if !ch.is_whitespace() {
			last_non_ws = line_start + i;
		}
	}
	make_range(range, last_non_ws, extend)
}

pub fn move_to_document_start(_text: RopeSlice, range: Range, extend: bool) -> Range {
	make_range(range, 0, extend)
}

pub fn move_to_document_end(text: RopeSlice, range: Range, extend: bool) -> Range {
	make_range(range, max_cursor_pos(text), extend)
}

/// Goes to the first non-blank of an absolute 1-indexed line number,
/// clamped to the document.
pub fn move_to_line(text: RopeSlice, range: Range, line_number_1based: usize, extend: bool) -> Range {
	let total = visible_line_count(text);
	let line = line_number_1based.saturating_sub(1).min(total.saturating_sub(1));
	let line_start = text.line_to_char(line);
	let target = move_to_first_nonwhitespace(text, Range::point(line_start), false).head;
	make_range(range, target, extend)
}

/// Moves to the next/previous paragraph boundary: a blank line, or the
/// start/end of the document if none remains.
pub fn move_to_paragraph(text: RopeSlice, range: Range, direction: Direction, count: usize, extend: bool) -> Range {
	let total = visible_line_count(text);
	let mut line = text.char_to_line(range.head);

	let is_blank = |l: usize| -> bool {
		let content = text.line(l);
		content.chars().all(|c| c == '\n' || c.is_whitespace())
	};

	for _ in 0..count {
		match direction {
			Direction::Forward => {
				line += 1;
				while line < total && !is_blank(line) {
					line += 1;
				}
				if line >= total {
					line = total.saturating_sub(1);
					break;
				}
			}
			Direction::Backward => {
				line = line.saturating_sub(1);
				while line > 0 && !is_blank(line) {
					line -= 1;
				}
			}
		}
	}

	let pos = text.line_to_char(line.min(total.saturating_sub(1)));
	make_range(range, pos, extend)
}

/// Moves to the next/previous sentence boundary: `.`, `!`, `?` followed by
/// whitespace (or end of document), matching vi's simple sentence grammar.
pub fn move_to_sentence(text: RopeSlice, range: Range, direction: Direction, count: usize, extend: bool) -> Range {
	let len = text.len_chars();
	let chars: Vec<char> = text.chars().collect();
	let is_end_punct = |c: char| matches!(c, '.' | '!' | '?');

	let mut pos = range.head;
	for _ in 0..count {
		match direction {
			Direction::Forward => {
				let mut i = pos;
				while i < len {
					if is_end_punct(chars[i]) {
						let mut j = i + 1;
						while j < len && (chars[j] == '"' || chars[j] == ')' || chars[j] == '\'') {
							j += 1;
						}
						if j >= len || chars[j].is_whitespace() {
							while j < len && chars[j].is_whitespace() {
								j += 1;
							}
							pos = j.min(len);
							break;
						}
					}
					i += 1;
				}
				if i >= len {
					pos = len;
				}
			}
			Direction::Backward => {
				let mut i = pos.saturating_sub(1);
				// Skip back past whitespace immediately before us.
				while i > 0 && chars[i].is_whitespace() {
					i -= 1;
				}
				// Walk back to the punctuation that ends the previous sentence.
				let mut boundary = 0;
				let mut k = 0;
				while k < i {
					if is_end_punct(chars[k]) {
						let mut j = k + 1;
						while j < len && (chars[j] == '"' || chars[j] == ')' || chars[j] == '\'') {
							j += 1;
						}
						if j >= len || chars[j].is_whitespace() {
							while j < len && chars[j].is_whitespace() {
								j += 1;
							}
							boundary = j;
						}
					}
					k += 1;
				}
				pos = boundary;
			}
		}
	}

	make_range(range, pos, extend)
}

/// Finds the position of the matching bracket for the one under/after the
/// cursor on the current line (`%`). Returns the cursor unchanged (a no-op
/// motion) if no bracket is found, per the "motions are total" contract.
pub fn move_to_matching_bracket(text: RopeSlice, range: Range, extend: bool) -> Range {
	const PAIRS: [(char, char); 4] = [('(', ')'), ('[', ']'), ('{', '}'), ('<', '>')];
	let len = text.len_chars();
	if len == 0 {
		return range;
	}

	let line = text.char_to_line(range.head);
	let line_start = text.line_to_char(line);
	let line_content = text.line(line);
	let line_len = line_content.len_chars();

	let mut found = None;
	for offset in 0..line_len {
		let idx = line_start + offset;
		if idx < range.head {
			continue;
		}
		let c = text.char(idx);
		if let Some(pair) = PAIRS.iter().find(|(o, c2)| *o == c || *c2 == c) {
			found = Some((idx, c, *pair));
			break;
		}
	}

	let Some((idx, c, (open, close))) = found else { return range };

	let new_pos = if c == open {
		let mut depth = 1i32;
		let mut i = idx + 1;
		let mut result = None;
		while i < len {
			let ch = text.char(i);
			if ch == open {
				depth += 1;
			} else if ch == close {
				depth -= 1;
				if depth == 0 {
					result = Some(i);
					break;
				}
			}
			i += 1;
		}
		result
	} else {
		let mut depth = 1i32;
		let mut result = None;
		if idx > 0 {
			let mut i = idx;
			loop {
				i -= 1;
				let ch = text.char(i);
				if ch == close {
					depth += 1;
				} else if ch == open {
					depth -= 1;
					if depth == 0 {
						result = Some(i);
						break;
					}
				}
				if i == 0 {
					break;
				}
			}
		}
		result
	};

	match new_pos {
		Some(p) => make_range(range, p, extend),
		None => range,
	}
}

#[cfg(test)]
mod tests;
