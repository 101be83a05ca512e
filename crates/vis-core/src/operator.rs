//! The operator set: §4.5. Each operator consumes the ranges its fan-out
//! computed (one per cursor, in descending start order so earlier indices
//! stay valid across edits) and performs its effect. `change` additionally
//! asks the caller to switch to `Insert` by returning `Some(ModeKind::Insert)`.

use ropey::RopeSlice;
use vis_primitives::mode::ModeKind;
use vis_primitives::range::{CharIdx, Range, TextKind};
use vis_text::Buffer;

use crate::action::OperatorKind;
use crate::error::CoreError;
use crate::marks::MarkStore;
use crate::registers::{Register, RegisterStore};
use crate::view::View;

/// One cursor's contribution to a fanned-out operator: its view index, the
/// range the motion/text-object produced, and whether that range should be
/// widened to whole lines before the operator runs.
pub struct CursorEdit {
	pub view_index: usize,
	pub range: Range,
	pub kind: TextKind,
}

fn line_span(text: RopeSlice, min: CharIdx, max: CharIdx) -> (CharIdx, CharIdx) {
	let start_line = text.char_to_line(min);
	let end_line = text.char_to_line(max);
	let start = text.line_to_char(start_line);
	let end = text.line_to_char((end_line + 1).min(text.len_lines())).min(text.len_chars());
	(start, end)
}

fn span_for(buffer: &Buffer, edit: &CursorEdit) -> (CharIdx, CharIdx) {
	let (min, max) = edit.range.to_span();
	match edit.kind {
		TextKind::Charwise => (min, (max + 1).min(buffer.len_chars())),
		TextKind::Linewise => line_span(buffer.slice(), min, max),
	}
}

/// Applies `op` across every cursor's edit, descending by start so that
/// earlier positions are untouched until their own turn. Returns the mode
/// the caller should switch to afterward, if any (`change` -> `Insert`).
pub fn apply(
	buffer: &mut Buffer,
	view: &mut View,
	registers: &mut RegisterStore,
	marks: &mut MarkStore,
	op: OperatorKind,
	register_id: char,
	mut edits: Vec<CursorEdit>,
) -> Result<Option<ModeKind>, CoreError> {
	edits.sort_by_key(|e| std::cmp::Reverse(e.range.min()));
	if edits.is_empty() {
		return Err(CoreError::EmptyRange);
	}

	let mut yanked = Vec::with_capacity(edits.len());
	let mut enter_insert = false;
	let cursor_pos = view.primary().pos;
	buffer.begin_group(cursor_pos);

	let edit_count = edits.len();
	for (i, edit) in edits.iter().enumerate() {
		let (start, end) = span_for(buffer, edit);
		if start >= end && !matches!(op, OperatorKind::PutBefore | OperatorKind::PutAfter | OperatorKind::PutBeforeEnd | OperatorKind::PutAfterEnd | OperatorKind::CursorSol | OperatorKind::CursorEol) {
			continue;
		}

		let new_pos = match op {
			OperatorKind::Delete | OperatorKind::Change => {
				let text = buffer.read(start, end);
				yanked.push(text);
				buffer.replace(start, end, "")?;
				marks.migrate(start, end, -((end - start) as i64));
				enter_insert = matches!(op, OperatorKind::Change);
				start
			}
			OperatorKind::Yank => {
				yanked.push(buffer.read(start, end));
				start
			}
			OperatorKind::ShiftLeft | OperatorKind::ShiftRight => {
				shift_lines(buffer, marks, start, end, matches!(op, OperatorKind::ShiftRight))?;
				start
			}
			OperatorKind::CaseLower | OperatorKind::CaseUpper | OperatorKind::CaseSwap => {
				let text = buffer.read(start, end);
				let transformed = transform_case(&text, op);
				buffer.replace(start, end, &transformed)?;
				start
			}
			OperatorKind::Join => join_lines(buffer, marks, start, end)?,
			OperatorKind::PutBefore | OperatorKind::PutBeforeEnd => {
				let content = registers.read_or_err(register_id)?.clone();
				// descending edit order -> ascending slice index, since slices
				// are stored in ascending buffer-position order.
				let text = put_slice(&content, edit_count, edit_count - 1 - i);
				insert_register(buffer, marks, edit.range.head, content.kind, text, false, matches!(op, OperatorKind::PutBeforeEnd))?
			}
			OperatorKind::PutAfter | OperatorKind::PutAfterEnd => {
				let content = registers.read_or_err(register_id)?.clone();
				let text = put_slice(&content, edit_count, edit_count - 1 - i);
				insert_register(buffer, marks, edit.range.head, content.kind, text, true, matches!(op, OperatorKind::PutAfterEnd))?
			}
			OperatorKind::CursorSol => start,
			OperatorKind::CursorEol => end.saturating_sub(1).max(start),
			OperatorKind::RepeatReplace => start,
		};

		if matches!(op, OperatorKind::CursorSol | OperatorKind::CursorEol) {
			view.cursor_new();
			view.primary_mut().pos = new_pos;
		} else if let Some(cursor) = view.cursors_mut().get_mut(edit.view_index) {
			cursor.pos = new_pos.min(buffer.max_cursor_pos());
		}
	}

	if matches!(op, OperatorKind::Delete | OperatorKind::Change | OperatorKind::Yank) {
		let kind = edits.first().map(|e| e.kind).unwrap_or(TextKind::Charwise);
		yanked.reverse(); // descending apply order -> ascending buffer-position order
		let joined = yanked.join("\n");
		if kind == TextKind::Charwise && yanked.len() > 1 {
			registers.write_multi(register_id, joined, kind, yanked);
		} else {
			registers.write(register_id, joined, kind);
		}
	}

	buffer.commit_group();
	Ok(if enter_insert { Some(ModeKind::Insert) } else { None })
}

fn shift_lines(buffer: &mut Buffer, marks: &mut MarkStore, start: CharIdx, end: CharIdx, right: bool) -> Result<(), CoreError> {
	const SHIFT_WIDTH: &str = "\t";
	let text = buffer.slice();
	let start_line = text.char_to_line(start);
	let end_line = text.char_to_line(end.saturating_sub(1).max(start));
	for line in (start_line..=end_line).rev() {
		let line_start = buffer.slice().line_to_char(line);
		if right {
			buffer.replace(line_start, line_start, SHIFT_WIDTH)?;
			marks.migrate(line_start, line_start, SHIFT_WIDTH.chars().count() as i64);
		} else {
			let content = buffer.slice().line(line);
			let to_strip = content.chars().take_while(|c| *c == '\t' || *c == ' ').take(1).count();
			if to_strip > 0 {
				buffer.replace(line_start, line_start + to_strip, "")?;
				marks.migrate(line_start, line_start + to_strip, -(to_strip as i64));
			}
		}
	}
	Ok(())
}

fn transform_case(text: &str, op: OperatorKind) -> String {
	text.chars()
		.map(|c| match op {
			OperatorKind::CaseLower => c.to_ascii_lowercase(),
			OperatorKind::CaseUpper => c.to_ascii_uppercase(),
			OperatorKind::CaseSwap => {
				if c.is_uppercase() {
					c.to_ascii_lowercase()
				} else {
					c.to_ascii_uppercase()
				}
			}
			_ => c,
		})
		.collect()
}

/// Joins the lines spanned by `[start, end)` into one, vi-style: each
/// newline (and the leading whitespace that follows it) becomes a single
/// space. Returns the char position where the join seam landed.
fn join_lines(buffer: &mut Buffer, marks: &mut MarkStore, start: CharIdx, end: CharIdx) -> Result<CharIdx, CoreError> {
	let text = buffer.slice();
	let start_line = text.char_to_line(start);
	let mut end_line = text.char_to_line(end.saturating_sub(1).max(start));
	if end_line == start_line {
		end_line = (start_line + 1).min(text.len_lines().saturating_sub(1));
	}

	let mut seam = None;
	for _ in start_line..end_line {
		let text = buffer.slice();
		let line_start = text.line_to_char(start_line);
		let line_content = text.line(start_line);
		let line_len = line_content.len_chars();
		if line_len == 0 {
			break;
		}
		let has_newline = line_content.char(line_len - 1) == '\n';
		if !has_newline {
			break;
		}
		let newline_pos = line_start + line_len - 1;
		let mut next = newline_pos + 1;
		let doc = buffer.slice();
		while next < doc.len_chars() && (doc.char(next) == ' ' || doc.char(next) == '\t') {
			next += 1;
		}
		buffer.replace(newline_pos, next, " ")?;
		marks.migrate(newline_pos, next, 1 - (next - newline_pos) as i64);
		seam = Some(newline_pos);
	}
	Ok(seam.unwrap_or(start))
}

/// Picks what a single cursor's put should insert: its own slice when the
/// register holds exactly as many slices as there are cursors putting right
/// now (SPEC_FULL.md §4.5's "one slice per current cursor if counts
/// match"), otherwise the whole joined register content for every cursor.
fn put_slice(content: &Register, cursor_count: usize, index: usize) -> &str {
	if cursor_count > 1 && content.slices.len() == cursor_count {
		&content.slices[index]
	} else {
		&content.bytes
	}
}

/// Inserts `text` (of register kind `kind`) relative to `pos`. `after`
/// places it following the character at `pos` (linewise content lands on
/// the next line); `leave_at_end` (the `-end` operator variants, bound to
/// `gp`/`gP`) parks the cursor just past the inserted text instead of at
/// its start.
fn insert_register(buffer: &mut Buffer, marks: &mut MarkStore, pos: CharIdx, kind: TextKind, text: &str, after: bool, leave_at_end: bool) -> Result<CharIdx, CoreError> {
	let (insert_at, text) = match kind {
		TextKind::Linewise => {
			let slice = buffer.slice();
			let line = slice.char_to_line(pos.min(buffer.len_chars().saturating_sub(1).max(0)));
			let at = if after { slice.line_to_char((line + 1).min(slice.len_lines())) } else { slice.line_to_char(line) };
			let mut body = text.to_string();
			if !body.ends_with('\n') {
				body.push('\n');
			}
			(at, body)
		}
		TextKind::Charwise => {
			let at = if after { (pos + 1).min(buffer.len_chars()) } else { pos };
			(at, text.to_string())
		}
	};

	let inserted_len = text.chars().count();
	buffer.replace(insert_at, insert_at, &text)?;
	marks.migrate(insert_at, insert_at, inserted_len as i64);

	Ok(if leave_at_end {
		(insert_at + inserted_len).saturating_sub(1).max(insert_at)
	} else {
		insert_at
	})
}

#[cfg(test)]
mod tests {
	use vis_primitives::range::{Range, TextKind};

	use super::*;
	use crate::action::OperatorKind;
	use crate::marks::MarkStore;
	use crate::registers::{RegisterStore, UNNAMED};
	use crate::view::View;

	fn edit(view_index: usize, anchor: usize, head: usize, kind: TextKind) -> CursorEdit {
		CursorEdit { view_index, range: Range::new(anchor, head), kind }
	}

	#[test]
	fn delete_charwise_removes_and_yanks() {
		let mut buffer = Buffer::new("hello world");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		let mode = apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Delete,
			UNNAMED,
			vec![edit(0, 0, 4, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(mode, None);
		assert_eq!(buffer.to_string(), " world");
		assert_eq!(registers.read(UNNAMED).unwrap().bytes, "hello");
		assert_eq!(view.primary().pos, 0);
	}

	#[test]
	fn change_deletes_and_requests_insert_mode() {
		let mut buffer = Buffer::new("hello world");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		let mode = apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Change,
			UNNAMED,
			vec![edit(0, 0, 4, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(mode, Some(ModeKind::Insert));
		assert_eq!(buffer.to_string(), " world");
	}

	#[test]
	fn yank_leaves_the_buffer_untouched() {
		let mut buffer = Buffer::new("hello world");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Yank,
			UNNAMED,
			vec![edit(0, 0, 4, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "hello world");
		assert_eq!(registers.read(UNNAMED).unwrap().bytes, "hello");
	}

	#[test]
	fn delete_writes_only_to_the_selected_register() {
		let mut buffer = Buffer::new("hello world");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Delete,
			'a',
			vec![edit(0, 0, 4, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(registers.read('a').unwrap().bytes, "hello");
		assert!(registers.read(UNNAMED).is_none());
	}

	#[test]
	fn linewise_delete_removes_the_whole_line_including_its_newline() {
		let mut buffer = Buffer::new("one\ntwo\nthree\n");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Delete,
			UNNAMED,
			vec![edit(0, 4, 4, TextKind::Linewise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "one\nthree\n");
		assert_eq!(registers.read(UNNAMED).unwrap().bytes, "two\n");
	}

	#[test]
	fn join_replaces_the_seam_with_a_single_space() {
		let mut buffer = Buffer::new("foo\nbar\n");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Join,
			UNNAMED,
			vec![edit(0, 0, 3, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "foo bar\n");
	}

	#[test]
	fn put_after_inserts_past_the_cursor() {
		let mut buffer = Buffer::new("ab");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();
		registers.write('a', "X".into(), TextKind::Charwise);

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::PutAfter,
			'a',
			vec![edit(0, 0, 0, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "aXb");
		assert_eq!(view.primary().pos, 1);
	}

	#[test]
	fn put_after_end_parks_the_cursor_past_the_inserted_text() {
		let mut buffer = Buffer::new("ab");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();
		registers.write('a', "XY".into(), TextKind::Charwise);

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::PutAfterEnd,
			'a',
			vec![edit(0, 0, 0, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "aXYb");
		assert_eq!(view.primary().pos, 2);
	}

	#[test]
	fn put_before_linewise_inserts_a_whole_line_above() {
		let mut buffer = Buffer::new("one\ntwo\n");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();
		registers.write('a', "zero\n".into(), TextKind::Linewise);

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::PutBefore,
			'a',
			vec![edit(0, 4, 4, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "one\nzero\ntwo\n");
	}

	#[test]
	fn shift_right_indents_every_spanned_line_with_a_tab() {
		let mut buffer = Buffer::new("a\nb\n");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::ShiftRight,
			UNNAMED,
			vec![edit(0, 0, 2, TextKind::Linewise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "\ta\n\tb\n");
	}

	#[test]
	fn shift_left_removes_one_leading_tab_or_space_per_line() {
		let mut buffer = Buffer::new("\ta\n b\n");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::ShiftLeft,
			UNNAMED,
			vec![edit(0, 0, 4, TextKind::Linewise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "a\nb\n");
	}

	#[test]
	fn case_upper_transforms_the_spanned_range() {
		let mut buffer = Buffer::new("hello");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::CaseUpper,
			UNNAMED,
			vec![edit(0, 0, 4, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "HELLO");
	}

	#[test]
	fn case_swap_flips_every_letter_independently() {
		let mut buffer = Buffer::new("AbC");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::CaseSwap,
			UNNAMED,
			vec![edit(0, 0, 2, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "aBc");
	}

	#[test]
	fn empty_edit_list_is_an_error() {
		let mut buffer = Buffer::new("hello");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		let err = apply(&mut buffer, &mut view, &mut registers, &mut marks, OperatorKind::Delete, UNNAMED, vec![]).unwrap_err();
		assert_eq!(err, CoreError::EmptyRange);
	}

	#[test]
	fn multi_cursor_delete_applies_in_descending_order_so_earlier_offsets_stay_valid() {
		let mut buffer = Buffer::new("abcdef");
		let mut view = View::new(1);
		view.cursor_new();
		view.primary_mut().pos = 4;
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Delete,
			UNNAMED,
			vec![edit(0, 4, 4, TextKind::Charwise), edit(1, 1, 1, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "acdf");
		assert_eq!(view.cursors()[0].pos, 4);
		assert_eq!(view.cursors()[1].pos, 1);
	}

	#[test]
	fn multi_cursor_charwise_yank_stores_one_slice_per_cursor() {
		let mut buffer = Buffer::new("abc def");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Yank,
			UNNAMED,
			vec![edit(0, 4, 6, TextKind::Charwise), edit(1, 0, 2, TextKind::Charwise)],
		)
		.unwrap();

		let reg = registers.read(UNNAMED).unwrap();
		assert_eq!(reg.bytes, "abc\ndef");
		assert_eq!(reg.slices, vec!["abc".to_string(), "def".to_string()]);
	}

	#[test]
	fn multi_cursor_put_assigns_one_slice_per_cursor_when_counts_match() {
		let mut buffer = Buffer::new("abc def");
		let mut view = View::new(0);
		view.cursor_new();
		view.primary_mut().pos = 4;
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		// yank "abc" and "def" from the two cursors...
		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Yank,
			UNNAMED,
			vec![edit(0, 4, 6, TextKind::Charwise), edit(1, 0, 2, TextKind::Charwise)],
		)
		.unwrap();

		// ...then put after a two-cursor selection on a fresh buffer: each
		// cursor gets its own slice rather than the joined "abc\ndef" text.
		let mut buffer2 = Buffer::new("XY");
		let mut view2 = View::new(0);
		view2.cursor_new();
		view2.primary_mut().pos = 1;

		apply(
			&mut buffer2,
			&mut view2,
			&mut registers,
			&mut marks,
			OperatorKind::PutAfter,
			UNNAMED,
			vec![edit(0, 1, 1, TextKind::Charwise), edit(1, 0, 0, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer2.to_string(), "XabcYdef");
	}

	#[test]
	fn multi_cursor_put_falls_back_to_joined_text_when_cursor_counts_differ() {
		let mut buffer = Buffer::new("abc def");
		let mut view = View::new(0);
		view.cursor_new();
		view.primary_mut().pos = 4;
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Yank,
			UNNAMED,
			vec![edit(0, 4, 6, TextKind::Charwise), edit(1, 0, 2, TextKind::Charwise)],
		)
		.unwrap();

		let mut buffer2 = Buffer::new("X");
		let mut view2 = View::new(0);

		apply(
			&mut buffer2,
			&mut view2,
			&mut registers,
			&mut marks,
			OperatorKind::PutAfter,
			UNNAMED,
			vec![edit(0, 0, 0, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer2.to_string(), "Xabc\ndef");
	}

	#[test]
	fn mark_past_a_shift_right_moves_with_the_inserted_tab() {
		let mut buffer = Buffer::new("ab\ncd\n");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();
		marks.set('a', 3); // the 'c' of "cd"

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::ShiftRight,
			UNNAMED,
			vec![edit(0, 0, 5, TextKind::Linewise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "\tab\n\tcd\n");
		assert_eq!(marks.get('a'), Some(5));
	}

	#[test]
	fn mark_past_a_join_seam_shifts_by_the_collapsed_newline() {
		let mut buffer = Buffer::new("foo\nbar\n");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();
		marks.set('a', 5); // the 'a' of "bar"

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Join,
			UNNAMED,
			vec![edit(0, 0, 3, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "foo bar\n");
		assert_eq!(marks.get('a'), Some(5));
	}

	#[test]
	fn mark_past_a_put_shifts_right_by_the_inserted_length() {
		let mut buffer = Buffer::new("ab");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();
		registers.write('r', "XY".into(), TextKind::Charwise);
		marks.set('a', 1); // the 'b'

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::PutAfter,
			'r',
			vec![edit(0, 0, 0, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(buffer.to_string(), "aXYb");
		assert_eq!(marks.get('a'), Some(3));
	}

	#[test]
	fn mark_past_a_deletion_shifts_left_by_the_deleted_length() {
		let mut buffer = Buffer::new("hello world");
		let mut view = View::new(0);
		let mut registers = RegisterStore::new();
		let mut marks = MarkStore::new();
		marks.set('a', 8);

		apply(
			&mut buffer,
			&mut view,
			&mut registers,
			&mut marks,
			OperatorKind::Delete,
			UNNAMED,
			vec![edit(0, 0, 4, TextKind::Charwise)],
		)
		.unwrap();

		assert_eq!(marks.get('a'), Some(3));
	}
}
