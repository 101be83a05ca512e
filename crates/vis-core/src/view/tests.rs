use ropey::Rope;
use vis_primitives::range::Range;
use vis_text::Buffer;

use super::*;

#[test]
fn cursor_new_seeds_a_second_cursor_at_the_same_spot() {
	let mut view = View::new(3);
	let idx = view.cursor_new().unwrap();
	assert_eq!(view.len(), 2);
	assert_eq!(view.cursors()[idx].pos, 3);
}

#[test]
fn cursor_new_refuses_a_duplicate_elsewhere() {
	let mut view = View::new(3);
	view.cursor_new().unwrap();
	assert_eq!(view.cursor_new(), None);
	assert_eq!(view.len(), 2);
}

#[test]
fn cursor_dispose_never_empties_the_view() {
	let mut view = View::new(3);
	view.cursor_dispose(0);
	assert_eq!(view.len(), 1);
}

#[test]
fn disposing_primary_promotes_the_next_cursor() {
	let mut view = View::new(0);
	view.cursor_new();
	view.cursor_selection_set(1, Range::new(5, 6));
	// force distinct positions so sort/merge doesn't collapse them
	{
		let c = &mut view.cursors[1];
		c.pos = 5;
	}
	view.sort_and_merge();
	let primary_before = view.primary_index();
	view.cursor_dispose(primary_before);
	assert_eq!(view.len(), 1);
}

#[test]
fn selection_clear_and_restore_round_trip() {
	let mut view = View::new(0);
	view.cursor_selection_set(0, Range::new(0, 3));
	view.cursor_selection_clear(0);
	assert_eq!(view.cursor_selection_get(0), None);
	view.cursor_selection_restore(0);
	assert_eq!(view.cursor_selection_get(0), Some(Range::new(0, 3)));
}

#[test]
fn cursors_clear_drops_non_primary_cursors() {
	let mut view = View::new(0);
	view.cursors[0].pos = 0;
	view.cursors.push(Cursor::new(5));
	view.primary = 0;
	view.cursors_clear();
	assert_eq!(view.len(), 1);
}

#[test]
fn cursors_align_moves_every_cursor_to_the_minimum_column() {
	let buffer = Buffer::new("aaaa\nbb\ncccccc\n");
	let mut view = View::new(0);
	view.cursors[0].pos = 2; // line 0, col 2
	view.cursors.push(Cursor::new(7)); // line 1 "bb", col 2 (eol)
	view.cursors.push(Cursor::new(13)); // line 2 "cccccc", col 5
	view.sort_and_merge();
	view.cursors_align(&buffer);
	for c in view.cursors() {
		assert_eq!(buffer.col_of(c.pos), 2);
	}
}

#[test]
fn cursor_select_word_enters_visual_selection_over_a_word() {
	let text = Rope::from("hello world");
	let mut view = View::new(1);
	let changed = view.cursor_select_word(text.slice(..));
	assert!(changed);
	assert_eq!(view.cursor_selection_get(0), Some(Range::new(0, 4)));
}

#[test]
fn cursor_select_word_is_a_no_op_over_whitespace() {
	let text = Rope::from("hello world");
	let mut view = View::new(5); // the space
	assert!(!view.cursor_select_word(text.slice(..)));
}

#[test]
fn cursor_select_next_is_case_sensitive_regardless_of_search_settings() {
	let text = Rope::from("foo Foo foo");
	let mut view = View::new(0);
	view.cursor_selection_set(0, Range::new(0, 2));
	assert!(view.cursor_select_next(text.slice(..)));
	// the match at "Foo" (case-differing) must be skipped
	let primary = view.primary();
	assert_eq!(&text.slice(primary.selection.unwrap().min()..=primary.selection.unwrap().max()).to_string(), "foo");
	assert_eq!(primary.pos, 10);
}

#[test]
fn cursor_select_next_is_a_no_op_without_a_match() {
	let text = Rope::from("only one");
	let mut view = View::new(0);
	view.cursor_selection_set(0, Range::new(0, 3));
	assert!(!view.cursor_select_next(text.slice(..)));
	assert_eq!(view.len(), 1);
}

#[test]
fn cursor_select_skip_drops_the_previous_primary() {
	let text = Rope::from("foo foo foo");
	let mut view = View::new(0);
	view.cursor_selection_set(0, Range::new(0, 2));
	assert!(view.cursor_select_skip(text.slice(..)));
	assert_eq!(view.len(), 1);
	assert_eq!(view.primary().pos, 6);
}
