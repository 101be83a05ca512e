use vis_primitives::key::Key;
use vis_primitives::mode::ModeKind;

use super::*;

fn send(ed: &mut Editor, keys: &str) {
	for c in keys.chars() {
		let key = match c {
			'\u{1b}' => Key::esc(),
			_ => Key::char(c),
		};
		ed.handle_key(key).unwrap();
	}
}

fn enter(ed: &mut Editor) {
	ed.handle_key(Key { code: KeyCode::Enter, modifiers: Default::default() }).unwrap();
}

// -- exclusive/inclusive motion range regressions ---------------------------
//
// `operator::span_for` treats a charwise range's max() as the last included
// index; these pin the fix that made exclusive-motion and inclusive-motion
// ranges agree with that convention (see DESIGN.md's operator-set entry).

#[test]
fn dw_deletes_the_word_and_its_trailing_space() {
	let mut ed = Editor::new("hello world");
	send(&mut ed, "dw");
	assert_eq!(ed.text(), "world");
}

#[test]
fn d2w_deletes_two_words() {
	let mut ed = Editor::new("hello world");
	send(&mut ed, "d2w");
	assert_eq!(ed.text(), "");
	assert_eq!(ed.view().primary().pos, 0);
}

#[test]
fn de_deletes_through_the_word_end_only() {
	let mut ed = Editor::new("hello world");
	send(&mut ed, "de");
	assert_eq!(ed.text(), " world");
}

#[test]
fn db_from_inside_the_second_word_deletes_back_to_its_start() {
	let mut ed = Editor::new("foo bar");
	for _ in 0..6 {
		send(&mut ed, "l"); // cursor onto the 'r' of "bar" (index 6)
	}
	send(&mut ed, "db");
	assert_eq!(ed.text(), "foo r");
}

#[test]
fn x_deletes_exactly_one_character() {
	let mut ed = Editor::new("hello");
	send(&mut ed, "x");
	assert_eq!(ed.text(), "ello");
}

#[test]
fn x_with_count_deletes_exactly_that_many_characters() {
	let mut ed = Editor::new("hello");
	send(&mut ed, "3x");
	assert_eq!(ed.text(), "lo");
}

#[test]
fn delete_to_mark_is_exclusive_like_a_charwise_motion() {
	let mut ed = Editor::new("hello world");
	send(&mut ed, "llll"); // pos 4, the 'o' of "hello"
	send(&mut ed, "ma"); // mark 'a' at pos 4
	send(&mut ed, "0"); // back to line start, pos 0
	send(&mut ed, "d`a");
	// from pos 0 to mark at pos 4, exclusive: deletes indices 0..=3 ("hell")
	assert_eq!(ed.text(), "o world");
}

// -- basic motions ------------------------------------------------------

#[test]
fn hjkl_move_the_cursor() {
	let mut ed = Editor::new("ab\ncd\nef");
	send(&mut ed, "l");
	assert_eq!(ed.view().primary().pos, 1);
	send(&mut ed, "j");
	assert_eq!(ed.buffer().line_of(ed.view().primary().pos), 1);
	send(&mut ed, "h");
	assert_eq!(ed.buffer().col_of(ed.view().primary().pos), 0);
	send(&mut ed, "k");
	assert_eq!(ed.buffer().line_of(ed.view().primary().pos), 0);
}

#[test]
fn dollar_and_caret_move_to_line_end_and_first_nonblank() {
	let mut ed = Editor::new("  abc");
	send(&mut ed, "$");
	assert_eq!(ed.view().primary().pos, 5); // no trailing newline: end-of-buffer slot
	send(&mut ed, "^");
	assert_eq!(ed.view().primary().pos, 2);
}

// -- operators ------------------------------------------------------------

#[test]
fn dd_deletes_the_whole_current_line_including_newline() {
	let mut ed = Editor::new("one\ntwo\nthree");
	send(&mut ed, "dd");
	assert_eq!(ed.text(), "two\nthree");
}

#[test]
fn yy_then_p_duplicates_the_line_below() {
	let mut ed = Editor::new("one\ntwo");
	send(&mut ed, "yyp");
	assert_eq!(ed.text(), "one\none\ntwo");
}

#[test]
fn cw_deletes_the_word_and_enters_insert_mode() {
	let mut ed = Editor::new("hello world");
	send(&mut ed, "cw");
	assert_eq!(ed.mode(), ModeKind::Insert);
	assert_eq!(ed.text(), " world");
	send(&mut ed, "hi\u{1b}");
	assert_eq!(ed.text(), "hi world");
}

#[test]
fn undo_after_dd_restores_the_deleted_line() {
	let mut ed = Editor::new("one\ntwo");
	send(&mut ed, "dd");
	assert_eq!(ed.text(), "two");
	send(&mut ed, "u");
	assert_eq!(ed.text(), "one\ntwo");
}

#[test]
fn redo_after_undo_reapplies_the_edit() {
	let mut ed = Editor::new("one\ntwo");
	send(&mut ed, "dd");
	send(&mut ed, "u");
	ed.handle_key(Key::ctrl('r')).unwrap();
	assert_eq!(ed.text(), "two");
}

// -- insert / append / open line ------------------------------------------

#[test]
fn i_then_escape_inserts_before_the_cursor() {
	let mut ed = Editor::new("bc");
	send(&mut ed, "ia\u{1b}");
	assert_eq!(ed.text(), "abc");
}

#[test]
fn append_after_cursor_inserts_past_the_current_character() {
	let mut ed = Editor::new("ac");
	send(&mut ed, "ab\u{1b}");
	assert_eq!(ed.text(), "abc");
}

#[test]
fn o_opens_a_blank_line_below_and_enters_insert() {
	let mut ed = Editor::new("one");
	send(&mut ed, "otwo\u{1b}");
	assert_eq!(ed.text(), "one\ntwo");
}

// -- replace ----------------------------------------------------------------

#[test]
fn r_replaces_the_character_under_the_cursor() {
	let mut ed = Editor::new("abc");
	send(&mut ed, "rx");
	assert_eq!(ed.text(), "xbc");
	assert_eq!(ed.mode(), ModeKind::Normal);
}

// -- dot repeat and the §9 open-question decisions --------------------------

#[test]
fn dot_after_replace_repeats_the_replacement() {
	let mut ed = Editor::new("abc");
	send(&mut ed, "rx");
	send(&mut ed, "l.");
	assert_eq!(ed.text(), "xxc");
}

#[test]
fn dot_repeats_a_delete_word() {
	let mut ed = Editor::new("one two three");
	send(&mut ed, "dw.");
	assert_eq!(ed.text(), "three");
}

#[test]
fn dot_after_insert_repeats_the_whole_inserted_run() {
	let mut ed = Editor::new("");
	send(&mut ed, "ihi\u{1b}");
	send(&mut ed, ".");
	assert_eq!(ed.text(), "hhii");
}

// -- marks --------------------------------------------------------------

#[test]
fn mark_set_then_goto_moves_the_primary_cursor() {
	let mut ed = Editor::new("one\ntwo\nthree");
	send(&mut ed, "jjma");
	send(&mut ed, "gg");
	assert_eq!(ed.buffer().line_of(ed.view().primary().pos), 0);
	send(&mut ed, "`a");
	assert_eq!(ed.buffer().line_of(ed.view().primary().pos), 2);
}

#[test]
fn mark_survives_ordinary_insert_mode_typing_before_it() {
	let mut ed = Editor::new("abcd");
	send(&mut ed, "lllma"); // mark 'a' on the 'd' at index 3
	send(&mut ed, "0iXY\u{1b}"); // insert "XY" at the start
	assert_eq!(ed.text(), "XYabcd");
	assert_eq!(ed.marks().get('a'), Some(5));
}

#[test]
fn mark_survives_an_insert_mode_backspace_before_it() {
	let mut ed = Editor::new("abcd");
	send(&mut ed, "lllma"); // mark 'a' on the 'd' at index 3
	send(&mut ed, "hi"); // cursor back to index 2 ('c'), enter Insert mode
	ed.handle_key(Key { code: KeyCode::Backspace, modifiers: Default::default() }).unwrap();
	send(&mut ed, "\u{1b}");
	assert_eq!(ed.text(), "acd");
	assert_eq!(ed.marks().get('a'), Some(2));
}

// -- search -------------------------------------------------------------

#[test]
fn slash_search_then_n_repeats_forward() {
	let mut ed = Editor::new("foo bar foo bar foo");
	send(&mut ed, "/bar");
	enter(&mut ed);
	assert_eq!(ed.view().primary().pos, 4);
	send(&mut ed, "n");
	assert_eq!(ed.view().primary().pos, 12);
}

#[test]
fn star_searches_for_the_word_under_cursor() {
	let mut ed = Editor::new("foo bar foo");
	send(&mut ed, "*");
	assert_eq!(ed.view().primary().pos, 8);
}

// -- registers ------------------------------------------------------------

#[test]
fn named_register_yank_and_put_round_trip() {
	let mut ed = Editor::new("hello world");
	send(&mut ed, "\"ayw");
	assert_eq!(ed.registers().read('a').unwrap().bytes, "hello ");
	assert_eq!(ed.text(), "hello world"); // yank never mutates the buffer
}

#[test]
fn uppercase_register_id_appends() {
	let mut ed = Editor::new("one two");
	send(&mut ed, "\"ayw");
	send(&mut ed, "w\"Ayw");
	assert_eq!(ed.registers().read('a').unwrap().bytes, "one two");
}

// -- visual mode ----------------------------------------------------------

#[test]
fn visual_mode_delete_acts_on_the_live_selection() {
	let mut ed = Editor::new("hello world");
	send(&mut ed, "vlld");
	assert_eq!(ed.text(), "lo world");
	assert_eq!(ed.mode(), ModeKind::Normal);
}

#[test]
fn visual_line_mode_delete_removes_whole_lines() {
	let mut ed = Editor::new("one\ntwo\nthree");
	send(&mut ed, "Vjd");
	assert_eq!(ed.text(), "three");
}

// -- macros -----------------------------------------------------------------

#[test]
fn recorded_macro_replays_its_keystrokes() {
	let mut ed = Editor::new("aaa");
	send(&mut ed, "qaxqa"); // start recording into 'a', delete one char, stop (same id)
	assert_eq!(ed.text(), "aa");
	send(&mut ed, "@a");
	assert_eq!(ed.text(), "a");
}

// -- multi-cursor -----------------------------------------------------------

#[test]
fn cursor_new_adds_a_second_insertion_point() {
	let mut ed = Editor::new("abc");
	send(&mut ed, "Cx");
	assert_eq!(ed.view().len(), 2);
}

#[test]
fn cursor_select_next_finds_the_next_occurrence_case_sensitively() {
	let mut ed = Editor::new("foo bar foo");
	send(&mut ed, "vll"); // selects "foo" at 0..=2
	send(&mut ed, "Cn");
	assert_eq!(ed.view().len(), 2);
	assert!(ed.view().cursors().iter().any(|c| c.pos == 10 && c.selection == Some(Range::new(8, 10))));
}

#[test]
fn viw_then_cursor_select_next_twice_then_delete_erases_every_occurrence() {
	let mut ed = Editor::new("foo foo foo");
	send(&mut ed, "viw"); // selects the first "foo" at 0..=2
	send(&mut ed, "Cn"); // add a cursor on the second "foo" at 4..=6
	send(&mut ed, "Cn"); // add a cursor on the third "foo" at 8..=10
	send(&mut ed, "d");
	assert_eq!(ed.text(), "  ");
	assert_eq!(ed.mode(), ModeKind::Normal);
	assert_eq!(ed.view().len(), 1);
	assert_eq!(ed.view().primary().pos, 0);
}

// -- text objects -------------------------------------------------------

#[test]
fn diw_deletes_the_inner_word_under_the_cursor() {
	let mut ed = Editor::new("foo bar baz");
	send(&mut ed, "wdiw");
	assert_eq!(ed.text(), "foo  baz");
}

#[test]
fn daw_deletes_the_word_and_its_trailing_whitespace() {
	let mut ed = Editor::new("foo bar baz");
	send(&mut ed, "wdaw");
	assert_eq!(ed.text(), "foo baz");
}

#[test]
fn di_paren_through_handle_key_deletes_the_enclosed_text() {
	let mut ed = Editor::new("(foo bar)");
	send(&mut ed, "l"); // cursor onto the 'f'
	send(&mut ed, "di(");
	assert_eq!(ed.text(), "()");
	assert_eq!(ed.view().primary().pos, 1);
}

// -- error recovery -------------------------------------------------------

#[test]
fn goto_an_unset_mark_clears_pending_state_without_panicking() {
	let mut ed = Editor::new("abc");
	let err = send_result(&mut ed, "`z");
	assert!(err.is_err());
	// the editor must still accept further input afterward
	send(&mut ed, "x");
	assert_eq!(ed.text(), "bc");
}

fn send_result(ed: &mut Editor, keys: &str) -> Result<(), CoreError> {
	let mut result = Ok(());
	for c in keys.chars() {
		result = ed.handle_key(Key::char(c));
	}
	result
}
