use ropey::Rope;
use vis_primitives::range::Direction;

use super::*;

#[test]
fn horizontal_forward_stops_at_max_cursor_pos() {
	let text = Rope::from("ab");
	let slice = text.slice(..);
	let r = move_horizontally(slice, Range::point(0), Direction::Forward, 5, false);
	assert_eq!(r.head, 2);
}

#[test]
fn vertical_down_clamps_column_on_shorter_line() {
	let text = Rope::from("abcdef\nxy\nghijkl");
	let slice = text.slice(..);
	let r = move_vertically(slice, Range::point(5), Direction::Forward, 1, false);
	assert_eq!(text.char_to_line(r.head), 1);
	assert_eq!(r.head - text.line_to_char(1), 2);
}

#[test]
fn line_end_lands_before_newline() {
	let text = Rope::from("abc\ndef");
	let slice = text.slice(..);
	let r = move_to_line_end(slice, Range::point(0), false);
	assert_eq!(r.head, 3);
}

#[test]
fn first_nonwhitespace_skips_leading_indent() {
	let text = Rope::from("   abc");
	let slice = text.slice(..);
	let r = move_to_first_nonwhitespace(slice, Range::point(0), false);
	assert_eq!(r.head, 3);
}

#[test]
fn paragraph_forward_stops_at_blank_line() {
	let text = Rope::from("a\nb\n\nc\nd");
	let slice = text.slice(..);
	let r = move_to_paragraph(slice, Range::point(0), Direction::Forward, 1, false);
	assert_eq!(text.char_to_line(r.head), 2);
}

#[test]
fn sentence_forward_stops_after_terminator_and_space() {
	let text = Rope::from("One. Two. Three.");
	let slice = text.slice(..);
	let r = move_to_sentence(slice, Range::point(0), Direction::Forward, 1, false);
	assert_eq!(r.head, 5);
}

#[test]
fn matching_bracket_finds_partner_on_line() {
	let text = Rope::from("foo(bar)baz");
	let slice = text.slice(..);
	let r = move_to_matching_bracket(slice, Range::point(3), false);
	assert_eq!(r.head, 7);
	let back = move_to_matching_bracket(slice, Range::point(7), false);
	assert_eq!(back.head, 3);
}

#[test]
fn matching_bracket_noop_when_absent() {
	let text = Rope::from("no brackets here");
	let slice = text.slice(..);
	let r = move_to_matching_bracket(slice, Range::point(2), false);
	assert_eq!(r.head, 2);
}

#[test]
fn move_to_line_goes_to_first_nonblank_of_target() {
	let text = Rope::from("a\n  b\nc");
	let slice = text.slice(..);
	let r = move_to_line(slice, Range::point(0), 2, false);
	assert_eq!(r.head, 4);
}
