use vis_primitives::key::Key;

use super::*;
use crate::movement::MotionKind;

#[test]
fn exact_match_resolves_immediately() {
	let mut km = Keymap::empty();
	km.bind(BindingMode::Normal, vec![Key::char('x')], Action::Operator(OperatorKind::Delete));
	assert_eq!(km.lookup(BindingMode::Normal, &[Key::char('x')]), LookupResult::Match(Action::Operator(OperatorKind::Delete)));
}

#[test]
fn proper_prefix_is_pending() {
	let mut km = Keymap::empty();
	km.bind(BindingMode::Move, vec![Key::char('g'), Key::char('g')], Action::Movement(MotionKind::FileBegin));
	assert_eq!(km.lookup(BindingMode::Move, &[Key::char('g')]), LookupResult::Pending);
}

#[test]
fn unrelated_key_is_none() {
	let mut km = Keymap::empty();
	km.bind(BindingMode::Move, vec![Key::char('h')], Action::Movement(MotionKind::CharPrev));
	assert_eq!(km.lookup(BindingMode::Move, &[Key::char('z')]), LookupResult::None);
}

#[test]
fn inheritance_searches_own_map_before_bases() {
	let mut km = Keymap::empty();
	km.bind(BindingMode::Normal, vec![Key::char('d')], Action::Operator(OperatorKind::Delete));
	km.bind(BindingMode::Move, vec![Key::char('d')], Action::Movement(MotionKind::CharNext));
	km.set_bases(BindingMode::Normal, vec![BindingMode::Move]);
	assert_eq!(km.lookup(BindingMode::Normal, &[Key::char('d')]), LookupResult::Match(Action::Operator(OperatorKind::Delete)));
}

#[test]
fn first_base_in_declaration_order_wins_across_a_dag_of_two_base_maps() {
	let mut km = Keymap::empty();
	km.bind(BindingMode::Move, vec![Key::char('w')], Action::Movement(MotionKind::WordStart(crate::movement::WordType::Word)));
	km.bind(BindingMode::Operator, vec![Key::char('w')], Action::Operator(OperatorKind::Delete));
	km.set_bases(BindingMode::Normal, vec![BindingMode::Move, BindingMode::Operator]);
	assert_eq!(
		km.lookup(BindingMode::Normal, &[Key::char('w')]),
		LookupResult::Match(Action::Movement(MotionKind::WordStart(crate::movement::WordType::Word)))
	);
}

#[test]
fn default_keymap_resolves_hjkl_through_inheritance() {
	let km = default_keymap();
	assert_eq!(km.lookup(BindingMode::Normal, &[Key::char('h')]), LookupResult::Match(Action::Movement(MotionKind::CharPrev)));
	assert_eq!(km.lookup(BindingMode::Visual, &[Key::char('j')]), LookupResult::Match(Action::Movement(MotionKind::LineDown)));
}

#[test]
fn default_keymap_gg_is_pending_then_matches() {
	let km = default_keymap();
	assert_eq!(km.lookup(BindingMode::Normal, &[Key::char('g')]), LookupResult::Pending);
	assert_eq!(km.lookup(BindingMode::Normal, &[Key::char('g'), Key::char('g')]), LookupResult::Match(Action::Movement(MotionKind::FileBegin)));
}
