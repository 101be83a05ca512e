//! Mode & binding engine: §4.4. Modes form a DAG, not a tree — each
//! concrete mode searches its own bindings first, then its declared base
//! maps in order, first match wins. This mirrors the shape of the
//! teacher's keymap matcher (exact match / pending-prefix / no-match) with
//! a plain `HashMap`-keyed trie instead of a compile-time registry (§9).

use std::collections::HashMap;

use vis_primitives::key::Key;
use vis_primitives::mode::ModeKind;

use crate::action::{Action, OperatorKind, ScrollDir};
use crate::movement::{MotionKind, WordType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingMode {
	Basic,
	Move,
	TextObj,
	OperatorOption,
	Operator,
	Normal,
	Visual,
	VisualLine,
	Readline,
	Prompt,
	Insert,
	Replace,
}

impl BindingMode {
	/// The `ModeKind` an operator-pending or inheritance-only namespace
	/// falls back to when nothing in the DAG resolves the key; concrete
	/// modes map onto themselves.
	pub fn default_for(mode: ModeKind) -> Self {
		match mode {
			ModeKind::Normal => BindingMode::Normal,
			ModeKind::Insert => BindingMode::Insert,
			ModeKind::Replace => BindingMode::Replace,
			ModeKind::Visual => BindingMode::Visual,
			ModeKind::VisualLine => BindingMode::VisualLine,
			ModeKind::Prompt => BindingMode::Prompt,
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
	Match(Action),
	Pending,
	None,
}

struct ModeBindings {
	own: HashMap<Vec<Key>, Action>,
	bases: Vec<BindingMode>,
}

pub struct Keymap {
	modes: HashMap<BindingMode, ModeBindings>,
}

impl Keymap {
	pub fn empty() -> Self {
		Self { modes: HashMap::new() }
	}

	pub fn bind(&mut self, mode: BindingMode, keys: Vec<Key>, action: Action) {
		self.modes.entry(mode).or_insert_with(|| ModeBindings { own: HashMap::new(), bases: Vec::new() }).own.insert(keys, action);
	}

	pub fn set_bases(&mut self, mode: BindingMode, bases: Vec<BindingMode>) {
		self.modes.entry(mode).or_insert_with(|| ModeBindings { own: HashMap::new(), bases: Vec::new() }).bases = bases;
	}

	/// Flattens `mode`'s own map and its transitive bases into a single
	/// search order, depth-first, without revisiting a namespace twice.
	fn search_order(&self, mode: BindingMode, out: &mut Vec<BindingMode>) {
		if out.contains(&mode) {
			return;
		}
		out.push(mode);
		if let Some(bindings) = self.modes.get(&mode) {
			for base in &bindings.bases {
				self.search_order(*base, out);
			}
		}
	}

	pub fn lookup(&self, mode: BindingMode, buffer: &[Key]) -> LookupResult {
		let mut order = Vec::new();
		self.search_order(mode, &mut order);

		let mut is_prefix = false;
		for m in &order {
			let Some(bindings) = self.modes.get(m) else { continue };
			if let Some(action) = bindings.own.get(buffer) {
				return LookupResult::Match(*action);
			}
			if !is_prefix && bindings.own.keys().any(|seq| seq.len() > buffer.len() && seq.starts_with(buffer)) {
				is_prefix = true;
			}
		}
		if is_prefix {
			LookupResult::Pending
		} else {
			LookupResult::None
		}
	}
}

fn k(c: char) -> Vec<Key> {
	vec![Key::char(c)]
}

/// The compiled-in default key table (§2a, §6's "config surface"):
/// every binding below is addressable by the action it names and could in
/// principle be overridden from user configuration without touching this
/// module's structure.
pub fn default_keymap() -> Keymap {
	use BindingMode::*;

	let mut km = Keymap::empty();

	km.set_bases(Normal, vec![Move, Operator, Basic]);
	km.set_bases(Visual, vec![Move, Operator, Basic]);
	km.set_bases(VisualLine, vec![Move, Operator, Basic]);
	km.set_bases(Operator, vec![Move, TextObj, OperatorOption]);
	km.set_bases(Prompt, vec![Readline, Basic]);

	// -- MOVE: motions shared by Normal, Visual and operator-pending -----
	km.bind(Move, k('h'), Action::Movement(MotionKind::CharPrev));
	km.bind(Move, k('l'), Action::Movement(MotionKind::CharNext));
	km.bind(Move, k('j'), Action::Movement(MotionKind::LineDown));
	km.bind(Move, k('k'), Action::Movement(MotionKind::LineUp));
	km.bind(Move, k('w'), Action::Movement(MotionKind::WordStart(WordType::Word)));
	km.bind(Move, k('W'), Action::Movement(MotionKind::WordStart(WordType::WORD)));
	km.bind(Move, k('e'), Action::Movement(MotionKind::WordEnd(WordType::Word)));
	km.bind(Move, k('E'), Action::Movement(MotionKind::WordEnd(WordType::WORD)));
	km.bind(Move, k('b'), Action::Movement(MotionKind::WordStartPrev(WordType::Word)));
	km.bind(Move, k('B'), Action::Movement(MotionKind::WordStartPrev(WordType::WORD)));
	km.bind(Move, k('0'), Action::Movement(MotionKind::LineBegin));
	km.bind(Move, k('$'), Action::Movement(MotionKind::LineEnd));
	km.bind(Move, k('^'), Action::Movement(MotionKind::LineFirstNonBlank));
	km.bind(Move, vec![Key::char('g'), Key::char('_')], Action::Movement(MotionKind::LineLastNonBlank));
	km.bind(Move, vec![Key::char('g'), Key::char('g')], Action::Movement(MotionKind::FileBegin));
	km.bind(Move, k('G'), Action::GotoLine);
	km.bind(Move, k('{'), Action::Movement(MotionKind::ParagraphPrev));
	km.bind(Move, k('}'), Action::Movement(MotionKind::ParagraphNext));
	km.bind(Move, k('('), Action::Movement(MotionKind::SentencePrev));
	km.bind(Move, k(')'), Action::Movement(MotionKind::SentenceNext));
	km.bind(Move, k('%'), Action::Movement(MotionKind::BracketMatch));
	km.bind(Move, k('n'), Action::Movement(MotionKind::SearchNext));
	km.bind(Move, k('N'), Action::Movement(MotionKind::SearchPrev));
	km.bind(Move, k('*'), Action::SearchWordUnderCursor);
	km.bind(Move, k('f'), Action::MovementKey(MotionKind::FindCharForward { till: false }));
	km.bind(Move, k('F'), Action::MovementKey(MotionKind::FindCharBackward { till: false }));
	km.bind(Move, k('t'), Action::MovementKey(MotionKind::FindCharForward { till: true }));
	km.bind(Move, k('T'), Action::MovementKey(MotionKind::FindCharBackward { till: true }));
	km.bind(Move, k(';'), Action::Movement(MotionKind::RepeatFindLast));
	km.bind(Move, k(','), Action::Movement(MotionKind::RepeatFindLastReverse));
	km.bind(Move, vec![Key::ctrl('o')], Action::Movement(MotionKind::JumpPrev));
	km.bind(Move, vec![Key::ctrl('i')], Action::Movement(MotionKind::JumpNext));
	km.bind(Move, vec![Key::char('g'), Key::char(';')], Action::Movement(MotionKind::ChangePrev));
	km.bind(Move, vec![Key::char('g'), Key::char(',')], Action::Movement(MotionKind::ChangeNext));

	// -- BASIC: arrows/paging, same semantics regardless of mode ---------
	km.bind(Basic, vec![Key::esc()], Action::Escape);
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::Left, modifiers: Default::default() }], Action::Movement(MotionKind::CharPrev));
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::Right, modifiers: Default::default() }], Action::Movement(MotionKind::CharNext));
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::Up, modifiers: Default::default() }], Action::Movement(MotionKind::LineUp));
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::Down, modifiers: Default::default() }], Action::Movement(MotionKind::LineDown));
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::Home, modifiers: Default::default() }], Action::Movement(MotionKind::LineBegin));
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::End, modifiers: Default::default() }], Action::Movement(MotionKind::LineEnd));
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::PageUp, modifiers: Default::default() }], Action::Scroll(ScrollDir::Up));
	km.bind(Basic, vec![Key { code: vis_primitives::key::KeyCode::PageDown, modifiers: Default::default() }], Action::Scroll(ScrollDir::Down));

	// -- TEXTOBJ / OPERATOR_OPTION: only meaningful while an operator or a
	// visual selection is live; Normal/Insert never search these directly.
	km.bind(TextObj, k('i'), Action::TextObj { inner: true });
	km.bind(TextObj, k('a'), Action::TextObj { inner: false });
	km.bind(OperatorOption, k('v'), Action::SwitchMode(ModeKind::Visual));
	km.bind(OperatorOption, k('V'), Action::SwitchMode(ModeKind::VisualLine));

	// -- OPERATOR: the operator keys themselves, available wherever an
	// operator can be initiated (Normal, Visual, VisualLine). ------------
	km.bind(Operator, k('d'), Action::Operator(OperatorKind::Delete));
	km.bind(Operator, k('c'), Action::Operator(OperatorKind::Change));
	km.bind(Operator, k('y'), Action::Operator(OperatorKind::Yank));
	km.bind(Operator, k('<'), Action::Operator(OperatorKind::ShiftLeft));
	km.bind(Operator, k('>'), Action::Operator(OperatorKind::ShiftRight));
	km.bind(Operator, vec![Key::char('g'), Key::char('u')], Action::Operator(OperatorKind::CaseLower));
	km.bind(Operator, vec![Key::char('g'), Key::char('U')], Action::Operator(OperatorKind::CaseUpper));
	// `~` and `J` are complete commands in their own right, not operators
	// awaiting a motion: they act on an implicit span right away.
	km.bind(Operator, k('~'), Action::OperatorImmediate(OperatorKind::CaseSwap));
	km.bind(Operator, k('J'), Action::OperatorImmediate(OperatorKind::Join));

	// -- NORMAL-only bindings ---------------------------------------------
	km.bind(Normal, k('i'), Action::SwitchMode(ModeKind::Insert));
	km.bind(Normal, k('a'), Action::AppendAfterCursor);
	km.bind(Normal, k('I'), Action::Movement(MotionKind::LineFirstNonBlank));
	km.bind(Normal, k('A'), Action::Movement(MotionKind::LineEnd));
	km.bind(Normal, k('o'), Action::OpenBelow);
	km.bind(Normal, k('O'), Action::OpenAbove);
	km.bind(Normal, vec![Key::char('g'), Key::char('p')], Action::OperatorImmediate(OperatorKind::PutAfterEnd));
	km.bind(Normal, vec![Key::char('g'), Key::char('P')], Action::OperatorImmediate(OperatorKind::PutBeforeEnd));
	km.bind(Normal, k('v'), Action::SwitchMode(ModeKind::Visual));
	km.bind(Normal, k('V'), Action::SwitchMode(ModeKind::VisualLine));
	km.bind(Normal, k('x'), Action::OperatorImmediate(OperatorKind::Delete));
	km.bind(Normal, k('r'), Action::Replace);
	km.bind(Normal, k('p'), Action::OperatorImmediate(OperatorKind::PutAfter));
	km.bind(Normal, k('P'), Action::OperatorImmediate(OperatorKind::PutBefore));
	km.bind(Normal, k('u'), Action::Undo);
	km.bind(Normal, vec![Key::ctrl('r')], Action::Redo);
	km.bind(Normal, k('.'), Action::Repeat);
	km.bind(Normal, k('"'), Action::Reg);
	km.bind(Normal, k('m'), Action::MarkSet);
	km.bind(Normal, vec![Key::char('`')], Action::MarkMotion);
	km.bind(Normal, k('q'), Action::MacroRecord);
	km.bind(Normal, k('@'), Action::MacroReplay);
	km.bind(Normal, vec![Key::char('/')], Action::PromptSearch { reverse: false });
	km.bind(Normal, vec![Key::char('?')], Action::PromptSearch { reverse: true });
	km.bind(Normal, vec![Key::char(':')], Action::PromptCmd);
	km.bind(Normal, vec![Key::char('C'), Key::char('x')], Action::CursorNew);
	km.bind(Normal, k('&'), Action::CursorsAlign);

	// -- VISUAL / VISUAL_LINE mode exits and multi-cursor entry points ----
	for mode in [Visual, VisualLine] {
		km.bind(mode, vec![Key::esc()], Action::SwitchMode(ModeKind::Normal));
		km.bind(mode, k('o'), Action::SelectionSwap);
	}
	km.bind(Visual, vec![Key::char('g'), Key::char('w')], Action::CursorSelectWord);
	km.bind(Visual, vec![Key::char('C'), Key::char('n')], Action::CursorSelectNext);
	km.bind(Visual, vec![Key::char('C'), Key::char('s')], Action::CursorSelectSkip);
	for mode in [Visual, VisualLine] {
		km.bind(mode, k('I'), Action::Operator(OperatorKind::CursorSol));
		km.bind(mode, k('A'), Action::Operator(OperatorKind::CursorEol));
	}

	// -- INSERT / REPLACE -------------------------------------------------
	km.bind(Insert, vec![Key::esc()], Action::SwitchMode(ModeKind::Normal));
	km.bind(Replace, vec![Key::esc()], Action::SwitchMode(ModeKind::Normal));

	// -- READLINE: prompt-line editing -------------------------------------
	km.bind(Readline, vec![Key::esc()], Action::Escape);
	km.bind(Readline, vec![Key { code: vis_primitives::key::KeyCode::Backspace, modifiers: Default::default() }], Action::PromptBackspace);
	km.bind(Readline, vec![Key { code: vis_primitives::key::KeyCode::Enter, modifiers: Default::default() }], Action::PromptCmd);

	km
}

#[cfg(test)]
mod tests;
