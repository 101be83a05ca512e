//! The action table: §4.3. An action is a closed sum of "handler shapes"
//! rather than an open function-pointer table — each shape is one
//! implementation parameterised by its payload, dispatched in
//! `Dispatcher::apply` (see `pending.rs`). This trades the flexibility of a
//! plugin-style registry for the guarantee that every action the config
//! surface can name is exhaustively matched at compile time (§9).

use vis_primitives::mode::ModeKind;

use crate::movement::MotionKind;
use crate::textobject::ObjectKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperatorKind {
	Change,
	Delete,
	Yank,
	ShiftLeft,
	ShiftRight,
	CaseLower,
	CaseUpper,
	CaseSwap,
	Join,
	PutBefore,
	PutAfter,
	PutBeforeEnd,
	PutAfterEnd,
	CursorSol,
	CursorEol,
	RepeatReplace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScrollDir {
	Up,
	Down,
}

/// Every action the dispatcher can look up by name or bind a key sequence
/// to. Variants whose payload says "consume a key" do not themselves read
/// input — the dispatcher buffers the following key token and re-enters
/// with it once available (§5: these handlers never block).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
	Movement(MotionKind),
	MovementKey(MotionKind),
	TextObj { inner: bool },
	Operator(OperatorKind),
	GotoLine,
	SwitchMode(ModeKind),
	Reg,
	MarkSet,
	MarkMotion,
	InsertRegister,
	MacroRecord,
	MacroReplay,
	Replace,
	Scroll(ScrollDir),
	Slide(ScrollDir),
	PromptSearch { reverse: bool },
	PromptCmd,
	Repeat,
	Undo,
	Redo,
	Earlier,
	Later,
	OpenBelow,
	OpenAbove,
	CursorNew,
	CursorDispose,
	CursorsAlign,
	CursorSelectWord,
	CursorSelectNext,
	CursorSelectSkip,
	SearchWordUnderCursor,
	PromptBackspace,
	SelectionSwap,
	/// An operator bound to its own single key that acts without waiting
	/// for a motion: `x` (delete), `~` (case-swap), `J` (join) and the
	/// `p`/`P`/`gp`/`gP` puts. Kept distinct from `Operator` so the
	/// dispatcher never has to guess, from the payload alone, whether a
	/// resolved `OperatorKind` should wait for a motion or fire now.
	OperatorImmediate(OperatorKind),
	/// `a`: advance past the character under the cursor and open insert
	/// mode there. Distinct from `Movement(CharNext)` because it also
	/// opens an undo group, which a bare motion must never do.
	AppendAfterCursor,
	Escape,
}

impl Action {
	/// Whether this action's handler shape consumes one more key token
	/// before it can run (§4.3, §5). The dispatcher buffers the command
	/// rather than executing until that key arrives.
	pub fn needs_key(&self) -> bool {
		matches!(
			self,
			Action::MovementKey(_)
				| Action::TextObj { .. }
				| Action::Reg
				| Action::MarkSet
				| Action::MarkMotion
				| Action::InsertRegister
				| Action::MacroRecord
				| Action::MacroReplay
				| Action::Replace
		)
	}
}

/// Maps an object-selection key (`w`, `(`, `"`, …) to the object it names.
/// `None` for keys that name no text object.
pub fn object_kind_for_key(c: char) -> Option<ObjectKind> {
	use crate::movement::WordType;
	Some(match c {
		'w' => ObjectKind::Word(WordType::Word),
		'W' => ObjectKind::Word(WordType::WORD),
		's' => ObjectKind::Sentence,
		'p' => ObjectKind::Paragraph,
		'(' | ')' | 'b' => ObjectKind::Bracket('(', ')'),
		'{' | '}' | 'B' => ObjectKind::Bracket('{', '}'),
		'[' | ']' => ObjectKind::Bracket('[', ']'),
		'<' | '>' => ObjectKind::Bracket('<', '>'),
		'"' => ObjectKind::Quote('"'),
		'\'' => ObjectKind::Quote('\''),
		'`' => ObjectKind::Quote('`'),
		'g' => ObjectKind::Buffer,
		'f' => ObjectKind::Function,
		'l' => ObjectKind::Line,
		_ => return None,
	})
}
