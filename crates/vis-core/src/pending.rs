//! The pending-command record: §3's `Pending command` data record and the
//! pieces of dispatcher state layered on top of it (the key buffer the
//! mode engine matches against, and the "awaiting one more key" shape).

use vis_primitives::range::TextKind;

use crate::action::{Action, OperatorKind};
use crate::movement::MotionKind;

/// A handler shape that consumed zero bytes and needs exactly one more key
/// token before it can run (§4.3, §5: these never block, they re-enter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Awaiting {
	MovementKey(MotionKind),
	TextObj { inner: bool },
	Reg,
	MarkSet,
	MarkMotion,
	InsertRegister,
	MacroRecord,
	MacroReplay,
	Replace,
}

impl Awaiting {
	pub fn from_action(action: Action) -> Option<Self> {
		Some(match action {
			Action::MovementKey(kind) => Awaiting::MovementKey(kind),
			Action::TextObj { inner } => Awaiting::TextObj { inner },
			Action::Reg => Awaiting::Reg,
			Action::MarkSet => Awaiting::MarkSet,
			Action::MarkMotion => Awaiting::MarkMotion,
			Action::InsertRegister => Awaiting::InsertRegister,
			Action::MacroRecord => Awaiting::MacroRecord,
			Action::MacroReplay => Awaiting::MacroReplay,
			Action::Replace => Awaiting::Replace,
			_ => return None,
		})
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToTillRepeat {
	pub ch: char,
	pub forward: bool,
	pub till: bool,
}

/// Transient dispatcher state: created empty, mutated by every routed
/// keystroke, consumed (executed and cleared) once the grammar in §4.5 is
/// satisfied. `pre_count`/`post_count` are kept separate (rather than one
/// `count` field multiplied in place) so that `2d3w` can report "6" without
/// losing which half came from the operator and which from the motion.
#[derive(Debug, Clone, Default)]
pub struct PendingCommand {
	pub pre_count: usize,
	pub post_count: usize,
	pub register: Option<char>,
	pub operator: Option<OperatorKind>,
	pub motion_kind_override: Option<TextKind>,
	pub to_till_repeat: Option<ToTillRepeat>,
	pub awaiting: Option<Awaiting>,
}

impl PendingCommand {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.pre_count == 0
			&& self.post_count == 0
			&& self.register.is_none()
			&& self.operator.is_none()
			&& self.motion_kind_override.is_none()
			&& self.awaiting.is_none()
	}

	pub fn clear(&mut self) {
		*self = Self::default();
	}

	/// `c₁ op c₂ m` deletes `c₁·c₂` motions' worth (§4.5); each unset count
	/// defaults to 1 for the multiply, but an entirely unset pending command
	/// still reports an effective count of 1 for plain motions.
	pub fn effective_count(&self) -> usize {
		let pre = self.pre_count.max(1);
		let post = self.post_count.max(1);
		pre * post
	}

	/// Appends a decimal digit to whichever count slot is currently being
	/// typed: before the operator is chosen, digits accumulate in
	/// `pre_count`; once an operator is pending, they move to `post_count`.
	pub fn push_digit(&mut self, digit: u32) {
		let slot = if self.operator.is_some() { &mut self.post_count } else { &mut self.pre_count };
		*slot = slot.saturating_mul(10).saturating_add(digit as usize);
	}

	pub fn count_slot_is_unset(&self) -> bool {
		if self.operator.is_some() { self.post_count == 0 } else { self.pre_count == 0 }
	}
}
