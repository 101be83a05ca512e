//! The small set of modes the view/dispatcher report externally.
//!
//! This is distinct from the *binding-mode* namespaces the mode engine
//! searches internally (`BASIC`, `MOVE`, `TEXTOBJ`, `OPERATOR`, …, see
//! `vis_core::mode_engine::BindingMode`): those are lookup tables composed
//! to resolve a key sequence, while `ModeKind` is what a status line would
//! display. Operator-pending is not a `ModeKind` — vi stays in `Normal`
//! while an operator awaits its motion; the dispatcher tracks that as part
//! of the pending command, not as a mode transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModeKind {
	Normal,
	Insert,
	Replace,
	Visual,
	VisualLine,
	Prompt,
}

impl ModeKind {
	pub fn label(&self) -> &'static str {
		match self {
			ModeKind::Normal => "NORMAL",
			ModeKind::Insert => "INSERT",
			ModeKind::Replace => "REPLACE",
			ModeKind::Visual => "VISUAL",
			ModeKind::VisualLine => "VISUAL LINE",
			ModeKind::Prompt => "PROMPT",
		}
	}

	pub fn is_visual(&self) -> bool {
		matches!(self, ModeKind::Visual | ModeKind::VisualLine)
	}
}
