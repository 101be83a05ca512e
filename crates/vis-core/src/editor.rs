//! The command builder / dispatcher: §4.5. Owns every other component and
//! drives them from a stream of key tokens, accumulating the pending
//! command described in `pending.rs` until the grammar in §4.5 is
//! satisfied, then executing and clearing it.

use regex::Regex;
use tracing::{debug, trace};
use vis_primitives::key::{Key, KeyCode};
use vis_primitives::mode::ModeKind;
use vis_primitives::range::{CharIdx, Direction, Range, TextKind};
use vis_text::Buffer;

use crate::action::{Action, OperatorKind, ScrollDir};
use crate::error::CoreError;
use crate::jumplist::{ChangeList, JumpList};
use crate::macros::MacroStore;
use crate::marks::{self, MarkStore};
use crate::mode_engine::{default_keymap, BindingMode, Keymap, LookupResult};
use crate::movement::{self, find_next_match, find_prev_match, word_under_cursor, LastFind, MotionKind};
use crate::operator::{self, CursorEdit};
use crate::pending::{Awaiting, PendingCommand};
use crate::prompt::{Prompt, PromptKind, PromptSubmit};
use crate::registers::{self, RegisterStore};
use crate::textobject::{self, ObjectKind};
use crate::view::View;

/// The modal editing core: every piece of state a host needs to drive a
/// buffer through a stream of key tokens (§2's component list, assembled).
pub struct Editor {
	buffer: Buffer,
	view: View,
	registers: RegisterStore,
	marks: MarkStore,
	macros: MacroStore,
	jumplist: JumpList,
	changelist: ChangeList,
	keymap: Keymap,
	mode: ModeKind,
	pending: PendingCommand,
	key_buffer: Vec<Key>,
	prompt: Option<Prompt>,
	last_find: Option<LastFind>,
	last_search: Option<Regex>,
	last_search_reverse: bool,
	last_macro: Option<char>,
	repeat_slot: Option<Vec<Key>>,
	command_keys: Vec<Key>,
	replaying_repeat: bool,
	/// Set when a command that entered Insert/Replace mode should finalize
	/// the repeat slot once that mode is left again, rather than the moment
	/// it fired — `ciw` alone is not what `.` should replay, `ciwfoo<Esc>`
	/// is (§4.5, §9's replace/repeat decision extended to every insert entry).
	pending_repeat: bool,
}

impl Editor {
	pub fn new(text: impl AsRef<str>) -> Self {
		Self {
			buffer: Buffer::new(text),
			view: View::new(0),
			registers: RegisterStore::new(),
			marks: MarkStore::new(),
			macros: MacroStore::new(),
			jumplist: JumpList::new(),
			changelist: ChangeList::new(),
			keymap: default_keymap(),
			mode: ModeKind::Normal,
			pending: PendingCommand::new(),
			key_buffer: Vec::new(),
			prompt: None,
			last_find: None,
			last_search: None,
			last_search_reverse: false,
			last_macro: None,
			repeat_slot: None,
			command_keys: Vec::new(),
			replaying_repeat: false,
			pending_repeat: false,
		}
	}

	pub fn buffer(&self) -> &Buffer {
		&self.buffer
	}

	pub fn view(&self) -> &View {
		&self.view
	}

	pub fn mode(&self) -> ModeKind {
		self.mode
	}

	pub fn registers(&self) -> &RegisterStore {
		&self.registers
	}

	pub fn marks(&self) -> &MarkStore {
		&self.marks
	}

	pub fn text(&self) -> String {
		self.buffer.to_string()
	}

	pub fn prompt(&self) -> Option<&Prompt> {
		self.prompt.as_ref()
	}

	// -- key dispatch ----------------------------------------------------

	/// Feeds one key token through the dispatcher (§4.4's step 1-4, wired
	/// to §4.5's command builder). Errors are recovered locally per §7:
	/// the pending command is discarded and the view left unchanged.
	pub fn handle_key(&mut self, key: Key) -> Result<(), CoreError> {
		if self.macros.is_recording() && !self.is_macro_toggle_sequence(key) {
			self.macros.record_key(key);
		}

		if !self.replaying_repeat {
			if self.pending.is_empty() && self.mode == ModeKind::Normal && self.prompt.is_none() {
				self.command_keys.clear();
			}
			self.command_keys.push(key);
		}

		if let Some(awaiting) = self.pending.awaiting.take() {
			return self.resolve_awaiting(awaiting, key);
		}

		if self.mode == ModeKind::Prompt {
			return self.handle_prompt_key(key);
		}

		if matches!(self.mode, ModeKind::Normal | ModeKind::Visual | ModeKind::VisualLine) {
			if let Some(d) = key.as_digit() {
				if d != 0 || !self.pending.count_slot_is_unset() {
					self.pending.push_digit(d);
					return Ok(());
				}
			}
		}

		self.key_buffer.push(key.normalize());
		let binding_mode = BindingMode::default_for(self.mode);
		match self.keymap.lookup(binding_mode, &self.key_buffer) {
			LookupResult::Match(action) => {
				self.key_buffer.clear();
				trace!(?action, mode = ?self.mode, "action resolved");
				self.dispatch(action)
			}
			LookupResult::Pending => Ok(()),
			LookupResult::None => {
				self.key_buffer.clear();
				match self.mode {
					ModeKind::Insert | ModeKind::Replace => self.insert_or_replace_text(key),
					_ => {
						self.pending.clear();
						Ok(())
					}
				}
			}
		}
	}

	/// Whether `key` is the macro-record toggle itself, or the register-id
	/// keystroke that immediately follows it — neither is part of the
	/// recorded sequence (§4.6: "minus the record-toggle keys themselves").
	fn is_macro_toggle_sequence(&self, key: Key) -> bool {
		if self.pending.awaiting == Some(Awaiting::MacroRecord) {
			return true;
		}
		let binding_mode = BindingMode::default_for(self.mode);
		let mut probe = self.key_buffer.clone();
		probe.push(key.normalize());
		matches!(self.keymap.lookup(binding_mode, &probe), LookupResult::Match(Action::MacroRecord))
	}

	fn resolve_awaiting(&mut self, awaiting: Awaiting, key: Key) -> Result<(), CoreError> {
		match awaiting {
			Awaiting::Reg => {
				if let Some(c) = key.as_char() {
					self.pending.register = Some(c);
				}
				Ok(())
			}
			Awaiting::MarkSet => {
				if let Some(c) = key.as_char() {
					self.marks.set(c, self.view.primary().pos);
				}
				self.pending.clear();
				Ok(())
			}
			Awaiting::MarkMotion => {
				let Some(c) = key.as_char() else {
					self.pending.clear();
					return Ok(());
				};
				self.goto_mark(c)
			}
			Awaiting::InsertRegister => {
				let Some(c) = key.as_char() else {
					self.pending.clear();
					return Ok(());
				};
				let content = self.registers.read(c).cloned().unwrap_or_default();
				self.insert_text_at_every_cursor(&content.bytes);
				self.pending.clear();
				Ok(())
			}
			Awaiting::MacroRecord => {
				if let Some(c) = key.as_char() {
					self.macros.toggle_record(c);
				}
				self.pending.clear();
				Ok(())
			}
			Awaiting::MacroReplay => {
				let Some(c) = key.as_char() else {
					self.pending.clear();
					return Ok(());
				};
				let id = if c == registers::LAST_MACRO { self.last_macro.unwrap_or(c) } else { c };
				self.last_macro = Some(id);
				let count = self.pending.effective_count();
				self.pending.clear();
				let keys = self.macros.replay(id);
				for _ in 0..count {
					for k in keys.clone() {
						self.handle_key(k)?;
					}
				}
				Ok(())
			}
			Awaiting::Replace => {
				let Some(c) = key.as_char() else {
					self.pending.clear();
					return Ok(());
				};
				self.do_replace(c)
			}
			Awaiting::MovementKey(kind) => self.run_motion(kind, key.as_char()),
			Awaiting::TextObj { inner } => {
				let Some(c) = key.as_char() else {
					self.pending.clear();
					return Ok(());
				};
				match crate::action::object_kind_for_key(c) {
					Some(obj) => self.run_textobject(obj, inner),
					None => {
						self.pending.clear();
						Ok(())
					}
				}
			}
		}
	}

	fn handle_prompt_key(&mut self, key: Key) -> Result<(), CoreError> {
		self.key_buffer.push(key.normalize());
		match self.keymap.lookup(BindingMode::Prompt, &self.key_buffer) {
			LookupResult::Match(action) => {
				self.key_buffer.clear();
				self.dispatch(action)
			}
			LookupResult::Pending => Ok(()),
			LookupResult::None => {
				self.key_buffer.clear();
				if let (Some(prompt), Some(c)) = (self.prompt.as_mut(), key.as_char()) {
					prompt.insert(c);
				}
				Ok(())
			}
		}
	}

	// -- action dispatch ---------------------------------------------------

	fn dispatch(&mut self, action: Action) -> Result<(), CoreError> {
		if action.needs_key() {
			self.pending.awaiting = Awaiting::from_action(action);
			return Ok(());
		}

		match action {
			Action::Movement(kind) => {
				if matches!(kind, MotionKind::JumpPrev | MotionKind::JumpNext | MotionKind::ChangePrev | MotionKind::ChangeNext) {
					self.run_list_motion(kind);
					Ok(())
				} else {
					self.run_motion(kind, None)
				}
			}
			Action::GotoLine => {
				let kind = if self.pending.count_slot_is_unset() { MotionKind::FileEnd } else { MotionKind::GotoLine };
				self.run_motion(kind, None)
			}
			Action::SwitchMode(target) => self.handle_switch_mode(target),
			Action::Operator(kind) => self.dispatch_operator(kind),
			Action::OperatorImmediate(kind) => self.dispatch_operator_immediate(kind),
			Action::AppendAfterCursor => self.append_after_cursor(),
			Action::Scroll(dir) => {
				self.scroll(dir, self.view.height.max(1));
				self.pending.clear();
				Ok(())
			}
			Action::Slide(dir) => {
				self.scroll(dir, 1);
				self.pending.clear();
				Ok(())
			}
			Action::PromptSearch { reverse } => {
				self.open_prompt(PromptKind::Search { reverse });
				Ok(())
			}
			Action::PromptCmd => {
				if let Some(prompt) = self.prompt.take() {
					let return_mode = prompt.return_mode();
					self.mode = return_mode;
					self.apply_prompt_submit(prompt.submit())
				} else {
					self.open_prompt(PromptKind::Command);
					Ok(())
				}
			}
			Action::Repeat => self.execute_repeat(),
			Action::Undo => {
				let pos = self.buffer.undo(self.view.primary().pos)?;
				self.view.primary_mut().pos = pos;
				self.pending.clear();
				Ok(())
			}
			Action::Redo => {
				let pos = self.buffer.redo(self.view.primary().pos)?;
				self.view.primary_mut().pos = pos;
				self.pending.clear();
				Ok(())
			}
			Action::Earlier => {
				let pos = self.buffer.earlier(self.view.primary().pos)?;
				self.view.primary_mut().pos = pos;
				self.pending.clear();
				Ok(())
			}
			Action::Later => {
				let pos = self.buffer.later(self.view.primary().pos)?;
				self.view.primary_mut().pos = pos;
				self.pending.clear();
				Ok(())
			}
			Action::OpenBelow => self.open_line(true),
			Action::OpenAbove => self.open_line(false),
			Action::CursorNew => {
				self.view.cursor_new();
				self.pending.clear();
				Ok(())
			}
			Action::CursorDispose => {
				let idx = self.view.primary_index();
				self.view.cursor_dispose(idx);
				self.pending.clear();
				Ok(())
			}
			Action::CursorsAlign => {
				self.view.cursors_align(&self.buffer);
				self.pending.clear();
				Ok(())
			}
			Action::CursorSelectWord => {
				if self.view.cursor_select_word(self.buffer.slice()) {
					self.mode = ModeKind::Visual;
				}
				self.pending.clear();
				Ok(())
			}
			Action::CursorSelectNext => {
				self.view.cursor_select_next(self.buffer.slice());
				self.pending.clear();
				Ok(())
			}
			Action::CursorSelectSkip => {
				self.view.cursor_select_skip(self.buffer.slice());
				self.pending.clear();
				Ok(())
			}
			Action::SearchWordUnderCursor => self.search_word_under_cursor(),
			Action::PromptBackspace => {
				let should_abort = match self.prompt.as_mut() {
					Some(prompt) => !prompt.backspace(),
					None => false,
				};
				if should_abort {
					self.abort_prompt();
				}
				Ok(())
			}
			Action::SelectionSwap => {
				let idx = self.view.primary_index();
				self.view.cursor_selection_swap(idx);
				self.pending.clear();
				Ok(())
			}
			Action::Escape => {
				if self.prompt.is_some() {
					self.abort_prompt();
				} else {
					self.switch_mode(ModeKind::Normal);
				}
				self.pending.clear();
				Ok(())
			}
			Action::MovementKey(_)
			| Action::TextObj { .. }
			| Action::Reg
			| Action::MarkSet
			| Action::MarkMotion
			| Action::InsertRegister
			| Action::MacroRecord
			| Action::MacroReplay
			| Action::Replace => unreachable!("needs_key() short-circuits above"),
		}
	}

	/// `v`/`V` double as operator-pending motion-kind overrides (§4.5) and
	/// as plain mode switches; which one applies depends on whether an
	/// operator is currently waiting for its motion.
	fn handle_switch_mode(&mut self, target: ModeKind) -> Result<(), CoreError> {
		if self.pending.operator.is_some() && matches!(target, ModeKind::Visual | ModeKind::VisualLine) {
			self.pending.motion_kind_override = Some(if target == ModeKind::Visual { TextKind::Charwise } else { TextKind::Linewise });
			return Ok(());
		}
		if self.mode == target && target.is_visual() {
			self.switch_mode(ModeKind::Normal);
			self.pending.clear();
			return Ok(());
		}
		if matches!(target, ModeKind::Insert | ModeKind::Replace) {
			self.pending_repeat = true;
		}
		self.switch_mode(target);
		self.pending.clear();
		Ok(())
	}

	fn switch_mode(&mut self, target: ModeKind) {
		debug!(from = ?self.mode, to = ?target, "mode switch");
		match self.mode {
			ModeKind::Insert | ModeKind::Replace => {
				self.buffer.commit_group();
				let pos = self.view.primary().pos;
				self.view.primary_mut().pos = self.buffer.char_prev(pos).min(pos);
				if self.pending_repeat {
					self.pending_repeat = false;
					self.record_repeat();
				}
			}
			ModeKind::Visual | ModeKind::VisualLine => {
				if let Some(sel) = self.view.primary().selection {
					self.marks.set(marks::SELECTION_START, sel.min());
					self.marks.set(marks::SELECTION_END, sel.max());
				}
				self.view.cursors_clear();
			}
			_ => {}
		}
		if matches!(target, ModeKind::Insert | ModeKind::Replace) {
			self.buffer.begin_group(self.view.primary().pos);
		}
		self.mode = target;
	}

	fn append_after_cursor(&mut self) -> Result<(), CoreError> {
		let max = self.buffer.len_chars();
		for cursor in self.view.cursors_mut() {
			cursor.pos = (cursor.pos + 1).min(max);
		}
		self.pending_repeat = true;
		self.switch_mode(ModeKind::Insert);
		self.pending.clear();
		Ok(())
	}

	// -- motions -------------------------------------------------------

	fn run_motion(&mut self, kind: MotionKind, key_arg: Option<char>) -> Result<(), CoreError> {
		let has_operator = self.pending.operator.is_some();
		let count = self.pending.effective_count();
		let extend = self.mode.is_visual() || has_operator;
		let snapshot: Vec<_> = self.view.cursors().to_vec();

		if matches!(kind, MotionKind::FindCharForward { .. } | MotionKind::FindCharBackward { .. }) {
			if let Some(ch) = key_arg {
				let direction = if matches!(kind, MotionKind::FindCharForward { .. }) { Direction::Forward } else { Direction::Backward };
				let till = matches!(kind, MotionKind::FindCharForward { till: true } | MotionKind::FindCharBackward { till: true });
				self.last_find = Some(LastFind { ch, direction, till });
			} else {
				self.pending.clear();
				return Ok(());
			}
		}

		let mut edits = Vec::new();
		for (idx, cursor) in snapshot.iter().enumerate() {
			let base = Range::new(cursor.selection.map(|s| s.anchor).unwrap_or(cursor.pos), cursor.pos);
			let mut result = self.eval_motion(kind, key_arg, base, count, extend);
			// `operator::apply`'s charwise span always treats the range's max
			// as the last included index and adds one to get the exclusive
			// buffer offset (see `operator::span_for`). An exclusive motion's
			// head/anchor is the opposite — the far/greater-index endpoint is
			// what the motion excludes — so it needs shifting down by one to
			// land on the actual last included character; an inclusive motion
			// already lands there. Only the endpoint that holds the greater
			// index needs the shift, whichever direction the motion ran.
			if has_operator && !kind.is_inclusive() {
				if result.head > result.anchor {
					result.head -= 1;
				} else if result.anchor > result.head {
					result.anchor -= 1;
				}
			}
			if has_operator {
				let text_kind = self.pending.motion_kind_override.unwrap_or(kind.default_text_kind());
				edits.push(CursorEdit { view_index: idx, range: result, kind: text_kind });
			} else if let Some(c) = self.view.cursors_mut().get_mut(idx) {
				c.pos = result.head;
				if extend {
					c.selection = Some(result);
				} else {
					c.selection = None;
				}
			}
		}

		if has_operator {
			let op = self.pending.operator.take().expect("checked above");
			self.finish_operator(op, edits)
		} else {
			if extend {
				self.view.normalize();
			}
			self.pending.clear();
			Ok(())
		}
	}

	fn run_list_motion(&mut self, kind: MotionKind) {
		let pos = self.view.primary().pos;
		let count = self.pending.effective_count();
		let target = match kind {
			MotionKind::JumpPrev => self.jumplist.prev(pos, count),
			MotionKind::JumpNext => self.jumplist.next(count),
			MotionKind::ChangePrev => self.changelist.prev(pos, count),
			MotionKind::ChangeNext => self.changelist.next(count),
			_ => None,
		};
		if let Some(target) = target {
			self.view.primary_mut().pos = target.min(self.buffer.max_cursor_pos());
		}
		self.pending.clear();
	}

	fn eval_motion(&mut self, kind: MotionKind, key_arg: Option<char>, range: Range, count: usize, extend: bool) -> Range {
		let text = self.buffer.slice();
		match kind {
			MotionKind::CharPrev => movement::move_horizontally(text, range, Direction::Backward, count, extend),
			MotionKind::CharNext => movement::move_horizontally(text, range, Direction::Forward, count, extend),
			MotionKind::WordStart(wt) => movement::move_to_next_word_start(text, range, count, wt, extend),
			MotionKind::WordEnd(wt) => movement::move_to_next_word_end(text, range, count, wt, extend),
			MotionKind::WordStartPrev(wt) => movement::move_to_prev_word_start(text, range, count, wt, extend),
			MotionKind::LineUp => movement::move_vertically(text, range, Direction::Backward, count, extend),
			MotionKind::LineDown => movement::move_vertically(text, range, Direction::Forward, count, extend),
			MotionKind::LineBegin => movement::move_to_line_start(text, range, extend),
			MotionKind::LineFirstNonBlank => movement::move_to_first_nonwhitespace(text, range, extend),
			MotionKind::LineLastNonBlank => movement::move_to_last_nonwhitespace(text, range, extend),
			MotionKind::LineEnd => movement::move_to_line_end(text, range, extend),
			MotionKind::ParagraphPrev => movement::move_to_paragraph(text, range, Direction::Backward, count, extend),
			MotionKind::ParagraphNext => movement::move_to_paragraph(text, range, Direction::Forward, count, extend),
			MotionKind::SentencePrev => movement::move_to_sentence(text, range, Direction::Backward, count, extend),
			MotionKind::SentenceNext => movement::move_to_sentence(text, range, Direction::Forward, count, extend),
			MotionKind::BracketMatch => movement::move_to_matching_bracket(text, range, extend),
			MotionKind::FindCharForward { till } => {
				let ch = key_arg.unwrap_or(' ');
				movement::find_char(text, range, ch, Direction::Forward, till, count, extend)
			}
			MotionKind::FindCharBackward { till } => {
				let ch = key_arg.unwrap_or(' ');
				movement::find_char(text, range, ch, Direction::Backward, till, count, extend)
			}
			MotionKind::RepeatFindLast => match self.last_find {
				Some(last) => movement::repeat_find(text, range, last, false, count, extend),
				None => range,
			},
			MotionKind::RepeatFindLastReverse => match self.last_find {
				Some(last) => movement::repeat_find(text, range, last, true, count, extend),
				None => range,
			},
			MotionKind::SearchNext => {
				let forward = !self.last_search_reverse;
				self.eval_search(range, forward, extend)
			}
			MotionKind::SearchPrev => {
				let forward = self.last_search_reverse;
				self.eval_search(range, forward, extend)
			}
			MotionKind::FileBegin => movement::move_to_document_start(text, range, extend),
			MotionKind::GotoLine => movement::move_to_line(text, range, count, extend),
			MotionKind::FileEnd => movement::move_to_document_end(text, range, extend),
			MotionKind::JumpPrev | MotionKind::JumpNext | MotionKind::ChangePrev | MotionKind::ChangeNext => range,
		}
	}

	fn eval_search(&self, range: Range, forward: bool, extend: bool) -> Range {
		let Some(re) = self.last_search.as_ref() else { return range };
		let text = self.buffer.slice();
		let found = if forward { find_next_match(text, re, range.head) } else { find_prev_match(text, re, range.head) };
		match found {
			Some(m) => {
				if extend {
					Range::new(range.anchor, m.min())
				} else {
					Range::point(m.min())
				}
			}
			None => range,
		}
	}

	fn jump_search(&mut self, forward: bool) {
		let range = Range::point(self.view.primary().pos);
		let result = self.eval_search(range, forward, false);
		if result.head != range.head {
			self.jumplist.push(range.head);
			self.view.primary_mut().pos = result.head;
		}
		self.pending.clear();
	}

	fn search_word_under_cursor(&mut self) -> Result<(), CoreError> {
		let Some(word) = word_under_cursor(self.buffer.slice(), self.view.primary().pos) else {
			self.pending.clear();
			return Ok(());
		};
		let pattern = format!(r"\b{}\b", regex::escape(&word));
		match Regex::new(&pattern) {
			Ok(re) => {
				self.last_search = Some(re);
				self.last_search_reverse = false;
				self.registers.write(registers::LAST_SEARCH, word, TextKind::Charwise);
				self.jump_search(true);
			}
			Err(_) => self.pending.clear(),
		}
		Ok(())
	}

	// -- text objects ----------------------------------------------------

	fn run_textobject(&mut self, kind: ObjectKind, inner: bool) -> Result<(), CoreError> {
		let has_operator = self.pending.operator.is_some();
		let snapshot: Vec<_> = self.view.cursors().to_vec();
		let max = self.buffer.max_cursor_pos();

		if has_operator {
			let mut edits = Vec::new();
			for (idx, cursor) in snapshot.iter().enumerate() {
				let Some(range) = textobject::resolve(self.buffer.slice(), cursor.pos, kind, inner) else { continue };
				let text_kind = self.pending.motion_kind_override.unwrap_or_else(|| Self::object_default_kind(kind));
				edits.push(CursorEdit { view_index: idx, range, kind: text_kind });
			}
			let op = self.pending.operator.take().expect("checked above");
			self.finish_operator(op, edits)
		} else {
			let mut any = false;
			for (idx, cursor) in snapshot.iter().enumerate() {
				let Some(range) = textobject::resolve(self.buffer.slice(), cursor.pos, kind, inner) else { continue };
				let clamped = Range::new(range.anchor.min(max), range.head.min(max));
				if let Some(c) = self.view.cursors_mut().get_mut(idx) {
					c.selection = Some(clamped);
					c.pos = clamped.head;
				}
				any = true;
			}
			if any {
				self.view.normalize();
				if self.mode == ModeKind::Normal {
					self.mode = ModeKind::Visual;
				}
			}
			self.pending.clear();
			Ok(())
		}
	}

	fn object_default_kind(kind: ObjectKind) -> TextKind {
		match kind {
			ObjectKind::Line | ObjectKind::Paragraph | ObjectKind::Buffer => TextKind::Linewise,
			_ => TextKind::Charwise,
		}
	}

	fn goto_mark(&mut self, id: char) -> Result<(), CoreError> {
		let target = match self.marks.get_or_err(id) {
			Ok(pos) => pos,
			Err(e) => {
				self.pending.clear();
				return Err(e);
			}
		};
		let from = self.view.primary().pos;
		self.jumplist.push(from);

		if let Some(op) = self.pending.operator.take() {
			let target = target.min(self.buffer.max_cursor_pos());
			// `` ` `` is an exclusive charwise motion (vi): shift the
			// greater-index endpoint down by one, same rationale as
			// `run_motion`'s exclusive-motion fixup.
			let range = if target > from {
				Range::new(from, target - 1)
			} else if from > target {
				Range::new(from - 1, target)
			} else {
				Range::new(from, target)
			};
			let text_kind = self.pending.motion_kind_override.unwrap_or(TextKind::Charwise);
			let edits = vec![CursorEdit { view_index: self.view.primary_index(), range, kind: text_kind }];
			self.finish_operator(op, edits)
		} else {
			self.view.primary_mut().pos = target.min(self.buffer.max_cursor_pos());
			self.pending.clear();
			Ok(())
		}
	}

	// -- operators ---------------------------------------------------------

	fn dispatch_operator(&mut self, kind: OperatorKind) -> Result<(), CoreError> {
		if self.mode.is_visual() {
			self.execute_visual_operator(kind)
		} else if self.pending.operator == Some(kind) {
			self.execute_doubled_operator(kind)
		} else {
			self.pending.operator = Some(kind);
			Ok(())
		}
	}

	/// A doubled operator (`dd`, `yy`, `guu`, …) means "apply linewise to
	/// the current line", repeated `effective_count` lines down (§4.5).
	fn execute_doubled_operator(&mut self, kind: OperatorKind) -> Result<(), CoreError> {
		let count = self.pending.effective_count();
		self.pending.operator = None;
		let snapshot: Vec<_> = self.view.cursors().to_vec();
		let mut edits = Vec::new();
		for (idx, cursor) in snapshot.iter().enumerate() {
			let line = self.buffer.line_of(cursor.pos);
			let end_line = (line + count.saturating_sub(1)).min(self.buffer.visible_line_count().saturating_sub(1));
			let start = self.buffer.line_to_char(line);
			let end = self.buffer.line_to_char(end_line);
			edits.push(CursorEdit { view_index: idx, range: Range::new(start, end), kind: TextKind::Linewise });
		}
		self.finish_operator(kind, edits)
	}

	/// In visual mode the operator acts immediately on each cursor's live
	/// selection (§4.5: "typing an operator in visual mode executes
	/// immediately with the visual selection as the range").
	fn execute_visual_operator(&mut self, kind: OperatorKind) -> Result<(), CoreError> {
		let line_default = self.mode == ModeKind::VisualLine;
		let snapshot: Vec<_> = self.view.cursors().to_vec();
		let mut edits = Vec::new();
		for (idx, cursor) in snapshot.iter().enumerate() {
			let range = cursor.selection.unwrap_or(Range::point(cursor.pos));
			let text_kind = self.pending.motion_kind_override.unwrap_or(if line_default { TextKind::Linewise } else { TextKind::Charwise });
			edits.push(CursorEdit { view_index: idx, range, kind: text_kind });
		}
		self.switch_mode(ModeKind::Normal);
		self.finish_operator(kind, edits)
	}

	/// `x`, `~`, `J`, `p`/`P`/`gp`/`gP`: operators that never wait for a
	/// motion — the implicit range is computed right here.
	fn dispatch_operator_immediate(&mut self, kind: OperatorKind) -> Result<(), CoreError> {
		let count = self.pending.effective_count();
		let register = self.current_register();
		let snapshot: Vec<_> = self.view.cursors().to_vec();
		let mut edits = Vec::new();

		for (idx, cursor) in snapshot.iter().enumerate() {
			let range = match kind {
				OperatorKind::Delete | OperatorKind::CaseSwap => {
					// Same last-included-index convention as `run_motion`'s
					// operator-range fixup: `end` is the exclusive boundary
					// one past the `count`-th character, so the edit's max
					// must be `end - 1` for `span_for` to land back on `end`.
					let end = movement::move_horizontally(self.buffer.slice(), Range::point(cursor.pos), Direction::Forward, count, false).head;
					Range::new(cursor.pos, end.saturating_sub(1).max(cursor.pos))
				}
				OperatorKind::Join => {
					let line = self.buffer.line_of(cursor.pos);
					let lines = count.max(2);
					let end_line = (line + lines - 1).min(self.buffer.visible_line_count().saturating_sub(1));
					Range::new(cursor.pos, self.buffer.line_to_char(end_line))
				}
				OperatorKind::PutAfter | OperatorKind::PutAfterEnd | OperatorKind::PutBefore | OperatorKind::PutBeforeEnd => Range::point(cursor.pos),
				_ => Range::point(cursor.pos),
			};
			let text_kind = match kind {
				OperatorKind::Join => TextKind::Linewise,
				_ => TextKind::Charwise,
			};
			edits.push(CursorEdit { view_index: idx, range, kind: text_kind });
		}

		if count > 1 && matches!(kind, OperatorKind::PutAfter | OperatorKind::PutAfterEnd | OperatorKind::PutBefore | OperatorKind::PutBeforeEnd) {
			return self.put_with_count(kind, register, count, edits);
		}

		match operator::apply(&mut self.buffer, &mut self.view, &mut self.registers, &mut self.marks, kind, register, edits) {
			Ok(new_mode) => {
				self.after_operator_success(kind, new_mode);
				Ok(())
			}
			Err(CoreError::EmptyRange) => {
				self.pending.clear();
				Ok(())
			}
			Err(e) => {
				self.pending.clear();
				Err(e)
			}
		}
	}

	/// Repeating a multi-char put `count` times in one undo group requires
	/// a single `operator::apply` call: looping it would leave each copy's
	/// cursor at the *start* of what it just inserted, so a naive second
	/// call would land inside the first copy rather than after it.
	fn put_with_count(&mut self, kind: OperatorKind, register: char, count: usize, edits: Vec<CursorEdit>) -> Result<(), CoreError> {
		let original = self.registers.read(register).cloned().unwrap_or_default();
		let repeated = original.bytes.repeat(count);
		self.registers.write(register, repeated, original.kind);
		let result = operator::apply(&mut self.buffer, &mut self.view, &mut self.registers, &mut self.marks, kind, register, edits);
		self.registers.restore(register, original);
		match result {
			Ok(new_mode) => {
				self.after_operator_success(kind, new_mode);
				Ok(())
			}
			Err(CoreError::EmptyRange) => {
				self.pending.clear();
				Ok(())
			}
			Err(e) => {
				self.pending.clear();
				Err(e)
			}
		}
	}

	fn finish_operator(&mut self, kind: OperatorKind, edits: Vec<CursorEdit>) -> Result<(), CoreError> {
		let register = self.current_register();
		let count = self.pending.effective_count();
		if count > 1 && matches!(kind, OperatorKind::PutAfter | OperatorKind::PutAfterEnd | OperatorKind::PutBefore | OperatorKind::PutBeforeEnd) {
			return self.put_with_count(kind, register, count, edits);
		}
		match operator::apply(&mut self.buffer, &mut self.view, &mut self.registers, &mut self.marks, kind, register, edits) {
			Ok(new_mode) => {
				self.after_operator_success(kind, new_mode);
				Ok(())
			}
			Err(CoreError::EmptyRange) => {
				self.pending.clear();
				Ok(())
			}
			Err(e) => {
				self.pending.clear();
				Err(e)
			}
		}
	}

	fn after_operator_success(&mut self, kind: OperatorKind, new_mode: Option<ModeKind>) {
		debug!(?kind, "operator executed");
		let repeatable = !matches!(kind, OperatorKind::Yank | OperatorKind::CursorSol | OperatorKind::CursorEol);
		if repeatable {
			self.changelist.push(self.view.primary().pos);
		}
		self.pending.clear();
		match new_mode {
			// `change` enters Insert; the repeat slot is only complete once
			// the inserted text and its terminating Escape are in, so defer
			// to `switch_mode`'s Insert-exit handling rather than recording now.
			Some(mode) => {
				if repeatable {
					self.pending_repeat = true;
				}
				self.switch_mode(mode);
			}
			None => {
				if repeatable {
					self.record_repeat();
				}
			}
		}
	}

	fn current_register(&mut self) -> char {
		self.pending.register.take().unwrap_or(registers::UNNAMED)
	}

	fn do_replace(&mut self, c: char) -> Result<(), CoreError> {
		let count = self.pending.effective_count();
		let cursor_pos = self.view.primary().pos;
		self.buffer.begin_group(cursor_pos);
		let snapshot: Vec<_> = self.view.cursors().to_vec();
		let mut shift: i64 = 0;
		let mut ok = true;
		let mut replaced_spans = Vec::with_capacity(snapshot.len());
		for (idx, cursor) in snapshot.iter().enumerate() {
			let pos = (cursor.pos as i64 + shift).max(0) as CharIdx;
			let end = movement::move_horizontally(self.buffer.slice(), Range::point(pos), Direction::Forward, count, false).head;
			if end - pos != count {
				ok = false;
				continue;
			}
			let replacement: String = std::iter::repeat(c).take(count).collect();
			if self.buffer.replace(pos, end, &replacement).is_err() {
				ok = false;
				continue;
			}
			replaced_spans.push((pos, end));
			if let Some(cur) = self.view.cursors_mut().get_mut(idx) {
				cur.pos = pos + count - 1;
			}
		}
		if ok {
			for (pos, end) in replaced_spans {
				self.marks.migrate(pos, end, 0);
			}
			self.buffer.commit_group();
			self.changelist.push(self.view.primary().pos);
			self.record_repeat();
		} else {
			self.buffer.abort_group();
		}
		self.pending.clear();
		Ok(())
	}

	// -- insert / replace text ------------------------------------------

	fn insert_or_replace_text(&mut self, key: Key) -> Result<(), CoreError> {
		if key.code == KeyCode::Backspace {
			let snapshot: Vec<_> = self.view.cursors().to_vec();
			let mut shift: i64 = 0;
			for (idx, cursor) in snapshot.iter().enumerate() {
				let pos = (cursor.pos as i64 + shift).max(0) as CharIdx;
				if pos == 0 {
					continue;
				}
				let prev = self.buffer.char_prev(pos);
				self.buffer.replace(prev, pos, "")?;
				self.marks.migrate(prev, pos, -((pos - prev) as i64));
				shift -= (pos - prev) as i64;
				if let Some(cur) = self.view.cursors_mut().get_mut(idx) {
					cur.pos = prev;
				}
			}
			return Ok(());
		}

		let Some(ch) = key.as_char() else { return Ok(()) };
		let snapshot: Vec<_> = self.view.cursors().to_vec();
		let mut shift: i64 = 0;
		for (idx, cursor) in snapshot.iter().enumerate() {
			let pos = (cursor.pos as i64 + shift).max(0) as CharIdx;
			let mut text = [0u8; 4];
			let s = ch.encode_utf8(&mut text);
			if self.mode == ModeKind::Replace && pos < self.buffer.max_cursor_pos() && self.buffer.slice().char(pos) != '\n' {
				let next = self.buffer.char_next(pos);
				self.buffer.replace(pos, next, s)?;
				self.marks.migrate(pos, next, 1 - (next - pos) as i64);
				shift += 1 - (next - pos) as i64;
			} else {
				self.buffer.replace(pos, pos, s)?;
				self.marks.migrate(pos, pos, 1);
				shift += 1;
			}
			if let Some(cur) = self.view.cursors_mut().get_mut(idx) {
				cur.pos = pos + 1;
			}
		}
		Ok(())
	}

	fn insert_text_at_every_cursor(&mut self, text: &str) {
		if text.is_empty() {
			return;
		}
		let cursor_pos = self.view.primary().pos;
		self.buffer.begin_group(cursor_pos);
		let snapshot: Vec<_> = self.view.cursors().to_vec();
		let len = text.chars().count();
		let mut shift: i64 = 0;
		for (idx, cursor) in snapshot.iter().enumerate() {
			let pos = (cursor.pos as i64 + shift).max(0) as CharIdx;
			if self.buffer.replace(pos, pos, text).is_ok() {
				self.marks.migrate(pos, pos, len as i64);
				shift += len as i64;
				if let Some(cur) = self.view.cursors_mut().get_mut(idx) {
					cur.pos = pos + len;
				}
			}
		}
		self.buffer.commit_group();
	}

	// -- open line / scroll / prompt -------------------------------------

	/// `o`/`O`: inserts a bare newline at the current line's end/start and
	/// parks the cursor on the resulting blank line. Processes cursors from
	/// bottom to top, like `operator::apply`, so each insertion leaves
	/// not-yet-processed (smaller) positions valid.
	fn open_line(&mut self, below: bool) -> Result<(), CoreError> {
		let cursor_pos = self.view.primary().pos;
		self.buffer.begin_group(cursor_pos);
		let mut order: Vec<usize> = (0..self.view.len()).collect();
		order.sort_by_key(|&i| std::cmp::Reverse(self.view.cursors()[i].pos));
		for idx in order {
			let pos = self.view.cursors()[idx].pos;
			let line = self.buffer.line_of(pos);
			let insert_at = if below { self.buffer.line_to_char(line) + self.buffer.slice().line(line).len_chars() } else { self.buffer.line_to_char(line) };
			self.buffer.replace(insert_at, insert_at, "\n")?;
			self.marks.migrate(insert_at, insert_at, 1);
			let target_line = if below { line + 1 } else { line };
			let new_pos = self.buffer.slice().line_to_char(target_line);
			self.view.cursors_mut()[idx].pos = new_pos;
		}
		self.pending_repeat = true;
		self.mode = ModeKind::Insert;
		self.pending.clear();
		Ok(())
	}

	fn scroll(&mut self, dir: ScrollDir, amount: usize) {
		match dir {
			ScrollDir::Up => self.view.top_line = self.view.top_line.saturating_sub(amount),
			ScrollDir::Down => {
				let max_top = self.buffer.visible_line_count().saturating_sub(1);
				self.view.top_line = (self.view.top_line + amount).min(max_top);
			}
		}
	}

	fn open_prompt(&mut self, kind: PromptKind) {
		self.prompt = Some(Prompt::open(kind, self.mode));
		self.mode = ModeKind::Prompt;
		self.pending.clear();
	}

	fn abort_prompt(&mut self) {
		if let Some(prompt) = self.prompt.take() {
			self.mode = prompt.return_mode();
		}
		self.pending.clear();
	}

	/// `:` commands are only stored into the `LAST_COMMAND` register, not
	/// parsed — the `:` grammar is an external collaborator (§1's "out of
	/// scope" list; §6's `run_command`).
	fn apply_prompt_submit(&mut self, submit: PromptSubmit) -> Result<(), CoreError> {
		match submit {
			PromptSubmit::Search { pattern, reverse } => {
				if !pattern.is_empty() {
					match Regex::new(&pattern) {
						Ok(re) => {
							self.last_search = Some(re);
							self.last_search_reverse = reverse;
							self.registers.write(registers::LAST_SEARCH, pattern, TextKind::Charwise);
							self.jump_search(!reverse);
						}
						Err(_) => self.pending.clear(),
					}
				}
				Ok(())
			}
			PromptSubmit::Command(line) => {
				self.registers.write(registers::LAST_COMMAND, line, TextKind::Charwise);
				self.pending.clear();
				Ok(())
			}
		}
	}

	// -- repeat ------------------------------------------------------------

	fn record_repeat(&mut self) {
		if !self.replaying_repeat {
			self.repeat_slot = Some(self.command_keys.clone());
		}
	}

	fn execute_repeat(&mut self) -> Result<(), CoreError> {
		self.pending.clear();
		let Some(keys) = self.repeat_slot.clone() else { return Ok(()) };
		self.replaying_repeat = true;
		let mut result = Ok(());
		for key in keys {
			if let Err(e) = self.handle_key(key) {
				result = Err(e);
				break;
			}
		}
		self.replaying_repeat = false;
		result
	}
}

#[cfg(test)]
mod tests;
