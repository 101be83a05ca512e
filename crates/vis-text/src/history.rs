//! Snapshot-based undo history.
//!
//! Mirrors the teacher's `SnapshotUndoStore`: a full rope copy is pushed per
//! undoable group rather than a computed inverse transaction. `ropey::Rope`
//! shares structure between clones, so this stays cheap in practice and
//! avoids needing a transaction/diff type that the rest of this crate has
//! no other use for.
//!
//! `undo`/`redo` walk the two-stack sibling chain (the branch currently
//! live); `earlier`/`later` instead key every snapshot ever committed by a
//! monotonically increasing logical timestamp and walk that flat,
//! branch-blind `timeline` — so after undoing and then editing again (which
//! clears the redo stack and abandons that future), `redo` can no longer
//! reach the abandoned branch but `earlier`/`later` still can, since it
//! existed at an earlier wall-clock moment than the present. This is the
//! two-stack-plus-timestamp design SPEC_FULL.md §3 describes in place of a
//! full history DAG.

use ropey::Rope;
use vis_primitives::CharIdx;

const MAX_UNDO: usize = 1000;

#[derive(Clone)]
struct Snapshot {
	rope: Rope,
	/// Cursor position to restore when this snapshot is made current again.
	cursor: CharIdx,
	timestamp: u64,
}

pub struct History {
	undo_stack: Vec<Snapshot>,
	redo_stack: Vec<Snapshot>,
	/// Snapshot pending a `commit`, taken at `begin_group`.
	pending: Option<Snapshot>,
	/// Every snapshot ever committed or shelved, in ascending timestamp
	/// order, independent of which branch is presently live.
	timeline: Vec<Snapshot>,
	next_timestamp: u64,
	/// Timestamp of the live (uncommitted) buffer state.
	current_timestamp: u64,
	/// Whether `current_timestamp` has already been recorded into
	/// `timeline` (true once it has been shelved by `undo`/`redo` or landed
	/// on by `earlier`/`later`; false for a freshly committed state that
	/// hasn't been left yet).
	current_recorded: bool,
}

impl Default for History {
	fn default() -> Self {
		Self {
			undo_stack: Vec::new(),
			redo_stack: Vec::new(),
			pending: None,
			timeline: Vec::new(),
			next_timestamp: 1,
			current_timestamp: 0,
			current_recorded: false,
		}
	}
}

impl History {
	pub fn new() -> Self {
		Self::default()
	}

	/// Captures the pre-edit state. Call before mutating the buffer for an
	/// undoable group (one operator execution, or one insert-mode session).
	pub fn begin_group(&mut self, rope: &Rope, cursor: CharIdx) {
		self.pending = Some(Snapshot { rope: rope.clone(), cursor, timestamp: self.current_timestamp });
	}

	/// Finalizes the group opened by `begin_group`. No-ops if the buffer
	/// did not actually change (e.g. an operator whose range was empty).
	pub fn commit_group(&mut self, rope_after: &Rope) {
		let Some(before) = self.pending.take() else { return };
		if &before.rope == rope_after {
			return;
		}
		if !self.current_recorded {
			self.timeline.push(before.clone());
		}
		self.undo_stack.push(before);
		self.redo_stack.clear();
		if self.undo_stack.len() > MAX_UNDO {
			self.undo_stack.remove(0);
		}
		self.current_timestamp = self.next_timestamp;
		self.next_timestamp += 1;
		self.current_recorded = false;
	}

	/// Discards a group opened by `begin_group` without recording it.
	pub fn abort_group(&mut self) {
		self.pending = None;
	}

	pub fn can_undo(&self) -> bool {
		!self.undo_stack.is_empty()
	}

	pub fn can_redo(&self) -> bool {
		!self.redo_stack.is_empty()
	}

	fn shelve_current(&mut self, current_rope: &Rope, current_cursor: CharIdx) -> Snapshot {
		let shelved = Snapshot { rope: current_rope.clone(), cursor: current_cursor, timestamp: self.current_timestamp };
		if !self.current_recorded {
			self.timeline.push(shelved.clone());
		}
		shelved
	}

	/// Restores the previous snapshot on the live branch, returning
	/// `(rope, cursor)`. The caller's current state is pushed to the redo
	/// stack.
	pub fn undo(&mut self, current_rope: &Rope, current_cursor: CharIdx) -> Option<(Rope, CharIdx)> {
		let snap = self.undo_stack.pop()?;
		let shelved = self.shelve_current(current_rope, current_cursor);
		self.redo_stack.push(shelved);
		self.current_timestamp = snap.timestamp;
		self.current_recorded = true;
		Some((snap.rope, snap.cursor))
	}

	/// Re-applies the most recently undone snapshot on the live branch.
	pub fn redo(&mut self, current_rope: &Rope, current_cursor: CharIdx) -> Option<(Rope, CharIdx)> {
		let snap = self.redo_stack.pop()?;
		let shelved = self.shelve_current(current_rope, current_cursor);
		self.undo_stack.push(shelved);
		self.current_timestamp = snap.timestamp;
		self.current_recorded = true;
		Some((snap.rope, snap.cursor))
	}

	/// Jumps to the snapshot whose timestamp is immediately before the
	/// current one, across the whole timeline rather than just the live
	/// branch's undo stack.
	pub fn earlier(&mut self, current_rope: &Rope, current_cursor: CharIdx) -> Option<(Rope, CharIdx)> {
		self.shelve_current(current_rope, current_cursor);
		self.current_recorded = true;
		let idx = self.timeline.iter().rposition(|s| s.timestamp < self.current_timestamp)?;
		let snap = self.timeline[idx].clone();
		self.current_timestamp = snap.timestamp;
		Some((snap.rope, snap.cursor))
	}

	/// Jumps to the snapshot whose timestamp is immediately after the
	/// current one, across the whole timeline rather than just the live
	/// branch's redo stack.
	pub fn later(&mut self, current_rope: &Rope, current_cursor: CharIdx) -> Option<(Rope, CharIdx)> {
		self.shelve_current(current_rope, current_cursor);
		self.current_recorded = true;
		let idx = self.timeline.iter().position(|s| s.timestamp > self.current_timestamp)?;
		let snap = self.timeline[idx].clone();
		self.current_timestamp = snap.timestamp;
		Some((snap.rope, snap.cursor))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn unchanged_group_is_not_recorded() {
		let mut h = History::new();
		let rope = Rope::from("abc");
		h.begin_group(&rope, 0);
		h.commit_group(&rope);
		assert!(!h.can_undo());
	}

	#[test]
	fn undo_then_redo_round_trips() {
		let mut h = History::new();
		let before = Rope::from("abc");
		h.begin_group(&before, 0);
		let after = Rope::from("abcdef");
		h.commit_group(&after);

		let (restored, cursor) = h.undo(&after, 6).unwrap();
		assert_eq!(restored.to_string(), "abc");
		assert_eq!(cursor, 0);

		let (redone, cursor) = h.redo(&restored, 0).unwrap();
		assert_eq!(redone.to_string(), "abcdef");
		assert_eq!(cursor, 6);
	}

	#[test]
	fn new_edit_after_undo_clears_redo() {
		let mut h = History::new();
		let a = Rope::from("a");
		h.begin_group(&a, 0);
		let b = Rope::from("ab");
		h.commit_group(&b);

		h.undo(&b, 1).unwrap();
		assert!(h.can_redo());

		h.begin_group(&a, 0);
		let c = Rope::from("ac");
		h.commit_group(&c);
		assert!(!h.can_redo());
	}

	#[test]
	fn earlier_and_later_round_trip_like_undo_and_redo_on_a_straight_line() {
		let mut h = History::new();
		let a = Rope::from("a");
		h.begin_group(&a, 0);
		let b = Rope::from("ab");
		h.commit_group(&b);

		let (restored, cursor) = h.earlier(&b, 1).unwrap();
		assert_eq!(restored.to_string(), "a");
		assert_eq!(cursor, 0);

		let (redone, cursor) = h.later(&restored, 0).unwrap();
		assert_eq!(redone.to_string(), "ab");
		assert_eq!(cursor, 1);
	}

	/// After undoing and then branching off with a new edit, `redo` can no
	/// longer reach the abandoned future — but `earlier` still can, since
	/// wall-clock ordering doesn't care which branch is presently live.
	#[test]
	fn earlier_reaches_an_abandoned_redo_branch_that_redo_cannot() {
		let mut h = History::new();
		let a = Rope::from("a");
		h.begin_group(&a, 0);
		let b = Rope::from("ab");
		h.commit_group(&b); // a -> b

		h.begin_group(&b, 1);
		let c = Rope::from("abc");
		h.commit_group(&c); // b -> c

		let (undone, cursor) = h.undo(&c, 2).unwrap(); // back to b, c now the redo future
		assert_eq!(undone.to_string(), "ab");

		h.begin_group(&undone, cursor);
		let d = Rope::from("abd");
		h.commit_group(&d); // b -> d, a fresh branch: redo to c is abandoned

		assert!(!h.can_redo());
		assert!(h.redo(&d, 3).is_none());

		let (earlier, _) = h.earlier(&d, 3).unwrap();
		assert_eq!(earlier.to_string(), "abc");
	}
}
