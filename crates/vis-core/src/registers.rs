//! Register store: §4.6. Ids `a..z` are named, `"` is the unnamed/default
//! register every yank/delete writes unless the user selected one via
//! `reg`, plus the special `/` (last search), `:` (last command) and `@`
//! (last recorded macro) ids. Writing an uppercase `A..Z` appends to the
//! corresponding lowercase register instead of overwriting it.

use std::collections::HashMap;

use vis_primitives::range::TextKind;

use crate::error::CoreError;

pub const UNNAMED: char = '"';
pub const LAST_SEARCH: char = '/';
pub const LAST_COMMAND: char = ':';
pub const LAST_MACRO: char = '@';

/// `bytes` is always the `"\n"`-joined representation, read by every
/// single-cursor put and used as the fallback for multi-cursor puts.
/// `slices` additionally holds one entry per source cursor (ascending
/// buffer-position order) for a charwise multi-cursor yank/delete, per
/// SPEC_FULL.md §4.5 — "stored as an array of slices for subsequent
/// multi-put (one slice per current cursor if counts match, else the
/// joined text)". Empty whenever the write came from a single range or a
/// non-multi-cursor path; a put then always falls back to `bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Register {
	pub bytes: String,
	pub kind: TextKind,
	pub slices: Vec<String>,
}

#[derive(Debug, Default)]
pub struct RegisterStore {
	registers: HashMap<char, Register>,
}

impl RegisterStore {
	pub fn new() -> Self {
		Self::default()
	}

	/// Writes `bytes`/`kind` to `id`, or to `id`'s lowercase with append
	/// semantics when `id` is uppercase `A..Z`. Always clears any stored
	/// per-cursor slices — callers that have slice data call `write_multi`
	/// instead.
	pub fn write(&mut self, id: char, bytes: String, kind: TextKind) {
		self.write_multi(id, bytes, kind, Vec::new());
	}

	/// As `write`, but also stores `slices` (one entry per source cursor, in
	/// ascending buffer-position order) for a charwise multi-cursor
	/// yank/delete. An uppercase append degrades to the plain joined-bytes
	/// append and drops any slices the lowercase register already held,
	/// since appended text no longer lines up with the old per-cursor split.
	pub fn write_multi(&mut self, id: char, bytes: String, kind: TextKind, slices: Vec<String>) {
		if id.is_ascii_uppercase() {
			let lower = id.to_ascii_lowercase();
			let entry = self.registers.entry(lower).or_default();
			entry.bytes.push_str(&bytes);
			entry.kind = kind;
			entry.slices.clear();
		} else {
			self.registers.insert(id, Register { bytes, kind, slices });
		}
	}

	/// Restores a previously read `Register` verbatim (including its
	/// slices), bypassing the uppercase-append rule — used by callers that
	/// temporarily mutate a register's content and then put it back, such
	/// as the put-with-count scratch rewrite in `Editor::put_with_count`.
	pub fn restore(&mut self, id: char, register: Register) {
		self.registers.insert(id.to_ascii_lowercase(), register);
	}

	pub fn read(&self, id: char) -> Option<&Register> {
		let id = id.to_ascii_lowercase();
		self.registers.get(&id)
	}

	pub fn read_or_err(&self, id: char) -> Result<&Register, CoreError> {
		self.read(id).ok_or(CoreError::MissingRegister(id))
	}
}
