//! The prompt sub-system: §4.7. A single-line editable buffer for `:`
//! commands and `/`,`?` searches, with the mode to restore on submit.

use vis_primitives::mode::ModeKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
	Search { reverse: bool },
	Command,
}

/// What a submitted prompt line resolved to, handed back to the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSubmit {
	Search { pattern: String, reverse: bool },
	Command(String),
}

/// Live prompt state. Absent when no prompt is open.
#[derive(Debug, Clone)]
pub struct Prompt {
	kind: PromptKind,
	line: String,
	cursor: usize,
	return_mode: ModeKind,
}

impl Prompt {
	pub fn open(kind: PromptKind, return_mode: ModeKind) -> Self {
		Self { kind, line: String::new(), cursor: 0, return_mode }
	}

	pub fn leader(&self) -> char {
		match self.kind {
			PromptKind::Search { reverse: false } => '/',
			PromptKind::Search { reverse: true } => '?',
			PromptKind::Command => ':',
		}
	}

	pub fn line(&self) -> &str {
		&self.line
	}

	pub fn cursor(&self) -> usize {
		self.cursor
	}

	pub fn return_mode(&self) -> ModeKind {
		self.return_mode
	}

	pub fn insert(&mut self, c: char) {
		let byte_idx = self.line.char_indices().nth(self.cursor).map(|(i, _)| i).unwrap_or(self.line.len());
		self.line.insert(byte_idx, c);
		self.cursor += 1;
	}

	/// `prompt-backspace`: deletes one char before the cursor. Returns
	/// `false` when the line was already empty, signalling the caller to
	/// abort the prompt and restore `return_mode`.
	pub fn backspace(&mut self) -> bool {
		if self.cursor == 0 {
			return !self.line.is_empty();
		}
		let mut indices: Vec<usize> = self.line.char_indices().map(|(i, _)| i).collect();
		indices.push(self.line.len());
		let start = indices[self.cursor - 1];
		let end = indices[self.cursor];
		self.line.replace_range(start..end, "");
		self.cursor -= 1;
		true
	}

	pub fn move_left(&mut self) {
		self.cursor = self.cursor.saturating_sub(1);
	}

	pub fn move_right(&mut self) {
		self.cursor = (self.cursor + 1).min(self.line.chars().count());
	}

	/// `enter`: consumes the prompt, producing what the dispatcher should
	/// run. The caller is responsible for restoring `return_mode()`.
	pub fn submit(self) -> PromptSubmit {
		match self.kind {
			PromptKind::Search { reverse } => PromptSubmit::Search { pattern: self.line, reverse },
			PromptKind::Command => PromptSubmit::Command(self.line),
		}
	}
}
