//! Macro record/replay: §4.6. Recording writes the live key stream (minus
//! the toggle keystroke itself) into the chosen register; replay feeds the
//! stored keys back into the dispatcher as if typed. Recursive replay of
//! the register currently being recorded into is forbidden and fails
//! silently rather than erroring, matching §5's cancellation model.

use std::collections::HashMap;

use vis_primitives::key::Key;

#[derive(Debug, Default)]
pub struct MacroStore {
	store: HashMap<char, Vec<Key>>,
	recording: Option<(char, Vec<Key>)>,
}

impl MacroStore {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_recording(&self) -> bool {
		self.recording.is_some()
	}

	pub fn recording_register(&self) -> Option<char> {
		self.recording.as_ref().map(|(id, _)| *id)
	}

	/// `macro_record`: toggles. Starting while already recording a
	/// *different* register first finishes the current one.
	pub fn toggle_record(&mut self, id: char) {
		if let Some((current_id, _)) = &self.recording {
			if *current_id == id {
				self.stop_record();
				return;
			}
			self.stop_record();
		}
		self.recording = Some((id, Vec::new()));
	}

	pub fn stop_record(&mut self) {
		if let Some((id, keys)) = self.recording.take() {
			self.store.insert(id, keys);
		}
	}

	/// Appends `key` to the in-progress recording, if any.
	pub fn record_key(&mut self, key: Key) {
		if let Some((_, keys)) = &mut self.recording {
			keys.push(key);
		}
	}

	/// `macro_replay`: returns the stored key sequence for `id`, unless `id`
	/// is the register currently being recorded into, in which case replay
	/// is forbidden and this silently returns an empty sequence.
	pub fn replay(&self, id: char) -> Vec<Key> {
		if self.recording_register() == Some(id) {
			return Vec::new();
		}
		self.store.get(&id).cloned().unwrap_or_default()
	}
}
