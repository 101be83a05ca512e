//! Shared value types for the vis editing core: positions, ranges, key
//! tokens, and the small set of editor-visible modes.
//!
//! Kept dependency-light and free of any text-buffer implementation so that
//! both the reference text model (`vis-text`) and the dispatcher/motion
//! library (`vis-core`) can depend on it without a cycle.

pub mod graphemes;
pub mod key;
pub mod mode;
pub mod range;

pub use key::{Key, KeyCode, Modifiers};
pub use mode::ModeKind;
pub use range::{CharIdx, Direction, Range, TextKind};
