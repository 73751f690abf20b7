//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameCommand`]. Held-key
//! repetition comes from the terminal's own auto-repeat, so a plain
//! event-to-command map is all that is needed here.

pub mod map;

pub use map::{handle_key_event, should_quit};
