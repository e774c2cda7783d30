//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::Action`]s. Only a fixed set
//! of keys produces actions; everything else is ignored.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};
