//! Terminal "game renderer" module.
//!
//! A small rendering layer for terminal gameplay. It avoids widget toolkits and
//! renders into a simple framebuffer that is diffed and flushed to the terminal.
//!
//! - [`game_view`] turns a render frame into glyphs (pure, no I/O)
//! - [`renderer`] writes framebuffers to the terminal
//! - [`audio`] samples cues down to at most one per window

pub mod audio;
pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use audio::CueSampler;
pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{AnchorY, GameView, Viewport, PAUSED_MESSAGE};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
