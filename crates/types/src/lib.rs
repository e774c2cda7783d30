//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (reducer, event pipeline, terminal adapters, action log).
//!
//! # Field Dimensions
//!
//! The reference playfield is 10 columns by 20 rows. These are defaults only:
//! the actual dimensions come from configuration and are carried by the field.
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19)
//! - **Spawn position**: (width / 2, 0)
//!
//! # Timing Constants
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Terminal loop step (~60 FPS) |
//! | `FALL_INTERVAL_MS` | 500 | Period of the `Down` timer |
//! | `GAME_OVER_DELAY_MS` | 200 | Delay between top-out detection and `GameOver` |
//! | `LINE_CLEAR_DELAY_MS` | 50 | Delay between a confirmed lock and the row check |
//! | `CUE_SAMPLE_MS` | 100 | Audio cue sampling window |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Action, Cell, EMPTY, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let cell: Cell = EMPTY;
//! assert_eq!(cell, 99);
//!
//! // Parse an action name (case-insensitive)
//! assert_eq!(Action::from_str("rotate"), Some(Action::Rotate));
//! assert_eq!(Action::from_str("jump"), None);
//!
//! assert_eq!(FIELD_WIDTH, 10);
//! assert_eq!(FIELD_HEIGHT, 20);
//! ```

/// Default field width in cells (10 columns)
pub const FIELD_WIDTH: usize = 10;

/// Default field height in cells (20 rows)
pub const FIELD_HEIGHT: usize = 20;

/// Terminal loop step in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Period of the fall timer that emits `Down`
pub const FALL_INTERVAL_MS: u32 = 500;

/// Delay before a detected top-out is turned into `GameOver`
pub const GAME_OVER_DELAY_MS: u32 = 200;

/// Delay between a confirmed lock and reading the field for full rows
pub const LINE_CLEAR_DELAY_MS: u32 = 50;

/// Audio cues arriving within one window are coalesced to the latest
pub const CUE_SAMPLE_MS: u32 = 100;

/// A cell of the field or of a shape matrix.
///
/// - In a field: [`EMPTY`] means free, anything else is an occupied colour index.
/// - In a shape: `0` means "no cell", anything else is the piece colour.
///
/// Colour index `0` is reserved and never placed on a field.
pub type Cell = u8;

/// Value of a free field cell
pub const EMPTY: Cell = 99;

/// Shape-matrix value for "no cell"
pub const NO_CELL: Cell = 0;

/// Audio cue, expressed as a frequency in hertz.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cue(pub u32);

impl Cue {
    /// Played when a lock is confirmed
    pub const LOCK: Cue = Cue(100);
    /// Played when full rows are about to be removed
    pub const LINE_CLEAR: Cue = Cue(400);

    pub fn hz(&self) -> u32 {
        self.0
    }
}

/// Actions consumed by the reducer
///
/// `Start`, `Down`, `Left`, `Right` and `Rotate` come from the player or the
/// fall timer. `Next`, `Remove` and `GameOver` are derived: the engine emits
/// them itself in reaction to state snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Action {
    /// Unpause the game
    Start,
    /// Move the piece one row down unless it is locked
    Down,
    /// Move the piece one column left
    Left,
    /// Move the piece one column right
    Right,
    /// Rotate the piece 90° clockwise
    Rotate,
    /// Merge the locked piece into the field and spawn a new one
    Next,
    /// Remove the listed row indices, processed in order
    Remove(Vec<usize>),
    /// Discard the game and return to the initial paused state
    GameOver,
}

impl Action {
    /// Parse a data-less action from its name (case-insensitive)
    ///
    /// `Remove` carries row indices and has no textual form here.
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Action;
    ///
    /// assert_eq!(Action::from_str("Left"), Some(Action::Left));
    /// assert_eq!(Action::from_str("gameOver"), Some(Action::GameOver));
    /// assert_eq!(Action::from_str("remove"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(Action::Start),
            "down" => Some(Action::Down),
            "left" => Some(Action::Left),
            "right" => Some(Action::Right),
            "rotate" => Some(Action::Rotate),
            "next" => Some(Action::Next),
            "gameover" => Some(Action::GameOver),
            _ => None,
        }
    }

    /// camelCase name used by the action log
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Start => "start",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Rotate => "rotate",
            Action::Next => "next",
            Action::Remove(_) => "remove",
            Action::GameOver => "gameOver",
        }
    }

    /// True for actions synthesized by the engine rather than by input or timer
    pub fn is_derived(&self) -> bool {
        matches!(self, Action::Next | Action::Remove(_) | Action::GameOver)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_timing_defaults() {
        assert_eq!(FALL_INTERVAL_MS, 500);
        assert_eq!(GAME_OVER_DELAY_MS, 200);
        assert_eq!(LINE_CLEAR_DELAY_MS, 50);
        assert_eq!(CUE_SAMPLE_MS, 100);
        assert_eq!(Cue::LOCK.hz(), 100);
        assert_eq!(Cue::LINE_CLEAR.hz(), 400);
    }

    #[test]
    fn action_names_round_trip_for_data_less_variants() {
        for action in [
            Action::Start,
            Action::Down,
            Action::Left,
            Action::Right,
            Action::Rotate,
            Action::Next,
            Action::GameOver,
        ] {
            assert_eq!(Action::from_str(action.as_str()), Some(action));
        }
    }

    #[test]
    fn derived_actions() {
        assert!(Action::Next.is_derived());
        assert!(Action::Remove(vec![3]).is_derived());
        assert!(Action::GameOver.is_derived());
        assert!(!Action::Down.is_derived());
        assert!(!Action::Start.is_derived());
    }
}
