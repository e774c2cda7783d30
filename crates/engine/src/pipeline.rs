//! Derived-event pipeline
//!
//! Three monitors watch every snapshot the reducer produces and answer with
//! [`Effect`]s for the session to apply:
//!
//! - [`LockMonitor`]: debounces `is_locked` over two consecutive snapshots and
//!   fires once per confirmed lock (`Next` + lock cue).
//! - [`GameOverMonitor`]: detects a piece obstructed at the spawn row and
//!   schedules one delayed `GameOver`.
//! - [`LineClearMonitor`]: after a confirmed lock, schedules a delayed row check
//!   that reads the field current at that instant and emits `Remove`.

use arrayvec::ArrayVec;

use crate::core::GameState;
use crate::timeline::Deferred;
use crate::types::{Action, Cue};

/// Work requested by a monitor
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Append to the back of the action queue
    Enqueue(Action),
    /// Fire `item` after `delay_ms`
    Schedule { delay_ms: u64, item: Deferred },
    /// Hand a cue to the audio sink
    Cue(Cue),
}

/// Effects produced for one snapshot (bounded, no allocation)
pub type Effects = ArrayVec<Effect, 4>;

/// Two-snapshot lock debounce
#[derive(Debug, Clone, Default)]
pub struct LockMonitor {
    previous_raw: bool,
    confirmed: bool,
}

impl LockMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one snapshot. Returns true on the unconfirmed → confirmed edge.
    pub fn observe(&mut self, state: &GameState) -> bool {
        let raw = state.is_locked();
        let confirmed = self.previous_raw && raw;
        let edge = confirmed && !self.confirmed;
        self.previous_raw = raw;
        self.confirmed = confirmed;
        edge
    }

    pub fn is_confirmed(&self) -> bool {
        self.confirmed
    }
}

/// Top-out detector, latched until the `GameOver` it scheduled is reduced
#[derive(Debug, Clone, Default)]
pub struct GameOverMonitor {
    pending: bool,
}

impl GameOverMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true when a `GameOver` should be scheduled for this snapshot
    pub fn observe(&mut self, state: &GameState) -> bool {
        if self.pending || !state.is_topped_out() {
            return false;
        }
        self.pending = true;
        true
    }

    /// Re-arm after a `GameOver` has been reduced
    pub fn reset(&mut self) {
        self.pending = false;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }
}

/// Full-row detection
#[derive(Debug, Clone, Copy, Default)]
pub struct LineClearMonitor;

impl LineClearMonitor {
    /// Rows to remove, if any, from the field current at check time
    pub fn check(&self, state: &GameState) -> Option<Vec<usize>> {
        let rows = state.field().removable_rows();
        (!rows.is_empty()).then_some(rows)
    }
}

/// The three monitors plus their delays
#[derive(Debug, Clone)]
pub struct Pipeline {
    lock: LockMonitor,
    game_over: GameOverMonitor,
    line_clear: LineClearMonitor,
    game_over_delay_ms: u64,
    line_clear_delay_ms: u64,
}

impl Pipeline {
    pub fn new(game_over_delay_ms: u64, line_clear_delay_ms: u64) -> Self {
        Self {
            lock: LockMonitor::new(),
            game_over: GameOverMonitor::new(),
            line_clear: LineClearMonitor,
            game_over_delay_ms,
            line_clear_delay_ms,
        }
    }

    /// Observe the snapshot produced by `action`
    pub fn observe(&mut self, state: &GameState, action: &Action, out: &mut Effects) {
        if matches!(action, Action::GameOver) {
            self.game_over.reset();
        }

        if self.lock.observe(state) {
            out.push(Effect::Enqueue(Action::Next));
            out.push(Effect::Cue(Cue::LOCK));
            out.push(Effect::Schedule {
                delay_ms: self.line_clear_delay_ms,
                item: Deferred::ClearCheck,
            });
        }

        if self.game_over.observe(state) {
            out.push(Effect::Schedule {
                delay_ms: self.game_over_delay_ms,
                item: Deferred::Emit(Action::GameOver),
            });
        }
    }

    /// Run a scheduled row check against the current state
    pub fn check_rows(&self, state: &GameState, out: &mut Effects) {
        if let Some(rows) = self.line_clear.check(state) {
            out.push(Effect::Cue(Cue::LINE_CLEAR));
            out.push(Effect::Enqueue(Action::Remove(rows)));
        }
    }

    pub fn is_lock_confirmed(&self) -> bool {
        self.lock.is_confirmed()
    }

    pub fn is_game_over_pending(&self) -> bool {
        self.game_over.is_pending()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Field, GameState, Piece, Shape};

    fn o_at(x: i32, y: i32) -> Piece {
        Piece::new(x, y, Shape::from_rows(&[&[2, 2], &[2, 2]]).unwrap())
    }

    fn running() -> GameState {
        GameState::default().reduce(&Action::Start)
    }

    #[test]
    fn lock_needs_two_consecutive_readings() {
        let mut monitor = LockMonitor::new();
        let resting = running().with_piece(o_at(0, 18));
        assert!(!monitor.observe(&resting));
        assert!(monitor.observe(&resting));
        // Stays confirmed without firing again.
        assert!(!monitor.observe(&resting));
        assert!(monitor.is_confirmed());
    }

    #[test]
    fn single_transient_lock_is_ignored() {
        let mut monitor = LockMonitor::new();
        let falling = running().with_piece(o_at(0, 10));
        let resting = running().with_piece(o_at(0, 18));
        assert!(!monitor.observe(&resting));
        assert!(!monitor.observe(&falling));
        assert!(!monitor.observe(&resting));
        assert!(!monitor.is_confirmed());
    }

    #[test]
    fn game_over_fires_once_until_reset() {
        let mut field = Field::new(10, 20);
        for y in 1..20 {
            field.set(5, y, 1);
        }
        let stuck = running().with_field(field).with_piece(o_at(5, 0));
        let mut monitor = GameOverMonitor::new();
        assert!(monitor.observe(&stuck));
        assert!(!monitor.observe(&stuck));
        monitor.reset();
        assert!(monitor.observe(&stuck));
    }

    #[test]
    fn confirmed_lock_emits_next_cue_and_check() {
        let mut pipeline = Pipeline::new(200, 50);
        let resting = running().with_piece(o_at(0, 18));
        let mut out = Effects::new();
        pipeline.observe(&resting, &Action::Down, &mut out);
        assert!(out.is_empty());
        pipeline.observe(&resting, &Action::Down, &mut out);
        assert_eq!(
            out.as_slice(),
            &[
                Effect::Enqueue(Action::Next),
                Effect::Cue(Cue::LOCK),
                Effect::Schedule {
                    delay_ms: 50,
                    item: Deferred::ClearCheck
                },
            ]
        );
    }

    #[test]
    fn check_rows_emits_remove_for_full_rows() {
        let mut field = Field::new(10, 20);
        for x in 0..10 {
            field.set(x, 19, 1);
        }
        let state = running().with_field(field);
        let pipeline = Pipeline::new(200, 50);
        let mut out = Effects::new();
        pipeline.check_rows(&state, &mut out);
        assert_eq!(
            out.as_slice(),
            &[
                Effect::Cue(Cue::LINE_CLEAR),
                Effect::Enqueue(Action::Remove(vec![19]))
            ]
        );

        let mut none = Effects::new();
        pipeline.check_rows(&running(), &mut none);
        assert!(none.is_empty());
    }
}
