//! Game session: the action queue, the reducer loop and the feedback wiring.
//!
//! A [`Session`] owns everything one game needs: the current [`GameState`], a
//! FIFO queue of pending actions, the [`Timeline`] of delayed work (fall timer,
//! game-over delay, row-check delay) and the derived-event [`Pipeline`].
//!
//! Processing is single-threaded and strictly ordered. Actions dispatched by
//! input, actions fired by the timeline, and actions emitted by the monitors all
//! go to the back of the same queue; an emitted follow-up never jumps ahead of
//! an action that was already waiting.

use std::collections::VecDeque;

use crate::config::SessionConfig;
use crate::core::{GameState, RenderFrame};
use crate::pipeline::{Effect, Effects, Pipeline};
use crate::timeline::{Deferred, Timeline};
use crate::types::{Action, Cue};

/// One processed action, as reported to [`SessionSink::processed`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRecord {
    /// 1-based position in the processing order
    pub seq: u64,
    /// Session clock when the action was reduced
    pub at_ms: u64,
    pub action: Action,
}

/// Outputs of a session: render, audio and the processed-action trail.
///
/// Sinks are one-way; nothing they do feeds back into the session.
pub trait SessionSink {
    /// Called after every processed action
    fn render(&mut self, frame: &RenderFrame);

    /// Called on lock confirmation and on line clear
    fn cue(&mut self, cue: Cue);

    fn processed(&mut self, _record: &ActionRecord) {}
}

/// Discards everything
impl SessionSink for () {
    fn render(&mut self, _frame: &RenderFrame) {}
    fn cue(&mut self, _cue: Cue) {}
}

pub struct Session {
    config: SessionConfig,
    state: GameState,
    queue: VecDeque<Action>,
    timeline: Timeline,
    pipeline: Pipeline,
    processed: u64,
}

impl Session {
    /// Start a session in the initial paused state
    pub fn new(config: SessionConfig) -> Self {
        let state = GameState::new(config.field, config.seed);
        Self::with_state(config, state)
    }

    /// Start a session from an explicit state (fixtures, replays)
    pub fn with_state(config: SessionConfig, state: GameState) -> Self {
        let mut timeline = Timeline::new();
        timeline.schedule(config.fall_interval_ms, Deferred::FallTick);
        let pipeline = Pipeline::new(config.game_over_delay_ms, config.line_clear_delay_ms);
        Self {
            config,
            state,
            queue: VecDeque::new(),
            timeline,
            pipeline,
            processed: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Session clock in milliseconds
    pub fn now_ms(&self) -> u64 {
        self.timeline.now_ms()
    }

    /// Actions waiting in the queue
    pub fn queued(&self) -> usize {
        self.queue.len()
    }

    /// Delayed derived work still pending (fall timer excluded)
    pub fn pending_derived(&self) -> usize {
        self.timeline.count(|item| !matches!(item, Deferred::FallTick))
    }

    /// Total number of actions reduced so far
    pub fn processed(&self) -> u64 {
        self.processed
    }

    pub fn is_lock_confirmed(&self) -> bool {
        self.pipeline.is_lock_confirmed()
    }

    /// True between a detected top-out and the `GameOver` it scheduled
    pub fn is_game_over_pending(&self) -> bool {
        self.pipeline.is_game_over_pending()
    }

    pub fn frame(&self) -> RenderFrame {
        self.state.frame()
    }

    /// Append an action from an external source (input adapter, replay)
    pub fn dispatch(&mut self, action: Action) {
        self.queue.push_back(action);
    }

    /// Process queued actions until the queue is empty. Returns how many ran.
    pub fn pump(&mut self, sink: &mut impl SessionSink) -> usize {
        let mut count = 0;
        while let Some(action) = self.queue.pop_front() {
            self.step(action, sink);
            count += 1;
        }
        count
    }

    /// Advance the session clock by `elapsed_ms`.
    ///
    /// Anything already queued runs first. Then every timeline item due within
    /// the window fires in due order, with the queue drained after each one, so
    /// follow-ups scheduled along the way can still fire inside the window.
    pub fn advance(&mut self, elapsed_ms: u64, sink: &mut impl SessionSink) -> usize {
        let target = self.timeline.now_ms().saturating_add(elapsed_ms);
        let mut count = self.pump(sink);
        while let Some(item) = self.timeline.pop_due(target) {
            self.fire(item, sink);
            count += self.pump(sink);
        }
        self.timeline.set_now(target);
        count
    }

    /// Advance the session clock to the absolute instant `target_ms`.
    ///
    /// Callers driven by a wall clock pass the time since the session started,
    /// so rounding in one step never accumulates across steps. A target in the
    /// past still drains the queue but leaves the clock where it is.
    pub fn advance_to(&mut self, target_ms: u64, sink: &mut impl SessionSink) -> usize {
        let elapsed = target_ms.saturating_sub(self.timeline.now_ms());
        self.advance(elapsed, sink)
    }

    fn fire(&mut self, item: Deferred, sink: &mut impl SessionSink) {
        match item {
            Deferred::FallTick => {
                self.queue.push_back(Action::Down);
                self.timeline
                    .schedule(self.config.fall_interval_ms, Deferred::FallTick);
            }
            Deferred::Emit(action) => self.queue.push_back(action),
            Deferred::ClearCheck => {
                let mut effects = Effects::new();
                self.pipeline.check_rows(&self.state, &mut effects);
                self.apply(effects, sink);
            }
        }
    }

    fn step(&mut self, action: Action, sink: &mut impl SessionSink) {
        self.state = self.state.reduce(&action);
        self.processed += 1;

        let mut effects = Effects::new();
        self.pipeline.observe(&self.state, &action, &mut effects);

        sink.processed(&ActionRecord {
            seq: self.processed,
            at_ms: self.timeline.now_ms(),
            action,
        });
        sink.render(&self.state.frame());
        self.apply(effects, sink);
    }

    fn apply(&mut self, effects: Effects, sink: &mut impl SessionSink) {
        for effect in effects {
            match effect {
                Effect::Enqueue(action) => self.queue.push_back(action),
                Effect::Schedule { delay_ms, item } => self.timeline.schedule(delay_ms, item),
                Effect::Cue(cue) => sink.cue(cue),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Piece, Shape};

    #[derive(Default)]
    struct Recorder {
        frames: usize,
        cues: Vec<Cue>,
        actions: Vec<Action>,
    }

    impl SessionSink for Recorder {
        fn render(&mut self, _frame: &RenderFrame) {
            self.frames += 1;
        }

        fn cue(&mut self, cue: Cue) {
            self.cues.push(cue);
        }

        fn processed(&mut self, record: &ActionRecord) {
            self.actions.push(record.action.clone());
        }
    }

    #[test]
    fn fall_timer_emits_down_every_interval() {
        let mut session = Session::new(SessionConfig::default());
        let mut rec = Recorder::default();
        assert_eq!(session.advance(499, &mut rec), 0);
        assert_eq!(session.advance(1, &mut rec), 1);
        assert_eq!(session.advance(1000, &mut rec), 2);
        assert_eq!(rec.actions, vec![Action::Down; 3]);
        assert_eq!(rec.frames, 3);
        assert_eq!(session.now_ms(), 1500);
    }

    #[test]
    fn advance_to_tracks_absolute_time_without_drift() {
        let mut session = Session::new(SessionConfig::default());
        let mut rec = Recorder::default();
        // Ticks of 16.67 ms truncated to whole milliseconds.
        for tick in 1..=60u64 {
            session.advance_to(tick * 1000 / 60, &mut rec);
        }
        assert_eq!(session.now_ms(), 1000);
        assert_eq!(rec.actions, vec![Action::Down; 2]);

        // A stale target does not move the clock back.
        session.advance_to(900, &mut rec);
        assert_eq!(session.now_ms(), 1000);
    }

    #[test]
    fn paused_down_is_noop() {
        let mut session = Session::new(SessionConfig::default());
        let before = session.state().clone();
        session.advance(5_000, &mut ());
        assert_eq!(session.processed(), 10);
        assert_eq!(session.state(), &before);
    }

    #[test]
    fn dispatched_actions_run_in_order() {
        let mut session = Session::new(SessionConfig::default());
        let mut rec = Recorder::default();
        session.dispatch(Action::Start);
        session.dispatch(Action::Right);
        session.dispatch(Action::Left);
        assert_eq!(session.pump(&mut rec), 3);
        assert_eq!(rec.actions, vec![Action::Start, Action::Right, Action::Left]);
        assert!(!session.state().is_paused());
    }

    #[test]
    fn follow_ups_queue_behind_waiting_actions() {
        let config = SessionConfig::default();
        let o = Shape::from_rows(&[&[2, 2], &[2, 2]]).unwrap();
        let state = GameState::new(config.field, 3)
            .reduce(&Action::Start)
            .with_piece(Piece::new(0, 18, o));
        let mut session = Session::with_state(config, state);
        let mut rec = Recorder::default();

        // Two readings confirm the lock on the second Down; the Rotate already
        // waiting behind it must run before the emitted Next.
        session.dispatch(Action::Down);
        session.dispatch(Action::Down);
        session.dispatch(Action::Rotate);
        session.pump(&mut rec);

        assert_eq!(
            rec.actions,
            vec![Action::Down, Action::Down, Action::Rotate, Action::Next]
        );
        assert_eq!(rec.cues, vec![Cue::LOCK]);
        assert_eq!(session.pending_derived(), 1);
    }
}
