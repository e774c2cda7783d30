//! Terminal runner (default binary).
//!
//! Reads keys with crossterm, drives a [`Session`] on a fixed tick, and draws
//! every processed action with the framebuffer renderer.

use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{self, Event};

use blockfall::core::RenderFrame;
use blockfall::engine::{ActionRecord, Session, SessionConfig, SessionSink};
use blockfall::input::{handle_key_event, should_quit};
use blockfall::runtime::ActionLog;
use blockfall::term::{CueSampler, FrameBuffer, GameView, TerminalRenderer, Viewport};
use blockfall::types::{Cue, TICK_MS};

/// Session outputs wired to the terminal.
struct TerminalSink {
    term: TerminalRenderer,
    view: GameView,
    fb: FrameBuffer,
    sampler: CueSampler,
    log: Option<ActionLog>,
    /// First draw error; sink callbacks cannot return one
    error: Option<anyhow::Error>,
}

impl TerminalSink {
    fn new(log: Option<ActionLog>) -> Self {
        Self {
            term: TerminalRenderer::new(),
            view: GameView::default(),
            fb: FrameBuffer::new(0, 0),
            sampler: CueSampler::default(),
            log,
            error: None,
        }
    }

    fn take_error(&mut self) -> Result<()> {
        match self.error.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Ring the bell if the sampler releases a cue at `now_ms`
    fn play(&mut self, now_ms: u64) -> Result<()> {
        if self.sampler.sample(now_ms).is_some() {
            self.term.bell()?;
        }
        Ok(())
    }
}

impl SessionSink for TerminalSink {
    fn render(&mut self, frame: &RenderFrame) {
        if self.error.is_some() {
            return;
        }
        let (w, h) = crossterm::terminal::size().unwrap_or((80, 24));
        self.view.render_into(frame, Viewport::new(w, h), &mut self.fb);
        if let Err(e) = self.term.draw(&self.fb) {
            self.error = Some(e);
        }
    }

    fn cue(&mut self, cue: Cue) {
        self.sampler.push(cue);
    }

    fn processed(&mut self, record: &ActionRecord) {
        if let Some(log) = &self.log {
            log.send(record);
        }
    }
}

fn main() -> Result<()> {
    let config = SessionConfig::from_env();
    config.validate()?;

    let log = ActionLog::start_from_env()?;
    println!(
        "[blockfall] field {}x{}, seed {}, action log {}",
        config.field.width,
        config.field.height,
        config.seed,
        if log.is_some() { "on" } else { "off" }
    );

    let mut session = Session::new(config);
    let mut sink = TerminalSink::new(log);
    sink.term.enter()?;

    let result = run(&mut session, &mut sink);

    // Always try to restore terminal state.
    let _ = sink.term.exit();
    if let Some(log) = sink.log.take() {
        log.shutdown();
    }
    println!(
        "[blockfall] exited after {} actions ({} ms)",
        session.processed(),
        session.now_ms()
    );
    result
}

fn run(session: &mut Session, sink: &mut TerminalSink) -> Result<()> {
    // Initial paused frame.
    let frame = session.frame();
    sink.render(&frame);
    sink.take_error()?;

    let started = Instant::now();
    let mut last_tick = started;
    let tick_duration = Duration::from_millis(TICK_MS as u64);

    loop {
        // Input with timeout until next tick.
        let timeout = tick_duration
            .checked_sub(last_tick.elapsed())
            .unwrap_or_else(|| Duration::from_secs(0));

        if event::poll(timeout)? {
            match event::read()? {
                Event::Key(key) => {
                    if should_quit(key) {
                        return Ok(());
                    }
                    if let Some(action) = handle_key_event(key) {
                        session.dispatch(action);
                        session.pump(sink);
                    }
                }
                Event::Resize(_, _) => {
                    sink.term.invalidate();
                    let frame = session.frame();
                    sink.render(&frame);
                }
                _ => {}
            }
            sink.take_error()?;
        }

        // Tick.
        if last_tick.elapsed() >= tick_duration {
            last_tick = Instant::now();
            // Anchored on the start instant so sub-millisecond remainders carry over.
            session.advance_to(started.elapsed().as_millis() as u64, sink);
            sink.take_error()?;
            sink.play(session.now_ms())?;
        }
    }
}
