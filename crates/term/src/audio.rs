//! Cue sampling for terminal audio.
//!
//! Cues can arrive in bursts (a lock and a line clear within a few
//! milliseconds). The sampler keeps only the latest cue and releases it at most
//! once per window, so the output never plays more than one tone per window.

use crate::types::{Cue, CUE_SAMPLE_MS};

#[derive(Debug, Clone)]
pub struct CueSampler {
    window_ms: u64,
    next_sample_ms: u64,
    latest: Option<Cue>,
}

impl CueSampler {
    pub fn new(window_ms: u64) -> Self {
        let window_ms = window_ms.max(1);
        Self {
            window_ms,
            next_sample_ms: window_ms,
            latest: None,
        }
    }

    /// Record a cue; a later push in the same window replaces it
    pub fn push(&mut self, cue: Cue) {
        self.latest = Some(cue);
    }

    /// Whether a cue is waiting for the next window boundary
    pub fn is_pending(&self) -> bool {
        self.latest.is_some()
    }

    /// Release the latest cue if a window boundary has passed.
    ///
    /// Boundaries sit on multiples of the window; a late poll snaps forward to
    /// the next multiple rather than replaying missed windows.
    pub fn sample(&mut self, now_ms: u64) -> Option<Cue> {
        if now_ms < self.next_sample_ms {
            return None;
        }
        self.next_sample_ms = (now_ms / self.window_ms + 1) * self.window_ms;
        self.latest.take()
    }
}

impl Default for CueSampler {
    fn default() -> Self {
        Self::new(u64::from(CUE_SAMPLE_MS))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_before_first_boundary() {
        let mut s = CueSampler::new(100);
        s.push(Cue::LOCK);
        assert_eq!(s.sample(0), None);
        assert_eq!(s.sample(99), None);
        assert!(s.is_pending());
        assert_eq!(s.sample(100), Some(Cue::LOCK));
        assert!(!s.is_pending());
    }

    #[test]
    fn latest_cue_in_window_wins() {
        let mut s = CueSampler::new(100);
        s.push(Cue::LOCK);
        s.push(Cue::LINE_CLEAR);
        assert_eq!(s.sample(120), Some(Cue::LINE_CLEAR));
        assert_eq!(s.sample(150), None);
    }

    #[test]
    fn empty_window_emits_nothing() {
        let mut s = CueSampler::new(100);
        assert_eq!(s.sample(100), None);
        s.push(Cue::LOCK);
        assert_eq!(s.sample(199), None);
        assert_eq!(s.sample(200), Some(Cue::LOCK));
    }

    #[test]
    fn late_poll_snaps_to_next_boundary() {
        let mut s = CueSampler::new(100);
        s.push(Cue::LOCK);
        assert_eq!(s.sample(1_050), Some(Cue::LOCK));
        s.push(Cue::LINE_CLEAR);
        assert_eq!(s.sample(1_099), None);
        assert_eq!(s.sample(1_100), Some(Cue::LINE_CLEAR));
    }
}
