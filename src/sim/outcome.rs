//! Outcome tracking: countdown, score and the game-over latch

use serde::{Deserialize, Serialize};

use crate::format_clock;

/// How a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Countdown reached zero
    Win,
    /// Failed check or fail-surface contact
    Lose,
}

/// Why the session ended (for logs and the UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    TimerExpired,
    MissedSafePlatform,
    TouchedFailSurface,
}

impl EndReason {
    pub fn outcome(&self) -> Outcome {
        match self {
            EndReason::TimerExpired => Outcome::Win,
            EndReason::MissedSafePlatform | EndReason::TouchedFailSurface => Outcome::Lose,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeTracker {
    remaining: f32,
    score: u32,
    /// Set once, never cleared
    ended: Option<EndReason>,
}

impl OutcomeTracker {
    pub fn new(duration: f32) -> Self {
        Self {
            remaining: duration.max(0.0),
            score: 0,
            ended: None,
        }
    }

    /// Count down by `dt`. Returns `Some(Outcome::Win)` on the tick that
    /// crosses zero; a no-op once the game is over.
    pub fn tick(&mut self, dt: f32) -> Option<Outcome> {
        if self.is_game_over() {
            return None;
        }

        self.remaining -= dt;
        if self.remaining <= 0.0 {
            self.remaining = 0.0;
            if self.try_end(EndReason::TimerExpired) {
                return Some(Outcome::Win);
            }
        }
        None
    }

    /// Test-and-set on the latch. Returns true only for the first caller.
    pub fn try_end(&mut self, reason: EndReason) -> bool {
        if self.ended.is_some() {
            log::debug!("Ignoring {reason:?}: game already over");
            return false;
        }
        self.ended = Some(reason);
        log::info!(
            "Game over ({:?}) with score {} and {:.2}s left",
            reason,
            self.score,
            self.remaining
        );
        true
    }

    /// Count a round as entered
    pub fn record_round(&mut self) {
        if !self.is_game_over() {
            self.score += 1;
        }
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.ended.is_some()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.ended.map(|r| r.outcome())
    }

    pub fn end_reason(&self) -> Option<EndReason> {
        self.ended
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Remaining time as `MM:SS`
    pub fn timer_text(&self) -> String {
        format_clock(self.remaining)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_timer_clamps_and_wins() {
        let mut t = OutcomeTracker::new(1.5);
        assert_eq!(t.tick(1.0), None);
        assert!(!t.is_game_over());

        assert_eq!(t.tick(1.0), Some(Outcome::Win));
        assert_eq!(t.remaining(), 0.0);
        assert_eq!(t.outcome(), Some(Outcome::Win));
        assert_eq!(t.end_reason(), Some(EndReason::TimerExpired));

        // Frozen afterwards
        assert_eq!(t.tick(1.0), None);
        assert_eq!(t.remaining(), 0.0);
    }

    #[test]
    fn test_latch_first_trigger_wins() {
        let mut t = OutcomeTracker::new(10.0);
        t.record_round();
        assert!(t.try_end(EndReason::TouchedFailSurface));
        assert!(!t.try_end(EndReason::MissedSafePlatform));
        assert!(!t.try_end(EndReason::TimerExpired));
        assert_eq!(t.end_reason(), Some(EndReason::TouchedFailSurface));
        assert_eq!(t.outcome(), Some(Outcome::Lose));

        // Score and timer frozen
        t.record_round();
        assert_eq!(t.score(), 1);
        assert_eq!(t.tick(20.0), None);
        assert_eq!(t.remaining(), 10.0);
    }

    #[test]
    fn test_timer_text() {
        let mut t = OutcomeTracker::new(75.0);
        assert_eq!(t.timer_text(), "01:15");
        t.tick(15.5);
        assert_eq!(t.timer_text(), "00:59");
    }

    proptest! {
        #[test]
        fn prop_timer_never_negative_and_latches_once(
            duration in 0.1f32..30.0,
            dts in prop::collection::vec(0.0f32..2.0, 1..80),
        ) {
            let mut t = OutcomeTracker::new(duration);
            let mut wins = 0;
            for dt in dts {
                if t.tick(dt).is_some() {
                    wins += 1;
                }
                prop_assert!(t.remaining() >= 0.0);
            }
            prop_assert!(wins <= 1);
            prop_assert_eq!(wins == 1, t.is_game_over());
        }
    }
}
