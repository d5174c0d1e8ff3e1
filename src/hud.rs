//! HUD surface state
//!
//! The simulation flips outcome screens on; rendering them is the host's job.

use serde::{Deserialize, Serialize};

use crate::sim::Outcome;

/// Which outcome screens are active
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HudState {
    pub win_screen: bool,
    pub lose_screen: bool,
}

impl HudState {
    /// Activate the screen for `outcome`
    pub fn show_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.win_screen = true,
            Outcome::Lose => self.lose_screen = true,
        }
    }

    /// The active outcome screen, if any
    pub fn active_screen(&self) -> Option<Outcome> {
        if self.win_screen {
            Some(Outcome::Win)
        } else if self.lose_screen {
            Some(Outcome::Lose)
        } else {
            None
        }
    }
}

/// Score line shown during play
pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}
