//! Mushroom Mix-Up - A color-memory platform survival minigame
//!
//! Core modules:
//! - `sim`: Deterministic round simulation (state machine, platform animation, outcome)
//! - `settings`: Data-driven tuning for speeds, delays and durations
//! - `audio`: One-shot outcome sounds handed to the host
//! - `hud`: Score/timer text and outcome surfaces for the UI collaborator
//! - `scene`: Start menu and scene transition glue

pub mod audio;
pub mod error;
pub mod hud;
pub mod scene;
pub mod settings;
pub mod sim;

pub use error::GameError;
pub use settings::GameSettings;

use glam::Vec3;

/// Game configuration constants (reference tuning)
pub mod consts {
    use glam::Vec3;

    /// Fixed simulation timestep (60 Hz is plenty for lerped platforms)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Largest frame delta the host loop will accept
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// How far an unsafe mushroom sinks below its rest position
    pub const DROP_OFFSET: f32 = 5.0;
    /// Animation-time scale while sinking (1.0 unit / 2.0 = 0.5 s)
    pub const DROP_SPEED: f32 = 2.0;
    /// Animation-time scale while rising; faster than the drop
    pub const RISE_SPEED: f32 = 3.0;

    /// Delay between picking the safe color and dropping the rest
    pub const PRE_DROP_DELAY: f32 = 1.0;
    /// Delay between starting the drop and checking the player
    pub const CHECK_DELAY: f32 = 1.5;
    /// Delay after the rise before the next round begins
    pub const SETTLE_DELAY: f32 = 3.0;

    /// Downward ray length from the player origin
    pub const PROBE_DISTANCE: f32 = 2.0;

    /// Blink: seconds lit, then seconds unlit
    pub const BLINK_HALF_PERIOD: f32 = 0.5;
    /// Blink highlight (bright green)
    pub const BLINK_HIGHLIGHT: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    /// Countdown length; surviving it wins the game
    pub const GAME_DURATION: f32 = 60.0;

    /// Trigger tag of the surface that ends the game on contact
    pub const FAIL_SURFACE_TAG: &str = "Water";

    /// Start menu delay before loading the game scene
    pub const MENU_DELAY: f32 = 2.0;

    /// Position comparisons
    pub const POSITION_EPSILON: f32 = 1e-4;
}

/// Rest position shifted straight down by `offset`
#[inline]
pub fn sunk_position(rest: Vec3, offset: f32) -> Vec3 {
    rest - Vec3::Y * offset
}

/// Format seconds as zero-padded `MM:SS` (floored, never negative)
pub fn format_clock(seconds: f32) -> String {
    let total = seconds.max(0.0).floor() as u32;
    format!("{:02}:{:02}", total / 60, total % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0.0), "00:00");
        assert_eq!(format_clock(59.99), "00:59");
        assert_eq!(format_clock(65.3), "01:05");
        assert_eq!(format_clock(600.0), "10:00");
        assert_eq!(format_clock(-3.0), "00:00");
    }

    #[test]
    fn test_sunk_position() {
        let rest = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(sunk_position(rest, 5.0), Vec3::new(1.0, -3.0, 3.0));
    }
}
