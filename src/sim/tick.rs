//! Fixed timestep simulation tick
//!
//! Order within one tick:
//! 1. trigger events (a fail-surface contact pre-empts everything below)
//! 2. countdown
//! 3. platform animations
//! 4. round steps that came due
//!
//! Once the game is over nothing advances.

use glam::Vec3;

use super::outcome::EndReason;
use super::probe::PositionProbe;
use super::state::GameSession;
use crate::GameError;

/// Host input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Player origin, used for the position check
    pub player_position: Vec3,
    /// Tags of trigger volumes the player entered since the last tick
    pub entered_triggers: Vec<String>,
}

impl TickInput {
    pub fn at(player_position: Vec3) -> Self {
        Self {
            player_position,
            entered_triggers: Vec::new(),
        }
    }

    /// Same position, plus a trigger contact
    pub fn with_trigger(mut self, tag: impl Into<String>) -> Self {
        self.entered_triggers.push(tag.into());
        self
    }
}

/// Advance the session by one timestep.
///
/// Errors only on configuration problems discovered mid-round; the session
/// is halted when that happens.
pub fn tick(
    session: &mut GameSession,
    input: &TickInput,
    probe: &mut dyn PositionProbe,
    dt: f32,
) -> Result<(), GameError> {
    if session.is_game_over() || session.round.is_stopped() {
        return Ok(());
    }

    session.time_ticks += 1;
    session.elapsed += dt;

    for tag in &input.entered_triggers {
        session.with_round(|round, ctx| round.on_trigger_enter(ctx, tag));
    }
    if session.is_game_over() {
        return Ok(());
    }

    if session.tracker.tick(dt).is_some() {
        session.with_round(|round, ctx| round.enter_terminal(ctx, EndReason::TimerExpired));
        return Ok(());
    }

    session.animator.advance(&mut session.registry, dt);
    session.round.update_phase(&session.animator);

    let player = input.player_position;
    session.with_round(|round, ctx| round.run_due(ctx, probe, player, dt))
}
