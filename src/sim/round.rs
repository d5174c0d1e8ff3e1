//! Round coordinator
//!
//! One round: pick a safe color and blink its mushroom, drop the others,
//! probe under the player, then either raise everything and go again or end
//! the game. Waits between phases go through the `Schedule`; everything else
//! happens synchronously inside one tick.

use glam::Vec3;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animator::Animator;
use super::outcome::{EndReason, Outcome, OutcomeTracker};
use super::palette::{Color, pick_safe_color};
use super::probe::PositionProbe;
use super::registry::{PlatformId, PlatformRegistry};
use super::schedule::{RoundStep, Schedule};
use super::state::GameEvent;
use crate::audio::SoundEffect;
use crate::hud::HudState;
use crate::settings::GameSettings;
use crate::{GameError, sunk_position};

/// Where the current round is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundPhase {
    /// Not started yet
    Idle,
    /// Safe mushroom blinking, drop pending
    SelectingColor,
    /// Unsafe mushrooms sinking
    Dropping,
    /// Drops finished, check pending
    AwaitingCheck,
    /// Everything rising, next round pending
    Resetting,
    /// Session over
    Terminal(Outcome),
    /// Stopped on a configuration error
    Halted,
}

/// Per-round bookkeeping, reset at the start of every round
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    pub safe_color: Option<Color>,
    pub phase: RoundPhase,
    /// 1-based index of the current round
    pub round_index: u32,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            safe_color: None,
            phase: RoundPhase::Idle,
            round_index: 0,
        }
    }
}

/// Everything the coordinator may touch during a step
pub struct RoundContext<'a> {
    pub settings: &'a GameSettings,
    pub registry: &'a mut PlatformRegistry,
    pub animator: &'a mut Animator,
    pub tracker: &'a mut OutcomeTracker,
    pub hud: &'a mut HudState,
    pub rng: &'a mut Pcg32,
    pub events: &'a mut Vec<GameEvent>,
}

/// Drives rounds through their phases
#[derive(Debug, Clone)]
pub struct RoundCoordinator {
    state: RoundState,
    schedule: Schedule,
    palette: Vec<Color>,
}

impl Default for RoundCoordinator {
    fn default() -> Self {
        Self {
            state: RoundState::default(),
            schedule: Schedule::new(),
            palette: Color::ALL.to_vec(),
        }
    }
}

impl RoundCoordinator {
    /// Coordinator that picks safe colors from `palette`
    pub fn new(palette: Vec<Color>) -> Result<Self, GameError> {
        if palette.is_empty() {
            log::error!("No colors were assigned to the safe color palette");
            return Err(GameError::EmptyPalette);
        }
        Ok(Self {
            palette,
            ..Self::default()
        })
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn phase(&self) -> RoundPhase {
        self.state.phase
    }

    pub fn safe_color(&self) -> Option<Color> {
        self.state.safe_color
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn palette(&self) -> &[Color] {
        &self.palette
    }

    /// No further round work will happen
    pub fn is_stopped(&self) -> bool {
        matches!(self.state.phase, RoundPhase::Terminal(_) | RoundPhase::Halted)
    }

    /// Enter SelectingColor: count the round, pick the color, start the blink
    pub fn begin_round(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        if ctx.tracker.is_game_over() || self.is_stopped() {
            return Ok(());
        }

        ctx.tracker.record_round();
        self.state.round_index += 1;
        self.state.phase = RoundPhase::SelectingColor;

        let color = pick_safe_color(ctx.rng, &self.palette);
        self.state.safe_color = Some(color);
        log::info!("Round {}: safe color is {}", self.state.round_index, color);

        let safe_id = self.safe_platform_id(ctx, color)?;
        ctx.animator.blink(
            ctx.registry,
            safe_id,
            ctx.settings.blink_highlight,
            ctx.settings.blink_half_period,
        )?;

        self.schedule.after(ctx.settings.pre_drop_delay, RoundStep::BeginDrop);
        ctx.events.push(GameEvent::RoundStarted {
            round: self.state.round_index,
            safe_color: color,
        });
        Ok(())
    }

    /// Enter Dropping: sink every mushroom not carrying the safe tag
    pub fn begin_drop(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        let Some(safe) = self.state.safe_color else {
            return Ok(());
        };

        let targets: Vec<(PlatformId, Vec3)> = ctx
            .registry
            .iter()
            .filter(|p| {
                if p.color == safe {
                    log::debug!("Platform {} ({}) is safe, stays up", p.id, p.color);
                }
                p.color != safe
            })
            .map(|p| (p.id, sunk_position(p.rest_position(), ctx.settings.drop_offset)))
            .collect();

        for &(id, target) in &targets {
            ctx.animator
                .animate_to(ctx.registry, id, target, ctx.settings.drop_speed)?;
        }

        self.state.phase = RoundPhase::Dropping;
        self.schedule.after(ctx.settings.check_delay, RoundStep::CheckPosition);
        ctx.events.push(GameEvent::PlatformsDropped {
            count: targets.len(),
        });
        Ok(())
    }

    /// Probe under the player and branch to reset or lose
    pub fn check_position(
        &mut self,
        ctx: &mut RoundContext<'_>,
        probe: &mut dyn PositionProbe,
        player: Vec3,
    ) -> Result<(), GameError> {
        let Some(safe) = self.state.safe_color else {
            return Ok(());
        };
        self.state.phase = RoundPhase::AwaitingCheck;

        let safe_id = self.safe_platform_id(ctx, safe)?;
        let hit = probe.cast_downward_from(ctx.registry, player, ctx.settings.probe_distance);
        match hit {
            Some(id) => log::debug!("Player is over platform {id}"),
            None => log::debug!("Player is not over any platform"),
        }

        let on_safe = hit == Some(safe_id);
        ctx.events.push(GameEvent::PlayerChecked { hit, on_safe });

        if on_safe {
            log::info!("Player is safe, resetting round");
            self.begin_reset(ctx)
        } else {
            log::info!("Player missed the safe platform");
            self.end_game(ctx, EndReason::MissedSafePlatform);
            Ok(())
        }
    }

    /// Enter Resetting: cancel everything, then raise every platform
    pub fn begin_reset(&mut self, ctx: &mut RoundContext<'_>) -> Result<(), GameError> {
        self.state.phase = RoundPhase::Resetting;

        // Cancel before any rise starts; a live drop would fight the rise.
        ctx.animator.cancel_all(ctx.registry);

        let targets: Vec<(PlatformId, Vec3)> = ctx
            .registry
            .iter()
            .map(|p| (p.id, p.rest_position()))
            .collect();
        for (id, rest) in targets {
            ctx.animator
                .animate_to(ctx.registry, id, rest, ctx.settings.rise_speed)?;
        }

        self.schedule.after(ctx.settings.settle_delay, RoundStep::BeginRound);
        ctx.events.push(GameEvent::PlatformsReset);
        Ok(())
    }

    /// A trigger volume was entered
    pub fn on_trigger_enter(&mut self, ctx: &mut RoundContext<'_>, tag: &str) {
        if tag == ctx.settings.fail_surface_tag {
            log::info!("Player touched {tag}");
            self.end_game(ctx, EndReason::TouchedFailSurface);
        }
    }

    /// Latch game over for `reason`. Returns false if the game had already ended.
    pub fn end_game(&mut self, ctx: &mut RoundContext<'_>, reason: EndReason) -> bool {
        if !ctx.tracker.try_end(reason) {
            return false;
        }
        self.enter_terminal(ctx, reason);
        true
    }

    /// Apply the terminal side effects after the tracker latched
    pub fn enter_terminal(&mut self, ctx: &mut RoundContext<'_>, reason: EndReason) {
        let outcome = reason.outcome();
        self.state.phase = RoundPhase::Terminal(outcome);
        self.schedule.clear();

        let sound = match outcome {
            Outcome::Win => SoundEffect::Win,
            Outcome::Lose => SoundEffect::Lose,
        };
        ctx.events.push(GameEvent::PlaySound(sound));
        ctx.hud.show_outcome(outcome);
        ctx.events.push(GameEvent::GameOver {
            outcome,
            reason,
            score: ctx.tracker.score(),
        });
    }

    /// Promote Dropping to AwaitingCheck once every drop has landed
    pub fn update_phase(&mut self, animator: &Animator) {
        if self.state.phase == RoundPhase::Dropping && animator.moves().is_empty() {
            self.state.phase = RoundPhase::AwaitingCheck;
        }
    }

    /// Advance the schedule by `dt` and run whatever came due
    pub fn run_due(
        &mut self,
        ctx: &mut RoundContext<'_>,
        probe: &mut dyn PositionProbe,
        player: Vec3,
        dt: f32,
    ) -> Result<(), GameError> {
        for step in self.schedule.advance(dt) {
            if ctx.tracker.is_game_over() || self.is_stopped() {
                break;
            }
            match step {
                RoundStep::BeginDrop => self.begin_drop(ctx)?,
                RoundStep::CheckPosition => self.check_position(ctx, probe, player)?,
                RoundStep::BeginRound => self.begin_round(ctx)?,
            }
        }
        Ok(())
    }

    fn safe_platform_id(
        &mut self,
        ctx: &RoundContext<'_>,
        color: Color,
    ) -> Result<PlatformId, GameError> {
        match ctx.registry.safe_platform(color) {
            Ok(p) => Ok(p.id),
            Err(e) => {
                log::error!("{e}");
                self.state.phase = RoundPhase::Halted;
                self.schedule.clear();
                Err(e)
            }
        }
    }
}
