//! Game session state
//!
//! One `GameSession` owns every piece of the simulation. Components never
//! reach for globals; the coordinator gets a `RoundContext` borrowed from here.

use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::animator::Animator;
use super::outcome::{EndReason, Outcome, OutcomeTracker};
use super::palette::Color;
use super::registry::{PlatformId, PlatformRegistry, PlatformSpec};
use super::round::{RoundContext, RoundCoordinator, RoundPhase};
use crate::GameError;
use crate::audio::SoundEffect;
use crate::hud::{HudState, score_text};
use crate::settings::GameSettings;

/// Things that happened during a tick, for the host to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoundStarted { round: u32, safe_color: Color },
    PlatformsDropped { count: usize },
    PlayerChecked { hit: Option<PlatformId>, on_safe: bool },
    PlatformsReset,
    /// Fire-and-forget clip for the audio collaborator
    PlaySound(SoundEffect),
    GameOver {
        outcome: Outcome,
        reason: EndReason,
        score: u32,
    },
}

/// RNG state wrapper for reproducible sessions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete state of one play session
#[derive(Debug, Clone)]
pub struct GameSession {
    pub settings: GameSettings,
    pub rng_state: RngState,
    rng: Pcg32,
    pub registry: PlatformRegistry,
    pub animator: Animator,
    pub tracker: OutcomeTracker,
    pub round: RoundCoordinator,
    pub hud: HudState,
    events: Vec<GameEvent>,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Simulated seconds since the session started (stops at game over)
    pub elapsed: f32,
}

impl GameSession {
    /// Build the session and enter the first round.
    ///
    /// Fails if the settings are invalid, no platforms were supplied, or some
    /// palette color has no platform to be the safe one.
    pub fn new(settings: GameSettings, platforms: Vec<PlatformSpec>) -> Result<Self, GameError> {
        settings.validate()?;
        let registry = PlatformRegistry::new(platforms)?;
        Self::from_parts(settings, registry)
    }

    /// Build from an existing registry and enter the first round
    pub fn with_registry(
        settings: GameSettings,
        registry: PlatformRegistry,
    ) -> Result<Self, GameError> {
        settings.validate()?;
        Self::from_parts(settings, registry)
    }

    /// Shared tail of the constructors; `settings` are already validated
    fn from_parts(settings: GameSettings, registry: PlatformRegistry) -> Result<Self, GameError> {
        let round = RoundCoordinator::default();

        if let Some(&missing) = registry.missing_colors(round.palette()).first() {
            log::error!("No platform is tagged {missing}; the round cannot be validated");
            return Err(GameError::MissingSafePlatform(missing));
        }

        let rng_state = RngState::new(settings.seed);
        let mut session = Self {
            tracker: OutcomeTracker::new(settings.game_duration),
            rng: rng_state.to_rng(),
            rng_state,
            settings,
            registry,
            animator: Animator::new(),
            round,
            hud: HudState::default(),
            events: Vec::new(),
            time_ticks: 0,
            elapsed: 0.0,
        };

        log::info!(
            "Session started with {} platforms (seed {})",
            session.registry.len(),
            session.rng_state.seed
        );
        session.with_round(|round, ctx| round.begin_round(ctx))?;
        Ok(session)
    }

    /// Run `f` with the coordinator and a context over the rest of the session
    pub fn with_round<T>(
        &mut self,
        f: impl FnOnce(&mut RoundCoordinator, &mut RoundContext<'_>) -> T,
    ) -> T {
        let mut ctx = RoundContext {
            settings: &self.settings,
            registry: &mut self.registry,
            animator: &mut self.animator,
            tracker: &mut self.tracker,
            hud: &mut self.hud,
            rng: &mut self.rng,
            events: &mut self.events,
        };
        f(&mut self.round, &mut ctx)
    }

    /// Take every event produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Peek at pending events
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.tracker.is_game_over()
    }

    pub fn outcome(&self) -> Option<Outcome> {
        self.tracker.outcome()
    }

    pub fn phase(&self) -> RoundPhase {
        self.round.phase()
    }

    pub fn safe_color(&self) -> Option<Color> {
        self.round.safe_color()
    }

    pub fn score(&self) -> u32 {
        self.tracker.score()
    }

    /// Score line for the UI
    pub fn current_score_text(&self) -> String {
        score_text(self.tracker.score())
    }

    /// Countdown as `MM:SS`
    pub fn current_timer_text(&self) -> String {
        self.tracker.timer_text()
    }
}
