//! Mushroom Mix-Up headless host
//!
//! Runs the start menu and one game session without a renderer. A simple
//! autopilot walks the player onto the safe mushroom each round.
//!
//! Usage: `mushroom-mixup [settings.json] [--clumsy]`

use glam::Vec3;

use mushroom_mixup::audio::{AudioManager, AudioSink};
use mushroom_mixup::consts::*;
use mushroom_mixup::scene::{MenuFlow, SceneLoader};
use mushroom_mixup::sim::{
    CAP_HALF_EXTENTS, ColliderProbe, Color, GameEvent, GameSession, PlatformRegistry, TickInput,
    tick,
};
use mushroom_mixup::{GameError, GameSettings};

/// Walking speed of the autopilot (units/s)
const WALK_SPEED: f32 = 6.0;
/// Player origin height above a mushroom cap
const PLAYER_HEIGHT: f32 = 1.0;
/// Simulated host frame time (slower than the sim to exercise substeps)
const FRAME_DT: f32 = 1.0 / 30.0;
/// Grid spacing between mushrooms
const GRID_SPACING: f32 = 4.0;

/// Scene loader for the headless host: just remembers the request
#[derive(Default)]
struct HeadlessScenes {
    game_loaded: bool,
    quit: bool,
}

impl SceneLoader for HeadlessScenes {
    fn load_next(&mut self) {
        log::info!("Loading game scene");
        self.game_loaded = true;
    }

    fn quit(&mut self) {
        self.quit = true;
    }
}

/// Game instance holding the session and host-side state
struct Game {
    session: GameSession,
    player: Vec3,
    accumulator: f32,
    clumsy: bool,
    audio: AudioManager,
    last_second: u32,
}

impl Game {
    fn new(settings: GameSettings, clumsy: bool) -> Result<Self, GameError> {
        let registry = PlatformRegistry::grid(&Color::ALL, 3, GRID_SPACING)?;
        let start = registry
            .iter()
            .next()
            .map(|p| p.rest_position())
            .unwrap_or(Vec3::ZERO);
        let audio = AudioManager::from_settings(&settings);
        let session = GameSession::with_registry(settings, registry)?;

        Ok(Self {
            session,
            player: start + Vec3::Y * (CAP_HALF_EXTENTS.y + PLAYER_HEIGHT),
            accumulator: 0.0,
            clumsy,
            audio,
            last_second: 0,
        })
    }

    /// Walk toward the safe mushroom once its color is known
    fn steer(&mut self, dt: f32) {
        if self.clumsy {
            return;
        }
        let Some(color) = self.session.safe_color() else {
            return;
        };
        let Ok(safe) = self.session.registry.safe_platform(color) else {
            return;
        };

        let goal = safe.rest_position() + Vec3::Y * (CAP_HALF_EXTENTS.y + PLAYER_HEIGHT);
        let to_goal = goal - self.player;
        let step = WALK_SPEED * dt;
        if to_goal.length() <= step {
            self.player = goal;
        } else {
            self.player += to_goal.normalize() * step;
        }
    }

    /// Run simulation ticks for one host frame
    fn update(&mut self, dt: f32) -> Result<(), GameError> {
        if dt > MAX_FRAME_DT {
            log::warn!("Frame delta {dt:.3}s clamped to {MAX_FRAME_DT}s");
        }
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut probe = ColliderProbe;
        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.steer(SIM_DT);
            let input = TickInput::at(self.player);
            tick(&mut self.session, &input, &mut probe, SIM_DT)?;
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        for event in self.session.drain_events() {
            match event {
                GameEvent::PlaySound(effect) => self.audio.play_one_shot(effect),
                GameEvent::RoundStarted { round, safe_color } => {
                    log::info!("HUD: round {round}, stand on {safe_color}");
                }
                GameEvent::GameOver { outcome, score, .. } => {
                    log::info!("HUD: {outcome:?} screen, final {score}");
                }
                other => log::debug!("{other:?}"),
            }
        }

        let second = self.session.elapsed as u32;
        if second != self.last_second {
            self.last_second = second;
            log::info!(
                "HUD: {} | {}",
                self.session.current_score_text(),
                self.session.current_timer_text()
            );
        }
        Ok(())
    }
}

fn run() -> Result<(), GameError> {
    let mut settings_path = None;
    let mut clumsy = false;
    for arg in std::env::args().skip(1) {
        if arg == "--clumsy" {
            clumsy = true;
        } else {
            settings_path = Some(arg);
        }
    }

    let settings = match settings_path {
        Some(path) => GameSettings::load(path)?,
        None => GameSettings::default(),
    };

    // Start menu: press Play, wait for the scene load
    let mut scenes = HeadlessScenes::default();
    let mut menu = MenuFlow::new(settings.menu_delay);
    menu.play();
    while !scenes.game_loaded && !scenes.quit {
        menu.tick(FRAME_DT, &mut scenes);
    }

    let mut game = Game::new(settings, clumsy)?;
    while !game.session.is_game_over() {
        game.update(FRAME_DT)?;
    }

    log::info!(
        "Session finished: {:?} with {} after {:.1}s",
        game.session.outcome(),
        game.session.current_score_text(),
        game.session.elapsed
    );
    Ok(())
}

fn main() {
    env_logger::init();
    log::info!("Mushroom Mix-Up (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e}");
        std::process::exit(1);
    }
}
