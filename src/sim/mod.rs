//! Deterministic round simulation
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by platform id)
//! - No rendering, audio or platform dependencies

pub mod animator;
pub mod outcome;
pub mod palette;
pub mod probe;
pub mod registry;
pub mod round;
pub mod schedule;
pub mod state;
pub mod tick;

pub use animator::{Animator, BlinkTask, MoveTask};
pub use outcome::{EndReason, Outcome, OutcomeTracker};
pub use palette::{Color, pick_safe_color};
pub use probe::{ColliderProbe, FixedProbe, PositionProbe};
pub use registry::{CAP_HALF_EXTENTS, Platform, PlatformId, PlatformRegistry, PlatformSpec};
pub use round::{RoundContext, RoundCoordinator, RoundPhase, RoundState};
pub use schedule::{RoundStep, Schedule};
pub use state::{GameEvent, GameSession, RngState};
pub use tick::{TickInput, tick};
