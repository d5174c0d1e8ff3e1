//! Crate error type
//!
//! Only configuration problems are errors. A probe that finds nothing and a
//! terminal trigger after game over are ordinary game flow.

use thiserror::Error;

use crate::sim::{Color, PlatformId};

#[derive(Debug, Error)]
pub enum GameError {
    /// The registry was built from an empty platform list
    #[error("no platforms were supplied to the registry")]
    NoPlatforms,

    /// No platform carries the round's safe color tag
    #[error("no platform is tagged {0}; check the platform color tags")]
    MissingSafePlatform(Color),

    /// Two or more platforms carry the same color tag
    #[error("more than one platform is tagged {0}; each color must be unique")]
    DuplicateSafeTag(Color),

    /// The round coordinator was given no colors to pick from
    #[error("the safe color palette is empty")]
    EmptyPalette,

    /// Animator was asked to touch a platform the registry does not know
    #[error("unknown platform id {0}")]
    UnknownPlatform(PlatformId),

    /// Settings out of range
    #[error("invalid settings: {0}")]
    InvalidSettings(String),

    /// Settings file could not be read
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    /// Settings JSON could not be parsed
    #[error("failed to parse settings: {0}")]
    Settings(#[from] serde_json::Error),
}
