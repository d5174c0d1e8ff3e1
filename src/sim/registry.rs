//! Platform registry
//!
//! The set of mushrooms is fixed when the level loads. Rest positions are
//! captured once here and every rise animation targets them.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::palette::Color;
use crate::GameError;

/// Stable platform handle (index into the registry)
pub type PlatformId = u32;

/// Default collider half extents of a mushroom cap
pub const CAP_HALF_EXTENTS: Vec3 = Vec3::new(1.5, 0.25, 1.5);

/// A platform as supplied by the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformSpec {
    pub color: Color,
    pub position: Vec3,
    #[serde(default = "default_half_extents")]
    pub half_extents: Vec3,
}

fn default_half_extents() -> Vec3 {
    CAP_HALF_EXTENTS
}

impl PlatformSpec {
    pub fn new(color: Color, position: Vec3) -> Self {
        Self {
            color,
            position,
            half_extents: CAP_HALF_EXTENTS,
        }
    }
}

/// A mushroom platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub id: PlatformId,
    pub color: Color,
    /// Canonical "up" position, never changes after load
    rest_position: Vec3,
    /// Written only by the animator
    pub position: Vec3,
    /// Box collider half extents around `position`
    pub half_extents: Vec3,
    /// Displayed material color (blink writes here)
    pub material: Vec3,
}

impl Platform {
    fn from_spec(id: PlatformId, spec: PlatformSpec) -> Self {
        Self {
            id,
            color: spec.color,
            rest_position: spec.position,
            position: spec.position,
            half_extents: spec.half_extents,
            material: spec.color.material(),
        }
    }

    #[inline]
    pub fn rest_position(&self) -> Vec3 {
        self.rest_position
    }

    /// Whether the platform is back at its rest position
    pub fn is_at_rest(&self, epsilon: f32) -> bool {
        self.position.abs_diff_eq(self.rest_position, epsilon)
    }

    /// Collider bounds (min, max)
    pub fn bounds(&self) -> (Vec3, Vec3) {
        (
            self.position - self.half_extents,
            self.position + self.half_extents,
        )
    }
}

/// All platforms of the level, ordered by id
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformRegistry {
    platforms: Vec<Platform>,
}

impl PlatformRegistry {
    /// Build from level data. Ids are assigned in input order.
    pub fn new(specs: Vec<PlatformSpec>) -> Result<Self, GameError> {
        if specs.is_empty() {
            log::error!("No platforms were assigned to the registry");
            return Err(GameError::NoPlatforms);
        }

        // The round check compares against a single id per color
        let mut seen: Vec<Color> = Vec::with_capacity(specs.len());
        for spec in &specs {
            if seen.contains(&spec.color) {
                log::error!(
                    "More than one platform is tagged {}; each color must be unique",
                    spec.color
                );
                return Err(GameError::DuplicateSafeTag(spec.color));
            }
            seen.push(spec.color);
        }

        let platforms = specs
            .into_iter()
            .enumerate()
            .map(|(i, spec)| Platform::from_spec(i as PlatformId, spec))
            .collect();

        Ok(Self { platforms })
    }

    /// One mushroom per palette color on a `columns`-wide grid in the XZ plane
    pub fn grid(palette: &[Color], columns: usize, spacing: f32) -> Result<Self, GameError> {
        let columns = columns.max(1);
        let specs = palette
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let col = (i % columns) as f32;
                let row = (i / columns) as f32;
                PlatformSpec::new(color, Vec3::new(col * spacing, 0.0, row * spacing))
            })
            .collect();
        Self::new(specs)
    }

    pub fn len(&self) -> usize {
        self.platforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.platforms.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Platform> {
        self.platforms.iter()
    }

    pub fn get(&self, id: PlatformId) -> Option<&Platform> {
        self.platforms.get(id as usize)
    }

    pub fn get_mut(&mut self, id: PlatformId) -> Option<&mut Platform> {
        self.platforms.get_mut(id as usize)
    }

    /// The platform carrying the safe tag
    pub fn safe_platform(&self, color: Color) -> Result<&Platform, GameError> {
        self.platforms
            .iter()
            .find(|p| p.color == color)
            .ok_or(GameError::MissingSafePlatform(color))
    }

    /// Palette colors no platform carries
    pub fn missing_colors(&self, palette: &[Color]) -> Vec<Color> {
        palette
            .iter()
            .copied()
            .filter(|&c| !self.platforms.iter().any(|p| p.color == c))
            .collect()
    }

    /// Every platform is back at rest
    pub fn all_at_rest(&self, epsilon: f32) -> bool {
        self.platforms.iter().all(|p| p.is_at_rest(epsilon))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry_is_error() {
        assert!(matches!(
            PlatformRegistry::new(Vec::new()),
            Err(GameError::NoPlatforms)
        ));
    }

    #[test]
    fn test_grid_assigns_ids_and_rest_positions() {
        let reg = PlatformRegistry::grid(&Color::ALL, 3, 4.0).unwrap();
        assert_eq!(reg.len(), 6);
        let p = reg.get(4).unwrap();
        assert_eq!(p.id, 4);
        assert_eq!(p.color, Color::Red);
        assert_eq!(p.rest_position(), Vec3::new(4.0, 0.0, 4.0));
        assert!(reg.all_at_rest(1e-6));
    }

    #[test]
    fn test_safe_platform_lookup() {
        let reg = PlatformRegistry::grid(&Color::ALL, 3, 4.0).unwrap();
        assert_eq!(reg.safe_platform(Color::Yellow).unwrap().id, 3);

        let partial = PlatformRegistry::grid(&[Color::Red, Color::Pink], 2, 4.0).unwrap();
        assert!(matches!(
            partial.safe_platform(Color::Black),
            Err(GameError::MissingSafePlatform(Color::Black))
        ));
        assert_eq!(partial.missing_colors(&Color::ALL).len(), 4);
    }

    #[test]
    fn test_duplicate_color_tag_is_error() {
        // Full palette plus a second Red at id 6
        let mut specs: Vec<PlatformSpec> = Color::ALL
            .iter()
            .enumerate()
            .map(|(i, &c)| PlatformSpec::new(c, Vec3::new(i as f32 * 4.0, 0.0, 0.0)))
            .collect();
        specs.push(PlatformSpec::new(Color::Red, Vec3::new(0.0, 0.0, 8.0)));

        assert!(matches!(
            PlatformRegistry::new(specs),
            Err(GameError::DuplicateSafeTag(Color::Red))
        ));
        assert!(matches!(
            PlatformRegistry::grid(&[Color::Pink, Color::Pink], 2, 4.0),
            Err(GameError::DuplicateSafeTag(Color::Pink))
        ));
    }

    #[test]
    fn test_bounds() {
        let reg = PlatformRegistry::new(vec![PlatformSpec::new(Color::Red, Vec3::ZERO)]).unwrap();
        let (min, max) = reg.get(0).unwrap().bounds();
        assert_eq!(min, -CAP_HALF_EXTENTS);
        assert_eq!(max, CAP_HALF_EXTENTS);
    }
}
