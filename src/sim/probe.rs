//! Ground probe under the player
//!
//! The round check asks one question: what is directly below the player,
//! within a short distance? Hosts with a physics engine answer it with a
//! raycast; `ColliderProbe` answers it from the platform boxes alone.

use glam::Vec3;

use super::registry::{PlatformId, PlatformRegistry};

/// Answers "which platform is under this point"
pub trait PositionProbe {
    /// First platform hit by a ray cast straight down from `origin`,
    /// no further than `max_distance`. `None` when nothing is underneath.
    fn cast_downward_from(
        &mut self,
        platforms: &PlatformRegistry,
        origin: Vec3,
        max_distance: f32,
    ) -> Option<PlatformId>;
}

/// Downward ray against each platform's box collider.
///
/// A ray that starts inside a collider does not hit it.
#[derive(Debug, Clone, Copy, Default)]
pub struct ColliderProbe;

impl PositionProbe for ColliderProbe {
    fn cast_downward_from(
        &mut self,
        platforms: &PlatformRegistry,
        origin: Vec3,
        max_distance: f32,
    ) -> Option<PlatformId> {
        platforms
            .iter()
            .filter_map(|p| {
                let (min, max) = p.bounds();
                let over = origin.x >= min.x
                    && origin.x <= max.x
                    && origin.z >= min.z
                    && origin.z <= max.z;
                if !over || origin.y < max.y {
                    return None;
                }
                let distance = origin.y - max.y;
                (distance <= max_distance).then_some((distance, p.id))
            })
            .min_by(|a, b| {
                a.0.partial_cmp(&b.0)
                    .unwrap_or(std::cmp::Ordering::Equal)
                    .then(a.1.cmp(&b.1))
            })
            .map(|(_, id)| id)
    }
}

/// Returns a fixed answer regardless of geometry
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedProbe(pub Option<PlatformId>);

impl PositionProbe for FixedProbe {
    fn cast_downward_from(
        &mut self,
        _platforms: &PlatformRegistry,
        _origin: Vec3,
        _max_distance: f32,
    ) -> Option<PlatformId> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::palette::Color;
    use crate::sim::registry::CAP_HALF_EXTENTS;

    fn registry() -> PlatformRegistry {
        PlatformRegistry::grid(&Color::ALL, 3, 4.0).unwrap()
    }

    fn standing_on(reg: &PlatformRegistry, id: PlatformId) -> Vec3 {
        reg.get(id).unwrap().rest_position() + Vec3::Y * (CAP_HALF_EXTENTS.y + 1.0)
    }

    #[test]
    fn test_hits_platform_below() {
        let reg = registry();
        let origin = standing_on(&reg, 4);
        assert_eq!(
            ColliderProbe.cast_downward_from(&reg, origin, PROBE_DISTANCE),
            Some(4)
        );
    }

    #[test]
    fn test_misses_gap_between_platforms() {
        let reg = registry();
        let origin = Vec3::new(2.0, 1.25, 0.0);
        assert_eq!(
            ColliderProbe.cast_downward_from(&reg, origin, PROBE_DISTANCE),
            None
        );
    }

    #[test]
    fn test_respects_max_distance() {
        let mut reg = registry();
        let origin = standing_on(&reg, 0);
        // Sunk platform is out of reach
        reg.get_mut(0).unwrap().position.y -= DROP_OFFSET;
        assert_eq!(
            ColliderProbe.cast_downward_from(&reg, origin, PROBE_DISTANCE),
            None
        );
        assert_eq!(ColliderProbe.cast_downward_from(&reg, origin, 10.0), Some(0));
    }

    #[test]
    fn test_origin_inside_collider_is_not_a_hit() {
        let reg = registry();
        let origin = reg.get(1).unwrap().rest_position();
        assert_eq!(
            ColliderProbe.cast_downward_from(&reg, origin, PROBE_DISTANCE),
            None
        );
    }

    #[test]
    fn test_fixed_probe() {
        let reg = registry();
        assert_eq!(
            FixedProbe(Some(3)).cast_downward_from(&reg, Vec3::ZERO, 1.0),
            Some(3)
        );
        assert_eq!(FixedProbe(None).cast_downward_from(&reg, Vec3::ZERO, 1.0), None);
    }
}
