//! Platform animation
//!
//! Every running animation is a plain task record advanced once per tick.
//! Cancelling is dropping the records, so a batch cancel is a single
//! synchronous step with no yield in between.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::registry::{PlatformId, PlatformRegistry};
use crate::GameError;

/// Straight-line move over 1.0 unit of animation time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveTask {
    pub platform: PlatformId,
    pub start: Vec3,
    pub target: Vec3,
    /// Animation time in [0, 1)
    pub elapsed: f32,
    /// Animation time gained per real second
    pub speed_scale: f32,
}

impl MoveTask {
    /// Advance and return the new position plus whether the move finished
    fn step(&mut self, dt: f32) -> (Vec3, bool) {
        self.elapsed += dt * self.speed_scale;
        if self.elapsed >= 1.0 {
            // Snap exactly; lerp at ~1.0 drifts.
            (self.target, true)
        } else {
            (self.start.lerp(self.target, self.elapsed), false)
        }
    }
}

/// Repeating highlight pulse: lit for `half_period`, then original for `half_period`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlinkTask {
    pub platform: PlatformId,
    /// Material captured before the first pulse
    pub original: Vec3,
    pub highlight: Vec3,
    pub half_period: f32,
    pub elapsed: f32,
}

impl BlinkTask {
    #[inline]
    fn lit(&self) -> bool {
        self.elapsed < self.half_period
    }

    fn step(&mut self, dt: f32) -> Vec3 {
        self.elapsed = (self.elapsed + dt) % (2.0 * self.half_period);
        if self.lit() { self.highlight } else { self.original }
    }
}

/// Central animator for all platforms
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Animator {
    moves: Vec<MoveTask>,
    blinks: Vec<BlinkTask>,
}

impl Animator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `id` from wherever it is now to `target`.
    ///
    /// Replaces any move already running on the same platform. A platform
    /// already sitting on `target` is left untouched.
    pub fn animate_to(
        &mut self,
        registry: &PlatformRegistry,
        id: PlatformId,
        target: Vec3,
        speed_scale: f32,
    ) -> Result<(), GameError> {
        let platform = registry.get(id).ok_or(GameError::UnknownPlatform(id))?;
        debug_assert!(speed_scale > 0.0, "speed_scale must be positive");

        self.moves.retain(|m| m.platform != id);
        if platform.position == target {
            return Ok(());
        }

        self.moves.push(MoveTask {
            platform: id,
            start: platform.position,
            target,
            elapsed: 0.0,
            speed_scale,
        });
        Ok(())
    }

    /// Start pulsing `id` until stopped or cancelled.
    ///
    /// The original material is captured once per blink session; calling this
    /// again on a blinking platform keeps the first capture.
    pub fn blink(
        &mut self,
        registry: &mut PlatformRegistry,
        id: PlatformId,
        highlight: Vec3,
        half_period: f32,
    ) -> Result<(), GameError> {
        let platform = registry.get_mut(id).ok_or(GameError::UnknownPlatform(id))?;
        if self.is_blinking(id) {
            return Ok(());
        }

        self.blinks.push(BlinkTask {
            platform: id,
            original: platform.material,
            highlight,
            half_period,
            elapsed: 0.0,
        });
        platform.material = highlight;
        Ok(())
    }

    /// Stop pulsing `id` and restore its captured material
    pub fn stop_blink(&mut self, registry: &mut PlatformRegistry, id: PlatformId) {
        if let Some(idx) = self.blinks.iter().position(|b| b.platform == id) {
            let blink = self.blinks.remove(idx);
            if let Some(platform) = registry.get_mut(blink.platform) {
                platform.material = blink.original;
            }
        }
    }

    /// Stop every move and blink at once.
    ///
    /// Moves stop where they are; blinking platforms get their original
    /// material back. Must run before any replacement animations start.
    pub fn cancel_all(&mut self, registry: &mut PlatformRegistry) {
        let moves = self.moves.len();
        let blinks = self.blinks.len();

        for blink in self.blinks.drain(..) {
            if let Some(platform) = registry.get_mut(blink.platform) {
                platform.material = blink.original;
            }
        }
        self.moves.clear();

        if moves + blinks > 0 {
            log::debug!("Cancelled {moves} moves and {blinks} blinks");
        }
    }

    /// Advance every task by `dt` real seconds
    pub fn advance(&mut self, registry: &mut PlatformRegistry, dt: f32) {
        self.moves.retain_mut(|task| {
            let (pos, done) = task.step(dt);
            if let Some(platform) = registry.get_mut(task.platform) {
                platform.position = pos;
            }
            !done
        });

        for task in &mut self.blinks {
            let color = task.step(dt);
            if let Some(platform) = registry.get_mut(task.platform) {
                platform.material = color;
            }
        }
    }

    pub fn is_moving(&self, id: PlatformId) -> bool {
        self.moves.iter().any(|m| m.platform == id)
    }

    pub fn is_blinking(&self, id: PlatformId) -> bool {
        self.blinks.iter().any(|b| b.platform == id)
    }

    pub fn moves(&self) -> &[MoveTask] {
        &self.moves
    }

    pub fn blinks(&self) -> &[BlinkTask] {
        &self.blinks
    }

    pub fn is_idle(&self) -> bool {
        self.moves.is_empty() && self.blinks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::palette::Color;
    use crate::sunk_position;
    use proptest::prelude::*;

    fn registry() -> PlatformRegistry {
        PlatformRegistry::grid(&Color::ALL, 3, 4.0).unwrap()
    }

    fn run(anim: &mut Animator, reg: &mut PlatformRegistry, seconds: f32) {
        let steps = (seconds / SIM_DT).ceil() as u32;
        for _ in 0..steps {
            anim.advance(reg, SIM_DT);
        }
    }

    #[test]
    fn test_animate_to_snaps_to_target() {
        let mut reg = registry();
        let mut anim = Animator::new();
        let target = sunk_position(reg.get(0).unwrap().rest_position(), DROP_OFFSET);

        anim.animate_to(&reg, 0, target, DROP_SPEED).unwrap();
        run(&mut anim, &mut reg, 0.25);
        let mid = reg.get(0).unwrap().position;
        assert!(mid.y < 0.0 && mid.y > -DROP_OFFSET);

        run(&mut anim, &mut reg, 0.3);
        assert_eq!(reg.get(0).unwrap().position, target);
        assert!(!anim.is_moving(0));
    }

    #[test]
    fn test_speed_scale_shortens_duration() {
        let mut reg = registry();
        let mut anim = Animator::new();
        let target = Vec3::new(0.0, -5.0, 0.0);

        anim.animate_to(&reg, 0, target, 3.0).unwrap();
        run(&mut anim, &mut reg, 0.34);
        assert_eq!(reg.get(0).unwrap().position, target);

        let target = Vec3::new(4.0, -5.0, 0.0);
        anim.animate_to(&reg, 1, target, 1.0).unwrap();
        run(&mut anim, &mut reg, 0.5);
        assert_ne!(reg.get(1).unwrap().position, target);
    }

    #[test]
    fn test_animate_to_idempotent_after_completion() {
        let mut reg = registry();
        let mut anim = Animator::new();
        let target = Vec3::new(0.0, -5.0, 0.0);

        anim.animate_to(&reg, 0, target, DROP_SPEED).unwrap();
        run(&mut anim, &mut reg, 1.0);

        for _ in 0..3 {
            anim.animate_to(&reg, 0, target, DROP_SPEED).unwrap();
            assert!(anim.is_idle());
            run(&mut anim, &mut reg, 0.2);
            assert_eq!(reg.get(0).unwrap().position, target);
        }
    }

    #[test]
    fn test_animate_unknown_platform() {
        let reg = registry();
        let mut anim = Animator::new();
        assert!(matches!(
            anim.animate_to(&reg, 99, Vec3::ZERO, 1.0),
            Err(GameError::UnknownPlatform(99))
        ));
    }

    #[test]
    fn test_blink_cycles_and_restores() {
        let mut reg = registry();
        let mut anim = Animator::new();
        let original = reg.get(2).unwrap().material;

        anim.blink(&mut reg, 2, BLINK_HIGHLIGHT, 0.5).unwrap();
        assert_eq!(reg.get(2).unwrap().material, BLINK_HIGHLIGHT);

        anim.advance(&mut reg, 0.25);
        assert_eq!(reg.get(2).unwrap().material, BLINK_HIGHLIGHT);
        anim.advance(&mut reg, 0.5);
        assert_eq!(reg.get(2).unwrap().material, original);
        anim.advance(&mut reg, 0.5);
        assert_eq!(reg.get(2).unwrap().material, BLINK_HIGHLIGHT);

        anim.stop_blink(&mut reg, 2);
        assert_eq!(reg.get(2).unwrap().material, original);
        assert!(!anim.is_blinking(2));
    }

    #[test]
    fn test_blink_restart_keeps_first_capture() {
        let mut reg = registry();
        let mut anim = Animator::new();
        let original = reg.get(2).unwrap().material;

        anim.blink(&mut reg, 2, BLINK_HIGHLIGHT, 0.5).unwrap();
        anim.advance(&mut reg, 0.1);
        // Restart while lit must not capture the highlight as "original".
        anim.blink(&mut reg, 2, BLINK_HIGHLIGHT, 0.5).unwrap();
        assert_eq!(anim.blinks().len(), 1);
        assert_eq!(anim.blinks()[0].original, original);

        anim.cancel_all(&mut reg);
        assert_eq!(reg.get(2).unwrap().material, original);
    }

    #[test]
    fn test_cancel_then_rise_lands_on_rest() {
        let mut reg = registry();
        let mut anim = Animator::new();

        let ids: Vec<_> = reg.iter().map(|p| (p.id, p.rest_position())).collect();
        for &(id, rest) in &ids {
            anim.animate_to(&reg, id, sunk_position(rest, DROP_OFFSET), DROP_SPEED)
                .unwrap();
        }
        run(&mut anim, &mut reg, 0.2);

        anim.cancel_all(&mut reg);
        assert!(anim.is_idle());
        for &(id, rest) in &ids {
            anim.animate_to(&reg, id, rest, RISE_SPEED).unwrap();
        }
        run(&mut anim, &mut reg, 1.0 / RISE_SPEED + SIM_DT);

        for p in reg.iter() {
            assert_eq!(p.position, p.rest_position());
        }
    }

    proptest! {
        #[test]
        fn prop_cancel_then_rise_always_rests(
            progress in prop::collection::vec(0.0f32..1.2, 6),
            in_flight in prop::collection::vec(any::<bool>(), 6),
        ) {
            let mut reg = registry();
            let mut anim = Animator::new();

            for id in 0..6u32 {
                let rest = reg.get(id).unwrap().rest_position();
                if in_flight[id as usize] {
                    anim.animate_to(&reg, id, sunk_position(rest, DROP_OFFSET), DROP_SPEED).unwrap();
                }
            }
            for &t in &progress {
                anim.advance(&mut reg, t * 0.1);
            }

            anim.cancel_all(&mut reg);
            for id in 0..6u32 {
                let rest = reg.get(id).unwrap().rest_position();
                anim.animate_to(&reg, id, rest, RISE_SPEED).unwrap();
            }
            run(&mut anim, &mut reg, 1.0 / RISE_SPEED + SIM_DT);

            prop_assert!(anim.is_idle());
            prop_assert!(reg.all_at_rest(0.0));
        }
    }
}
