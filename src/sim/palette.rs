//! Mushroom colors and safe color selection

use std::fmt;

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Fixed color palette; each mushroom carries exactly one of these tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Black,
    Lightblue,
    Pink,
    Yellow,
    Red,
    Green,
}

impl Color {
    /// The full palette in tag order
    pub const ALL: [Color; 6] = [
        Color::Black,
        Color::Lightblue,
        Color::Pink,
        Color::Yellow,
        Color::Red,
        Color::Green,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::Lightblue => "Lightblue",
            Color::Pink => "Pink",
            Color::Yellow => "Yellow",
            Color::Red => "Red",
            Color::Green => "Green",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
    }

    /// Default material color for a mushroom with this tag
    pub fn material(&self) -> Vec3 {
        match self {
            Color::Black => Vec3::new(0.08, 0.08, 0.08),
            Color::Lightblue => Vec3::new(0.55, 0.8, 1.0),
            Color::Pink => Vec3::new(1.0, 0.6, 0.8),
            Color::Yellow => Vec3::new(1.0, 0.9, 0.2),
            Color::Red => Vec3::new(0.9, 0.15, 0.1),
            Color::Green => Vec3::new(0.2, 0.6, 0.25),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform pick from the palette. Repeats across rounds are allowed.
///
/// Panics if `palette` is empty.
pub fn pick_safe_color<R: Rng + ?Sized>(rng: &mut R, palette: &[Color]) -> Color {
    palette[rng.random_range(0..palette.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_from_str() {
        assert_eq!(Color::from_str("red"), Some(Color::Red));
        assert_eq!(Color::from_str("LightBlue"), Some(Color::Lightblue));
        assert_eq!(Color::from_str("Purple"), None);
        for c in Color::ALL {
            assert_eq!(Color::from_str(&c.to_string()), Some(c));
        }
    }

    #[test]
    fn test_pick_covers_palette() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut seen = [false; 6];
        for _ in 0..600 {
            let c = pick_safe_color(&mut rng, &Color::ALL);
            let idx = Color::ALL.iter().position(|&p| p == c).unwrap();
            seen[idx] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_pick_allows_repeats() {
        let mut rng = Pcg32::seed_from_u64(3);
        let picks: Vec<_> = (0..200)
            .map(|_| pick_safe_color(&mut rng, &Color::ALL))
            .collect();
        assert!(picks.windows(2).any(|w| w[0] == w[1]));
    }

    #[test]
    fn test_pick_single_entry() {
        let mut rng = Pcg32::seed_from_u64(9);
        assert_eq!(pick_safe_color(&mut rng, &[Color::Pink]), Color::Pink);
    }

    #[test]
    fn test_pick_deterministic() {
        let mut a = Pcg32::seed_from_u64(77);
        let mut b = Pcg32::seed_from_u64(77);
        for _ in 0..20 {
            assert_eq!(
                pick_safe_color(&mut a, &Color::ALL),
                pick_safe_color(&mut b, &Color::ALL)
            );
        }
    }
}
