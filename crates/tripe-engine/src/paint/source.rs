use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::Color;

/// Supplies fill colors to animated objects.
///
/// Injected rather than read from a global generator so that runs can be
/// reproduced from a seed.
pub trait ColorSource: Send {
    fn next_color(&mut self) -> Color;
}

/// Uniformly random opaque colors, one byte per channel.
#[derive(Debug, Clone)]
pub struct RandomColors {
    rng: StdRng,
}

impl RandomColors {
    /// Deterministic sequence for a given seed.
    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }

    /// Seeds from the operating system.
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }
}

impl ColorSource for RandomColors {
    fn next_color(&mut self) -> Color {
        let [r, g, b]: [u8; 3] = self.rng.r#gen();
        Color::from_srgb_u8(r, g, b, 255)
    }
}

impl<F> ColorSource for F
where
    F: FnMut() -> Color + Send,
{
    fn next_color(&mut self) -> Color {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_sequence() {
        let mut a = RandomColors::seeded(42);
        let mut b = RandomColors::seeded(42);

        for _ in 0..16 {
            assert_eq!(a.next_color(), b.next_color());
        }
    }

    #[test]
    fn random_colors_are_opaque() {
        let mut colors = RandomColors::seeded(7);
        for _ in 0..32 {
            assert!(colors.next_color().is_opaque());
        }
    }

    #[test]
    fn closures_are_color_sources() {
        let mut calls = 0;
        let mut source = move || {
            calls += 1;
            Color::from_srgb_u8(calls, 0, 0, 255)
        };
        assert_eq!(source.next_color(), Color::from_srgb_u8(1, 0, 0, 255));
        assert_eq!(source.next_color(), Color::from_srgb_u8(2, 0, 0, 255));
    }
}
