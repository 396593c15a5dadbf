//! RNG module - NES-style spawn policy
//!
//! The next shape is drawn from eight outcomes: the seven shapes plus a
//! "none" sentinel. A sentinel or a repeat of the previous shape triggers one
//! redraw over the seven shapes, and that redraw is taken as-is. Repeats are
//! less likely than 1 in 7 but still possible.
//!
//! Also provides a simple LCG so games are reproducible from a seed.

use crate::types::{ShapeKind, SHAPE_COUNT};

/// Outcomes of the first roll: every shape id plus the sentinel
const FIRST_ROLL: u32 = SHAPE_COUNT as u32 + 1;

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        // LCG formula: (a * state + c) mod m
        // Using Numerical Recipes constants: a=1664525, c=1013904223, m=2^32
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    ///
    /// Scales from the high bits: the low bits of a power-of-two LCG cycle
    /// with a short period.
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((u64::from(self.next_u32()) * u64::from(max)) >> 32) as u32
    }
}

/// Picks the shape of each spawned piece
#[derive(Debug, Clone)]
pub struct SpawnPolicy {
    rng: SimpleRng,
    previous: Option<ShapeKind>,
    seed: u32,
}

impl SpawnPolicy {
    /// Create a policy with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            previous: None,
            seed,
        }
    }

    /// Draw the next shape
    pub fn draw(&mut self) -> ShapeKind {
        let roll = self.rng.next_range(FIRST_ROLL) as usize;
        let first = ShapeKind::from_index(roll);

        let shape = match first {
            Some(shape) if Some(shape) != self.previous => shape,
            // Sentinel or repeat: one more roll over the seven shapes.
            _ => self.redraw(),
        };

        self.previous = Some(shape);
        shape
    }

    fn redraw(&mut self) -> ShapeKind {
        let roll = self.rng.next_range(SHAPE_COUNT as u32) as usize;
        ShapeKind::ALL[roll % SHAPE_COUNT]
    }

    /// Shape returned by the last draw
    pub fn previous(&self) -> Option<ShapeKind> {
        self.previous
    }

    /// Seed the policy was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl Default for SpawnPolicy {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        // Same seed should produce same sequence
        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_remapped() {
        let (mut zero, mut one) = (SimpleRng::new(0), SimpleRng::new(1));
        assert_eq!(zero.next_u32(), one.next_u32());
    }

    #[test]
    fn test_next_range_stays_in_range() {
        let mut rng = SimpleRng::new(7);
        for _ in 0..10_000 {
            assert!(rng.next_range(8) < 8);
        }
    }

    #[test]
    fn test_next_range_hits_every_value() {
        let mut rng = SimpleRng::new(99);
        let mut seen = [false; 8];
        for _ in 0..1_000 {
            seen[rng.next_range(8) as usize] = true;
        }
        assert!(seen.iter().all(|&s| s));
    }

    #[test]
    fn test_policy_is_reproducible() {
        let mut a = SpawnPolicy::new(2024);
        let mut b = SpawnPolicy::new(2024);
        for _ in 0..200 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_policy_draws_every_shape() {
        let mut policy = SpawnPolicy::new(5);
        let mut seen = [false; SHAPE_COUNT];
        for _ in 0..2_000 {
            seen[policy.draw().index()] = true;
        }
        assert!(seen.iter().all(|&s| s), "{seen:?}");
    }

    #[test]
    fn test_policy_tracks_previous() {
        let mut policy = SpawnPolicy::new(11);
        assert_eq!(policy.previous(), None);
        let shape = policy.draw();
        assert_eq!(policy.previous(), Some(shape));
    }

    #[test]
    fn test_policy_suppresses_repeats() {
        // Uniform draws repeat 1 in 7 times; the redraw keeps it well below.
        let mut policy = SpawnPolicy::new(31337);
        let mut last = policy.draw();
        let mut repeats = 0;
        let draws = 14_000;
        for _ in 0..draws {
            let next = policy.draw();
            if next == last {
                repeats += 1;
            }
            last = next;
        }
        assert!(repeats < draws / 10, "repeats = {repeats}");
    }
}
