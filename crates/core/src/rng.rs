//! RNG module - look-ahead shape selection
//!
//! The first two shapes of a round are drawn uniformly over all seven. After that
//! every new look-ahead shape is drawn uniformly from the six shapes other than
//! the one just promoted to the active slot, so a shape never shows up twice in a
//! row through the look-ahead.
//!
//! Also provides a simple LCG so a seed reproduces a whole round.

use crate::types::Shape;

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
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Generate random value in range [0, max)
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low LCG bits cycle with short periods; take the high half.
        (self.next_u32() >> 16) % max.max(1)
    }

    pub fn state(&self) -> u32 {
        self.state
    }
}

/// Chooses active and look-ahead shapes
#[derive(Debug, Clone)]
pub struct ShapeQueue {
    rng: SimpleRng,
    seed: u32,
}

impl ShapeQueue {
    /// Create a new queue with the given seed
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
            seed,
        }
    }

    /// Seed the queue was created with
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Draw uniformly over all seven shapes
    pub fn draw_any(&mut self) -> Shape {
        Shape::ALL[self.rng.next_range(Shape::ALL.len() as u32) as usize]
    }

    /// Draw uniformly over the six shapes other than `promoted`
    pub fn draw_excluding(&mut self, promoted: Shape) -> Shape {
        let mut choices = [Shape::Long; 6];
        let mut n = 0usize;
        for shape in Shape::ALL {
            if shape != promoted {
                choices[n] = shape;
                n += 1;
            }
        }
        choices[self.rng.next_range(n as u32) as usize]
    }
}

impl Default for ShapeQueue {
    fn default() -> Self {
        Self::new(1)
    }
}
