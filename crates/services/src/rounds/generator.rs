use rand::Rng;
use rand::rng;

use sums_core::model::{Level, Problem};

/// Draws random problems satisfying a level's carry constraint.
///
/// Rejection sampling: draw, validate, redraw. For `Basic` the drawing
/// ranges make every candidate valid (sum at most 98, ones capped below
/// ten), so the loop accepts on the first pass. For `Carry` both addends
/// come from 15..=74, which accepts with probability comfortably above a
/// third, so the expected iteration count is small and bounded.
#[derive(Debug, Clone, Copy)]
pub struct ProblemGenerator {
    level: Level,
}

impl ProblemGenerator {
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self { level }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    /// Generates a problem using the thread-local rng.
    #[must_use]
    pub fn generate(&self) -> Problem {
        self.generate_with(&mut rng())
    }

    /// Generates a problem from the provided rng; seed it for determinism.
    #[must_use]
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Problem {
        loop {
            let (num1, num2) = match self.level {
                Level::Basic => {
                    let num1: u8 = rng.random_range(10..=49);
                    // Cap the second ones digit so the column cannot carry.
                    let max_ones2 = 9 - (num1 % 10);
                    let ones2 = rng.random_range(0..=max_ones2);
                    let tens2: u8 = rng.random_range(1..=4);
                    (num1, tens2 * 10 + ones2)
                }
                Level::Carry => (rng.random_range(15..=74), rng.random_range(15..=74)),
            };

            if let Ok(problem) = Problem::for_level(num1, num2, self.level) {
                return problem;
            }
        }
    }
}
