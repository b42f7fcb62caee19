use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Level;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProblemError {
    #[error("addend {value} is not a two-digit number")]
    NotTwoDigit { value: u8 },

    #[error("sum {sum} must stay below 100")]
    SumTooLarge { sum: u16 },

    #[error("problem does not match level {level}: carry {has_carry}")]
    CarryMismatch { level: u8, has_carry: bool },
}

//
// ─── PROBLEM ───────────────────────────────────────────────────────────────────
//

/// The "make ten" decomposition of the second ones digit.
///
/// For `8 + 5`: 8 needs 2 to make ten, leaving 3 — `need = 2`, `rest = 3`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MakeTenSplit {
    pub need: u8,
    pub rest: u8,
}

/// One two-digit addition exercise.
///
/// Immutable after construction. Whether the problem carries is computed
/// from the ones digits, so the carry flag can never disagree with the
/// addends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Problem {
    num1: u8,
    num2: u8,
}

impl Problem {
    /// Creates a problem from two addends.
    ///
    /// # Errors
    ///
    /// Returns `ProblemError::NotTwoDigit` unless both addends are in
    /// `10..=99`, and `ProblemError::SumTooLarge` when the sum reaches 100.
    pub fn new(num1: u8, num2: u8) -> Result<Self, ProblemError> {
        for value in [num1, num2] {
            if !(10..=99).contains(&value) {
                return Err(ProblemError::NotTwoDigit { value });
            }
        }
        let sum = u16::from(num1) + u16::from(num2);
        if sum >= 100 {
            return Err(ProblemError::SumTooLarge { sum });
        }
        Ok(Self { num1, num2 })
    }

    /// Creates a problem and checks it against a level's carry requirement.
    ///
    /// # Errors
    ///
    /// As [`Problem::new`], plus `ProblemError::CarryMismatch` when the
    /// computed carry disagrees with the level.
    pub fn for_level(num1: u8, num2: u8, level: Level) -> Result<Self, ProblemError> {
        let problem = Self::new(num1, num2)?;
        if problem.has_carry() != level.requires_carry() {
            return Err(ProblemError::CarryMismatch {
                level: level.number(),
                has_carry: problem.has_carry(),
            });
        }
        Ok(problem)
    }

    #[must_use]
    pub fn num1(&self) -> u8 {
        self.num1
    }

    #[must_use]
    pub fn num2(&self) -> u8 {
        self.num2
    }

    #[must_use]
    pub fn ones1(&self) -> u8 {
        self.num1 % 10
    }

    #[must_use]
    pub fn ones2(&self) -> u8 {
        self.num2 % 10
    }

    #[must_use]
    pub fn tens1(&self) -> u8 {
        self.num1 / 10
    }

    #[must_use]
    pub fn tens2(&self) -> u8 {
        self.num2 / 10
    }

    /// True when the ones digits sum to ten or more.
    #[must_use]
    pub fn has_carry(&self) -> bool {
        self.ones1() + self.ones2() >= 10
    }

    /// Full sum of the ones column, e.g. 13 for `18 + 35`.
    #[must_use]
    pub fn ones_sum(&self) -> u8 {
        self.ones1() + self.ones2()
    }

    /// The digit written under the ones column.
    #[must_use]
    pub fn ones_digit(&self) -> u8 {
        self.ones_sum() % 10
    }

    /// Expected tens-column answer, carry included.
    #[must_use]
    pub fn tens_answer(&self) -> u8 {
        self.tens1() + self.tens2() + u8::from(self.has_carry())
    }

    /// The complete sum. Always below 100.
    #[must_use]
    pub fn total(&self) -> u8 {
        self.num1 + self.num2
    }

    /// The make-ten teaching hint, available only for carry problems.
    #[must_use]
    pub fn make_ten_split(&self) -> Option<MakeTenSplit> {
        if !self.has_carry() {
            return None;
        }
        let need = 10 - self.ones1();
        Some(MakeTenSplit {
            need,
            rest: self.ones2() - need,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
