use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("level must be 1 or 2, got {value}")]
pub struct ParseLevelError {
    pub value: u8,
}

/// Difficulty mode for a level session.
///
/// `Basic` problems never require carrying; `Carry` problems always do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Level {
    Basic,
    Carry,
}

impl Level {
    /// True when problems at this level must carry from the ones column.
    #[must_use]
    pub fn requires_carry(&self) -> bool {
        matches!(self, Level::Carry)
    }

    /// The 1-based level number shown to the learner.
    #[must_use]
    pub fn number(&self) -> u8 {
        match self {
            Level::Basic => 1,
            Level::Carry => 2,
        }
    }
}

impl TryFrom<u8> for Level {
    type Error = ParseLevelError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Level::Basic),
            2 => Ok(Level::Carry),
            value => Err(ParseLevelError { value }),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_numbers_round_trip() {
        for level in [Level::Basic, Level::Carry] {
            assert_eq!(Level::try_from(level.number()).unwrap(), level);
        }
    }

    #[test]
    fn rejects_unknown_level() {
        let err = Level::try_from(3).unwrap_err();
        assert_eq!(err.value, 3);
    }

    #[test]
    fn carry_requirement() {
        assert!(!Level::Basic.requires_carry());
        assert!(Level::Carry.requires_carry());
    }
}
