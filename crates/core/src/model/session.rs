use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Level;

/// Rounds per level session.
pub const TOTAL_ROUNDS: u8 = 5;

/// Minimum score that earns a sticker.
pub const PASSING_SCORE: u8 = 3;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("level session already finished")]
    Finished,

    #[error("current round already counted toward the score")]
    AlreadySolved,
}

//
// ─── LEVEL SESSION ─────────────────────────────────────────────────────────────
//

/// Result of advancing past a completed round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelOutcome {
    /// More rounds to play.
    NextRound,
    /// All rounds played; `passed` iff score reached [`PASSING_SCORE`].
    Finished { score: u8, passed: bool },
}

/// Score and progress bookkeeping for one level attempt.
///
/// The score is bumped when a round's tens column is confirmed, the round
/// counter when the advance event fires, so an abandoned in-flight round
/// counts toward neither.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSession {
    level: Level,
    rounds_played: u8,
    score: u8,
}

impl LevelSession {
    /// Starts a fresh session at round zero.
    #[must_use]
    pub fn new(level: Level) -> Self {
        Self {
            level,
            rounds_played: 0,
            score: 0,
        }
    }

    #[must_use]
    pub fn level(&self) -> Level {
        self.level
    }

    #[must_use]
    pub fn rounds_played(&self) -> u8 {
        self.rounds_played
    }

    #[must_use]
    pub fn score(&self) -> u8 {
        self.score
    }

    /// 1-based number of the round currently on screen.
    #[must_use]
    pub fn round_number(&self) -> u8 {
        (self.rounds_played + 1).min(TOTAL_ROUNDS)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.rounds_played >= TOTAL_ROUNDS
    }

    #[must_use]
    pub fn passed(&self) -> bool {
        self.score >= PASSING_SCORE
    }

    /// Counts the current round as solved.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` after the last round, and
    /// `SessionError::AlreadySolved` when called twice for the same round.
    pub fn record_solved(&mut self) -> Result<(), SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        if self.score > self.rounds_played {
            return Err(SessionError::AlreadySolved);
        }
        self.score += 1;
        Ok(())
    }

    /// Moves past the current round.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Finished` if every round has been played.
    pub fn advance_round(&mut self) -> Result<LevelOutcome, SessionError> {
        if self.is_finished() {
            return Err(SessionError::Finished);
        }
        self.rounds_played += 1;
        if self.is_finished() {
            Ok(LevelOutcome::Finished {
                score: self.score,
                passed: self.passed(),
            })
        } else {
            Ok(LevelOutcome::NextRound)
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_starts_at_zero() {
        let session = LevelSession::new(Level::Basic);
        assert_eq!(session.rounds_played(), 0);
        assert_eq!(session.score(), 0);
        assert_eq!(session.round_number(), 1);
        assert!(!session.is_finished());
    }

    #[test]
    fn full_run_of_solved_rounds_passes() {
        let mut session = LevelSession::new(Level::Carry);
        for round in 0..TOTAL_ROUNDS {
            session.record_solved().unwrap();
            let outcome = session.advance_round().unwrap();
            if round + 1 < TOTAL_ROUNDS {
                assert_eq!(outcome, LevelOutcome::NextRound);
            } else {
                assert_eq!(
                    outcome,
                    LevelOutcome::Finished {
                        score: TOTAL_ROUNDS,
                        passed: true
                    }
                );
            }
        }
        assert!(session.is_finished());
        assert!(session.passed());
    }

    #[test]
    fn score_below_passing_fails_the_level() {
        let mut session = LevelSession::new(Level::Basic);
        // Two solved, three abandoned-and-advanced.
        for round in 0..TOTAL_ROUNDS {
            if round < 2 {
                session.record_solved().unwrap();
            }
            session.advance_round().unwrap();
        }
        assert_eq!(session.score(), 2);
        assert!(!session.passed());
    }

    #[test]
    fn double_solve_of_one_round_is_rejected() {
        let mut session = LevelSession::new(Level::Basic);
        session.record_solved().unwrap();
        let err = session.record_solved().unwrap_err();
        assert_eq!(err, SessionError::AlreadySolved);
    }

    #[test]
    fn finished_session_rejects_further_events() {
        let mut session = LevelSession::new(Level::Basic);
        for _ in 0..TOTAL_ROUNDS {
            session.advance_round().unwrap();
        }
        assert_eq!(session.advance_round().unwrap_err(), SessionError::Finished);
        assert_eq!(session.record_solved().unwrap_err(), SessionError::Finished);
    }

    #[test]
    fn round_number_caps_at_total() {
        let mut session = LevelSession::new(Level::Basic);
        for _ in 0..TOTAL_ROUNDS {
            session.advance_round().unwrap();
        }
        assert_eq!(session.round_number(), TOTAL_ROUNDS);
    }
}
