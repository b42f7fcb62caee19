use std::sync::Arc;

use rand::Rng;
use rand::rng;

use sums_core::Clock;
use sums_core::model::{
    ConfirmOutcome, Level, LevelOutcome, LevelSession, Round, STICKER_POOL, Sticker, StickerAlbum,
};

use crate::audio::{SoundCue, SoundSink};
use crate::encouragement::EncouragementService;
use crate::error::GameFlowError;
use crate::prompts;
use crate::rounds::ProblemGenerator;
use super::service::GameFlow;
use super::timers::{ScheduledEvent, TimerAction};

/// Orchestrates the game: turns input events and due timers into state
/// moves on a [`GameFlow`], dispatching sounds and message text as it goes.
///
/// Holds no game state itself, so one service can drive any number of
/// flows; all per-session state lives in the flow.
#[derive(Clone)]
pub struct GameLoopService {
    clock: Clock,
    encouragement: EncouragementService,
    sounds: Arc<dyn SoundSink>,
}

impl GameLoopService {
    #[must_use]
    pub fn new(
        clock: Clock,
        encouragement: EncouragementService,
        sounds: Arc<dyn SoundSink>,
    ) -> Self {
        Self {
            clock,
            encouragement,
            sounds,
        }
    }

    /// Starts a level: fresh session, first problem, opening prompt.
    pub fn start_level(&self, flow: &mut GameFlow, level: Level) {
        self.sounds.play(SoundCue::Click);
        let problem = ProblemGenerator::new(level).generate();
        flow.begin_level(LevelSession::new(level), Round::new(problem));
        flow.set_message(prompts::round_opening(level));
    }

    /// Appends a digit to the active round's buffer.
    ///
    /// # Errors
    ///
    /// Returns `GameFlowError::NotPlaying` when no round is active.
    pub fn press_digit(&self, flow: &mut GameFlow, digit: u8) -> Result<(), GameFlowError> {
        let Some(round) = flow.round_mut() else {
            return Err(GameFlowError::NotPlaying);
        };
        round.push_digit(digit);
        self.sounds.play(SoundCue::Click);
        Ok(())
    }

    /// Clears the active round's buffer.
    ///
    /// # Errors
    ///
    /// Returns `GameFlowError::NotPlaying` when no round is active.
    pub fn press_clear(&self, flow: &mut GameFlow) -> Result<(), GameFlowError> {
        let Some(round) = flow.round_mut() else {
            return Err(GameFlowError::NotPlaying);
        };
        round.clear();
        self.sounds.play(SoundCue::Click);
        Ok(())
    }

    /// Validates the buffered answer and reacts to the outcome.
    ///
    /// Encouragement text is awaited before the message settles, matching
    /// the reference behavior where the bubble may lag the arithmetic.
    ///
    /// # Errors
    ///
    /// Returns `GameFlowError::NotPlaying` when no round is active, and
    /// propagates session bookkeeping errors on round completion.
    pub async fn confirm(&self, flow: &mut GameFlow) -> Result<ConfirmOutcome, GameFlowError> {
        let (outcome, problem) = {
            let Some(round) = flow.round_mut() else {
                return Err(GameFlowError::NotPlaying);
            };
            let problem = *round.problem();
            (round.confirm(), problem)
        };

        match outcome {
            ConfirmOutcome::Ignored => {}

            ConfirmOutcome::OnesAccepted { carries } => {
                self.sounds.play(SoundCue::Correct);
                let line = self.encouragement.line(true).await;
                flow.set_encouragement(line);
                if carries {
                    flow.set_message(prompts::carry_animation());
                    flow.schedule(ScheduledEvent::schedule(
                        flow.session_id(),
                        TimerAction::FinishCarryAnimation,
                        &self.clock,
                    ));
                } else {
                    flow.set_message(prompts::tens_prompt(&problem));
                }
            }

            ConfirmOutcome::OnesRejected { split } => {
                self.sounds.play(SoundCue::Wrong);
                let line = self.encouragement.line(false).await;
                flow.set_message(line);
                if split.is_some() {
                    let text = self
                        .encouragement
                        .explain_make_ten(problem.ones1(), problem.ones2())
                        .await;
                    flow.set_hint_text(Some(text));
                }
            }

            ConfirmOutcome::TensAccepted { total } => {
                self.sounds.play(SoundCue::Success);
                let Some(session) = flow.session_mut() else {
                    return Err(GameFlowError::NotPlaying);
                };
                session.record_solved()?;
                flow.set_message(prompts::round_complete(total));
                flow.schedule(ScheduledEvent::schedule(
                    flow.session_id(),
                    TimerAction::AdvanceRound,
                    &self.clock,
                ));
            }

            ConfirmOutcome::TensRejected { carried } => {
                self.sounds.play(SoundCue::Wrong);
                flow.set_message(prompts::tens_retry(carried));
            }
        }

        Ok(outcome)
    }

    /// Applies a due timer event. Stale events — scheduled under a session
    /// that has since been replaced, or already consumed — return `false`
    /// and change nothing.
    pub fn fire(&self, flow: &mut GameFlow, event: ScheduledEvent) -> bool {
        if !flow.take_pending(event) {
            return false;
        }

        match event.action() {
            TimerAction::FinishCarryAnimation => {
                let problem = flow
                    .round_mut()
                    .and_then(|round| round.finish_carry_animation().then(|| *round.problem()));
                if let Some(problem) = problem {
                    self.sounds.play(SoundCue::LevelUp);
                    flow.set_message(prompts::tens_prompt(&problem));
                }
            }

            TimerAction::AdvanceRound => {
                let (outcome, level) = {
                    let Some(session) = flow.session_mut() else {
                        return false;
                    };
                    let level = session.level();
                    (session.advance_round(), level)
                };

                match outcome {
                    Ok(LevelOutcome::NextRound) => {
                        let problem = ProblemGenerator::new(level).generate();
                        flow.replace_round(Round::new(problem));
                        flow.set_message(prompts::round_opening(level));
                    }
                    Ok(LevelOutcome::Finished { score, passed }) => {
                        self.sounds.play(SoundCue::Success);
                        let award =
                            passed.then(|| draw_sticker(&mut rng(), flow.album()));
                        flow.finish_to_summary(award);
                        flow.set_message(prompts::summary(score, passed));
                    }
                    Err(_) => return false,
                }
            }
        }

        true
    }

    /// Leaves the level mid-flight and returns to the start screen.
    pub fn exit_to_menu(&self, flow: &mut GameFlow) {
        self.sounds.play(SoundCue::Click);
        flow.return_to_start();
        flow.set_message(prompts::ready());
    }

    /// Opens the sticker board.
    ///
    /// # Errors
    ///
    /// Returns `GameFlowError::StickersUnavailable` off the start screen.
    pub fn open_stickers(&self, flow: &mut GameFlow) -> Result<(), GameFlowError> {
        flow.show_stickers()?;
        self.sounds.play(SoundCue::Click);
        Ok(())
    }

    /// Returns to the start screen from the summary or sticker board.
    pub fn back_to_menu(&self, flow: &mut GameFlow) {
        self.sounds.play(SoundCue::Click);
        flow.return_to_start();
        flow.set_message(prompts::ready());
    }
}

/// Draws the earned sticker, preferring one the learner does not own yet.
/// Once the whole pool is collected, duplicates are allowed.
fn draw_sticker<R: Rng + ?Sized>(rng: &mut R, album: &StickerAlbum) -> Sticker {
    let missing = album.missing_from_pool();
    let pool: &[&str] = if missing.is_empty() {
        &STICKER_POOL
    } else {
        &missing
    };
    Sticker::new(pool[rng.random_range(0..pool.len())])
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn draw_prefers_unowned_stickers() {
        let mut album = StickerAlbum::new();
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..STICKER_POOL.len() {
            let sticker = draw_sticker(&mut rng, &album);
            assert!(!album.contains(&sticker));
            album.add(sticker);
        }
        assert!(album.missing_from_pool().is_empty());

        // Pool exhausted: the next draw is necessarily a duplicate.
        let sticker = draw_sticker(&mut rng, &album);
        assert!(album.contains(&sticker));
    }
}
