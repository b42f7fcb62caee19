use std::fmt;

use sums_core::model::{
    LevelSession, Round, SessionId, Sticker, StickerAlbum, TOTAL_ROUNDS,
};

use crate::error::GameFlowError;
use super::progress::SessionProgress;
use super::timers::ScheduledEvent;

//
// ─── SCREEN ────────────────────────────────────────────────────────────────────
//

/// Top-level navigation: `Start -> Playing -> Summary -> Start`, with the
/// sticker board reachable from (and returning to) the start screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Start,
    Playing,
    Summary,
    Stickers,
}

//
// ─── GAME FLOW ─────────────────────────────────────────────────────────────────
//

/// The whole game state as one explicit struct.
///
/// Replaces what the UI would keep in component-local variables, so every
/// transition is a plain function call testable without a renderer.
/// Mutations go through [`super::GameLoopService`]; this type only offers
/// the state moves themselves.
pub struct GameFlow {
    screen: Screen,
    session_id: SessionId,
    session: Option<LevelSession>,
    round: Option<Round>,
    album: StickerAlbum,
    message: String,
    encouragement: Option<String>,
    hint_text: Option<String>,
    last_award: Option<Sticker>,
    pending: Option<ScheduledEvent>,
}

impl GameFlow {
    /// A fresh flow on the start screen with an empty album.
    #[must_use]
    pub fn new() -> Self {
        Self {
            screen: Screen::Start,
            session_id: SessionId::random(),
            session: None,
            round: None,
            album: StickerAlbum::new(),
            message: crate::prompts::ready(),
            encouragement: None,
            hint_text: None,
            last_award: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn screen(&self) -> Screen {
        self.screen
    }

    /// Identity of the current level attempt; rotates on every start/exit.
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    #[must_use]
    pub fn session(&self) -> Option<&LevelSession> {
        self.session.as_ref()
    }

    #[must_use]
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    #[must_use]
    pub fn album(&self) -> &StickerAlbum {
        &self.album
    }

    /// The instruction line above the equation.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The last fetched encouragement line, which may lag the message.
    #[must_use]
    pub fn encouragement(&self) -> Option<&str> {
        self.encouragement.as_deref()
    }

    /// Text accompanying the make-ten hint, when the hint is up.
    #[must_use]
    pub fn hint_text(&self) -> Option<&str> {
        self.hint_text.as_deref()
    }

    /// Sticker earned by the most recently passed level.
    #[must_use]
    pub fn last_award(&self) -> Option<&Sticker> {
        self.last_award.as_ref()
    }

    /// The single pending auto-transition, if any.
    #[must_use]
    pub fn pending_event(&self) -> Option<ScheduledEvent> {
        self.pending
    }

    #[must_use]
    pub fn progress(&self) -> Option<SessionProgress> {
        self.session.map(|session| SessionProgress {
            level: session.level().number(),
            round_number: session.round_number(),
            total_rounds: TOTAL_ROUNDS,
            score: session.score(),
            is_finished: session.is_finished(),
        })
    }

    // ── state moves (crate-private; driven by GameLoopService) ──

    pub(crate) fn session_mut(&mut self) -> Option<&mut LevelSession> {
        self.session.as_mut()
    }

    pub(crate) fn round_mut(&mut self) -> Option<&mut Round> {
        self.round.as_mut()
    }

    /// Enters `Playing` under a fresh session id, dropping any stale state.
    pub(crate) fn begin_level(&mut self, session: LevelSession, round: Round) {
        self.screen = Screen::Playing;
        self.session_id = SessionId::random();
        self.session = Some(session);
        self.round = Some(round);
        self.encouragement = None;
        self.hint_text = None;
        self.last_award = None;
        self.pending = None;
    }

    /// Swaps in the next round of the running session.
    pub(crate) fn replace_round(&mut self, round: Round) {
        self.round = Some(round);
        self.hint_text = None;
        self.pending = None;
    }

    pub(crate) fn set_message(&mut self, message: String) {
        self.message = message;
    }

    pub(crate) fn set_encouragement(&mut self, line: String) {
        self.encouragement = Some(line);
    }

    pub(crate) fn set_hint_text(&mut self, text: Option<String>) {
        self.hint_text = text;
    }

    /// Replaces the pending auto-transition. At most one exists per round.
    pub(crate) fn schedule(&mut self, event: ScheduledEvent) {
        self.pending = Some(event);
    }

    /// Consumes the pending event iff `event` matches it exactly.
    ///
    /// A mismatch means the event is stale (the session was replaced or
    /// the timer superseded) and must be a harmless no-op.
    pub(crate) fn take_pending(&mut self, event: ScheduledEvent) -> bool {
        if self.pending == Some(event) && event.session() == self.session_id {
            self.pending = None;
            true
        } else {
            false
        }
    }

    /// Ends the level: optionally banks the earned sticker and shows the
    /// summary screen. The session is kept for the score display.
    pub(crate) fn finish_to_summary(&mut self, award: Option<Sticker>) {
        if let Some(sticker) = &award {
            self.album.add(sticker.clone());
        }
        self.last_award = award;
        self.screen = Screen::Summary;
        self.round = None;
        self.hint_text = None;
        self.pending = None;
    }

    /// Returns to the start screen from anywhere, abandoning any level in
    /// flight and invalidating pending timers.
    pub(crate) fn return_to_start(&mut self) {
        self.screen = Screen::Start;
        self.session_id = SessionId::random();
        self.session = None;
        self.round = None;
        self.encouragement = None;
        self.hint_text = None;
        self.pending = None;
    }

    /// Opens the sticker board.
    ///
    /// # Errors
    ///
    /// Returns `GameFlowError::StickersUnavailable` off the start screen.
    pub(crate) fn show_stickers(&mut self) -> Result<(), GameFlowError> {
        if self.screen != Screen::Start {
            return Err(GameFlowError::StickersUnavailable);
        }
        self.screen = Screen::Stickers;
        Ok(())
    }
}

impl Default for GameFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for GameFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameFlow")
            .field("screen", &self.screen)
            .field("session_id", &self.session_id)
            .field("session", &self.session)
            .field("round_step", &self.round.as_ref().map(Round::step))
            .field("album_len", &self.album.len())
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
