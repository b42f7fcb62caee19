//! Shared error types for the services crate.

use thiserror::Error;

use sums_core::model::SessionError;

/// Errors emitted by the encouragement backend.
///
/// These never reach the learner: `EncouragementService` swallows them and
/// falls back to fixed per-outcome strings.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncouragementError {
    #[error("encouragement backend is not configured")]
    Disabled,
    #[error("encouragement backend returned an empty response")]
    EmptyResponse,
    #[error("encouragement request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// Errors emitted by `GameLoopService` screen and session handling.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GameFlowError {
    #[error("no level is being played")]
    NotPlaying,
    #[error("the sticker board is only reachable from the start screen")]
    StickersUnavailable,
    #[error(transparent)]
    Session(#[from] SessionError),
}
