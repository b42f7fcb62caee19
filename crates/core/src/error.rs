use thiserror::Error;

use crate::model::{ParseLevelError, ProblemError, SessionError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Problem(#[from] ProblemError),
    #[error(transparent)]
    Level(#[from] ParseLevelError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
