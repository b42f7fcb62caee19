mod ids;
mod level;
mod problem;
mod rewards;
mod round;
mod session;

pub use ids::SessionId;
pub use level::{Level, ParseLevelError};
pub use problem::{MakeTenSplit, Problem, ProblemError};
pub use rewards::{STICKER_POOL, Sticker, StickerAlbum};
pub use round::{ConfirmOutcome, Round, Step};
pub use session::{LevelOutcome, LevelSession, PASSING_SCORE, SessionError, TOTAL_ROUNDS};
