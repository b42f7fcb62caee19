#![forbid(unsafe_code)]

pub mod audio;
pub mod encouragement;
pub mod error;
pub mod prompts;
pub mod rounds;
pub mod sessions;

pub use sums_core::Clock;

pub use audio::{NullSink, RecordingSink, SoundCue, SoundSink};
pub use encouragement::{EncouragementService, EncouragementSource, LlmConfig, LlmEncouragement};
pub use error::{EncouragementError, GameFlowError};
pub use rounds::ProblemGenerator;
pub use sessions::{
    GameFlow, GameLoopService, Screen, ScheduledEvent, SessionProgress, TimerAction,
};
