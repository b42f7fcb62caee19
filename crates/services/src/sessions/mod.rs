mod progress;
mod service;
mod timers;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::GameFlowError;
pub use progress::SessionProgress;
pub use service::{GameFlow, Screen};
pub use timers::{CARRY_ANIMATION_DELAY_MS, ROUND_ADVANCE_DELAY_MS, ScheduledEvent, TimerAction};
pub use workflow::GameLoopService;
