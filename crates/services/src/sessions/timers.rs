use chrono::{DateTime, Duration, Utc};

use sums_core::Clock;
use sums_core::model::SessionId;

/// How long the carry animation plays before the tens column opens.
pub const CARRY_ANIMATION_DELAY_MS: i64 = 2500;

/// Pause on the solved equation before the next round (or the summary).
pub const ROUND_ADVANCE_DELAY_MS: i64 = 3000;

/// The two auto-transitions a round can be waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    FinishCarryAnimation,
    AdvanceRound,
}

impl TimerAction {
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::milliseconds(match self {
            TimerAction::FinishCarryAnimation => CARRY_ANIMATION_DELAY_MS,
            TimerAction::AdvanceRound => ROUND_ADVANCE_DELAY_MS,
        })
    }
}

/// A timer callback as explicit data.
///
/// The flow holds at most one pending event. The embedding shell sleeps
/// until `fires_at` and hands the event back to `GameLoopService::fire`;
/// an event whose session no longer matches the flow is silently dropped,
/// which is how exiting mid-round cancels in-flight timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduledEvent {
    session: SessionId,
    action: TimerAction,
    fires_at: DateTime<Utc>,
}

impl ScheduledEvent {
    /// Schedules `action` for its fixed delay from now.
    #[must_use]
    pub fn schedule(session: SessionId, action: TimerAction, clock: &Clock) -> Self {
        Self {
            session,
            action,
            fires_at: clock.now() + action.delay(),
        }
    }

    #[must_use]
    pub fn session(&self) -> SessionId {
        self.session
    }

    #[must_use]
    pub fn action(&self) -> TimerAction {
        self.action
    }

    #[must_use]
    pub fn fires_at(&self) -> DateTime<Utc> {
        self.fires_at
    }

    #[must_use]
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        now >= self.fires_at
    }
}
