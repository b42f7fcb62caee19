use serde::{Deserialize, Serialize};

use crate::model::{MakeTenSplit, Problem};

/// Maximum digits the input buffer holds (answers are at most two digits).
const INPUT_CAPACITY: usize = 2;

//
// ─── STEP ──────────────────────────────────────────────────────────────────────
//

/// Position within a round. Strictly forward:
/// `Ones -> (CarryAnimation ->)? Tens -> Complete`.
///
/// `CarryAnimation` only occurs when the active problem carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Step {
    Ones,
    CarryAnimation,
    Tens,
    Complete,
}

impl Step {
    /// True when digit entry and confirmation are allowed.
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        matches!(self, Step::Ones | Step::Tens)
    }
}

//
// ─── CONFIRM OUTCOME ───────────────────────────────────────────────────────────
//

/// What a call to [`Round::confirm`] did, for the orchestration layer to
/// translate into sounds, messages and timers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmOutcome {
    /// Empty buffer or a non-interactive step; nothing changed.
    Ignored,
    /// Ones column solved. `carries` tells whether the carry animation runs
    /// before the tens column opens.
    OnesAccepted { carries: bool },
    /// Wrong ones answer. Carry problems surface the make-ten hint.
    OnesRejected { split: Option<MakeTenSplit> },
    /// Tens column solved; the round is complete. `total` is the final sum.
    TensAccepted { total: u8 },
    /// Wrong tens answer. `carried` distinguishes the "don't forget the
    /// carry" nudge from the plain one.
    TensRejected { carried: bool },
}

//
// ─── ROUND ─────────────────────────────────────────────────────────────────────
//

/// One problem-solving attempt: the problem plus all transient entry state.
///
/// All transitions are pure and synchronous. The carry animation is left
/// as an explicit state; the embedding layer decides when
/// [`Round::finish_carry_animation`] fires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Round {
    problem: Problem,
    step: Step,
    input: String,
    ones_result: Option<u8>,
    tens_result: Option<u8>,
    is_error: bool,
    make_ten_hint: bool,
}

impl Round {
    /// Starts a round at the ones column with an empty buffer.
    #[must_use]
    pub fn new(problem: Problem) -> Self {
        Self {
            problem,
            step: Step::Ones,
            input: String::new(),
            ones_result: None,
            tens_result: None,
            is_error: false,
            make_ten_hint: false,
        }
    }

    #[must_use]
    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.step
    }

    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Digit recorded under the ones column, once solved.
    #[must_use]
    pub fn ones_result(&self) -> Option<u8> {
        self.ones_result
    }

    /// Digits recorded under the tens column, once solved.
    #[must_use]
    pub fn tens_result(&self) -> Option<u8> {
        self.tens_result
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }

    /// True while the make-ten teaching hint should be visible.
    #[must_use]
    pub fn shows_make_ten_hint(&self) -> bool {
        self.make_ten_hint && self.step == Step::Ones
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.step == Step::Complete
    }

    /// Appends a digit to the input buffer.
    ///
    /// Ignored (returns false) outside interactive steps, when the buffer
    /// is full, or when `digit` is not 0..=9. Successful entry clears the
    /// error flag.
    pub fn push_digit(&mut self, digit: u8) -> bool {
        if !self.step.accepts_input() || self.input.len() >= INPUT_CAPACITY || digit > 9 {
            return false;
        }
        self.input.push(char::from(b'0' + digit));
        self.is_error = false;
        true
    }

    /// Empties the input buffer and clears the error flag. Always allowed.
    pub fn clear(&mut self) {
        self.input.clear();
        self.is_error = false;
    }

    /// Validates the buffered answer against the active column.
    ///
    /// Wrong answers are never fatal: the step stays put, the error flag is
    /// set and the learner retries. See [`ConfirmOutcome`].
    pub fn confirm(&mut self) -> ConfirmOutcome {
        if !self.step.accepts_input() || self.input.is_empty() {
            return ConfirmOutcome::Ignored;
        }
        // At most two ASCII digits, so this cannot fail or overflow u8.
        let value: u8 = self.input.parse().unwrap_or(u8::MAX);

        match self.step {
            Step::Ones => self.confirm_ones(value),
            Step::Tens => self.confirm_tens(value),
            Step::CarryAnimation | Step::Complete => ConfirmOutcome::Ignored,
        }
    }

    fn confirm_ones(&mut self, value: u8) -> ConfirmOutcome {
        // The full two-digit sum is required (13 for 8 + 5), not just the
        // written digit: typing the sum shows the carry was understood.
        if value != self.problem.ones_sum() {
            self.is_error = true;
            if self.problem.has_carry() {
                self.make_ten_hint = true;
            }
            return ConfirmOutcome::OnesRejected {
                split: self.make_ten_hint.then(|| {
                    self.problem
                        .make_ten_split()
                        .expect("carry problem always splits")
                }),
            };
        }

        self.ones_result = Some(self.problem.ones_digit());
        self.input.clear();
        self.is_error = false;
        self.make_ten_hint = false;
        let carries = self.problem.has_carry();
        self.step = if carries {
            Step::CarryAnimation
        } else {
            Step::Tens
        };
        ConfirmOutcome::OnesAccepted { carries }
    }

    fn confirm_tens(&mut self, value: u8) -> ConfirmOutcome {
        if value != self.problem.tens_answer() {
            self.is_error = true;
            return ConfirmOutcome::TensRejected {
                carried: self.problem.has_carry(),
            };
        }

        self.tens_result = Some(self.problem.tens_answer());
        self.input.clear();
        self.is_error = false;
        self.step = Step::Complete;
        ConfirmOutcome::TensAccepted {
            total: self.problem.total(),
        }
    }

    /// Moves `CarryAnimation -> Tens`. No-op in any other step.
    ///
    /// Driven by the scheduled carry-animation event in the service layer.
    pub fn finish_carry_animation(&mut self) -> bool {
        if self.step != Step::CarryAnimation {
            return false;
        }
        self.step = Step::Tens;
        true
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
