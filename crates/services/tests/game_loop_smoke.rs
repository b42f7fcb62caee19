use std::sync::Arc;

use async_trait::async_trait;

use services::{
    Clock, EncouragementService, EncouragementSource, GameLoopService, RecordingSink, Screen,
    SoundCue,
};
use services::error::EncouragementError;
use services::sessions::GameFlow;
use sums_core::model::{ConfirmOutcome, Level, Step, TOTAL_ROUNDS};
use sums_core::time::fixed_clock;

struct CannedSource;

#[async_trait]
impl EncouragementSource for CannedSource {
    async fn line(&self, correct: bool) -> Result<String, EncouragementError> {
        Ok(if correct { "好棒！" } else { "再来一次！" }.to_string())
    }

    async fn explain_make_ten(&self, ones1: u8, ones2: u8) -> Result<String, EncouragementError> {
        Ok(format!("{ones1}和{ones2}一起凑十"))
    }
}

fn service_with_sink() -> (GameLoopService, Arc<RecordingSink>) {
    let sink = Arc::new(RecordingSink::new());
    let service = GameLoopService::new(
        fixed_clock(),
        EncouragementService::new(Some(Arc::new(CannedSource))),
        sink.clone(),
    );
    (service, sink)
}

fn type_number(service: &GameLoopService, flow: &mut GameFlow, value: u8) {
    service.press_clear(flow).unwrap();
    if value >= 10 {
        service.press_digit(flow, value / 10).unwrap();
    }
    service.press_digit(flow, value % 10).unwrap();
}

/// Solves the round on screen, driving any carry animation timer.
async fn solve_round(service: &GameLoopService, flow: &mut GameFlow) {
    let problem = *flow.round().unwrap().problem();

    type_number(service, flow, problem.ones_sum());
    let outcome = service.confirm(flow).await.unwrap();
    assert!(matches!(outcome, ConfirmOutcome::OnesAccepted { .. }));

    if flow.round().unwrap().step() == Step::CarryAnimation {
        let event = flow.pending_event().expect("carry timer scheduled");
        assert!(service.fire(flow, event));
        assert_eq!(flow.round().unwrap().step(), Step::Tens);
    }

    type_number(service, flow, problem.tens_answer());
    let outcome = service.confirm(flow).await.unwrap();
    assert_eq!(
        outcome,
        ConfirmOutcome::TensAccepted {
            total: problem.total()
        }
    );
}

#[tokio::test]
async fn full_carry_level_awards_a_sticker() {
    let (service, sink) = service_with_sink();
    let mut flow = GameFlow::new();

    service.start_level(&mut flow, Level::Carry);
    assert_eq!(flow.screen(), Screen::Playing);

    for round in 1..=TOTAL_ROUNDS {
        assert_eq!(flow.progress().unwrap().round_number, round);
        solve_round(&service, &mut flow).await;

        let advance = flow.pending_event().expect("advance timer scheduled");
        assert!(service.fire(&mut flow, advance));
    }

    assert_eq!(flow.screen(), Screen::Summary);
    let progress = flow.progress().unwrap();
    assert!(progress.is_finished);
    assert_eq!(progress.score, TOTAL_ROUNDS);
    assert_eq!(flow.album().len(), 1);
    assert!(flow.last_award().is_some());
    assert!(sink.played().contains(&SoundCue::Success));

    service.back_to_menu(&mut flow);
    assert_eq!(flow.screen(), Screen::Start);
    // The album survives leaving the summary.
    assert_eq!(flow.album().len(), 1);
}

#[tokio::test]
async fn wrong_ones_answer_sets_error_and_hint() {
    let (service, _sink) = service_with_sink();
    let mut flow = GameFlow::new();
    service.start_level(&mut flow, Level::Carry);

    let problem = *flow.round().unwrap().problem();
    // The written digit alone is rejected; the full sum is required.
    type_number(&service, &mut flow, problem.ones_sum() % 10);
    let outcome = service.confirm(&mut flow).await.unwrap();
    assert!(matches!(outcome, ConfirmOutcome::OnesRejected { .. }));
    assert!(flow.round().unwrap().is_error());
    assert!(flow.round().unwrap().shows_make_ten_hint());
    assert!(flow.hint_text().is_some());
    assert_eq!(flow.message(), "再来一次！");
}

#[tokio::test]
async fn exiting_mid_round_cancels_pending_timer() {
    let (service, _sink) = service_with_sink();
    let mut flow = GameFlow::new();
    service.start_level(&mut flow, Level::Carry);

    let problem = *flow.round().unwrap().problem();
    type_number(&service, &mut flow, problem.ones_sum());
    service.confirm(&mut flow).await.unwrap();
    let event = flow.pending_event().expect("carry timer scheduled");

    service.exit_to_menu(&mut flow);
    assert_eq!(flow.screen(), Screen::Start);

    // The stale event is a harmless no-op against the replaced session.
    assert!(!service.fire(&mut flow, event));
    assert_eq!(flow.screen(), Screen::Start);
    assert!(flow.round().is_none());
}

#[tokio::test]
async fn sticker_board_round_trip() {
    let (service, _sink) = service_with_sink();
    let mut flow = GameFlow::new();

    service.open_stickers(&mut flow).unwrap();
    assert_eq!(flow.screen(), Screen::Stickers);

    service.back_to_menu(&mut flow);
    assert_eq!(flow.screen(), Screen::Start);

    service.start_level(&mut flow, Level::Basic);
    assert!(service.open_stickers(&mut flow).is_err());
}

#[tokio::test]
async fn basic_level_skips_the_carry_animation() {
    let (service, _sink) = service_with_sink();
    let mut flow = GameFlow::new();
    service.start_level(&mut flow, Level::Basic);

    let problem = *flow.round().unwrap().problem();
    type_number(&service, &mut flow, problem.ones_sum());
    let outcome = service.confirm(&mut flow).await.unwrap();
    assert_eq!(outcome, ConfirmOutcome::OnesAccepted { carries: false });
    assert_eq!(flow.round().unwrap().step(), Step::Tens);
    // No timer is pending; only round completion schedules one.
    assert!(flow.pending_event().is_none());
}
