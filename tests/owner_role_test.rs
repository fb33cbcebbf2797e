//! Tests for the owner role: readiness, starting games, closing them out.

mod common;

use common::{RecordingEvents, RecordingSurface, ScriptedApi, board, ended, settle, status};
use std::time::Duration;
use tictactoe_widget::{
    Controller, Notice, Role, ScoreSide, Scores, TransportError, TransportErrorKind,
    WidgetSettings,
};

fn owner(is_ready: bool, is_active: bool) -> WidgetSettings {
    WidgetSettings::owner(
        "http://unused/game".into(),
        "http://unused/session".into(),
        is_ready,
        is_active,
    )
}

#[tokio::test(start_paused = true)]
async fn test_end_to_end_ready_then_start() {
    let api = ScriptedApi::new();
    api.push_session(false);
    api.push_session(true);

    let (surface, record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let controller = Controller::init(api.clone(), surface, &mut events, &owner(false, false));
    assert_eq!(controller.role(), Role::Owner);

    settle().await;
    assert_eq!(api.session_fetches(), 1);
    assert_eq!(api.game_fetches(), 0);
    assert!(!controller.is_game_polling());
    assert_eq!(record.lock().unwrap().start_enabled, None);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(api.session_fetches(), 2);
    {
        let record = record.lock().unwrap();
        assert_eq!(record.start_enabled, Some(true));
        assert!(record.invite_hidden);
    }
    assert!(!controller.is_readiness_polling());
    assert_eq!(api.game_fetches(), 0);

    let mut first = status(true, 0);
    first.board = Some(board(&[&[None, None], &[None, None]]));
    api.push_game(first);
    events.press_start();
    {
        let record = record.lock().unwrap();
        assert_eq!(record.start_enabled, Some(false));
        assert_eq!(record.clears, 1);
    }

    settle().await;
    assert_eq!(api.sessions_created(), 1);
    assert_eq!(api.game_fetches(), 1);
    assert!(controller.is_game_polling());
    assert!(controller.may_act());
}

#[tokio::test(start_paused = true)]
async fn test_readiness_poll_is_one_shot() {
    let api = ScriptedApi::new();
    api.push_session(true);

    let (surface, _record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let _controller = Controller::init(api.clone(), surface, &mut events, &owner(false, false));

    settle().await;
    assert_eq!(api.session_fetches(), 1);

    tokio::time::sleep(Duration::from_secs(60)).await;
    assert_eq!(api.session_fetches(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_ready_owner_skips_readiness_poll() {
    let api = ScriptedApi::new();
    let (surface, _record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let controller = Controller::init(api.clone(), surface, &mut events, &owner(true, false));

    tokio::time::sleep(Duration::from_secs(20)).await;
    assert_eq!(api.session_fetches(), 0);
    assert_eq!(api.game_fetches(), 0);
    assert!(!controller.is_readiness_polling());
    assert!(events.has_start_listener());
}

#[tokio::test(start_paused = true)]
async fn test_active_owner_polls_game_immediately() {
    let api = ScriptedApi::new();
    api.push_game(status(false, 3));
    let (surface, _record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let _controller = Controller::init(api.clone(), surface, &mut events, &owner(true, true));

    settle().await;
    assert_eq!(api.game_fetches(), 1);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(api.game_fetches(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_winning_move_closes_out_game() {
    let api = ScriptedApi::new();
    api.push_game(status(true, 4));
    let mut win = ended(Some("owner"), Scores::new(1, 0));
    win.board = Some(board(&[&[Some("X"), Some("X"), Some("X")]]));
    api.push_move(Ok(win));

    let (surface, record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let controller = Controller::init(api.clone(), surface, &mut events, &owner(true, true));
    settle().await;
    assert!(controller.may_act());

    events.click(0, 2);
    settle().await;

    {
        let record = record.lock().unwrap();
        assert_eq!(record.cell(0, 2), Some("X"));
        assert_eq!(record.notices, vec![Notice::Winner("owner".to_string())]);
        assert_eq!(record.scores.get(&ScoreSide::Owner), Some(&1));
        assert_eq!(record.start_enabled, Some(true));
    }
    assert!(!controller.is_game_polling());
    assert!(!controller.may_act());

    let fetches = api.game_fetches();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(api.game_fetches(), fetches);
}

#[tokio::test(start_paused = true)]
async fn test_late_end_response_only_refreshes_scores() {
    let api = ScriptedApi::new();
    api.push_game(ended(Some("opponent"), Scores::new(0, 1)));

    let (surface, record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let controller = Controller::init(api.clone(), surface, &mut events, &owner(true, true));
    settle().await;
    assert!(!controller.is_game_polling());

    controller.handle_status(ended(Some("opponent"), Scores::new(0, 2)));

    let record = record.lock().unwrap();
    assert_eq!(record.notices, vec![Notice::Winner("opponent".to_string())]);
    assert_eq!(record.scores.get(&ScoreSide::Opponent), Some(&2));
}

#[tokio::test(start_paused = true)]
async fn test_restart_does_not_duplicate_game_poll() {
    let api = ScriptedApi::new();
    api.push_game(status(false, 0));

    let (surface, _record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let _controller = Controller::init(api.clone(), surface, &mut events, &owner(true, true));
    settle().await;
    assert_eq!(api.game_fetches(), 1);

    // Start while a game poll is already running.
    events.press_start();
    settle().await;
    assert_eq!(api.game_fetches(), 2);

    tokio::time::sleep(Duration::from_secs(5)).await;
    assert_eq!(api.game_fetches(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_failed_session_creation_leaves_game_poll_stopped() {
    let api = ScriptedApi::new();
    api.push_create(Err(TransportError::new(TransportErrorKind::Status(500))));

    let (surface, record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let controller = Controller::init(api.clone(), surface, &mut events, &owner(true, false));

    events.press_start();
    tokio::time::sleep(Duration::from_secs(20)).await;

    assert_eq!(api.sessions_created(), 1);
    assert_eq!(api.game_fetches(), 0);
    assert!(!controller.is_game_polling());
    assert_eq!(record.lock().unwrap().start_enabled, Some(false));
}

#[tokio::test(start_paused = true)]
async fn test_next_game_after_close_out() {
    let api = ScriptedApi::new();
    api.push_game(ended(None, Scores::new(0, 0)));

    let (surface, record) = RecordingSurface::new();
    let mut events = RecordingEvents::default();
    let controller = Controller::init(api.clone(), surface, &mut events, &owner(true, true));
    settle().await;
    assert!(!controller.is_game_polling());
    assert!(record.lock().unwrap().notices.is_empty());

    api.push_game(status(true, 0));
    events.press_start();
    settle().await;

    assert!(controller.is_game_polling());
    assert!(controller.may_act());
    assert_eq!(api.sessions_created(), 1);
}
