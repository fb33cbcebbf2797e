//! Shared test doubles: a scripted game service and a recording host.

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tictactoe_widget::{
    BoardSnapshot, BoardSurface, CellHandler, CellId, Coords, GameApi, GameStatusResponse,
    HostEvents, Notice, ScoreSide, Scores, SessionStatus, StartHandler, TransportError,
    TransportErrorKind,
};

/// Lets spawned tasks and due timers run.
pub async fn settle() {
    tokio::time::sleep(Duration::from_millis(1)).await;
}

/// Builds a board from `None`/symbol rows.
pub fn board(rows: &[&[Option<&str>]]) -> BoardSnapshot {
    BoardSnapshot::new(
        rows.iter()
            .map(|row| row.iter().map(|c| c.map(str::to_string)).collect())
            .collect(),
    )
}

/// A status with no board update.
pub fn status(is_active_player: bool, num_symbols: u32) -> GameStatusResponse {
    GameStatusResponse {
        board: None,
        is_active_player,
        is_ended: false,
        num_symbols,
        winner: None,
        scores: Scores::default(),
    }
}

/// An ended game.
pub fn ended(winner: Option<&str>, scores: Scores) -> GameStatusResponse {
    GameStatusResponse {
        board: None,
        is_active_player: false,
        is_ended: true,
        num_symbols: 5,
        winner: winner.map(str::to_string),
        scores,
    }
}

#[derive(Default)]
struct Script {
    games: VecDeque<GameStatusResponse>,
    last_game: Option<GameStatusResponse>,
    moves: VecDeque<Result<GameStatusResponse, TransportError>>,
    move_delay: Duration,
    sessions: VecDeque<SessionStatus>,
    last_session: SessionStatus,
    creates: VecDeque<Result<(), TransportError>>,
    game_fetches: usize,
    session_fetches: usize,
    sessions_created: usize,
    submitted: Vec<Coords>,
}

/// In-memory [`GameApi`] replaying queued responses.
///
/// Game and session polls repeat their last response once the queue runs
/// dry; a game poll with nothing scripted fails with HTTP 404.
#[derive(Default)]
pub struct ScriptedApi {
    script: Mutex<Script>,
}

impl ScriptedApi {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_game(&self, response: GameStatusResponse) {
        self.script.lock().unwrap().games.push_back(response);
    }

    pub fn push_move(&self, result: Result<GameStatusResponse, TransportError>) {
        self.script.lock().unwrap().moves.push_back(result);
    }

    pub fn set_move_delay(&self, delay: Duration) {
        self.script.lock().unwrap().move_delay = delay;
    }

    pub fn push_session(&self, is_ready: bool) {
        self.script
            .lock()
            .unwrap()
            .sessions
            .push_back(SessionStatus { is_ready });
    }

    pub fn push_create(&self, result: Result<(), TransportError>) {
        self.script.lock().unwrap().creates.push_back(result);
    }

    pub fn game_fetches(&self) -> usize {
        self.script.lock().unwrap().game_fetches
    }

    pub fn session_fetches(&self) -> usize {
        self.script.lock().unwrap().session_fetches
    }

    pub fn sessions_created(&self) -> usize {
        self.script.lock().unwrap().sessions_created
    }

    pub fn submitted(&self) -> Vec<Coords> {
        self.script.lock().unwrap().submitted.clone()
    }
}

#[async_trait]
impl GameApi for ScriptedApi {
    async fn fetch_game(&self) -> Result<GameStatusResponse, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.game_fetches += 1;
        if let Some(next) = script.games.pop_front() {
            script.last_game = Some(next);
        }
        script
            .last_game
            .clone()
            .ok_or_else(|| TransportError::new(TransportErrorKind::Status(404)))
    }

    async fn submit_move(&self, coords: Coords) -> Result<GameStatusResponse, TransportError> {
        let (delay, result) = {
            let mut script = self.script.lock().unwrap();
            script.submitted.push(coords);
            let result = script.moves.pop_front().unwrap_or_else(|| {
                Err(TransportError::new(TransportErrorKind::Network(
                    "nothing scripted".to_string(),
                )))
            });
            (script.move_delay, result)
        };
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn fetch_session(&self) -> Result<SessionStatus, TransportError> {
        let mut script = self.script.lock().unwrap();
        script.session_fetches += 1;
        if let Some(next) = script.sessions.pop_front() {
            script.last_session = next;
        }
        Ok(script.last_session)
    }

    async fn create_session(&self) -> Result<(), TransportError> {
        let mut script = self.script.lock().unwrap();
        script.sessions_created += 1;
        script.creates.pop_front().unwrap_or(Ok(()))
    }
}

/// Everything a [`RecordingSurface`] has been told.
#[derive(Debug, Default)]
pub struct Recorded {
    pub cells: HashMap<CellId, String>,
    pub cell_writes: usize,
    pub clears: usize,
    pub scores: HashMap<ScoreSide, u32>,
    pub start_enabled: Option<bool>,
    pub invite_hidden: bool,
    pub notices: Vec<Notice>,
    pub presents: usize,
}

impl Recorded {
    pub fn cell(&self, row: usize, col: usize) -> Option<&str> {
        self.cells
            .get(&CellId::new(Coords::new(row, col)))
            .map(String::as_str)
    }
}

/// [`BoardSurface`] that records into shared state.
#[derive(Clone, Default)]
pub struct RecordingSurface(pub Arc<Mutex<Recorded>>);

impl RecordingSurface {
    pub fn new() -> (Box<dyn BoardSurface>, Arc<Mutex<Recorded>>) {
        let surface = Self::default();
        let record = Arc::clone(&surface.0);
        (Box::new(surface), record)
    }
}

impl BoardSurface for RecordingSurface {
    fn set_cell(&mut self, cell: CellId, text: &str) {
        let mut record = self.0.lock().unwrap();
        record.cell_writes += 1;
        record.cells.insert(cell, text.to_string());
    }

    fn clear_cells(&mut self) {
        let mut record = self.0.lock().unwrap();
        record.clears += 1;
        record.cells.clear();
    }

    fn set_score(&mut self, side: ScoreSide, value: u32) {
        self.0.lock().unwrap().scores.insert(side, value);
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.0.lock().unwrap().start_enabled = Some(enabled);
    }

    fn hide_invite(&mut self) {
        self.0.lock().unwrap().invite_hidden = true;
    }

    fn notify(&mut self, notice: &Notice) {
        self.0.lock().unwrap().notices.push(notice.clone());
    }

    fn present(&mut self) {
        self.0.lock().unwrap().presents += 1;
    }
}

/// [`HostEvents`] the test fires by hand.
#[derive(Default)]
pub struct RecordingEvents {
    cell: Option<CellHandler>,
    start: Option<StartHandler>,
}

impl RecordingEvents {
    pub fn click(&self, row: usize, col: usize) {
        let handler = self.cell.as_ref().expect("cell listener registered");
        handler(Coords::new(row, col));
    }

    pub fn press_start(&self) {
        let handler = self.start.as_ref().expect("start listener registered");
        handler();
    }

    pub fn has_start_listener(&self) -> bool {
        self.start.is_some()
    }
}

impl HostEvents for RecordingEvents {
    fn on_cell_click(&mut self, handler: CellHandler) {
        self.cell = Some(handler);
    }

    fn on_start_click(&mut self, handler: StartHandler) {
        self.start = Some(handler);
    }
}
