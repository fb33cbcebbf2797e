//! Line-oriented terminal host.
//!
//! [`TerminalSurface`] keeps a text copy of the board and redraws it after
//! each batch of updates. [`TerminalEvents`] turns stdin commands into the
//! cell and start events a page would deliver.

use crate::host::{BoardSurface, CellHandler, HostEvents, Notice, ScoreSide, StartHandler};
use crate::types::{CellId, Coords};
use derive_more::{Display, Error};
use std::io::Write;
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use strum::IntoEnumIterator;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, info, instrument, warn};

/// Shared enabled flag of the start control.
///
/// The surface writes it, the event source reads it, so a disabled control
/// swallows `start` the way a disabled button swallows clicks.
#[derive(Debug, Clone, Default)]
pub struct StartControl(Arc<AtomicBool>);

impl StartControl {
    /// Creates a control in the given state.
    pub fn new(enabled: bool) -> Self {
        Self(Arc::new(AtomicBool::new(enabled)))
    }

    /// Whether the control accepts activation.
    pub fn is_enabled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    fn set(&self, enabled: bool) {
        self.0.store(enabled, Ordering::SeqCst);
    }
}

/// [`BoardSurface`] that prints the board to a writer.
pub struct TerminalSurface<W> {
    grid: Vec<Vec<String>>,
    owner_score: u32,
    opponent_score: u32,
    invite_visible: bool,
    start: StartControl,
    show_start: bool,
    dirty: bool,
    out: W,
}

impl<W: Write + Send> TerminalSurface<W> {
    /// Creates an empty `size`×`size` board.
    ///
    /// `show_start` adds the start control to the status line (owner only).
    pub fn new(size: usize, start: StartControl, show_start: bool, out: W) -> Self {
        Self {
            grid: vec![vec![String::new(); size]; size],
            owner_score: 0,
            opponent_score: 0,
            invite_visible: show_start,
            start,
            show_start,
            dirty: true,
            out,
        }
    }

    /// Text currently shown in a cell.
    pub fn cell(&self, coords: Coords) -> Option<&str> {
        self.grid
            .get(coords.row)
            .and_then(|row| row.get(coords.col))
            .map(String::as_str)
    }

    /// Current score totals as `(owner, opponent)`.
    pub fn scores(&self) -> (u32, u32) {
        (self.owner_score, self.opponent_score)
    }

    /// Board and status as printed text.
    pub fn render_text(&self) -> String {
        let mut text = String::new();
        for (i, row) in self.grid.iter().enumerate() {
            if i > 0 {
                let rule = vec!["---"; row.len()].join("+");
                text.push_str(&rule);
                text.push('\n');
            }
            let cells: Vec<String> = row
                .iter()
                .map(|cell| {
                    if cell.is_empty() {
                        "   ".to_string()
                    } else {
                        format!(" {} ", cell)
                    }
                })
                .collect();
            text.push_str(&cells.join("|"));
            text.push('\n');
        }

        let scores: Vec<String> = ScoreSide::iter()
            .map(|side| {
                let value = match side {
                    ScoreSide::Owner => self.owner_score,
                    ScoreSide::Opponent => self.opponent_score,
                };
                format!("{}: {}", side, value)
            })
            .collect();
        text.push_str(&scores.join("  "));
        if self.show_start {
            let start = if self.start.is_enabled() { "enabled" } else { "disabled" };
            text.push_str(&format!("  [start: {}]", start));
            if self.invite_visible {
                text.push_str("  [waiting for opponent]");
            }
        }
        text.push('\n');
        text
    }

    fn ensure_cell(&mut self, coords: Coords) {
        let width = self.grid.first().map_or(0, Vec::len).max(coords.col + 1);
        while self.grid.len() <= coords.row {
            self.grid.push(Vec::new());
        }
        for row in &mut self.grid {
            row.resize(width.max(row.len()), String::new());
        }
    }
}

impl<W: Write + Send> BoardSurface for TerminalSurface<W> {
    fn set_cell(&mut self, cell: CellId, text: &str) {
        let coords = cell.coords();
        self.ensure_cell(coords);
        self.grid[coords.row][coords.col] = text.to_string();
        self.dirty = true;
    }

    fn clear_cells(&mut self) {
        for cell in self.grid.iter_mut().flatten() {
            cell.clear();
        }
        self.dirty = true;
    }

    fn set_score(&mut self, side: ScoreSide, value: u32) {
        match side {
            ScoreSide::Owner => self.owner_score = value,
            ScoreSide::Opponent => self.opponent_score = value,
        }
        self.dirty = true;
    }

    fn set_start_enabled(&mut self, enabled: bool) {
        self.start.set(enabled);
        self.dirty = true;
    }

    fn hide_invite(&mut self) {
        self.invite_visible = false;
        self.dirty = true;
    }

    fn notify(&mut self, notice: &Notice) {
        if let Err(e) = writeln!(self.out, "*** {} ***", notice) {
            warn!(error = %e, "Failed to write notice");
        }
    }

    fn present(&mut self) {
        if !self.dirty {
            return;
        }
        let text = self.render_text();
        if let Err(e) = write!(self.out, "\n{}", text).and_then(|()| self.out.flush()) {
            warn!(error = %e, "Failed to draw board");
        }
        self.dirty = false;
    }
}

/// A parsed stdin line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Click the cell at the given coordinates.
    Cell(Coords),
    /// Activate the start control.
    Start,
    /// Leave the widget.
    Quit,
}

/// Returned for lines that are not a command.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("unrecognized command: {line:?} (try `<row> <col>`, `start` or `quit`)")]
pub struct ParseCommandError {
    /// The rejected line.
    pub line: String,
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let line = s.trim();
        let invalid = || ParseCommandError {
            line: line.to_string(),
        };
        match line {
            "start" | "s" => return Ok(Self::Start),
            "quit" | "q" | "exit" => return Ok(Self::Quit),
            _ => {}
        }
        if let Ok(id) = line.parse::<CellId>() {
            return Ok(Self::Cell(id.coords()));
        }
        let args = line.strip_prefix("move").unwrap_or(line);
        let parts: Vec<&str> = args.split_whitespace().collect();
        match parts.as_slice() {
            [row, col] => {
                let row = row.parse().map_err(|_| invalid())?;
                let col = col.parse().map_err(|_| invalid())?;
                Ok(Self::Cell(Coords::new(row, col)))
            }
            _ => Err(invalid()),
        }
    }
}

/// [`HostEvents`] fed from stdin commands.
#[derive(Default)]
pub struct TerminalEvents {
    cell: Option<CellHandler>,
    start: Option<StartHandler>,
    start_control: StartControl,
}

impl TerminalEvents {
    /// Creates an event source gated by `start_control`.
    pub fn new(start_control: StartControl) -> Self {
        Self {
            cell: None,
            start: None,
            start_control,
        }
    }

    /// Delivers one command to the registered handlers.
    ///
    /// Returns `false` once the player asks to quit.
    #[instrument(skip(self))]
    pub fn dispatch(&self, command: Command) -> bool {
        match command {
            Command::Cell(coords) => {
                if let Some(handler) = &self.cell {
                    handler(coords);
                }
                true
            }
            Command::Start => {
                match &self.start {
                    Some(handler) if self.start_control.is_enabled() => handler(),
                    Some(_) => debug!("Start control disabled"),
                    None => debug!("No start control for this role"),
                }
                true
            }
            Command::Quit => false,
        }
    }

    /// Reads commands until `quit` or end of input.
    #[instrument(skip_all)]
    pub async fn run<R: AsyncBufRead + Unpin>(&self, input: R) -> std::io::Result<()> {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match line.parse::<Command>() {
                Ok(command) => {
                    if !self.dispatch(command) {
                        info!("Quit requested");
                        return Ok(());
                    }
                }
                Err(e) => eprintln!("{}", e),
            }
        }
        info!("Input closed");
        Ok(())
    }
}

impl HostEvents for TerminalEvents {
    fn on_cell_click(&mut self, handler: CellHandler) {
        self.cell = Some(handler);
    }

    fn on_start_click(&mut self, handler: StartHandler) {
        self.start = Some(handler);
    }
}
