//! Wire types exchanged with the game and session endpoints.

use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Zero-based position of a single board cell.
///
/// Serialized as the two-element array `[row, col]`, which is what the
/// game endpoint expects in a move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
#[serde(from = "[usize; 2]", into = "[usize; 2]")]
pub struct Coords {
    /// Row index.
    pub row: usize,
    /// Column index.
    pub col: usize,
}

impl From<[usize; 2]> for Coords {
    fn from([row, col]: [usize; 2]) -> Self {
        Self { row, col }
    }
}

impl From<Coords> for [usize; 2] {
    fn from(coords: Coords) -> Self {
        [coords.row, coords.col]
    }
}

/// Display address of a cell, a pure function of its coordinates.
///
/// Renders as `cell-{row}-{col}` and parses back from the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellId(Coords);

impl CellId {
    /// Address of the cell at `coords`.
    pub fn new(coords: Coords) -> Self {
        Self(coords)
    }

    /// Coordinates this address refers to.
    pub fn coords(self) -> Coords {
        self.0
    }
}

impl From<Coords> for CellId {
    fn from(coords: Coords) -> Self {
        Self(coords)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "cell-{}-{}", self.0.row, self.0.col)
    }
}

/// Returned when a string is not a `cell-{row}-{col}` address.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("invalid cell id: {input:?}")]
pub struct ParseCellIdError {
    /// The rejected input.
    pub input: String,
}

impl FromStr for CellId {
    type Err = ParseCellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseCellIdError {
            input: s.to_string(),
        };
        let rest = s.strip_prefix("cell-").ok_or_else(invalid)?;
        let (row, col) = rest.split_once('-').ok_or_else(invalid)?;
        let row = row.parse().map_err(|_| invalid())?;
        let col = col.parse().map_err(|_| invalid())?;
        Ok(Self(Coords { row, col }))
    }
}

/// Server-reported board contents.
///
/// `None` entries carry no information: they mean "unchanged", never
/// "clear this cell".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BoardSnapshot(Vec<Vec<Option<String>>>);

impl BoardSnapshot {
    /// Wraps row-major cell data.
    pub fn new(rows: Vec<Vec<Option<String>>>) -> Self {
        Self(rows)
    }

    /// Rows of the snapshot.
    pub fn rows(&self) -> &[Vec<Option<String>>] {
        &self.0
    }

    /// Cells holding a non-empty symbol, in row-major order.
    pub fn marked_cells(&self) -> impl Iterator<Item = (Coords, &str)> + '_ {
        self.0.iter().enumerate().flat_map(|(row, cells)| {
            cells.iter().enumerate().filter_map(move |(col, cell)| {
                cell.as_deref()
                    .filter(|symbol| !symbol.is_empty())
                    .map(|symbol| (Coords { row, col }, symbol))
            })
        })
    }
}

/// Win totals for both seats of the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct Scores {
    /// Games won by the session owner.
    pub owner: u32,
    /// Games won by the opponent.
    pub opponent: u32,
}

/// Game state returned by every poll and every move submission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStatusResponse {
    /// Board contents, or `None` when nothing changed.
    #[serde(default)]
    pub board: Option<BoardSnapshot>,
    /// Whether the requesting player may move next.
    pub is_active_player: bool,
    /// Whether the game is over.
    pub is_ended: bool,
    /// Number of symbols placed so far.
    pub num_symbols: u32,
    /// Name of the winner, if any.
    #[serde(default)]
    pub winner: Option<String>,
    /// Session win totals.
    pub scores: Scores,
}

/// Readiness of the session, as reported by the session endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatus {
    /// Whether an opponent has joined.
    pub is_ready: bool,
}

/// Body of a move submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveRequest {
    /// Target cell.
    pub coords: Coords,
}
