//! Capabilities the hosting page (or terminal) supplies to the controller.
//!
//! The controller never touches a concrete rendering technology. It writes
//! through a [`BoardSurface`] and receives player intent through
//! [`HostEvents`].

use crate::types::{CellId, Coords};
use derive_more::Display;
use strum::EnumIter;

/// Handler invoked when the player clicks a board cell.
pub type CellHandler = Box<dyn Fn(Coords) + Send + Sync>;

/// Handler invoked when the owner activates the start control.
pub type StartHandler = Box<dyn Fn() + Send + Sync>;

/// Which score display to update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum ScoreSide {
    /// The session owner's win total.
    #[display("owner-score")]
    Owner,
    /// The opponent's win total.
    #[display("opponent-score")]
    Opponent,
}

/// A message surfaced to the player.
///
/// Only these two notifications are ever shown; everything else is
/// reflected through board, score and control state.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum Notice {
    /// A game finished with a winner.
    #[display("{_0} won!")]
    Winner(String),
    /// The opponent detected that the owner started a new game.
    #[display("New game started!")]
    NewGame,
}

/// Output side of the host: where board, scores and controls live.
pub trait BoardSurface: Send {
    /// Writes `text` into the display cell addressed by `cell`.
    fn set_cell(&mut self, cell: CellId, text: &str);

    /// Empties every display cell.
    fn clear_cells(&mut self);

    /// Writes a score total.
    fn set_score(&mut self, side: ScoreSide, value: u32);

    /// Enables or disables the owner's start control.
    fn set_start_enabled(&mut self, enabled: bool);

    /// Hides the invite affordance.
    fn hide_invite(&mut self);

    /// Shows a notification to the player.
    fn notify(&mut self, notice: &Notice);

    /// Called once after each batch of updates. Hosts that redraw as a
    /// whole can do it here.
    fn present(&mut self) {}
}

/// Input side of the host: delegated listeners for player intent.
pub trait HostEvents {
    /// Registers the cell-click listener.
    fn on_cell_click(&mut self, handler: CellHandler);

    /// Registers the start-control listener.
    fn on_start_click(&mut self, handler: StartHandler);
}
