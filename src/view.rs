//! Translation of server snapshots into surface writes.

use crate::host::{BoardSurface, ScoreSide};
use crate::types::{BoardSnapshot, CellId, Scores};
use tracing::{debug, instrument};

/// Writes server-reported state onto the host's [`BoardSurface`].
///
/// Holds no game state of its own. Rendering is additive: a snapshot only
/// ever fills cells in, and only [`GameStateView::clear`] empties them.
pub struct GameStateView {
    surface: Box<dyn BoardSurface>,
}

impl GameStateView {
    /// Wraps the host surface.
    pub fn new(surface: Box<dyn BoardSurface>) -> Self {
        Self { surface }
    }

    /// Writes every marked cell of `board`. `None` means nothing changed.
    #[instrument(skip_all, fields(has_board = board.is_some()))]
    pub fn render(&mut self, board: Option<&BoardSnapshot>) {
        let Some(board) = board else {
            return;
        };
        let mut written = 0usize;
        for (coords, symbol) in board.marked_cells() {
            self.surface.set_cell(CellId::new(coords), symbol);
            written += 1;
        }
        debug!(written, "Board rendered");
    }

    /// Writes both score totals.
    #[instrument(skip(self))]
    pub fn render_scores(&mut self, scores: &Scores) {
        self.surface.set_score(ScoreSide::Owner, scores.owner);
        self.surface.set_score(ScoreSide::Opponent, scores.opponent);
    }

    /// Empties the board display. Only used on explicit resets.
    #[instrument(skip(self))]
    pub fn clear(&mut self) {
        debug!("Clearing board display");
        self.surface.clear_cells();
    }

    /// Commits the current batch of updates.
    pub fn present(&mut self) {
        self.surface.present();
    }

    /// Direct access for role-specific controls and notifications.
    pub fn surface_mut(&mut self) -> &mut dyn BoardSurface {
        self.surface.as_mut()
    }
}
