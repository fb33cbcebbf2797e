//! Opponent: always polling, detects new games heuristically.

use super::{Role, RoleContext, RoleStrategy};
use crate::controller::Controller;
use crate::host::Notice;
use crate::types::GameStatusResponse;
use tracing::{debug, info, instrument};

/// Opponent-side hooks.
///
/// Between games the opponent is idle. The first response showing exactly
/// one placed symbol while idle is taken as the owner having started a new
/// game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpponentStrategy {
    is_idle: bool,
}

impl OpponentStrategy {
    /// Creates an idle opponent.
    pub fn new() -> Self {
        Self { is_idle: true }
    }

    /// Whether the opponent is waiting for the next game.
    pub fn is_idle(&self) -> bool {
        self.is_idle
    }
}

impl Default for OpponentStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl RoleStrategy for OpponentStrategy {
    fn role(&self) -> Role {
        Role::Opponent
    }

    #[instrument(skip_all, fields(num_symbols = response.num_symbols, is_idle = self.is_idle))]
    fn preprocess(&mut self, ctx: &mut RoleContext<'_>, response: &GameStatusResponse) {
        if response.num_symbols == 1 && self.is_idle {
            info!("New game detected");
            ctx.view.surface_mut().notify(&Notice::NewGame);
            ctx.view.clear();
            self.is_idle = false;
        }
    }

    #[instrument(skip_all, fields(winner = ?response.winner, is_idle = self.is_idle))]
    fn handle_end(&mut self, ctx: &mut RoleContext<'_>, response: &GameStatusResponse) {
        ctx.view.render_scores(&response.scores);
        if let Some(winner) = &response.winner
            && !self.is_idle
        {
            ctx.view.surface_mut().notify(&Notice::Winner(winner.clone()));
        }
        if !self.is_idle {
            info!("Game ended, waiting for the next one");
        } else {
            debug!("Ended game reported while idle");
        }
        self.is_idle = true;
    }
}

/// Starts the opponent's game poll. It runs for the controller's lifetime.
#[instrument(skip_all)]
pub(crate) fn activate(controller: &Controller) {
    info!("Activating opponent");
    controller.start_game_poll();
}
