//! Local permission to submit a move.

use tracing::{debug, instrument};

/// Tracks whether the local player may currently submit a move.
///
/// Starts closed. The server opens it through [`TurnGate::sync`]; a move
/// intent closes it before any request is sent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TurnGate {
    can_act: bool,
}

impl TurnGate {
    /// Creates a closed gate.
    #[instrument]
    pub fn new() -> Self {
        Self::default()
    }

    /// Optimistically closes the gate ahead of a submission.
    #[instrument(skip(self))]
    pub fn lock(&mut self) {
        debug!("Turn gate locked");
        self.can_act = false;
    }

    /// Adopts the server's view of whose turn it is.
    #[instrument(skip(self))]
    pub fn sync(&mut self, is_active_player: bool) {
        debug!(was = self.can_act, "Turn gate synced");
        self.can_act = is_active_player;
    }

    /// Reopens the gate after a failed submission so the player can retry.
    #[instrument(skip(self))]
    pub fn revert(&mut self) {
        debug!("Turn gate reverted");
        self.can_act = true;
    }

    /// Whether a move intent should be honored.
    pub fn may_act(&self) -> bool {
        self.can_act
    }
}
