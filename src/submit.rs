//! Move submission with an optimistic turn lock.

use crate::client::GameApi;
use crate::error::TransportError;
use crate::gate::TurnGate;
use crate::types::{Coords, GameStatusResponse};
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Sends moves to the game endpoint.
#[derive(Clone)]
pub struct MoveSubmitter {
    api: Arc<dyn GameApi>,
}

impl MoveSubmitter {
    /// Creates a submitter bound to `api`.
    pub fn new(api: Arc<dyn GameApi>) -> Self {
        Self { api }
    }

    /// Locks `gate`, then returns the in-flight submission.
    ///
    /// The lock happens before this returns, so a second intent arriving
    /// while the request is pending is dropped by the gate. Coordinates are
    /// not bounds-checked; the server reports bad moves.
    #[instrument(skip(self, gate))]
    pub fn submit(
        &self,
        gate: &mut TurnGate,
        coords: Coords,
    ) -> impl Future<Output = Result<GameStatusResponse, TransportError>> + Send + 'static {
        gate.lock();
        debug!("Move queued for submission");
        let api = Arc::clone(&self.api);
        async move { api.submit_move(coords).await }
    }
}
