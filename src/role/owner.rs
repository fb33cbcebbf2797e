//! Owner: waits for an opponent, starts games, closes them out.

use super::{Role, RoleContext, RoleStrategy};
use crate::controller::Controller;
use crate::host::{HostEvents, Notice};
use crate::types::GameStatusResponse;
use tracing::{debug, info, instrument, warn};

/// Owner-side hooks.
///
/// A running game poll means a game is active. End-of-game responses that
/// arrive after the poll was stopped only refresh the scores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OwnerStrategy;

impl RoleStrategy for OwnerStrategy {
    fn role(&self) -> Role {
        Role::Owner
    }

    #[instrument(skip_all, fields(winner = ?response.winner))]
    fn handle_end(&mut self, ctx: &mut RoleContext<'_>, response: &GameStatusResponse) {
        ctx.view.render_scores(&response.scores);
        if !ctx.game_poll.is_running() {
            debug!("Game already closed out");
            return;
        }
        if let Some(winner) = &response.winner {
            ctx.view.surface_mut().notify(&Notice::Winner(winner.clone()));
        }
        ctx.game_poll.stop();
        ctx.view.surface_mut().set_start_enabled(true);
        info!("Game ended, start control re-enabled");
    }
}

/// Wires the owner's polls and start control.
#[instrument(skip(controller, events))]
pub(crate) fn activate(
    controller: &Controller,
    events: &mut dyn HostEvents,
    is_ready: bool,
    is_active: bool,
) {
    info!("Activating owner");
    if !is_ready {
        start_readiness_poll(controller);
    }
    if is_active {
        controller.start_game_poll();
    }

    let target = controller.clone();
    events.on_start_click(Box::new(move || start_requested(&target)));
}

fn start_readiness_poll(controller: &Controller) {
    let weak = controller.downgrade();
    let period = controller.poll_interval();
    controller.with_state(|state| {
        state.session_poll.start(period, move || {
            let weak = weak.clone();
            async move {
                let Some(controller) = weak.upgrade() else {
                    return;
                };
                match controller.api().fetch_session().await {
                    Ok(status) if status.is_ready => mark_ready(&controller),
                    Ok(_) => debug!("Opponent not ready yet"),
                    Err(e) => warn!(error = %e, "Readiness poll failed"),
                }
            }
        });
    });
}

/// One-shot transition into `Ready`.
fn mark_ready(controller: &Controller) {
    controller.with_state(|state| {
        if !state.session_poll.is_running() {
            debug!("Late readiness response ignored");
            return;
        }
        state.session_poll.stop();
        let surface = state.view.surface_mut();
        surface.set_start_enabled(true);
        surface.hide_invite();
        state.view.present();
        info!("Opponent ready");
    });
}

/// Start control handler: reset the board and ask for a new game.
#[instrument(skip_all)]
fn start_requested(controller: &Controller) {
    info!("Start requested");
    controller.with_state(|state| {
        state.view.surface_mut().set_start_enabled(false);
        state.view.clear();
        state.view.present();
    });

    let controller = controller.clone();
    tokio::spawn(async move {
        match controller.api().create_session().await {
            Ok(()) => controller.start_game_poll(),
            Err(e) => warn!(error = %e, "Session creation failed"),
        }
    });
}
