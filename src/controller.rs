//! The shared controller driving both roles.

use crate::client::GameApi;
use crate::error::TransportError;
use crate::gate::TurnGate;
use crate::host::{BoardSurface, HostEvents};
use crate::poll::PollLoop;
use crate::role::{
    OpponentStrategy, OwnerStrategy, Role, RoleContext, RoleStrategy, activate_opponent,
    activate_owner,
};
use crate::settings::{RoleSettings, WidgetSettings};
use crate::submit::MoveSubmitter;
use crate::types::{Coords, GameStatusResponse};
use crate::view::GameStateView;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

/// Mutable state owned by one controller. Only touched under its lock.
pub(crate) struct ControllerState {
    pub(crate) view: GameStateView,
    pub(crate) gate: TurnGate,
    pub(crate) strategy: Box<dyn RoleStrategy>,
    pub(crate) game_poll: PollLoop,
    pub(crate) session_poll: PollLoop,
}

struct Inner {
    api: Arc<dyn GameApi>,
    submitter: MoveSubmitter,
    poll_interval: Duration,
    role: Role,
    state: Mutex<ControllerState>,
}

/// Polling game controller for one player.
///
/// Cheap to clone; clones share state. Every handler takes the state lock,
/// runs to completion without awaiting, and releases it, so handlers never
/// interleave. Responses are applied in the order they complete.
///
/// Timer tasks only hold weak references. Dropping the last handle, or
/// calling [`Controller::shutdown`], stops all polling.
#[derive(Clone)]
pub struct Controller {
    inner: Arc<Inner>,
}

/// Non-owning controller reference held by timer tasks.
#[derive(Clone)]
pub(crate) struct WeakController(Weak<Inner>);

impl WeakController {
    pub(crate) fn upgrade(&self) -> Option<Controller> {
        self.0.upgrade().map(|inner| Controller { inner })
    }
}

impl Controller {
    /// Wires host listeners and starts the role's polls.
    ///
    /// Call once per widget. Must run inside a tokio runtime.
    #[instrument(skip(api, surface, events), fields(role = %settings.role().role()))]
    pub fn init(
        api: Arc<dyn GameApi>,
        surface: Box<dyn BoardSurface>,
        events: &mut dyn HostEvents,
        settings: &WidgetSettings,
    ) -> Self {
        let strategy: Box<dyn RoleStrategy> = match settings.role() {
            RoleSettings::Owner { .. } => Box::new(OwnerStrategy),
            RoleSettings::Opponent => Box::new(OpponentStrategy::new()),
        };
        let controller = Self::with_strategy(api, surface, strategy, settings.poll_interval());

        let target = controller.clone();
        events.on_cell_click(Box::new(move |coords| target.cell_clicked(coords)));

        match *settings.role() {
            RoleSettings::Owner {
                is_ready,
                is_active,
            } => activate_owner(&controller, events, is_ready, is_active),
            RoleSettings::Opponent => activate_opponent(&controller),
        }

        info!("Controller initialized");
        controller
    }

    /// Builds a controller around an arbitrary strategy without wiring
    /// listeners or starting polls.
    pub fn with_strategy(
        api: Arc<dyn GameApi>,
        surface: Box<dyn BoardSurface>,
        strategy: Box<dyn RoleStrategy>,
        poll_interval: Duration,
    ) -> Self {
        let role = strategy.role();
        let state = ControllerState {
            view: GameStateView::new(surface),
            gate: TurnGate::new(),
            strategy,
            game_poll: PollLoop::new("game"),
            session_poll: PollLoop::new("session"),
        };
        Self {
            inner: Arc::new(Inner {
                submitter: MoveSubmitter::new(Arc::clone(&api)),
                api,
                poll_interval,
                role,
                state: Mutex::new(state),
            }),
        }
    }

    /// This controller's role.
    pub fn role(&self) -> Role {
        self.inner.role
    }

    /// Whether a move intent would currently be honored.
    pub fn may_act(&self) -> bool {
        self.lock().gate.may_act()
    }

    /// Whether the game-status poll is running.
    pub fn is_game_polling(&self) -> bool {
        self.lock().game_poll.is_running()
    }

    /// Whether the session-readiness poll is running.
    pub fn is_readiness_polling(&self) -> bool {
        self.lock().session_poll.is_running()
    }

    /// Player clicked a cell. Dropped silently unless the gate is open.
    #[instrument(skip(self), fields(role = %self.inner.role))]
    pub fn cell_clicked(&self, coords: Coords) {
        let request = {
            let mut state = self.lock();
            if !state.gate.may_act() {
                debug!("Move intent dropped, not our turn");
                return;
            }
            self.inner.submitter.submit(&mut state.gate, coords)
        };

        let controller = self.clone();
        tokio::spawn(async move {
            match request.await {
                Ok(response) => controller.handle_status(response),
                Err(e) => controller.submission_failed(e),
            }
        });
    }

    /// Shared pipeline for every poll and submission response.
    #[instrument(skip_all, fields(
        role = %self.inner.role,
        is_active_player = response.is_active_player,
        is_ended = response.is_ended,
        num_symbols = response.num_symbols,
    ))]
    pub fn handle_status(&self, response: GameStatusResponse) {
        let mut state = self.lock();
        let ControllerState {
            view,
            gate,
            strategy,
            game_poll,
            ..
        } = &mut *state;
        let mut ctx = RoleContext { view, game_poll };

        strategy.preprocess(&mut ctx, &response);
        ctx.view.render(response.board.as_ref());
        gate.sync(response.is_active_player);
        if response.is_ended {
            strategy.handle_end(&mut ctx, &response);
        }
        ctx.view.present();
    }

    /// Stops every poll. Requests already in flight still complete.
    #[instrument(skip(self), fields(role = %self.inner.role))]
    pub fn shutdown(&self) {
        let mut state = self.lock();
        state.game_poll.stop();
        state.session_poll.stop();
        info!("Controller shut down");
    }

    /// (Re)starts the game-status poll.
    pub(crate) fn start_game_poll(&self) {
        let weak = self.downgrade();
        let period = self.inner.poll_interval;
        self.with_state(|state| {
            state.game_poll.start(period, move || {
                let weak = weak.clone();
                async move {
                    if let Some(controller) = weak.upgrade() {
                        controller.poll_game_once().await;
                    }
                }
            });
        });
    }

    async fn poll_game_once(&self) {
        match self.inner.api.fetch_game().await {
            Ok(response) => self.handle_status(response),
            Err(e) => warn!(error = %e, "Game poll failed"),
        }
    }

    fn submission_failed(&self, error: TransportError) {
        warn!(error = %error, "Move submission failed");
        self.lock().gate.revert();
    }

    pub(crate) fn api(&self) -> &Arc<dyn GameApi> {
        &self.inner.api
    }

    pub(crate) fn poll_interval(&self) -> Duration {
        self.inner.poll_interval
    }

    pub(crate) fn downgrade(&self) -> WeakController {
        WeakController(Arc::downgrade(&self.inner))
    }

    pub(crate) fn with_state<T>(&self, f: impl FnOnce(&mut ControllerState) -> T) -> T {
        f(&mut self.lock())
    }

    fn lock(&self) -> MutexGuard<'_, ControllerState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}
