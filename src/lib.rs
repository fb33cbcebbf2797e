//! Tic-tac-toe widget - a polling client for a server-authoritative game
//!
//! The widget mirrors a remote game into a host-supplied display and sends
//! the local player's moves back. All game rules live on the server; the
//! client only decides when the player may act and what to redraw.
//!
//! # Architecture
//!
//! - **View**: additive translation of board snapshots into surface writes
//! - **Gate**: optimistic per-player turn lock
//! - **Poll**: immediate-then-periodic timers with owned handles
//! - **Controller**: shared response pipeline plus a role strategy
//!   (owner or opponent)
//! - **Host**: capability traits for output ([`BoardSurface`]) and input
//!   ([`HostEvents`]), with a terminal implementation
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use tictactoe_widget::{
//!     Controller, HttpGameClient, StartControl, TerminalEvents, TerminalSurface, WidgetSettings,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = WidgetSettings::opponent("http://localhost:8000/api/game-handler/abc".into());
//! let api = Arc::new(HttpGameClient::from_settings(&settings)?);
//! let surface = TerminalSurface::new(3, StartControl::default(), false, std::io::stdout());
//! let mut events = TerminalEvents::new(StartControl::default());
//! let controller = Controller::init(api, Box::new(surface), &mut events, &settings);
//! # controller.shutdown();
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod client;
mod controller;
mod error;
mod gate;
mod host;
mod poll;
mod role;
mod settings;
mod submit;
mod terminal;
mod types;
mod view;

// Crate-level exports - Wire types
pub use types::{
    BoardSnapshot, CellId, Coords, GameStatusResponse, MoveRequest, ParseCellIdError, Scores,
    SessionStatus,
};

// Crate-level exports - Errors
pub use error::{TransportError, TransportErrorKind};

// Crate-level exports - Endpoints
pub use client::{GameApi, HttpGameClient};

// Crate-level exports - Core components
pub use controller::Controller;
pub use gate::TurnGate;
pub use poll::{DEFAULT_POLL_INTERVAL, PollHandle, PollLoop, run_now_and_every};
pub use submit::MoveSubmitter;
pub use view::GameStateView;

// Crate-level exports - Roles
pub use role::{OpponentStrategy, OwnerStrategy, Role, RoleContext, RoleStrategy};

// Crate-level exports - Settings
pub use settings::{ConfigError, RoleSettings, WidgetSettings};

// Crate-level exports - Host capabilities
pub use host::{BoardSurface, CellHandler, HostEvents, Notice, ScoreSide, StartHandler};
pub use terminal::{Command, ParseCommandError, StartControl, TerminalEvents, TerminalSurface};
