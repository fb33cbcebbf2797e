//! Role strategies plugged into the shared controller.

mod opponent;
mod owner;

pub use opponent::OpponentStrategy;
pub use owner::OwnerStrategy;

pub(crate) use opponent::activate as activate_opponent;
pub(crate) use owner::activate as activate_owner;

use crate::poll::PollLoop;
use crate::types::GameStatusResponse;
use crate::view::GameStateView;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which seat this widget plays. Fixed for a controller's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Owns the session; starts games and waits for an opponent.
    Owner,
    /// Joins the owner's session.
    Opponent,
}

/// The parts of controller state a role may touch while handling a response.
pub struct RoleContext<'a> {
    /// Board, scores, controls and notifications.
    pub view: &'a mut GameStateView,
    /// The game-status poll.
    pub game_poll: &'a mut PollLoop,
}

/// Role-specific hooks around the shared response pipeline.
pub trait RoleStrategy: Send + 'static {
    /// The role this strategy implements.
    fn role(&self) -> Role;

    /// Runs before the board is rendered.
    fn preprocess(&mut self, _ctx: &mut RoleContext<'_>, _response: &GameStatusResponse) {}

    /// Runs when a response reports the game as ended.
    fn handle_end(&mut self, ctx: &mut RoleContext<'_>, response: &GameStatusResponse);
}
