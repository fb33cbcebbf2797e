//! Widget settings: endpoints, role and poll cadence.

use crate::poll::DEFAULT_POLL_INTERVAL;
use crate::role::Role;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_setters::Setters;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Role-specific init settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RoleSettings {
    /// The player who owns the session.
    Owner {
        /// An opponent has already joined.
        #[serde(default)]
        is_ready: bool,
        /// A game is already in progress.
        #[serde(default)]
        is_active: bool,
    },
    /// The invited player.
    Opponent,
}

impl RoleSettings {
    /// The role these settings configure.
    pub fn role(&self) -> Role {
        match self {
            Self::Owner { .. } => Role::Owner,
            Self::Opponent => Role::Opponent,
        }
    }
}

/// Everything [`Controller::init`](crate::Controller::init) needs besides
/// the host capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct WidgetSettings {
    /// URL of the game endpoint.
    game_endpoint: String,

    /// URL of the session endpoint (owner only).
    #[serde(default)]
    session_endpoint: Option<String>,

    /// Role and its init flags.
    role: RoleSettings,

    /// Poll period in milliseconds.
    #[serde(default = "default_poll_interval_ms")]
    poll_interval_ms: u64,

    /// Cookie header sent with every request, identifying the player.
    #[serde(default)]
    cookie: Option<String>,

    /// Rows and columns the terminal host draws before the first snapshot.
    #[serde(default = "default_board_size")]
    board_size: usize,
}

fn default_poll_interval_ms() -> u64 {
    DEFAULT_POLL_INTERVAL.as_millis() as u64
}

fn default_board_size() -> usize {
    3
}

impl WidgetSettings {
    /// Settings for the session owner.
    #[instrument]
    pub fn owner(
        game_endpoint: String,
        session_endpoint: String,
        is_ready: bool,
        is_active: bool,
    ) -> Self {
        Self {
            game_endpoint,
            session_endpoint: Some(session_endpoint),
            role: RoleSettings::Owner {
                is_ready,
                is_active,
            },
            poll_interval_ms: default_poll_interval_ms(),
            cookie: None,
            board_size: default_board_size(),
        }
    }

    /// Settings for the opponent.
    #[instrument]
    pub fn opponent(game_endpoint: String) -> Self {
        Self {
            game_endpoint,
            session_endpoint: None,
            role: RoleSettings::Opponent,
            poll_interval_ms: default_poll_interval_ms(),
            cookie: None,
            board_size: default_board_size(),
        }
    }

    /// Loads settings from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading settings from file");
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            ConfigError::new(format!("Failed to read settings file: {}", e))
        })?;

        let settings: Self = toml::from_str(&content)
            .map_err(|e| ConfigError::new(format!("Failed to parse settings: {}", e)))?;

        info!(role = %settings.role.role(), "Settings loaded");
        Ok(settings)
    }

    /// Poll period as a [`Duration`].
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Checks the combination of fields before any I/O starts.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game_endpoint.trim().is_empty() {
            return Err(ConfigError::new("game endpoint is empty".to_string()));
        }
        if self.poll_interval_ms == 0 {
            return Err(ConfigError::new("poll interval must be positive".to_string()));
        }
        if self.board_size == 0 {
            return Err(ConfigError::new("board size must be positive".to_string()));
        }
        match (&self.role, &self.session_endpoint) {
            (RoleSettings::Owner { .. }, None) => Err(ConfigError::new(
                "owner role requires a session endpoint".to_string(),
            )),
            (RoleSettings::Owner { .. }, Some(url)) if url.trim().is_empty() => Err(
                ConfigError::new("session endpoint is empty".to_string()),
            ),
            _ => Ok(()),
        }
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
