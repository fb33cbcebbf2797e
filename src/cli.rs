//! Command-line interface for tictactoe_widget.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_widget::{ConfigError, RoleSettings, WidgetSettings};

/// Tic-tac-toe widget - play a server-hosted game from the terminal
#[derive(Parser, Debug)]
#[command(name = "tictactoe_widget")]
#[command(about = "Polling tic-tac-toe client", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Settings file (TOML). Flags override its values.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Poll interval in milliseconds
    #[arg(long, global = true, env = "TICTACTOE_POLL_INTERVAL_MS")]
    pub poll_interval_ms: Option<u64>,

    /// Cookie header identifying the player to the server
    #[arg(long, global = true, env = "TICTACTOE_COOKIE")]
    pub cookie: Option<String>,

    /// Board size drawn before the first update
    #[arg(long, global = true)]
    pub board_size: Option<usize>,

    /// Role to play
    #[command(subcommand)]
    pub command: Command,
}

/// Available roles
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Own the session: wait for an opponent and start games
    Owner {
        /// Game endpoint URL
        #[arg(long, env = "TICTACTOE_GAME_URL")]
        game_url: Option<String>,

        /// Session endpoint URL
        #[arg(long, env = "TICTACTOE_SESSION_URL")]
        session_url: Option<String>,

        /// The opponent has already joined
        #[arg(long)]
        ready: bool,

        /// A game is already in progress
        #[arg(long)]
        active: bool,
    },

    /// Join the owner's session
    Opponent {
        /// Game endpoint URL
        #[arg(long, env = "TICTACTOE_GAME_URL")]
        game_url: Option<String>,
    },
}

impl Cli {
    /// Merges the settings file (if any) with command-line flags.
    pub fn resolve_settings(&self) -> Result<WidgetSettings, ConfigError> {
        let base = self
            .config
            .as_ref()
            .map(WidgetSettings::from_file)
            .transpose()?;

        let mut settings = match &self.command {
            Command::Owner {
                game_url,
                session_url,
                ready,
                active,
            } => {
                let (file_ready, file_active) = match base.as_ref().map(|b| *b.role()) {
                    Some(RoleSettings::Owner {
                        is_ready,
                        is_active,
                    }) => (is_ready, is_active),
                    _ => (false, false),
                };
                let game_url = pick(game_url, base.as_ref().map(|b| b.game_endpoint().clone()))
                    .ok_or_else(|| ConfigError::new("game endpoint URL required".to_string()))?;
                let session_url = pick(
                    session_url,
                    base.as_ref().and_then(|b| b.session_endpoint().clone()),
                )
                .ok_or_else(|| ConfigError::new("session endpoint URL required".to_string()))?;
                WidgetSettings::owner(
                    game_url,
                    session_url,
                    *ready || file_ready,
                    *active || file_active,
                )
            }
            Command::Opponent { game_url } => {
                let game_url = pick(game_url, base.as_ref().map(|b| b.game_endpoint().clone()))
                    .ok_or_else(|| ConfigError::new("game endpoint URL required".to_string()))?;
                WidgetSettings::opponent(game_url)
            }
        };

        if let Some(base) = &base {
            settings = settings
                .with_poll_interval_ms(*base.poll_interval_ms())
                .with_cookie(base.cookie().clone())
                .with_board_size(*base.board_size());
        }
        if let Some(ms) = self.poll_interval_ms {
            settings = settings.with_poll_interval_ms(ms);
        }
        if let Some(cookie) = &self.cookie {
            settings = settings.with_cookie(Some(cookie.clone()));
        }
        if let Some(size) = self.board_size {
            settings = settings.with_board_size(size);
        }

        settings.validate()?;
        Ok(settings)
    }
}

fn pick(flag: &Option<String>, file: Option<String>) -> Option<String> {
    flag.clone().or(file)
}
