//! Tictactoe widget - terminal host
//!
//! Binds the polling controller to stdin/stdout.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::Cli;
use std::sync::Arc;
use tictactoe_widget::{
    Controller, HttpGameClient, RoleSettings, StartControl, TerminalEvents, TerminalSurface,
};
use tokio::io::BufReader;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Logs go to stderr so the board stays readable on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let settings = cli.resolve_settings()?;
    info!(role = %settings.role().role(), game = %settings.game_endpoint(), "Starting widget");

    let (show_start, start_enabled) = match *settings.role() {
        RoleSettings::Owner {
            is_ready,
            is_active,
        } => (true, is_ready && !is_active),
        RoleSettings::Opponent => (false, false),
    };
    let start_control = StartControl::new(start_enabled);

    let api = Arc::new(HttpGameClient::from_settings(&settings)?);
    let surface = TerminalSurface::new(
        *settings.board_size(),
        start_control.clone(),
        show_start,
        std::io::stdout(),
    );
    let mut events = TerminalEvents::new(start_control);

    let controller = Controller::init(api, Box::new(surface), &mut events, &settings);
    events.run(BufReader::new(tokio::io::stdin())).await?;

    controller.shutdown();
    info!("Widget closed");
    Ok(())
}
