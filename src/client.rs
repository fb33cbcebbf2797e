//! Game and session endpoints.

use crate::error::{TransportError, TransportErrorKind};
use crate::settings::WidgetSettings;
use crate::types::{Coords, GameStatusResponse, MoveRequest, SessionStatus};
use async_trait::async_trait;
use reqwest::header::{COOKIE, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument};

/// The remote game service, as seen by the controller.
///
/// Every method resolves to either a decoded payload or a
/// [`TransportError`]; no other failure mode exists.
#[async_trait]
pub trait GameApi: Send + Sync {
    /// `GET` the game endpoint.
    async fn fetch_game(&self) -> Result<GameStatusResponse, TransportError>;

    /// `POST` a move to the game endpoint.
    async fn submit_move(&self, coords: Coords) -> Result<GameStatusResponse, TransportError>;

    /// `GET` the session endpoint.
    async fn fetch_session(&self) -> Result<SessionStatus, TransportError>;

    /// `POST` to the session endpoint to start a new game.
    async fn create_session(&self) -> Result<(), TransportError>;
}

/// reqwest-backed [`GameApi`].
///
/// Keeps a cookie store so the server can recognize the player across
/// requests.
#[derive(Debug, Clone)]
pub struct HttpGameClient {
    client: reqwest::Client,
    game_url: String,
    session_url: Option<String>,
}

impl HttpGameClient {
    /// Builds a client for the given endpoints.
    #[instrument(skip(cookie))]
    pub fn new(
        game_url: String,
        session_url: Option<String>,
        cookie: Option<&str>,
    ) -> Result<Self, TransportError> {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            let value = HeaderValue::from_str(cookie).map_err(|e| {
                TransportError::new(TransportErrorKind::Setup(format!("invalid cookie: {}", e)))
            })?;
            headers.insert(COOKIE, value);
        }

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()?;

        info!("HTTP game client ready");
        Ok(Self {
            client,
            game_url,
            session_url,
        })
    }

    /// Builds a client from resolved widget settings.
    pub fn from_settings(settings: &WidgetSettings) -> Result<Self, TransportError> {
        Self::new(
            settings.game_endpoint().clone(),
            settings.session_endpoint().clone(),
            settings.cookie().as_deref(),
        )
    }

    fn session_url(&self) -> Result<&str, TransportError> {
        self.session_url
            .as_deref()
            .ok_or_else(|| TransportError::new(TransportErrorKind::MissingEndpoint("session")))
    }

    /// Rejects non-2xx responses, then decodes the JSON body.
    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, TransportError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(TransportErrorKind::Status(status.as_u16())));
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl GameApi for HttpGameClient {
    #[instrument(skip(self), fields(url = %self.game_url))]
    async fn fetch_game(&self) -> Result<GameStatusResponse, TransportError> {
        let response = self.client.get(&self.game_url).send().await?;
        let status: GameStatusResponse = Self::decode(response).await?;
        debug!(
            is_active_player = status.is_active_player,
            is_ended = status.is_ended,
            num_symbols = status.num_symbols,
            "Fetched game"
        );
        Ok(status)
    }

    #[instrument(skip(self), fields(url = %self.game_url))]
    async fn submit_move(&self, coords: Coords) -> Result<GameStatusResponse, TransportError> {
        info!(row = coords.row, col = coords.col, "Submitting move");
        let response = self
            .client
            .post(&self.game_url)
            .json(&MoveRequest::new(coords))
            .send()
            .await?;
        Self::decode(response).await
    }

    #[instrument(skip(self))]
    async fn fetch_session(&self) -> Result<SessionStatus, TransportError> {
        let response = self.client.get(self.session_url()?).send().await?;
        let status: SessionStatus = Self::decode(response).await?;
        debug!(is_ready = status.is_ready, "Fetched session");
        Ok(status)
    }

    #[instrument(skip(self))]
    async fn create_session(&self) -> Result<(), TransportError> {
        let response = self.client.post(self.session_url()?).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::new(TransportErrorKind::Status(status.as_u16())));
        }
        info!(status = %status, "Session created");
        Ok(())
    }
}
