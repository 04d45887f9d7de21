//! Reqwest-backed rooms API adapter.
//!
//! This adapter owns transport details only: URL layout, the request
//! timeout, HTTP status mapping, and JSON decoding into domain types.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, StatusCode, Url};
use serde::Serialize;
use tracing::debug;

use super::dto::{ErrorEnvelopeDto, ExchangeBodyDto};
use crate::domain::ports::{
    ExchangeGateway, ExchangeGatewayError, ExchangeRequest, UserProfileCommand,
    UserProfileCommandError, UserProfileQuery, UserProfileQueryError,
};
use crate::domain::{ProfileUpdate, UserId, UserProfile};

const USER_AGENT: &str = concat!("rooms-client/", env!("CARGO_PKG_VERSION"));

/// Transport outcome shared by every endpoint before it is narrowed to the
/// calling port's error type.
#[derive(Debug, Clone, PartialEq, Eq)]
enum HttpFailure {
    Timeout,
    Rejected { status: u16, message: String },
    Transport(String),
    Decode(String),
}

impl From<HttpFailure> for ExchangeGatewayError {
    fn from(value: HttpFailure) -> Self {
        match value {
            HttpFailure::Timeout => Self::timeout(),
            HttpFailure::Rejected { status, message } => Self::rejected(status, message),
            HttpFailure::Transport(message) => Self::transport(message),
            HttpFailure::Decode(message) => Self::decode(message),
        }
    }
}

impl From<HttpFailure> for UserProfileCommandError {
    fn from(value: HttpFailure) -> Self {
        match value {
            HttpFailure::Timeout => Self::timeout(),
            HttpFailure::Rejected { status, message } => Self::rejected(status, message),
            // The command ignores response bodies, so nothing is decoded.
            HttpFailure::Transport(message) | HttpFailure::Decode(message) => {
                Self::transport(message)
            }
        }
    }
}

impl From<HttpFailure> for UserProfileQueryError {
    fn from(value: HttpFailure) -> Self {
        match value {
            HttpFailure::Timeout => Self::timeout(),
            HttpFailure::Rejected { status: 404, .. } => Self::not_found(),
            HttpFailure::Rejected { status, message } => Self::rejected(status, message),
            HttpFailure::Transport(message) => Self::transport(message),
            HttpFailure::Decode(message) => Self::decode(message),
        }
    }
}

/// Rooms backend client implementing the exchange and profile ports.
#[derive(Debug, Clone)]
pub struct HttpRoomsApi {
    client: Client,
    base_url: Url,
}

impl HttpRoomsApi {
    /// Build an adapter whose requests give up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self { client, base_url })
    }

    /// Base URL every endpoint is resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn user_url(&self, user_id: &UserId, tail: &[&str]) -> Result<Url, HttpFailure> {
        user_url(&self.base_url, user_id, tail)
    }

    async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
    ) -> Result<Vec<u8>, HttpFailure> {
        debug!(%method, %url, "rooms api request");
        let mut request = self
            .client
            .request(method, url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        Ok(body.to_vec())
    }
}

#[async_trait]
impl ExchangeGateway for HttpRoomsApi {
    async fn exchange_coins_to_diamonds(
        &self,
        request: &ExchangeRequest,
    ) -> Result<(), ExchangeGatewayError> {
        let url = self.user_url(&request.user_id, &["wallet", "exchange"])?;
        let body = ExchangeBodyDto {
            amount: request.amount,
        };
        self.send(Method::POST, url, Some(&body)).await?;
        Ok(())
    }
}

#[async_trait]
impl UserProfileCommand for HttpRoomsApi {
    async fn update_user_profile(
        &self,
        user_id: &UserId,
        update: &ProfileUpdate,
    ) -> Result<(), UserProfileCommandError> {
        let url = self.user_url(user_id, &["profile"])?;
        self.send(Method::PATCH, url, Some(update)).await?;
        Ok(())
    }
}

#[async_trait]
impl UserProfileQuery for HttpRoomsApi {
    async fn fetch_profile(&self, user_id: &UserId) -> Result<UserProfile, UserProfileQueryError> {
        let url = self.user_url(user_id, &[])?;
        let body = self.send::<()>(Method::GET, url, None).await?;
        Ok(decode_profile(&body)?)
    }
}

fn user_url(base: &Url, user_id: &UserId, tail: &[&str]) -> Result<Url, HttpFailure> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HttpFailure::Transport(format!("base URL {base} cannot carry a path")))?
        .pop_if_empty()
        .push("users")
        .push(user_id.as_ref())
        .extend(tail);
    Ok(url)
}

fn decode_profile(body: &[u8]) -> Result<UserProfile, HttpFailure> {
    serde_json::from_slice(body)
        .map_err(|error| HttpFailure::Decode(format!("invalid profile JSON payload: {error}")))
}

fn map_transport_error(error: reqwest::Error) -> HttpFailure {
    if error.is_timeout() {
        HttpFailure::Timeout
    } else {
        HttpFailure::Transport(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> HttpFailure {
    match status {
        StatusCode::REQUEST_TIMEOUT | StatusCode::GATEWAY_TIMEOUT => HttpFailure::Timeout,
        _ => HttpFailure::Rejected {
            status: status.as_u16(),
            message: ErrorEnvelopeDto::message_from(body).unwrap_or_else(|| body_preview(body)),
        },
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
