//! Wire payloads that do not map one-to-one onto domain types.

use serde::{Deserialize, Serialize};

use crate::domain::{CoinAmount, DomainError};

/// Body of `POST /users/{id}/wallet/exchange`. The user travels in the path.
#[derive(Debug, Serialize)]
pub(super) struct ExchangeBodyDto {
    pub(super) amount: CoinAmount,
}

/// Error envelope the backend returns with non-success statuses.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub(super) struct ErrorEnvelopeDto(pub(super) DomainError);

impl ErrorEnvelopeDto {
    /// The backend's message, when `body` is a well-formed envelope.
    pub(super) fn message_from(body: &[u8]) -> Option<String> {
        serde_json::from_slice::<Self>(body)
            .ok()
            .map(|envelope| envelope.0.message().to_owned())
    }
}
