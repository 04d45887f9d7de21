//! Async exchange use case.
//!
//! [`WalletExchangeService`] sends a validated request through the
//! [`ExchangeGateway`] under a bounded wait, then reloads the wallet from the
//! [`UserProfileQuery`] so callers never have to guess the new balances.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use crate::domain::ports::{
    ExchangeGateway, ExchangeGatewayError, ExchangeRequest, UserProfileQuery,
};
use crate::domain::{CoinAmount, UserId, Wallet};

use super::error::ExchangeError;

/// Default wait for the backend to confirm an exchange.
pub const DEFAULT_EXCHANGE_TIMEOUT: Duration = Duration::from_secs(15);

/// A confirmed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExchangeReceipt {
    /// Coins the backend converted.
    pub amount: CoinAmount,
    /// Wallet reloaded after confirmation, or `None` if the reload failed.
    pub refreshed_wallet: Option<Wallet>,
}

/// Exchange use case over the remote gateway and profile query.
pub struct WalletExchangeService<G, Q> {
    gateway: Arc<G>,
    profiles: Arc<Q>,
    timeout: Duration,
}

impl<G, Q> Clone for WalletExchangeService<G, Q> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            profiles: Arc::clone(&self.profiles),
            timeout: self.timeout,
        }
    }
}

impl<G, Q> WalletExchangeService<G, Q> {
    /// Create a service with the default timeout.
    pub fn new(gateway: Arc<G>, profiles: Arc<Q>) -> Self {
        Self {
            gateway,
            profiles,
            timeout: DEFAULT_EXCHANGE_TIMEOUT,
        }
    }

    /// Override the bounded wait applied to each remote call.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The bounded wait applied to each remote call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn timeout_ms(&self) -> u64 {
        u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX)
    }

    async fn bounded<F: Future>(&self, call: F) -> Result<F::Output, ExchangeError> {
        tokio::time::timeout(self.timeout, call)
            .await
            .map_err(|_| ExchangeError::Timeout {
                after_ms: self.timeout_ms(),
            })
    }

    fn map_gateway_error(&self, error: ExchangeGatewayError) -> ExchangeError {
        match error {
            // The adapter's own request limit fired before ours did.
            ExchangeGatewayError::Timeout => ExchangeError::Timeout {
                after_ms: self.timeout_ms(),
            },
            other => ExchangeError::ServiceError {
                message: other.to_string(),
            },
        }
    }
}

impl<G, Q> WalletExchangeService<G, Q>
where
    G: ExchangeGateway,
    Q: UserProfileQuery,
{
    /// Submit the exchange and wait for the backend to confirm it.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::Timeout`] when no answer arrives in time, and
    /// [`ExchangeError::ServiceError`] for every other gateway failure. A
    /// failed wallet reload after confirmation is not an error.
    pub async fn exchange(&self, request: &ExchangeRequest) -> Result<ExchangeReceipt, ExchangeError> {
        let amount = request.amount.get();
        let outcome = self
            .bounded(self.gateway.exchange_coins_to_diamonds(request))
            .await
            .and_then(|result| result.map_err(|err| self.map_gateway_error(err)));

        if let Err(err) = outcome {
            warn!(
                user_id = %request.user_id,
                amount,
                code = err.code(),
                error = %err,
                "coin exchange failed"
            );
            return Err(err);
        }
        info!(user_id = %request.user_id, amount, "coin exchange confirmed");

        let refreshed_wallet = self.refresh_wallet(&request.user_id).await.ok();
        Ok(ExchangeReceipt {
            amount: request.amount,
            refreshed_wallet,
        })
    }

    /// Reload the authoritative wallet snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ExchangeError::Timeout`] or [`ExchangeError::ServiceError`]
    /// when the profile cannot be loaded.
    pub async fn refresh_wallet(&self, user_id: &UserId) -> Result<Wallet, ExchangeError> {
        let result = self
            .bounded(self.profiles.fetch_profile(user_id))
            .await
            .and_then(|fetched| {
                fetched.map_err(|err| ExchangeError::ServiceError {
                    message: err.to_string(),
                })
            });
        match result {
            Ok(profile) => Ok(profile.wallet),
            Err(err) => {
                warn!(user_id = %user_id, error = %err, "wallet refresh failed");
                Err(err)
            }
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
