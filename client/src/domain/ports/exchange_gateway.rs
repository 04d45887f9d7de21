//! Driven port for the remote coins-to-diamonds exchange.
//!
//! The backend owns the conversion rate and the balance arithmetic. The
//! client only submits an amount and waits for confirmation.

use async_trait::async_trait;
use serde::Serialize;

use super::define_port_error;
use crate::domain::{CoinAmount, UserId};

/// A validated exchange submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExchangeRequest {
    /// Wallet owner.
    pub user_id: UserId,
    /// Coins to convert; never more than the snapshot held at submission.
    pub amount: CoinAmount,
}

define_port_error! {
    /// Errors raised by exchange gateway adapters.
    pub enum ExchangeGatewayError {
        /// The adapter gave up waiting for the backend.
        Timeout => "exchange request timed out",
        /// The backend answered with a non-success status.
        Rejected { status: u16, message: String } => "exchange rejected with status {status}: {message}",
        /// The request never produced a response.
        Transport { message: String } => "exchange transport failed: {message}",
        /// The response could not be decoded.
        Decode { message: String } => "exchange response could not be decoded: {message}",
    }
}

/// Port for `exchangeCoinsToDiamonds`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ExchangeGateway: Send + Sync {
    /// Ask the backend to convert `request.amount` coins into diamonds.
    ///
    /// Success means the backend applied the mutation atomically; the new
    /// balances must be fetched separately.
    async fn exchange_coins_to_diamonds(
        &self,
        request: &ExchangeRequest,
    ) -> Result<(), ExchangeGatewayError>;
}

/// Gateway that confirms every exchange without contacting a backend.
#[derive(Debug, Default, Clone, Copy)]
pub struct FixtureExchangeGateway;

#[async_trait]
impl ExchangeGateway for FixtureExchangeGateway {
    async fn exchange_coins_to_diamonds(
        &self,
        _request: &ExchangeRequest,
    ) -> Result<(), ExchangeGatewayError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::domain::Wallet;
    use rstest::rstest;
    use serde_json::json;

    fn request(amount: &str) -> ExchangeRequest {
        ExchangeRequest {
            user_id: UserId::new("11111111-1111-1111-1111-111111111111").expect("user id"),
            amount: CoinAmount::parse(amount, &Wallet::new(100, 0)).expect("amount"),
        }
    }

    #[rstest]
    fn request_serializes_in_camel_case() {
        assert_eq!(
            serde_json::to_value(request("50")).expect("serialize request"),
            json!({"userId": "11111111-1111-1111-1111-111111111111", "amount": 50})
        );
    }

    #[rstest]
    #[case(ExchangeGatewayError::timeout(), "timeout")]
    #[case(ExchangeGatewayError::rejected(422_u16, "insufficient coins"), "rejected")]
    #[case(ExchangeGatewayError::transport("connection reset"), "transport")]
    #[case(ExchangeGatewayError::decode("eof"), "decode")]
    fn error_codes(#[case] err: ExchangeGatewayError, #[case] code: &str) {
        assert_eq!(err.code(), code);
    }

    #[rstest]
    #[tokio::test]
    async fn fixture_gateway_confirms() {
        let result = FixtureExchangeGateway
            .exchange_coins_to_diamonds(&request("1"))
            .await;
        assert_eq!(result, Ok(()));
    }
}
