//! Exchange failures and the notices shown for them.

use crate::domain::{AmountRejection, CoinAmount};

/// Everything that can stop an exchange.
///
/// None of these is fatal: the dialog always returns to a state from which
/// the user can retry or close it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ExchangeError {
    /// The typed amount failed local validation.
    #[error("invalid amount: {0}")]
    InvalidAmount(AmountRejection),
    /// The wallet holds no coins, so the dialog refuses to open.
    #[error("no coins to exchange")]
    NoFunds,
    /// A request from this dialog is still in flight.
    #[error("an exchange is already being submitted")]
    AlreadySubmitting,
    /// The dialog is not open.
    #[error("the exchange dialog is closed")]
    DialogClosed,
    /// The backend rejected the exchange or could not be reached.
    #[error("exchange failed: {message}")]
    ServiceError { message: String },
    /// No confirmation arrived within the allowed wait.
    #[error("exchange timed out after {after_ms} ms")]
    Timeout { after_ms: u64 },
}

impl ExchangeError {
    /// Stable code used by notices and logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidAmount(_) => "invalid_amount",
            Self::NoFunds => "no_funds",
            Self::AlreadySubmitting => "already_submitting",
            Self::DialogClosed => "dialog_closed",
            Self::ServiceError { .. } => "service_error",
            Self::Timeout { .. } => "timeout",
        }
    }
}

impl From<AmountRejection> for ExchangeError {
    fn from(value: AmountRejection) -> Self {
        Self::InvalidAmount(value)
    }
}

/// Blocking notice surfaced to the user after an exchange attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// The backend confirmed the exchange.
    ExchangeSucceeded { amount: CoinAmount },
    /// The attempt failed; the dialog stays usable.
    ExchangeFailed(ExchangeError),
}

impl Notice {
    /// Stable code for the notice.
    pub fn code(&self) -> &'static str {
        match self {
            Self::ExchangeSucceeded { .. } => "exchange_succeeded",
            Self::ExchangeFailed(err) => err.code(),
        }
    }

    /// Whether the notice reports a failure.
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::ExchangeFailed(_))
    }
}

impl From<ExchangeError> for Notice {
    fn from(value: ExchangeError) -> Self {
        Self::ExchangeFailed(value)
    }
}
