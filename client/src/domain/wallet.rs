//! Wallet balances and exchange amounts.
//!
//! The wallet is a read-only snapshot of the authoritative balances held by
//! the backend. Nothing in this crate adds to or subtracts from it; a new
//! snapshot replaces the old one after the backend confirms a mutation.

use std::fmt;
use std::num::IntErrorKind;

use serde::{Deserialize, Serialize};

/// Coin and diamond balances as last reported by the backend.
///
/// Both balances are unsigned, so a negative balance cannot be represented.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wallet {
    /// Premium currency. Only top-ups and confirmed exchanges change it.
    pub diamonds: u64,
    /// Earned currency, convertible into diamonds.
    pub coins: u64,
}

impl Wallet {
    /// Build a wallet snapshot.
    pub const fn new(coins: u64, diamonds: u64) -> Self {
        Self { diamonds, coins }
    }

    /// Whether there is anything to exchange.
    pub const fn has_coins(&self) -> bool {
        self.coins > 0
    }
}

/// Why a free-text amount was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountRejection {
    /// The input is not an integer.
    NotANumber,
    /// The integer is zero or negative.
    NotPositive,
    /// The integer is larger than the coin balance snapshot.
    ExceedsBalance { available: u64 },
}

impl AmountRejection {
    /// Stable code for the rejection.
    pub fn code(self) -> &'static str {
        match self {
            Self::NotANumber => "not_a_number",
            Self::NotPositive => "not_positive",
            Self::ExceedsBalance { .. } => "exceeds_balance",
        }
    }
}

impl fmt::Display for AmountRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotANumber => write!(f, "amount must be a whole number"),
            Self::NotPositive => write!(f, "amount must be greater than zero"),
            Self::ExceedsBalance { available } => {
                write!(f, "amount must not exceed the {available} coins available")
            }
        }
    }
}

/// A positive coin amount validated against a balance snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(into = "u64")]
pub struct CoinAmount(u64);

impl CoinAmount {
    /// Validate free-text input against the current coin balance.
    ///
    /// Checks run in a fixed order: the trimmed input must parse as an
    /// integer, then be positive, then be no larger than `wallet.coins`.
    ///
    /// # Examples
    /// ```
    /// use rooms_client::domain::{AmountRejection, CoinAmount, Wallet};
    ///
    /// let wallet = Wallet::new(100, 0);
    /// assert_eq!(CoinAmount::parse(" 50 ", &wallet).map(CoinAmount::get), Ok(50));
    /// assert_eq!(
    ///     CoinAmount::parse("150", &wallet),
    ///     Err(AmountRejection::ExceedsBalance { available: 100 })
    /// );
    /// ```
    pub fn parse(input: &str, wallet: &Wallet) -> Result<Self, AmountRejection> {
        let exceeds = AmountRejection::ExceedsBalance {
            available: wallet.coins,
        };
        let value = match input.trim().parse::<i128>() {
            Ok(value) => value,
            Err(err) => {
                return Err(match err.kind() {
                    IntErrorKind::PosOverflow => exceeds,
                    IntErrorKind::NegOverflow => AmountRejection::NotPositive,
                    _ => AmountRejection::NotANumber,
                });
            }
        };
        if value <= 0 {
            return Err(AmountRejection::NotPositive);
        }
        let amount = u64::try_from(value).map_err(|_| exceeds)?;
        if amount > wallet.coins {
            return Err(exceeds);
        }
        Ok(Self(amount))
    }

    /// The validated amount.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl From<CoinAmount> for u64 {
    fn from(value: CoinAmount) -> Self {
        value.0
    }
}

impl fmt::Display for CoinAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for amount validation.
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    const WALLET: Wallet = Wallet::new(100, 7);

    #[rstest]
    #[case("1", 1)]
    #[case("50", 50)]
    #[case("100", 100)]
    #[case("  42\n", 42)]
    #[case("+5", 5)]
    fn accepts_amounts_within_balance(#[case] input: &str, #[case] expected: u64) {
        assert_eq!(CoinAmount::parse(input, &WALLET).map(CoinAmount::get), Ok(expected));
    }

    #[rstest]
    #[case("", AmountRejection::NotANumber)]
    #[case("abc", AmountRejection::NotANumber)]
    #[case("12.5", AmountRejection::NotANumber)]
    #[case("1e3", AmountRejection::NotANumber)]
    #[case("٥٠", AmountRejection::NotANumber)]
    #[case("0", AmountRejection::NotPositive)]
    #[case("-5", AmountRejection::NotPositive)]
    #[case("-999999999999999999999999999999999999999999", AmountRejection::NotPositive)]
    #[case("101", AmountRejection::ExceedsBalance { available: 100 })]
    #[case("150", AmountRejection::ExceedsBalance { available: 100 })]
    #[case("18446744073709551616", AmountRejection::ExceedsBalance { available: 100 })]
    #[case("999999999999999999999999999999999999999999", AmountRejection::ExceedsBalance { available: 100 })]
    fn rejects_invalid_amounts(#[case] input: &str, #[case] expected: AmountRejection) {
        assert_eq!(CoinAmount::parse(input, &WALLET), Err(expected));
    }

    #[rstest]
    fn empty_wallet_rejects_every_positive_amount() {
        let empty = Wallet::default();
        assert!(!empty.has_coins());
        assert_eq!(
            CoinAmount::parse("1", &empty),
            Err(AmountRejection::ExceedsBalance { available: 0 })
        );
    }

    #[rstest]
    fn wallet_uses_camel_case_wire_format() {
        let wallet: Wallet =
            serde_json::from_value(json!({"coins": 100, "diamonds": 7})).expect("wallet json");
        assert_eq!(wallet, WALLET);
    }

    #[rstest]
    #[case::negative_coins(json!({"coins": -1, "diamonds": 0}))]
    #[case::negative_diamonds(json!({"coins": 0, "diamonds": -3}))]
    #[case::missing_diamonds(json!({"coins": 5}))]
    #[case::missing_coins(json!({"diamonds": 5}))]
    fn wallet_rejects_negative_or_missing_balances(#[case] body: serde_json::Value) {
        let result: Result<Wallet, _> = serde_json::from_value(body);
        assert!(result.is_err());
    }

    #[rstest]
    #[case(AmountRejection::NotANumber, "not_a_number")]
    #[case(AmountRejection::NotPositive, "not_positive")]
    #[case(AmountRejection::ExceedsBalance { available: 3 }, "exceeds_balance")]
    fn rejection_codes_are_stable(#[case] rejection: AmountRejection, #[case] code: &str) {
        assert_eq!(rejection.code(), code);
    }
}
