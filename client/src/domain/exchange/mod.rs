//! Coins-to-diamonds exchange flow.
//!
//! - [`ExchangeDialog`]: the synchronous state machine behind the dialog.
//! - [`WalletExchangeService`]: the bounded remote call plus wallet refresh.
//! - [`ExchangeController`]: spawns the call and feeds results back into
//!   the dialog.
//!
//! The client only gates amounts against its snapshot. Balances change when
//! the backend says so and a fresh snapshot is loaded.

mod controller;
mod dialog;
mod error;
mod service;

pub use controller::ExchangeController;
pub use dialog::{DialogState, ExchangeDialog, Settlement, Submission, SubmissionTicket};
pub use error::{ExchangeError, Notice};
pub use service::{DEFAULT_EXCHANGE_TIMEOUT, ExchangeReceipt, WalletExchangeService};
