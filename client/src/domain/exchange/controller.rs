//! Event-driven driver tying the dialog to the async service.
//!
//! The controller plays the part of the UI component: it owns one dialog,
//! the latest authoritative wallet snapshot, and at most one spawned exchange
//! task. [`ExchangeController::next_settlement`] joins that task and applies
//! its outcome, so a task that panics or is cancelled still settles the
//! dialog.

use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, warn};

use crate::domain::ports::{ExchangeGateway, UserProfileQuery};
use crate::domain::{UserId, Wallet};

use super::dialog::{ExchangeDialog, Settlement, SubmissionTicket};
use super::error::{ExchangeError, Notice};
use super::service::{ExchangeReceipt, WalletExchangeService};

#[derive(Debug)]
struct InFlight {
    ticket: SubmissionTicket,
    task: JoinHandle<Result<ExchangeReceipt, ExchangeError>>,
}

/// One exchange dialog instance bound to a user and a service.
pub struct ExchangeController<G, Q> {
    service: WalletExchangeService<G, Q>,
    user_id: UserId,
    wallet: Wallet,
    dialog: ExchangeDialog,
    in_flight: Option<InFlight>,
}

impl<G, Q> ExchangeController<G, Q> {
    /// Bind a closed dialog to `user_id`, starting from `wallet`.
    pub fn new(service: WalletExchangeService<G, Q>, user_id: UserId, wallet: Wallet) -> Self {
        Self {
            service,
            user_id,
            wallet,
            dialog: ExchangeDialog::new(),
            in_flight: None,
        }
    }

    /// Latest authoritative wallet snapshot.
    pub fn wallet(&self) -> Wallet {
        self.wallet
    }

    /// The dialog as the user currently sees it.
    pub fn dialog(&self) -> &ExchangeDialog {
        &self.dialog
    }

    /// Whether a request is waiting on the backend.
    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Open the dialog, refusing when the snapshot holds no coins.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::NoFunds`] when `coins == 0`.
    pub fn open(&mut self) -> Result<(), ExchangeError> {
        self.dialog.open(&self.wallet)
    }

    /// Replace the amount text.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        self.dialog.edit(text)
    }

    /// Close the dialog and abandon any pending request.
    pub fn dismiss(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
            debug!(user_id = %self.user_id, "pending exchange abandoned");
        }
        self.dialog.dismiss();
    }
}

fn task_failure(err: &JoinError) -> ExchangeError {
    let message = if err.is_cancelled() {
        "exchange task was cancelled"
    } else {
        "exchange task stopped unexpectedly"
    };
    ExchangeError::ServiceError {
        message: message.to_owned(),
    }
}

impl<G, Q> ExchangeController<G, Q>
where
    G: ExchangeGateway + 'static,
    Q: UserProfileQuery + 'static,
{
    /// Validate the typed amount and send it to the backend in the
    /// background.
    ///
    /// # Errors
    ///
    /// Validation and state errors from [`ExchangeDialog::submit`]; no
    /// request is sent in those cases.
    ///
    /// # Panics
    ///
    /// Must be called from within a Tokio runtime.
    pub fn submit(&mut self) -> Result<(), ExchangeError> {
        let submission = self.dialog.submit(&self.user_id, &self.wallet)?;
        let service = self.service.clone();
        let request = submission.request;
        let task = tokio::spawn(async move { service.exchange(&request).await });
        self.in_flight = Some(InFlight {
            ticket: submission.ticket,
            task,
        });
        Ok(())
    }

    /// Wait for the pending request and apply its outcome.
    ///
    /// Returns `None` straight away when nothing is in flight. A task that
    /// panicked or was cancelled settles as [`ExchangeError::ServiceError`].
    /// On success the wallet snapshot is replaced by the refreshed one when
    /// the reload worked.
    pub async fn next_settlement(&mut self) -> Option<Notice> {
        let in_flight = self.in_flight.as_mut()?;
        let joined = (&mut in_flight.task).await;
        let ticket = in_flight.ticket;
        self.in_flight = None;

        let outcome = joined.unwrap_or_else(|err| {
            warn!(user_id = %self.user_id, error = %err, "exchange task failed");
            Err(task_failure(&err))
        });
        let refreshed = outcome
            .as_ref()
            .ok()
            .and_then(|receipt| receipt.refreshed_wallet);
        match self.dialog.settle(ticket, outcome) {
            Settlement::Stale => {
                debug!(user_id = %self.user_id, "stale exchange outcome dropped");
                None
            }
            Settlement::Applied(notice) => {
                if let Some(wallet) = refreshed {
                    self.wallet = wallet;
                }
                Some(notice)
            }
        }
    }

    /// Reload the wallet snapshot from the backend.
    ///
    /// # Errors
    ///
    /// Propagates [`WalletExchangeService::refresh_wallet`] failures and keeps
    /// the previous snapshot.
    pub async fn refresh(&mut self) -> Result<Wallet, ExchangeError> {
        let wallet = self.service.refresh_wallet(&self.user_id).await?;
        self.wallet = wallet;
        Ok(wallet)
    }
}

impl<G, Q> Drop for ExchangeController<G, Q> {
    fn drop(&mut self) {
        if let Some(in_flight) = self.in_flight.take() {
            in_flight.task.abort();
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
