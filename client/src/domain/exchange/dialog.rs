//! Exchange dialog state machine.
//!
//! The dialog is an explicit three-state machine: [`DialogState::Closed`],
//! [`DialogState::Editing`] and [`DialogState::Submitting`]. Being in
//! `Submitting` is what keeps a second request from leaving the same dialog;
//! no other lock is involved.
//!
//! Each accepted submission is stamped with a generation number carried by
//! its [`SubmissionTicket`]. An outcome is only applied when its ticket still
//! matches the submission the dialog is waiting on, so results arriving after
//! the dialog was dismissed (or dismissed and reopened) are dropped.

use crate::domain::ports::ExchangeRequest;
use crate::domain::{AmountRejection, CoinAmount, UserId, Wallet};

use super::error::{ExchangeError, Notice};

/// Where the dialog currently is.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogState {
    /// Not visible.
    #[default]
    Closed,
    /// Accepting input, possibly showing the last validation failure.
    Editing {
        /// Amount text exactly as typed.
        input: String,
        /// Why the last submit was refused, cleared by the next edit.
        error: Option<AmountRejection>,
    },
    /// Waiting on the backend; input is frozen.
    Submitting {
        /// Amount text that was submitted, restored if the request fails.
        input: String,
        /// Validated amount sent to the backend.
        amount: CoinAmount,
    },
}

/// Identifies one accepted submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionTicket {
    generation: u64,
}

/// An accepted submission: the request to send and the ticket to settle it
/// with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    /// Hand this back to [`ExchangeDialog::settle`] with the outcome.
    pub ticket: SubmissionTicket,
    /// Payload for the exchange gateway.
    pub request: ExchangeRequest,
}

/// Result of handing an outcome to [`ExchangeDialog::settle`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Settlement {
    /// The outcome belonged to the pending submission and was applied.
    Applied(Notice),
    /// The submission was abandoned; the outcome was discarded.
    Stale,
}

/// Per-instance exchange dialog.
#[derive(Debug, Clone, Default)]
pub struct ExchangeDialog {
    state: DialogState,
    generation: u64,
}

impl ExchangeDialog {
    /// A closed dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &DialogState {
        &self.state
    }

    /// Whether the dialog is visible.
    pub fn is_open(&self) -> bool {
        !matches!(self.state, DialogState::Closed)
    }

    /// Whether a submit would be accepted for validation.
    pub fn can_submit(&self) -> bool {
        matches!(self.state, DialogState::Editing { .. })
    }

    /// Text in the amount field, if the dialog is open.
    pub fn input(&self) -> Option<&str> {
        match &self.state {
            DialogState::Closed => None,
            DialogState::Editing { input, .. } | DialogState::Submitting { input, .. } => {
                Some(input.as_str())
            }
        }
    }

    /// Validation failure currently shown under the amount field.
    pub fn error(&self) -> Option<AmountRejection> {
        match self.state {
            DialogState::Editing { error, .. } => error,
            _ => None,
        }
    }

    /// Open the dialog if the wallet holds any coins.
    ///
    /// Opening an already open dialog leaves it untouched.
    pub fn open(&mut self, wallet: &Wallet) -> Result<(), ExchangeError> {
        if self.is_open() {
            return Ok(());
        }
        if !wallet.has_coins() {
            return Err(ExchangeError::NoFunds);
        }
        self.state = DialogState::Editing {
            input: String::new(),
            error: None,
        };
        Ok(())
    }

    /// Replace the amount text. Returns `false` when input is not accepted.
    pub fn edit(&mut self, text: impl Into<String>) -> bool {
        match &mut self.state {
            DialogState::Editing { input, error } => {
                *input = text.into();
                *error = None;
                true
            }
            _ => false,
        }
    }

    /// Validate the amount against `wallet` and, if it passes, move to
    /// `Submitting`.
    ///
    /// # Errors
    ///
    /// [`ExchangeError::InvalidAmount`] keeps the dialog in `Editing` with
    /// the rejection recorded. [`ExchangeError::AlreadySubmitting`] and
    /// [`ExchangeError::DialogClosed`] leave the state unchanged.
    pub fn submit(
        &mut self,
        user_id: &UserId,
        wallet: &Wallet,
    ) -> Result<Submission, ExchangeError> {
        let (input, error) = match &mut self.state {
            DialogState::Closed => return Err(ExchangeError::DialogClosed),
            DialogState::Submitting { .. } => return Err(ExchangeError::AlreadySubmitting),
            DialogState::Editing { input, error } => (input, error),
        };

        let amount = match CoinAmount::parse(input, wallet) {
            Ok(amount) => amount,
            Err(rejection) => {
                *error = Some(rejection);
                return Err(rejection.into());
            }
        };

        let input = std::mem::take(input);
        self.generation += 1;
        self.state = DialogState::Submitting { input, amount };
        Ok(Submission {
            ticket: SubmissionTicket {
                generation: self.generation,
            },
            request: ExchangeRequest {
                user_id: user_id.clone(),
                amount,
            },
        })
    }

    /// Apply the backend outcome for `ticket`.
    ///
    /// Success closes the dialog and clears the input. Failure returns to
    /// `Editing` with the submitted text intact.
    pub fn settle<T>(
        &mut self,
        ticket: SubmissionTicket,
        outcome: Result<T, ExchangeError>,
    ) -> Settlement {
        let DialogState::Submitting { input, amount } = &mut self.state else {
            return Settlement::Stale;
        };
        if ticket.generation != self.generation {
            return Settlement::Stale;
        }

        let notice = match outcome {
            Ok(_) => {
                let amount = *amount;
                self.state = DialogState::Closed;
                Notice::ExchangeSucceeded { amount }
            }
            Err(err) => {
                let input = std::mem::take(input);
                self.state = DialogState::Editing { input, error: None };
                Notice::ExchangeFailed(err)
            }
        };
        Settlement::Applied(notice)
    }

    /// Close the dialog from any state.
    ///
    /// A pending submission becomes stale and its outcome will be discarded.
    pub fn dismiss(&mut self) {
        if matches!(self.state, DialogState::Submitting { .. }) {
            self.generation += 1;
        }
        self.state = DialogState::Closed;
    }
}

#[cfg(test)]
#[path = "dialog_tests.rs"]
mod tests;
