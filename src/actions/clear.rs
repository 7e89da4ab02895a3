use reqwest::StatusCode;

use crate::common::AppState;
use crate::error::AppError;
use crate::polling::worker;

pub const CONFIRM_PROMPT: &str =
    "Are you sure you want to clear the entire log file on the device? This action cannot be undone.";
pub const CLEARED_MESSAGE: &str = "Log file cleared successfully.";
pub const REJECTED_MESSAGE: &str = "Failed to clear log file.";
pub const FAILED_MESSAGE: &str = "An error occurred while trying to clear the log.";

/// How the clear action talks to the person who triggered it.
pub trait Interaction {
    /// Ask for explicit confirmation. `false` cancels the action.
    fn confirm(&mut self, prompt: &str) -> bool;

    /// Tell the user how it went.
    fn notify(&mut self, outcome: ClearOutcome, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The user declined; nothing was sent.
    Declined,
    /// The device accepted the clear and the table was refreshed.
    Cleared,
    /// The device answered with a non-success status.
    Rejected(StatusCode),
    /// The request never completed.
    Failed,
}

impl ClearOutcome {
    #[must_use]
    pub fn is_success(self) -> bool {
        matches!(self, Self::Cleared)
    }
}

/// Confirm, ask the device to wipe its log, then refresh the table on success.
pub struct ClearAction;

impl ClearAction {
    pub async fn run<I: Interaction>(state: &AppState, interaction: &mut I) -> ClearOutcome {
        if !interaction.confirm(CONFIRM_PROMPT) {
            tracing::debug!("Log clear declined");
            return ClearOutcome::Declined;
        }

        match state.monitor.clear_log().await {
            Ok(()) => {
                tracing::info!("Device log cleared");
                interaction.notify(ClearOutcome::Cleared, CLEARED_MESSAGE);
                worker::log_cycle(state.clone()).await;
                ClearOutcome::Cleared
            }
            Err(AppError::Rejected(status)) => {
                tracing::warn!(%status, "Device refused to clear log");
                let outcome = ClearOutcome::Rejected(status);
                interaction.notify(outcome, REJECTED_MESSAGE);
                outcome
            }
            Err(e) => {
                tracing::error!(error = %e, "Error clearing log");
                interaction.notify(ClearOutcome::Failed, FAILED_MESSAGE);
                ClearOutcome::Failed
            }
        }
    }
}
