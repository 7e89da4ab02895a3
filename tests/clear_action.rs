//! Clear-log action: confirmation, device outcome and table refresh.
//!
//! Run with: cargo test --test clear_action

mod common;

use axum::http::StatusCode;
use tokio_test::assert_ok;

use common::FakeMonitor;
use tank_dashboard::actions::clear::{
    ClearAction, ClearOutcome, Interaction, CLEARED_MESSAGE, CONFIRM_PROMPT, FAILED_MESSAGE,
    REJECTED_MESSAGE,
};
use tank_dashboard::polling::worker;

/// Scripted user: answers the confirmation with a fixed choice and records
/// every prompt and notification.
struct ScriptedUser {
    answer: bool,
    prompts: Vec<String>,
    notices: Vec<(ClearOutcome, String)>,
}

impl ScriptedUser {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
            notices: Vec::new(),
        }
    }
}

impl Interaction for ScriptedUser {
    fn confirm(&mut self, prompt: &str) -> bool {
        self.prompts.push(prompt.to_string());
        self.answer
    }

    fn notify(&mut self, outcome: ClearOutcome, message: &str) {
        self.notices.push((outcome, message.to_string()));
    }
}

#[tokio::test]
async fn declining_sends_nothing() {
    let fake = FakeMonitor::start().await;
    let state = fake.state();
    let mut user = ScriptedUser::answering(false);

    let outcome = ClearAction::run(&state, &mut user).await;

    assert_eq!(outcome, ClearOutcome::Declined);
    assert_eq!(user.prompts, vec![CONFIRM_PROMPT.to_string()]);
    assert!(user.notices.is_empty());
    assert_eq!(fake.hits.clear(), 0);
    assert_eq!(fake.hits.log(), 0);
}

#[tokio::test]
async fn confirmed_clear_refreshes_table_once() {
    let fake = FakeMonitor::start().await;
    let state = fake.state();
    assert_ok!(worker::update_log_table(&state).await);
    assert_eq!(state.dashboard.read().await.page.log_rows().len(), 2);

    let mut user = ScriptedUser::answering(true);
    let outcome = ClearAction::run(&state, &mut user).await;

    assert_eq!(outcome, ClearOutcome::Cleared);
    assert_eq!(
        user.notices,
        vec![(ClearOutcome::Cleared, CLEARED_MESSAGE.to_string())]
    );
    assert_eq!(fake.hits.clear(), 1);
    // One fetch to seed the table, exactly one refresh after the clear
    assert_eq!(fake.hits.log(), 2);
    assert!(state.dashboard.read().await.page.log_rows().is_empty());
}

#[tokio::test]
async fn rejected_clear_leaves_table_alone() {
    let fake = FakeMonitor::start().await;
    fake.set_clear_status(StatusCode::INTERNAL_SERVER_ERROR);
    let state = fake.state();
    assert_ok!(worker::update_log_table(&state).await);

    let mut user = ScriptedUser::answering(true);
    let outcome = ClearAction::run(&state, &mut user).await;

    assert_eq!(
        outcome,
        ClearOutcome::Rejected(StatusCode::INTERNAL_SERVER_ERROR)
    );
    assert_eq!(user.notices.len(), 1);
    assert_eq!(user.notices[0].1, REJECTED_MESSAGE);
    assert_eq!(fake.hits.clear(), 1);
    assert_eq!(fake.hits.log(), 1);
    assert_eq!(state.dashboard.read().await.page.log_rows().len(), 2);
}

#[tokio::test]
async fn transport_failure_notifies_user() {
    let state = common::unreachable_state();
    let mut user = ScriptedUser::answering(true);

    let outcome = ClearAction::run(&state, &mut user).await;

    assert_eq!(outcome, ClearOutcome::Failed);
    assert!(!outcome.is_success());
    assert_eq!(
        user.notices,
        vec![(ClearOutcome::Failed, FAILED_MESSAGE.to_string())]
    );
}
