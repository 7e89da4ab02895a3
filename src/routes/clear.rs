use axum::{
    extract::State,
    http::header,
    response::{Html, IntoResponse, Redirect},
    Form,
};
use serde::Deserialize;

use crate::actions::clear::{ClearAction, ClearOutcome, Interaction, CONFIRM_PROMPT};
use crate::common::AppState;
use crate::routes::dashboard::{NOTICE_LOCATION, STYLE};
use crate::routes::escape_html;
use crate::views::page::NoticeKind;

#[derive(Debug, Deserialize)]
pub struct ClearForm {
    #[serde(default)]
    pub confirmed: bool,
}

/// Answers the confirmation from the submitted form and keeps the
/// notification for the next page view.
#[derive(Debug, Default)]
pub struct FormInteraction {
    confirmed: bool,
    notice: Option<(NoticeKind, String)>,
}

impl FormInteraction {
    #[must_use]
    pub fn new(confirmed: bool) -> Self {
        Self {
            confirmed,
            notice: None,
        }
    }
}

impl Interaction for FormInteraction {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.confirmed
    }

    fn notify(&mut self, outcome: ClearOutcome, message: &str) {
        let kind = if outcome.is_success() {
            NoticeKind::Success
        } else {
            NoticeKind::Failure
        };
        self.notice = Some((kind, message.to_string()));
    }
}

/// Confirmation step before the log is wiped.
pub async fn confirm_page() -> impl IntoResponse {
    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>Clear log</title>
<style>{STYLE}</style>
</head>
<body>
<div class="container">
<h1>Clear log</h1>
<p>{}</p>
<form method="post" action="/clear-log">
<input type="hidden" name="confirmed" value="true">
<button class="button danger" type="submit">Clear log</button>
<a class="button secondary" href="/">Cancel</a>
</form>
</div>
</body>
</html>
"#,
        escape_html(CONFIRM_PROMPT)
    );

    ([(header::CACHE_CONTROL, "no-store")], Html(html))
}

/// The clear-log command invoked from the dashboard markup.
pub async fn clear_log(State(state): State<AppState>, Form(form): Form<ClearForm>) -> Redirect {
    let mut interaction = FormInteraction::new(form.confirmed);
    let outcome = ClearAction::run(&state, &mut interaction).await;
    tracing::debug!(?outcome, "Clear log request handled");

    if let Some((kind, message)) = interaction.notice {
        state.dashboard.write().await.page.set_notice(kind, message);
    }

    Redirect::to(NOTICE_LOCATION)
}
