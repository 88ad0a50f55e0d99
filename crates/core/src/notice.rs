//! Edit-screen notices: show flashed failures once, then forget them.

use serde::Serialize;

use crate::flash::{FailureSet, FlashStore};
use crate::keys::FlashKey;

/// One error line on the edit screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NoticeLine {
    pub code: String,
    pub message: String,
}

/// What the edit screen for one post should display.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EditScreen {
    /// Admin message code to show, after the published message was
    /// dropped if failures are pending.
    pub message: Option<u32>,
    pub notices: Vec<NoticeLine>,
}

impl EditScreen {
    /// Consume the flash slot for `key` and build the screen.
    ///
    /// After this call the slot is empty, so a reload shows nothing.
    pub fn prepare(store: &dyn FlashStore, key: FlashKey, message: Option<u32>) -> Self {
        let message = store.filter_admin_message(key, message);
        let notices = store
            .read_and_clear(key)
            .map(|failures| notice_lines(&failures))
            .unwrap_or_default();

        if !notices.is_empty() {
            tracing::debug!(%key, count = notices.len(), "Showing required-field notices");
        }

        Self { message, notices }
    }

    pub fn has_errors(&self) -> bool {
        !self.notices.is_empty()
    }

    /// HTML for the notice area; empty when there is nothing to show.
    pub fn render_html(&self) -> String {
        if self.notices.is_empty() {
            return String::new();
        }
        let mut html = String::from(r#"<div class="error">"#);
        for line in &self.notices {
            html.push_str(&format!(
                r#"<p class="{}">{}</p>"#,
                escape_html(&line.code),
                escape_html(&line.message)
            ));
        }
        html.push_str("</div>");
        html
    }
}

fn notice_lines(failures: &FailureSet) -> Vec<NoticeLine> {
    failures
        .iter()
        .map(|(code, message)| NoticeLine {
            code: code.to_string(),
            message: message.to_string(),
        })
        .collect()
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
