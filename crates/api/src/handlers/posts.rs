//! Handlers for the `/posts` resource: the publish gate and the
//! edit-screen notices it leaves behind.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use reqfields_core::error::CoreError;
use reqfields_core::flash::FailureSet;
use reqfields_core::gate::{GateVerdict, SaveContext, SkipReason, ValidationGate};
use reqfields_core::keys::FlashKey;
use reqfields_core::notice::{EditScreen, NoticeLine};
use reqfields_core::post_status::{is_status_name, STATUS_FIELD};
use reqfields_core::record::{PostData, PostMeta, PostRecord};
use reqfields_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::middleware::ActingUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// One save or publish attempt forwarded by the host.
#[derive(Debug, Deserialize)]
pub struct SaveAttemptRequest {
    pub post_type: String,
    /// Outgoing payload the host is about to persist.
    #[serde(default)]
    pub data: PostData,
    /// Submitted primary attributes the rules read from.
    #[serde(default)]
    pub attributes: Map<String, Value>,
    #[serde(default)]
    pub meta: PostMeta,
    #[serde(default)]
    pub doing_autosave: bool,
}

#[derive(Debug, Serialize)]
pub struct SaveAttemptResponse {
    /// The payload to persist, `post_status` possibly forced to draft.
    pub data: PostData,
    pub verdict: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skip_reason: Option<SkipReason>,
    pub failures: FailureSet,
}

#[derive(Debug, Deserialize)]
pub struct NoticesQuery {
    /// Admin message code the host was about to show.
    pub message: Option<u32>,
}

#[derive(Debug, Serialize)]
pub struct NoticesResponse {
    pub message: Option<u32>,
    pub notices: Vec<NoticeLine>,
    pub html: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/posts/{id}/save
///
/// Run the publish gate over one save attempt. A failing gate is not an
/// HTTP error: the response carries the rewritten payload and the
/// failures, and the host persists `data` as returned.
pub async fn save_attempt(
    user: ActingUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Json(input): Json<SaveAttemptRequest>,
) -> AppResult<Json<DataResponse<SaveAttemptResponse>>> {
    if input.post_type.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "post_type must not be empty".into(),
        )));
    }
    validate_status(&input.data)?;

    let record = PostRecord {
        id: Some(post_id),
        post_type: input.post_type,
        attributes: input.attributes,
        meta: input.meta,
    };
    let ctx = SaveContext {
        user_id: user.user_id,
        doing_autosave: input.doing_autosave,
        can_edit_posts: user.can_edit_posts(),
    };

    let registry = state.rules.registry().await;
    let gate = ValidationGate::new(&registry, state.flash.as_ref());
    let outcome = gate.guard_save(&record, input.data, &ctx);

    let verdict = outcome.verdict.as_str();
    let (skip_reason, failures) = match outcome.verdict {
        GateVerdict::Skipped(reason) => (Some(reason), FailureSet::new()),
        GateVerdict::Passed => (None, FailureSet::new()),
        GateVerdict::Failed(failures) => (None, failures),
    };

    Ok(Json(DataResponse {
        data: SaveAttemptResponse {
            data: outcome.data,
            verdict,
            skip_reason,
            failures,
        },
    }))
}

/// GET /api/v1/posts/{id}/notices?message=N
///
/// Consume the acting user's flashed failures for this post. A second call
/// returns no notices.
pub async fn edit_notices(
    user: ActingUser,
    State(state): State<AppState>,
    Path(post_id): Path<DbId>,
    Query(query): Query<NoticesQuery>,
) -> AppResult<Json<DataResponse<NoticesResponse>>> {
    let key = FlashKey::new(post_id, user.user_id);
    let screen = EditScreen::prepare(state.flash.as_ref(), key, query.message);
    let html = screen.render_html();

    Ok(Json(DataResponse {
        data: NoticesResponse {
            message: screen.message,
            notices: screen.notices,
            html,
        },
    }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Reject payloads whose `post_status` is not a string at all.
///
/// Which statuses exist is up to the host, so any non-blank name is let
/// through to the gate.
fn validate_status(data: &PostData) -> AppResult<()> {
    match data.get(STATUS_FIELD) {
        None => Ok(()),
        Some(Value::String(status)) if is_status_name(status) => Ok(()),
        Some(other) => Err(AppError::BadRequest(format!(
            "Invalid {STATUS_FIELD} {other}: expected a non-empty status name"
        ))),
    }
}
