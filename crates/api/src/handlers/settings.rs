use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;
use serde_json::Value;

use reqfields_core::builtin::BuiltinFieldView;

use crate::error::AppResult;
use crate::middleware::ActingUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Body for toggling one built-in field. `value` is coerced like an
/// integer option: `1`, `"1"` and `true` switch it on.
#[derive(Debug, Deserialize)]
pub struct UpdateRequiredFieldRequest {
    pub value: Value,
}

/// GET /api/v1/settings/required-fields
pub async fn list_required_fields(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<BuiltinFieldView>>>> {
    let views = state.rules.builtin_views().await;
    Ok(Json(DataResponse { data: views }))
}

/// PUT /api/v1/settings/required-fields/{name}
///
/// Store the `require_<name>` flag and rebuild the rule registry.
pub async fn update_required_field(
    user: ActingUser,
    State(state): State<AppState>,
    Path(name): Path<String>,
    Json(input): Json<UpdateRequiredFieldRequest>,
) -> AppResult<Json<DataResponse<BuiltinFieldView>>> {
    user.require_manage_options()?;

    let view = state.rules.set_builtin(&name, &input.value).await?;

    tracing::info!(
        user_id = user.user_id,
        field = %name,
        enabled = view.enabled,
        "Required-field setting updated"
    );

    Ok(Json(DataResponse { data: view }))
}
