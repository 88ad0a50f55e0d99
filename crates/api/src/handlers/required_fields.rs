//! Handlers for externally registered required fields.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use reqfields_core::registry::ContentTypes;
use reqfields_core::rules::Validator;

use crate::error::{AppError, AppResult};
use crate::middleware::ActingUser;
use crate::response::DataResponse;
use crate::rule_table::{Registration, RegistrationView};
use crate::state::AppState;

/// Body of `POST /required-fields`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterFieldRequest {
    #[validate(length(min = 1, max = 200))]
    pub label: String,
    #[validate(length(min = 1, max = 191))]
    pub field_name: String,
    /// Omitted or empty means the default message.
    pub message: Option<String>,
    /// Predicate name (`not_empty`, `has_category`); omitted means `not_empty`.
    pub validator: Option<String>,
    /// A post type, a list of them, or `"any"` (the default).
    #[serde(default)]
    pub post_types: ContentTypes,
}

#[derive(Debug, Deserialize)]
pub struct RulesQuery {
    pub post_type: Option<String>,
}

/// One effective rule for a post type.
#[derive(Debug, Serialize)]
pub struct RuleView {
    pub label: String,
    pub field_name: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct RulesResponse {
    pub post_type: String,
    pub rules: Vec<RuleView>,
}

/// POST /api/v1/required-fields
///
/// Append a registration and rebuild the registry. Administrator only.
pub async fn register(
    user: ActingUser,
    State(state): State<AppState>,
    Json(input): Json<RegisterFieldRequest>,
) -> AppResult<impl IntoResponse> {
    user.require_manage_options()?;
    input.validate()?;

    if matches!(&input.post_types, ContentTypes::Only(types) if types.is_empty()) {
        return Err(AppError::BadRequest(
            "post_types must name at least one post type".into(),
        ));
    }

    let registration = Registration {
        label: input.label,
        field_name: input.field_name,
        message: input.message.unwrap_or_default(),
        validator: Validator::from(input.validator),
        post_types: input.post_types,
    };
    let view = RegistrationView::from(&registration);
    state.rules.register(registration).await;

    Ok((StatusCode::CREATED, Json(DataResponse { data: view })))
}

/// GET /api/v1/required-fields?post_type=T
///
/// The rules a save of type `T` is checked against, in evaluation order.
pub async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<RulesQuery>,
) -> AppResult<Json<DataResponse<RulesResponse>>> {
    let post_type = query
        .post_type
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("post_type query parameter is required".into()))?;

    let registry = state.rules.registry().await;
    let rules = registry
        .rules_for(&post_type)
        .iter()
        .map(|rule| RuleView {
            label: rule.label.clone(),
            field_name: rule.field_name.clone(),
            message: rule.message.clone(),
        })
        .collect();

    Ok(Json(DataResponse {
        data: RulesResponse { post_type, rules },
    }))
}

/// GET /api/v1/required-fields/registrations
///
/// External registrations as submitted, oldest first.
pub async fn list_registrations(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<RegistrationView>>>> {
    let registrations = state.rules.registrations().await;
    Ok(Json(DataResponse {
        data: registrations,
    }))
}
