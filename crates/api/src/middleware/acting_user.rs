//! Acting-user extractor for Axum handlers.
//!
//! The host CMS has already authenticated the editor; it forwards who they
//! are in two headers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reqfields_core::error::CoreError;
use reqfields_core::roles::{can_edit_posts, can_manage_options, ROLE_SUBSCRIBER};
use reqfields_core::types::DbId;

use crate::error::AppError;

/// Header carrying the editing user's id. Required.
pub const USER_ID_HEADER: &str = "x-user-id";

/// Header carrying the editing user's role. Defaults to `subscriber`.
pub const USER_ROLE_HEADER: &str = "x-user-role";

/// The user on whose behalf the host is calling.
///
/// ```ignore
/// async fn my_handler(user: ActingUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, role = %user.role, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ActingUser {
    pub user_id: DbId,
    pub role: String,
}

impl ActingUser {
    pub fn can_edit_posts(&self) -> bool {
        can_edit_posts(&self.role)
    }

    /// Fail with 403 unless the user may change site options.
    pub fn require_manage_options(&self) -> Result<(), AppError> {
        if can_manage_options(&self.role) {
            Ok(())
        } else {
            Err(AppError::Core(CoreError::Forbidden(format!(
                "Role '{}' cannot change required-field settings",
                self.role
            ))))
        }
    }
}

impl<S> FromRequestParts<S> for ActingUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let raw_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(format!(
                    "Missing {USER_ID_HEADER} header"
                )))
            })?;

        let user_id: DbId = raw_id.trim().parse().map_err(|_| {
            AppError::Core(CoreError::Unauthorized(format!(
                "Invalid {USER_ID_HEADER} header: expected an integer"
            )))
        })?;

        let role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|r| r.trim().to_lowercase())
            .filter(|r| !r.is_empty())
            .unwrap_or_else(|| ROLE_SUBSCRIBER.to_string());

        Ok(ActingUser { user_id, role })
    }
}
