//! Route definitions for the `/settings` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::settings;
use crate::state::AppState;

/// Routes mounted at `/settings`.
///
/// ```text
/// GET    /required-fields           -> list_required_fields
/// PUT    /required-fields/{name}    -> update_required_field (administrator)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/required-fields", get(settings::list_required_fields))
        .route("/required-fields/{name}", put(settings::update_required_field))
}
