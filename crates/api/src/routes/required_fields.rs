//! Route definitions for the `/required-fields` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::required_fields;
use crate::state::AppState;

/// Routes mounted at `/required-fields`.
///
/// ```text
/// GET    /                 -> list_rules          (?post_type)
/// POST   /                 -> register            (append-only, administrator)
/// GET    /registrations    -> list_registrations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(required_fields::list_rules).post(required_fields::register),
        )
        .route("/registrations", get(required_fields::list_registrations))
}
