//! Route definitions for the `/posts` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::posts;
use crate::state::AppState;

/// Routes mounted at `/posts`.
///
/// ```text
/// POST   /{id}/save      -> save_attempt   (publish gate)
/// GET    /{id}/notices   -> edit_notices   (?message, read-once)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{id}/save", post(posts::save_attempt))
        .route("/{id}/notices", get(posts::edit_notices))
}
