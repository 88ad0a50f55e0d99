pub mod health;
pub mod posts;
pub mod required_fields;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /posts/{id}/save                        publish gate for one save attempt
/// /posts/{id}/notices                     flashed failures (read once)
///
/// /settings/required-fields               built-in fields and their flags
/// /settings/required-fields/{name}        toggle one built-in field
///
/// /required-fields                        registered rules, register a field
/// /required-fields/registrations          external registrations as submitted
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/posts", posts::router())
        .nest("/settings", settings::router())
        .nest("/required-fields", required_fields::router())
}
