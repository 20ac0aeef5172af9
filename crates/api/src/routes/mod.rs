pub mod health;
pub mod slides;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /slides          GET list, POST create
/// /slides/{id}     PUT update, DELETE delete
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/slides", slides::router())
}
