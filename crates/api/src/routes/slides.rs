//! Route definitions for carousel slides.

use axum::routing::get;
use axum::Router;

use crate::handlers::slides;
use crate::state::AppState;

/// Routes mounted at `/slides`.
///
/// ```text
/// GET    /       -> list
/// POST   /       -> create
/// PUT    /{id}   -> update
/// DELETE /{id}   -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(slides::list).post(slides::create))
        .route(
            "/{id}",
            axum::routing::put(slides::update).delete(slides::delete),
        )
}
