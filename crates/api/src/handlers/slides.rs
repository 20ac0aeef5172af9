//! Handlers for the `/slides` resource.
//!
//! Thin request/response mapping onto the ordering engine's four
//! operations. All ordering decisions (shift plans, clamping, compaction)
//! happen in the engine; handlers only translate HTTP.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use vitrine_core::types::SlideId;
use vitrine_db::models::{CreateSlide, UpdateSlide};

use crate::error::AppResult;
use crate::query::{ListParams, ScopeParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/slides?site=&language=&active_only=false
///
/// List the scope's slides in ascending display order.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> AppResult<impl IntoResponse> {
    let slides = state
        .engine
        .list(&params.scope(), params.active_only)
        .await?;
    Ok(Json(DataResponse { data: slides }))
}

/// POST /api/v1/slides?site=&language=
///
/// Create a slide. Without a `position` in the body the slide is appended;
/// an out-of-range `position` is clamped to the nearest valid spot.
pub async fn create(
    State(state): State<AppState>,
    Query(params): Query<ScopeParams>,
    Json(input): Json<CreateSlide>,
) -> AppResult<impl IntoResponse> {
    let slide = state.engine.create(&params.scope(), input).await?;
    Ok((StatusCode::CREATED, Json(DataResponse { data: slide })))
}

/// PUT /api/v1/slides/{id}?site=&language=
///
/// Update a slide's fields and, when `position` is present, move it within
/// the scope's sequence.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<SlideId>,
    Query(params): Query<ScopeParams>,
    Json(input): Json<UpdateSlide>,
) -> AppResult<impl IntoResponse> {
    let slide = state.engine.update(&params.scope(), id, input).await?;
    Ok(Json(DataResponse { data: slide }))
}

/// DELETE /api/v1/slides/{id}?site=&language=
///
/// Delete a slide; remaining slides above it compact down by one. Responds
/// with the removed slide as confirmation.
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<SlideId>,
    Query(params): Query<ScopeParams>,
) -> AppResult<impl IntoResponse> {
    let slide = state.engine.delete(&params.scope(), id).await?;
    Ok(Json(DataResponse { data: slide }))
}
