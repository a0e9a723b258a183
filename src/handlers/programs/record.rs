use axum::extract::{Path, State};
use axum::response::{IntoResponse, Json, Response};
use serde_json::json;

use crate::error::ApiError;
use crate::handlers::AppState;
use crate::store::{resolve_delete, resolve_update, DeleteOutcome, ProgramPatch, UpdateOutcome};

/// GET /api/programs/:id - fetch a single program
pub async fn record_get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match state.store.fetch(id).await? {
        Some(program) => Ok(Json(program).into_response()),
        None => Err(ApiError::not_found("Program not found")),
    }
}

/// PUT/PATCH /api/programs/:id - partial update
///
/// The store reports "zero rows affected" identically for a missing row and
/// for a write suppressed by access policy, so the outcome is resolved with a
/// follow-up existence check before a response is chosen.
pub async fn record_update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<ProgramPatch>,
) -> Result<Response, ApiError> {
    if patch.is_empty() {
        return Err(ApiError::bad_request(
            "No valid fields to update were provided",
        ));
    }

    match resolve_update(state.store.as_ref(), id, &patch).await? {
        UpdateOutcome::Updated(program) => Ok(Json(program).into_response()),
        UpdateOutcome::NotFound => Err(ApiError::not_found("Program not found")),
        UpdateOutcome::NoEffect => Ok(Json(json!({
            "message": "Program data unchanged or update restricted"
        }))
        .into_response()),
    }
}

/// DELETE /api/programs/:id - delete a program
///
/// Checks existence first so a no-op delete on a missing id is a 404 instead
/// of a misleading success. A delete that then returns no row is still
/// reported as a 200 with an ambiguous message, because the store does not
/// distinguish "already gone" from "restricted".
pub async fn record_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    match resolve_delete(state.store.as_ref(), id).await? {
        DeleteOutcome::Deleted(program) => Ok(Json(json!({
            "message": "Program deleted successfully",
            "deleted_record": program,
        }))
        .into_response()),
        DeleteOutcome::NotFound => Err(ApiError::not_found("Program not found")),
        DeleteOutcome::NoEffect => Ok(Json(json!({
            "message": "Program deletion command executed. Record may have been already deleted or the delete was restricted."
        }))
        .into_response()),
    }
}
