use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::Deserialize;

use crate::error::ApiError;
use crate::handlers::AppState;
use crate::store::{NewProgram, Program};

/// Create request body. `title` stays optional at the type level so a missing
/// title is our 400, not an extractor rejection.
#[derive(Debug, Deserialize)]
pub struct CreateProgramRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub total_sessions: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

/// POST /api/programs - create a new program
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateProgramRequest>,
) -> Result<Response, ApiError> {
    let title = match body.title {
        Some(title) if !title.is_empty() => title,
        _ => return Err(ApiError::bad_request("Title is a required field")),
    };

    let new_program = NewProgram {
        title,
        total_sessions: body.total_sessions,
        status: body.status,
    };

    let created = state.store.insert(&new_program).await?.ok_or_else(|| {
        ApiError::store("Failed to create program or retrieve data after creation")
    })?;

    Ok((StatusCode::CREATED, Json(created)).into_response())
}

/// GET /api/programs - all programs, newest first
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<Program>>, ApiError> {
    let programs = state.store.list().await?;
    Ok(Json(programs))
}
