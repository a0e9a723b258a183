pub mod programs;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::get;
use axum::Router;
use serde_json::json;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::store::ProgramStore;

/// Shared per-process state: the single store handle, constructed once at
/// startup and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ProgramStore>,
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .merge(program_routes(state))
        .fallback(not_found)
        .layer(TraceLayer::new_for_http())
}

fn program_routes(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/programs",
            get(programs::list).post(programs::create),
        )
        .route(
            "/api/programs/:id",
            get(programs::record_get)
                .put(programs::record_update)
                .patch(programs::record_update)
                .delete(programs::record_delete),
        )
        // Open to all origins. Fine for development; lock this down before
        // pointing a production frontend at it.
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "EduManager backend is running! Access API endpoints under /api/..."
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "404 Not Found",
            "message": "The requested resource was not found on the server."
        })),
    )
}
