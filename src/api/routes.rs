use axum::{
    routing::get,
    Router,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
    Json,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{CorsLayer, Any};
use tower_http::trace::TraceLayer;

use crate::AppState;
use crate::api::models::NOT_AVAILABLE;
use crate::api::{page, response};
use crate::error::{AppError, Result};

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler).fallback(method_not_allowed))
        .route("/api/quiz/", get(quiz_api_handler).fallback(method_not_allowed))
        .route("/api/quiz", get(|| async { Redirect::permanent("/api/quiz/") }))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(response::panic_response))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(app_state)
}

async fn index_handler(State(state): State<AppState>) -> Result<Html<String>> {
    let snapshot = state.cache.ensure_fresh().await;

    let html = page::render(
        snapshot.as_deref(),
        state.cache.last_refreshed(),
        state.config.utc_offset,
    )?;
    Ok(Html(html))
}

async fn quiz_api_handler(State(state): State<AppState>) -> Response {
    match state.cache.ensure_fresh().await {
        Some(snapshot) => (StatusCode::OK, Json(&*snapshot)).into_response(),
        None => response::message(StatusCode::OK, NOT_AVAILABLE).into_response(),
    }
}

async fn not_found() -> AppError {
    AppError::not_found()
}

async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}
