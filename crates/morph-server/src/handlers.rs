use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use morph_engine::{MorphStats, SentenceMorpher};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub const DEFAULT_MAX_SENTENCE_LEN: usize = 16 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub morpher: Arc<SentenceMorpher>,
    pub max_sentence_len: usize,
}

#[derive(Deserialize)]
pub struct MorphRequest {
    pub sentence: String,
}

#[derive(Serialize)]
pub struct MorphResponse {
    sentence: String,
    result: String,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/v1/morph", get(morph_query).post(morph_json))
        .route("/v1/stats", get(stats))
        .with_state(state)
}

async fn healthz() -> impl IntoResponse {
    "ok"
}

async fn stats(State(state): State<AppState>) -> Json<MorphStats> {
    Json(state.morpher.stats())
}

async fn morph_query(
    State(state): State<AppState>,
    Query(params): Query<MorphRequest>,
) -> Result<Json<MorphResponse>, ApiError> {
    morph(&state, params.sentence)
}

async fn morph_json(
    State(state): State<AppState>,
    Json(body): Json<MorphRequest>,
) -> Result<Json<MorphResponse>, ApiError> {
    morph(&state, body.sentence)
}

fn morph(state: &AppState, sentence: String) -> Result<Json<MorphResponse>, ApiError> {
    if sentence.trim().is_empty() {
        return Err(ApiError::bad_request("sentence is required"));
    }
    if sentence.len() > state.max_sentence_len {
        return Err(ApiError::bad_request(format!(
            "sentence must be at most {} bytes",
            state.max_sentence_len
        )));
    }

    let result = state.morpher.morph(&sentence);
    debug!("morphed {} bytes into {} bytes", sentence.len(), result.len());
    Ok(Json(MorphResponse { sentence, result }))
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn bad_request<T: Into<String>>(msg: T) -> Self {
        ApiError::BadRequest(msg.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequest(msg) => {
                let body = Json(ErrorResponse { error: msg });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
        }
    }
}
