use std::sync::Arc;

use axum::{
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use serde_json::json;
use sp_core::{GlobalNewsResponse, KoreanNewsResponse, Market};
use sp_sources::Suggestion;

use crate::error::ApiError;
use crate::AppState;

pub async fn root() -> impl IntoResponse {
    Json(json!({ "msg": "Hello" }))
}

pub async fn global_news(
    State(state): State<Arc<AppState>>,
    Path(symbol): Path<String>,
) -> Result<Json<GlobalNewsResponse>, ApiError> {
    let result = state.news.global_news(&symbol).await?;
    Ok(Json(result.into()))
}

pub async fn korean_news(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Json<KoreanNewsResponse> {
    Json(state.news.korean_news(&name).await.into())
}

pub async fn suggest_global(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    suggestions(&state, Market::Global).await
}

pub async fn suggest_korea(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Suggestion>>, ApiError> {
    suggestions(&state, Market::Korea).await
}

async fn suggestions(state: &AppState, market: Market) -> Result<Json<Vec<Suggestion>>, ApiError> {
    let list = state.suggestions.suggestions(market).await?;
    Ok(Json(list.as_ref().clone()))
}
