use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde_json::Value;
use std::collections::HashMap;

use super::error::ApiError;
use crate::server::AppState;

/// `GET /api/movies` — the popular-movies listing. `page` defaults to 1 so
/// the initial request needs no parameters; clients may page further.
pub async fn list_popular(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let page = match params.get("page") {
        None => 1,
        Some(raw) => raw
            .parse::<u32>()
            .map_err(|_| ApiError::MissingParameter(format!("page must be an integer, got {:?}", raw)))?,
    };

    let payload = state.tmdb.popular(page).await?;
    Ok(Json(payload))
}

/// `GET /api/movies/search?term=...` — title search, relayed verbatim.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, ApiError> {
    let term = params
        .get("term")
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .ok_or_else(|| ApiError::MissingParameter("term is required".to_string()))?;

    let payload = state.tmdb.search(term).await?;
    Ok(Json(payload))
}

/// `GET /api/movies/{movieId}` — one movie with credits and similar titles
/// composed upstream, relayed verbatim.
pub async fn get_movie(
    State(state): State<AppState>,
    Path(movie_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let payload = state.tmdb.detail(&movie_id).await?;
    Ok(Json(payload))
}
