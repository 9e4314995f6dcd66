use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Query, State as AxumState},
    Json,
};
use photo_gallery_common::{DeleteRequest, ListQuery, ListResponse, PublicConfig};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{
    error::{ApiError, IMAGE_ID_REQUIRED},
    state::State,
};
use crate::media::SearchQuery;

/// `GET /images` のクエリ（検証前の生の値）
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub max_results: Option<String>,
    pub next_cursor: Option<String>,
    pub search: Option<String>,
}

pub async fn list_images(
    AxumState(state): AxumState<Arc<State>>,
    Query(params): Query<ListParams>,
) -> Result<Json<ListResponse>, ApiError> {
    let query = ListQuery::parse(
        params.max_results.as_deref(),
        params.next_cursor.as_deref(),
        params.search.as_deref(),
    )?;

    if let Some(cached) = state.listing_cache.get(&query) {
        debug!(?query, "listing cache hit");
        return Ok(Json(cached));
    }

    let generation = state.listing_cache.generation();
    let search = SearchQuery::for_listing(&state.config.folder, &query);
    let response = state
        .media
        .search(&search)
        .await
        .map_err(ApiError::ListFailed)?;

    info!(
        expression = %search.expression,
        returned = response.resources.len(),
        total = response.total_count,
        has_next = response.next_cursor.is_some(),
        "listed images"
    );

    if !state.listing_cache.put(query, generation, response.clone()) && state.listing_cache.is_enabled() {
        debug!("listing not cached (invalidated during fetch or cache full)");
    }
    Ok(Json(response))
}

pub async fn delete_image(
    AxumState(state): AxumState<Arc<State>>,
    body: Bytes,
) -> Result<Json<serde_json::Value>, ApiError> {
    let request: DeleteRequest = serde_json::from_slice(&body).unwrap_or_else(|e| {
        warn!("Malformed delete body: {e}");
        DeleteRequest::default()
    });

    let id = request
        .image_id()
        .ok_or_else(|| ApiError::BadRequest(IMAGE_ID_REQUIRED.to_string()))?;

    let result = state
        .media
        .destroy(id)
        .await
        .map_err(ApiError::DeleteFailed)?;

    let dropped = state.listing_cache.invalidate();
    info!(public_id = id, dropped, "deleted image");

    Ok(Json(result))
}

pub async fn public_config(AxumState(state): AxumState<Arc<State>>) -> Json<PublicConfig> {
    Json(state.config.public_config())
}
