//! Watch log endpoints.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
};
use std::sync::Arc;

use super::validation::{validate_record_id, validate_search_query};
use super::{ApiError, ApiResponse, AppState, SearchQuery};
use crate::models::{NewRecord, WatchRecord};
use crate::services::RecordStore;

fn parse_body(body: Result<Json<NewRecord>, JsonRejection>) -> Result<NewRecord, ApiError> {
    body.map(|Json(record)| record)
        .map_err(|rejection| ApiError::validation(rejection.body_text()))
}

/// `GET /api/logs`
pub async fn list_logs(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ApiResponse<Vec<WatchRecord>>>, ApiError> {
    let records = state.store.list().await?;
    Ok(Json(ApiResponse::success(records)))
}

/// `GET /api/search?q=`
pub async fn search_logs(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<WatchRecord>>>, ApiError> {
    let term = validate_search_query(&query.q)?;
    let records = state.store.search(term).await?;
    Ok(Json(ApiResponse::success(records)))
}

/// `POST /api/logs`
///
/// The stored status may differ from the submitted one when episode progress
/// implies it.
pub async fn create_log(
    State(state): State<Arc<AppState>>,
    body: Result<Json<NewRecord>, JsonRejection>,
) -> Result<Json<ApiResponse<WatchRecord>>, ApiError> {
    let record = parse_body(body)?;
    let saved = state.store.create(record).await?;
    Ok(Json(ApiResponse::success(saved)))
}

/// `PUT /api/logs/{id}`
pub async fn update_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
    body: Result<Json<NewRecord>, JsonRejection>,
) -> Result<Json<ApiResponse<WatchRecord>>, ApiError> {
    let id = validate_record_id(id)?;
    let record = parse_body(body)?;
    let saved = state.store.update(id, record).await?;
    Ok(Json(ApiResponse::success(saved)))
}

/// `DELETE /api/logs/{id}`
pub async fn delete_log(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<bool>>, ApiError> {
    let id = validate_record_id(id)?;
    state.store.delete(id).await?;
    Ok(Json(ApiResponse::success(true)))
}
