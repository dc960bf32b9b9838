//! # 방문 기록 라우트 핸들러
//!
//! 목록 요청의 keyword는 무시됩니다.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::{
    db,
    error::AppError,
    extract::{AppJson, AppPath},
    models::*,
    routes::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/visit_history", post(create_visit_history).put(update_visit_history))
        .route("/visit_history/list", post(list_visit_history))
        .route("/visit_history/{id}", get(get_visit_history).delete(delete_visit_history))
}

pub async fn create_visit_history(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateVisitHistoryRequest>,
) -> Result<Json<ApiResponse<VisitHistory>>, AppError> {
    require_text(&req.scan_at, "scan_at")?;

    let created = db::create_visit_history(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(created)))
}

pub async fn update_visit_history(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateVisitHistoryRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::update_visit_history(&state.pool, &req).await? {
        return Err(AppError::not_found(VISIT_HISTORY_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_visit_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_visit_history(&state.pool, id).await? {
        return Err(AppError::not_found(VISIT_HISTORY_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_visit_history(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<VisitHistory>>, AppError> {
    let found = db::get_visit_history(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(VISIT_HISTORY_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(found)))
}

pub async fn list_visit_history(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<VisitHistory>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_visit_history(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
