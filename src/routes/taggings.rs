//! # 태깅(Tagging) 라우트 핸들러
//!
//! 태그와 임의 엔티티의 연결을 직접 관리하는 관리용 엔드포인트입니다.
//! 상점 태그는 `stores` 모듈의 전용 엔드포인트를 쓰는 편이 간단합니다.

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
        .route("/taggings", post(create_tagging).put(update_tagging))
        .route("/taggings/list", post(list_taggings))
        .route("/taggings/{id}", get(get_tagging).delete(delete_tagging))
}

pub async fn create_tagging(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTaggingRequest>,
) -> Result<Json<ApiResponse<Tagging>>, AppError> {
    require_text(&req.taggable_type, "taggable_type")?;

    let created = db::create_tagging(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(created)))
}

pub async fn update_tagging(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateTaggingRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(taggable_type) = &req.taggable_type {
        require_text(taggable_type, "taggable_type")?;
    }

    if !db::update_tagging(&state.pool, &req).await? {
        return Err(AppError::not_found(TAGGING_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_tagging(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_tagging(&state.pool, id).await? {
        return Err(AppError::not_found(TAGGING_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_tagging(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Tagging>>, AppError> {
    let found = db::get_tagging(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(TAGGING_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(found)))
}

pub async fn list_taggings(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Tagging>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_taggings(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
