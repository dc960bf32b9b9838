//! # 태그 API 라우트 핸들러
//!
//! ## 엔드포인트 목록
//! | 메서드 | 경로 | 핸들러 | 설명 |
//! |--------|------|--------|------|
//! | POST | /api/tags | `create_tag` | 새 태그 생성 |
//! | PUT | /api/tags | `update_tag` | 태그 수정 (보낸 필드만) |
//! | DELETE | /api/tags/{id} | `delete_tag` | 태그 삭제 (태깅도 함께 삭제) |
//! | GET | /api/tags/{id} | `get_tag` | 태그 조회 |
//! | POST | /api/tags/list | `list_tags` | 페이지 목록 |
//!
//! 상점-태그 관계는 `routes::stores`에 있습니다.

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
        .route("/tags", post(create_tag).put(update_tag))
        .route("/tags/list", post(list_tags))
        .route("/tags/{id}", get(get_tag).delete(delete_tag))
}

pub async fn create_tag(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateTagRequest>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    require_text(&req.tag_name, "tag_name")?;

    let tag = db::create_tag(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(tag)))
}

pub async fn update_tag(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateTagRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(name) = &req.tag_name {
        require_text(name, "tag_name")?;
    }

    if !db::update_tag(&state.pool, &req).await? {
        return Err(AppError::not_found(TAG_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_tag(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    let deleted = db::delete_tag(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::not_found(TAG_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_tag(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Tag>>, AppError> {
    let tag = db::get_tag(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(TAG_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(tag)))
}

pub async fn list_tags(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Tag>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_tags(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
