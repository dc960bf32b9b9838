//! # 파일 라우트 핸들러
//!
//! 파일 내용은 JSON 본문의 `file_data`(base64)로 주고받습니다.

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
        .route("/files", post(create_file).put(update_file))
        .route("/files/list", post(list_files))
        .route("/files/{id}", get(get_file).delete(delete_file))
}

pub async fn create_file(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateFileRequest>,
) -> Result<Json<ApiResponse<File>>, AppError> {
    require_text(&req.file_name, "file_name")?;
    require_text(&req.file_type, "file_type")?;
    require_text(&req.location, "location")?;

    let created = db::create_file(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(created)))
}

pub async fn update_file(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateFileRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(file_name) = &req.file_name {
        require_text(file_name, "file_name")?;
    }

    if !db::update_file(&state.pool, &req).await? {
        return Err(AppError::not_found(FILE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_file(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_file(&state.pool, id).await? {
        return Err(AppError::not_found(FILE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_file(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<File>>, AppError> {
    let found = db::get_file(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(FILE_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(found)))
}

pub async fn list_files(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<File>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_files(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
