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
        .route("/notices", post(create_notice).put(update_notice))
        .route("/notices/list", post(list_notices))
        .route("/notices/{id}", get(get_notice).delete(delete_notice))
}

pub async fn create_notice(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateNoticeRequest>,
) -> Result<Json<ApiResponse<Notice>>, AppError> {
    require_text(&req.title, "title")?;
    require_text(&req.content, "content")?;
    require_text(&req.published_at, "published_at")?;

    let created = db::create_notice(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(created)))
}

pub async fn update_notice(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateNoticeRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(title) = &req.title {
        require_text(title, "title")?;
    }

    if !db::update_notice(&state.pool, &req).await? {
        return Err(AppError::not_found(NOTICE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_notice(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_notice(&state.pool, id).await? {
        return Err(AppError::not_found(NOTICE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_notice(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Notice>>, AppError> {
    let found = db::get_notice(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(NOTICE_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(found)))
}

pub async fn list_notices(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Notice>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_notices(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
