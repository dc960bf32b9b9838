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
        .route("/comments", post(create_comment).put(update_comment))
        .route("/comments/list", post(list_comments))
        .route("/comments/{id}", get(get_comment).delete(delete_comment))
}

pub async fn create_comment(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateCommentRequest>,
) -> Result<Json<ApiResponse<Comment>>, AppError> {
    require_text(&req.comment_text, "comment_text")?;

    let comment = db::create_comment(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(comment)))
}

pub async fn update_comment(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateCommentRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(text) = &req.comment_text {
        require_text(text, "comment_text")?;
    }

    if !db::update_comment(&state.pool, &req).await? {
        return Err(AppError::not_found(COMMENT_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_comment(&state.pool, id).await? {
        return Err(AppError::not_found(COMMENT_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_comment(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Comment>>, AppError> {
    let comment = db::get_comment(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(COMMENT_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(comment)))
}

pub async fn list_comments(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Comment>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_comments(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
