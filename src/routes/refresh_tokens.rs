//! # Refresh 토큰 관리 핸들러
//!
//! 로그인 플로우와 별개로 토큰 행을 직접 보고 고치는 관리용 CRUD입니다.
//! 생성 시 받은 원문 토큰은 해시로만 저장됩니다.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::{
    db::refresh_tokens as db_tokens,
    error::AppError,
    extract::{AppJson, AppPath},
    middleware::auth::hash_token,
    models::*,
    routes::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/refresh_tokens", post(create_refresh_token).put(update_refresh_token))
        .route("/refresh_tokens/list", post(list_refresh_tokens))
        .route(
            "/refresh_tokens/{id}",
            get(get_refresh_token).delete(delete_refresh_token),
        )
}

pub async fn create_refresh_token(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateRefreshTokenRequest>,
) -> Result<Json<ApiResponse<RefreshToken>>, AppError> {
    require_text(&req.token, "token")?;
    require_text(&req.expires_at, "expires_at")?;

    let token = db_tokens::store_refresh_token(
        &state.pool,
        req.user_id,
        &hash_token(&req.token),
        &req.expires_at,
        req.revoked,
    )
    .await?;
    Ok(Json(ApiResponse::ok(token)))
}

pub async fn update_refresh_token(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateRefreshTokenRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db_tokens::update_refresh_token(&state.pool, &req).await? {
        return Err(AppError::not_found(REFRESH_TOKEN_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_refresh_token(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db_tokens::delete_refresh_token(&state.pool, id).await? {
        return Err(AppError::not_found(REFRESH_TOKEN_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_refresh_token(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<RefreshToken>>, AppError> {
    let token = db_tokens::get_refresh_token(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(REFRESH_TOKEN_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(token)))
}

pub async fn list_refresh_tokens(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<RefreshToken>>, AppError> {
    req.validate()?;
    let (total, list) = db_tokens::list_refresh_tokens(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
