//! # 사용자 관리 핸들러
//!
//! 관리용 CRUD입니다. password를 보내면 Argon2id로 해시해서 저장하고,
//! 응답에는 password/인증 코드가 포함되지 않습니다.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::{
    db::users as db_users,
    error::AppError,
    extract::{AppJson, AppPath},
    models::*,
    routes::AppState,
    services::password::hash_password,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", post(create_user).put(update_user))
        .route("/users/list", post(list_users))
        .route("/users/{id}", get(get_user).delete(delete_user))
}

/// `POST /api/users` + `{ "email": "a@b.com", "provider": "email", "status": "pending" }`
pub async fn create_user(
    State(state): State<AppState>,
    AppJson(mut req): AppJson<CreateUserRequest>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    require_text(&req.email, "email")?;
    require_text(&req.provider, "provider")?;
    require_text(&req.status, "status")?;

    if db_users::find_by_email(&state.pool, &req.email).await?.is_some() {
        return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
    }

    req.password = req.password.as_deref().map(hash_password).transpose()?;

    let user = db_users::create_user(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn update_user(
    State(state): State<AppState>,
    AppJson(mut req): AppJson<UpdateUserRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(email) = &req.email {
        require_text(email, "email")?;
        if let Some(other) = db_users::find_by_email(&state.pool, email).await? {
            if other.user_id != req.user_id {
                return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
            }
        }
    }

    req.password = req.password.as_deref().map(hash_password).transpose()?;

    if !db_users::update_user(&state.pool, &req).await? {
        return Err(AppError::not_found(USER_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db_users::delete_user(&state.pool, id).await? {
        return Err(AppError::not_found(USER_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_user(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = db_users::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(USER_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(user)))
}

pub async fn list_users(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<User>>, AppError> {
    req.validate()?;
    let (total, list) = db_users::list_users(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
