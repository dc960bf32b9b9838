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
        .route("/languages", post(create_language).put(update_language))
        .route("/languages/list", post(list_languages))
        .route("/languages/{id}", get(get_language).delete(delete_language))
}

pub async fn create_language(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateLanguageRequest>,
) -> Result<Json<ApiResponse<Language>>, AppError> {
    require_text(&req.language_name, "language_name")?;

    let created = db::create_language(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(created)))
}

pub async fn update_language(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateLanguageRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(language_name) = &req.language_name {
        require_text(language_name, "language_name")?;
    }

    if !db::update_language(&state.pool, &req).await? {
        return Err(AppError::not_found(LANGUAGE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_language(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_language(&state.pool, id).await? {
        return Err(AppError::not_found(LANGUAGE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_language(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Language>>, AppError> {
    let found = db::get_language(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(LANGUAGE_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(found)))
}

pub async fn list_languages(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Language>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_languages(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
