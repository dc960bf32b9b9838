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
        .route("/menus", post(create_menu).put(update_menu))
        .route("/menus/list", post(list_menus))
        .route("/menus/{id}", get(get_menu).delete(delete_menu))
}

pub async fn create_menu(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateMenuRequest>,
) -> Result<Json<ApiResponse<Menu>>, AppError> {
    require_text(&req.menu_name, "menu_name")?;
    require_text(&req.menu_code, "menu_code")?;

    let created = db::create_menu(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(created)))
}

pub async fn update_menu(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateMenuRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(menu_name) = &req.menu_name {
        require_text(menu_name, "menu_name")?;
    }
    if let Some(menu_code) = &req.menu_code {
        require_text(menu_code, "menu_code")?;
    }

    if !db::update_menu(&state.pool, &req).await? {
        return Err(AppError::not_found(MENU_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_menu(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_menu(&state.pool, id).await? {
        return Err(AppError::not_found(MENU_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_menu(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Menu>>, AppError> {
    let found = db::get_menu(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(MENU_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(found)))
}

pub async fn list_menus(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Menu>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_menus(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
