//! # 상점(Store) 라우트 핸들러
//!
//! ## 엔드포인트
//! - `POST   /api/stores`                         → 생성
//! - `PUT    /api/stores`                         → 부분 수정
//! - `DELETE /api/stores/{id}`                    → 삭제
//! - `GET    /api/stores/{id}`                    → 조회
//! - `POST   /api/stores/list`                    → 페이지 목록 (store_name 검색)
//! - `GET    /api/stores/{id}/tags`               → 상점의 태그 목록
//! - `POST   /api/stores/{id}/tags`               → 태그 연결, 수정된 상점 반환
//! - `DELETE /api/stores/{id}/tags/{tag_id}`      → 태그 연결 해제

use axum::{
    extract::State,
    routing::{delete, get, post},
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
        .route("/stores", post(create_store).put(update_store))
        .route("/stores/list", post(list_stores))
        .route("/stores/{id}", get(get_store).delete(delete_store))
        .route("/stores/{id}/tags", get(get_store_tags).post(add_tag_to_store))
        .route("/stores/{id}/tags/{tag_id}", delete(remove_tag_from_store))
}

pub async fn create_store(
    State(state): State<AppState>,
    AppJson(req): AppJson<CreateStoreRequest>,
) -> Result<Json<ApiResponse<Store>>, AppError> {
    require_text(&req.store_name, "store_name")?;
    require_text(&req.store_category, "store_category")?;
    require_text(&req.location, "location")?;
    require_text(&req.address, "address")?;
    require_text(&req.business_hours, "business_hours")?;
    require_text(&req.phone_number, "phone_number")?;

    let store = db::create_store(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(store)))
}

pub async fn update_store(
    State(state): State<AppState>,
    AppJson(req): AppJson<UpdateStoreRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(name) = &req.store_name {
        require_text(name, "store_name")?;
    }

    if !db::update_store(&state.pool, &req).await? {
        return Err(AppError::not_found(STORE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_store(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_store(&state.pool, id).await? {
        return Err(AppError::not_found(STORE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_store(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Store>>, AppError> {
    let store = db::get_store(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(STORE_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(store)))
}

pub async fn list_stores(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Store>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_stores(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}

/// 상점이 없으면 404, 있으면 연결된 태그 목록 (`total`은 태그 수)
pub async fn get_store_tags(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ListResponse<Tag>>, AppError> {
    let _ = db::get_store(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(STORE_NOT_FOUND))?;

    let tags = db::get_store_tags(&state.pool, id).await?;
    Ok(Json(ListResponse::new(tags.len() as i64, tags)))
}

/// 상점과 태그가 모두 있어야 연결합니다. 이미 연결되어 있으면 아무 일도 하지 않습니다.
pub async fn add_tag_to_store(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<StoreTagRequest>,
) -> Result<Json<ApiResponse<Store>>, AppError> {
    let store = db::get_store(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(STORE_NOT_FOUND))?;

    let _ = db::get_tag(&state.pool, req.tag_id)
        .await?
        .ok_or(AppError::not_found(TAG_NOT_FOUND))?;

    db::add_store_tag(&state.pool, id, req.tag_id).await?;
    Ok(Json(ApiResponse::ok(store)))
}

/// `Path((id, tag_id))`: 경로 변수 2개를 URL 순서대로 튜플로 추출합니다.
pub async fn remove_tag_from_store(
    State(state): State<AppState>,
    AppPath((id, tag_id)): AppPath<(i64, i64)>,
) -> Result<Json<BaseResponse>, AppError> {
    let removed = db::remove_store_tag(&state.pool, id, tag_id).await?;
    if !removed {
        return Err(AppError::not_found(TAGGING_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}
