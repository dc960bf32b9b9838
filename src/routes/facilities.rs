//! # 시설(Facility) 라우트 핸들러
//!
//! 다른 엔티티와 달리 수정이 `PUT /api/facilities/{id}` 전체 덮어쓰기이고,
//! 성공하면 `{ success, data: Facility }`를 돌려줍니다.

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
        .route("/facilities", post(create_facility))
        .route("/facilities/list", post(list_facilities))
        .route(
            "/facilities/{id}",
            get(get_facility).put(update_facility).delete(delete_facility),
        )
}

fn validate(req: &FacilityRequest) -> Result<(), AppError> {
    require_text(&req.facility_name, "facility_name")?;
    require_text(&req.location, "location")
}

pub async fn create_facility(
    State(state): State<AppState>,
    AppJson(req): AppJson<FacilityRequest>,
) -> Result<Json<ApiResponse<Facility>>, AppError> {
    validate(&req)?;
    let facility = db::create_facility(&state.pool, &req).await?;
    Ok(Json(ApiResponse::ok(facility)))
}

/// 대상이 없으면 필드 검증보다 먼저 404를 돌려줍니다.
pub async fn update_facility(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<FacilityRequest>,
) -> Result<Json<ApiResponse<Facility>>, AppError> {
    if db::get_facility(&state.pool, id).await?.is_none() {
        return Err(AppError::not_found(FACILITY_NOT_FOUND));
    }
    validate(&req)?;

    let facility = db::replace_facility(&state.pool, id, &req)
        .await?
        .ok_or(AppError::not_found(FACILITY_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(facility)))
}

pub async fn delete_facility(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_facility(&state.pool, id).await? {
        return Err(AppError::not_found(FACILITY_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_facility(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Facility>>, AppError> {
    let facility = db::get_facility(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(FACILITY_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(facility)))
}

pub async fn list_facilities(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Facility>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_facilities(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
