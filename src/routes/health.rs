//! # 헬스체크(Health Check) 핸들러
//!
//! ## 엔드포인트
//! - `GET /api/health` → `{ "status": "up" }`
//!
//! DB에 `SELECT 1`을 보내 연결이 살아 있는지까지 확인합니다.
//! 실패하면 일반 에러 봉투(500)가 반환됩니다.

use axum::{extract::State, routing::get, Json, Router};
use serde_json::{json, Value};

use crate::{db, error::AppError, routes::AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}

pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    db::ping(&state.pool).await?;
    Ok(Json(json!({ "status": "up" })))
}
