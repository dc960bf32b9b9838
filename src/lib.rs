//! # travel-ar 백엔드 라이브러리
//!
//! 실행 파일(`main.rs`)과 통합 테스트(`tests/`)가 같은 앱을 조립할 수 있도록
//! 모듈과 `build_app`을 라이브러리로 공개합니다.

pub mod config;
pub mod db;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::path::Path;

use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use routes::AppState;

/// 전체 앱 라우터를 만듭니다.
///
/// API는 `/api` 아래에 중첩되고, `frontend_dist` 디렉토리가 있으면
/// 나머지 경로는 SPA 정적 파일로 처리합니다 (없는 경로는 `index.html`).
pub fn build_app(state: AppState, frontend_dist: Option<&str>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let router = Router::new().nest("/api", routes::api_router().with_state(state));

    let router = match frontend_dist.filter(|dir| Path::new(dir).is_dir()) {
        Some(dir) => {
            tracing::info!("Serving frontend static files from {}", dir);
            let index = Path::new(dir).join("index.html");
            router.fallback_service(ServeDir::new(dir).not_found_service(ServeFile::new(index)))
        }
        None => router,
    };

    router.layer(cors).layer(TraceLayer::new_for_http())
}
