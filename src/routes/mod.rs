//! # 라우트 핸들러 모듈
//!
//! HTTP 요청을 처리하는 핸들러와 공유 상태(`AppState`)를 정의합니다.
//!
//! 각 하위 모듈은 `router()` 함수 하나로 자기 경로를 등록하고,
//! `api_router()`가 고정된 목록을 순서대로 합칩니다.
//! 새 엔티티를 추가하려면 모듈을 만들고 `ROUTERS`에 한 줄을 추가하면 됩니다.
//!
//! - `auth`: 이메일 가입/로그인, 토큰 갱신/폐기, 계정 인증, 프로필
//! - `oauth`: Google 로그인(ID 토큰, 리다이렉트 플로우), 쿠키 세션
//! - `health`: DB 연결 확인
//! - 나머지: 엔티티별 CRUD

pub mod articles;
pub mod auth;
pub mod comments;
pub mod facilities;
pub mod files;
pub mod health;
pub mod languages;
pub mod menus;
pub mod notices;
pub mod oauth;
pub mod refresh_tokens;
pub mod stores;
pub mod tags;
pub mod taggings;
pub mod users;
pub mod visit_history;

use axum::Router;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    services::google::{self, GoogleOAuthClient},
};

/// 애플리케이션 공유 상태
///
/// 모든 요청 핸들러가 `State(state): State<AppState>`로 접근합니다.
/// 필드는 모두 clone 비용이 낮은 타입입니다 (풀과 HTTP 클라이언트는 내부적으로 Arc).
#[derive(Clone)]
pub struct AppState {
    pub pool: SqlitePool,
    /// access 토큰 서명 키
    pub jwt_secret: String,
    /// refresh 토큰 서명 키
    pub jwt_refresh_secret: String,
    /// Google 호출용 (리다이렉트를 따라가지 않음)
    pub http_client: reqwest::Client,
    pub google_tokeninfo_url: String,
    pub google_userinfo_url: String,
    /// ID 토큰 `aud` 비교 대상
    pub google_client_id: Option<String>,
    /// Google OAuth 자격 증명이 없으면 None
    pub oauth_client: Option<GoogleOAuthClient>,
    pub frontend_url: String,
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(pool: SqlitePool, config: &Config) -> Result<Self, AppError> {
        let http_client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let oauth_client = config
            .google_oauth
            .as_ref()
            .map(|oauth| google::build_oauth_client(oauth, &config.google_token_url))
            .transpose()?;

        Ok(Self {
            pool,
            jwt_secret: config.jwt_secret.clone(),
            jwt_refresh_secret: config.jwt_refresh_secret.clone(),
            http_client,
            google_tokeninfo_url: config.google_tokeninfo_url.clone(),
            google_userinfo_url: config.google_userinfo_url.clone(),
            google_client_id: config.google_client_id.clone(),
            oauth_client,
            frontend_url: config.frontend_url.clone(),
            cookie_secure: config.cookie_secure,
        })
    }
}

const ROUTERS: &[fn() -> Router<AppState>] = &[
    health::router,
    auth::router,
    oauth::router,
    articles::router,
    comments::router,
    facilities::router,
    files::router,
    languages::router,
    menus::router,
    notices::router,
    refresh_tokens::router,
    stores::router,
    tags::router,
    taggings::router,
    users::router,
    visit_history::router,
];

/// `/api` 아래에 중첩될 전체 API 라우터
pub fn api_router() -> Router<AppState> {
    ROUTERS
        .iter()
        .fold(Router::new(), |router, register| router.merge(register()))
}
