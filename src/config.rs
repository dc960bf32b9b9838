//! # 애플리케이션 설정(Configuration) 모듈
//!
//! 환경변수(`.env` 포함)에서 서버 설정값을 읽어옵니다.
//!
//! 설정 항목:
//! - `DATABASE_URL`: SQLite 연결 문자열. 없으면 `BLUEPRINT_DB_DATABASE`(기본 `travel_ar`)로
//!   `sqlite:data/<이름>.db?mode=rwc`를 만듭니다.
//! - `JWT_SECRET` / `JWT_REFRESH_SECRET`: access / refresh 토큰 서명 키 (필수)
//! - `HOST`, `SERVER_PORT`(또는 `PORT`): 바인딩 주소
//! - `GOOGLE_CLIENT_ID`, `GOOGLE_CLIENT_SECRET`, `GOOGLE_REDIRECT_URL`: 셋 다 있어야
//!   Google OAuth 리다이렉트 플로우가 켜집니다.
//!   `GOOGLE_CLIENT_ID`만 있어도 ID 토큰의 `aud`를 이 값과 비교합니다.
//! - `GOOGLE_TOKENINFO_URL`, `GOOGLE_USERINFO_URL`, `GOOGLE_TOKEN_URL`: Google 엔드포인트
//!   (테스트에서 교체)
//! - `FRONTEND_URL`: OAuth 콜백 후 돌아갈 주소
//! - `FRONTEND_DIST`: 빌드된 SPA 디렉토리
//! - `COOKIE_SECURE`: 쿠키에 `Secure` 속성을 붙일지 여부

use std::env;

use anyhow::Context;

pub const DEFAULT_DATABASE_NAME: &str = "travel_ar";
pub const DEFAULT_TOKENINFO_URL: &str = "https://oauth2.googleapis.com/tokeninfo";
pub const DEFAULT_USERINFO_URL: &str = "https://openidconnect.googleapis.com/v1/userinfo";
pub const DEFAULT_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

/// Google OAuth 클라이언트 자격 증명
#[derive(Debug, Clone)]
pub struct GoogleOAuthConfig {
    pub client_id: String,
    pub client_secret: String,
    pub redirect_url: String,
}

/// 애플리케이션 전체 설정
///
/// 서버 시작 시 한 번 읽어서 `AppState`를 만드는 데 사용합니다.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub jwt_refresh_secret: String,
    pub host: String,
    pub port: u16,
    /// None이면 `/api/auth/google` (ID 토큰 방식)만 동작합니다.
    pub google_oauth: Option<GoogleOAuthConfig>,
    /// 있으면 ID 토큰의 `aud`가 이 값과 같아야 합니다.
    pub google_client_id: Option<String>,
    pub google_tokeninfo_url: String,
    pub google_userinfo_url: String,
    /// 인가 코드 교환 엔드포인트
    pub google_token_url: String,
    pub frontend_url: String,
    pub frontend_dist: String,
    pub cookie_secure: bool,
}

impl Config {
    /// 필수 값만 받고 나머지는 기본값으로 채웁니다.
    pub fn new(
        database_url: impl Into<String>,
        jwt_secret: impl Into<String>,
        jwt_refresh_secret: impl Into<String>,
    ) -> Self {
        Self {
            database_url: database_url.into(),
            jwt_secret: jwt_secret.into(),
            jwt_refresh_secret: jwt_refresh_secret.into(),
            host: "0.0.0.0".to_string(),
            port: 8080,
            google_oauth: None,
            google_client_id: None,
            google_tokeninfo_url: DEFAULT_TOKENINFO_URL.to_string(),
            google_userinfo_url: DEFAULT_USERINFO_URL.to_string(),
            google_token_url: DEFAULT_TOKEN_URL.to_string(),
            frontend_url: "http://localhost:5173".to_string(),
            frontend_dist: "client/dist".to_string(),
            cookie_secure: false,
        }
    }

    /// 환경변수에서 설정값을 읽어 Config를 만듭니다.
    ///
    /// # 에러
    /// `JWT_SECRET`, `JWT_REFRESH_SECRET`이 없으면 빠진 변수 이름을 담은 에러를 반환합니다.
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL").unwrap_or_else(|_| {
            let name = env::var("BLUEPRINT_DB_DATABASE")
                .unwrap_or_else(|_| DEFAULT_DATABASE_NAME.to_string());
            sqlite_url_for(&name)
        });

        let mut config = Self::new(
            database_url,
            required_var("JWT_SECRET")?,
            required_var("JWT_REFRESH_SECRET")?,
        );

        if let Ok(host) = env::var("HOST") {
            config.host = host;
        }
        if let Some(port) = env::var("SERVER_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
        {
            config.port = port;
        }

        config.google_oauth = match (
            env::var("GOOGLE_CLIENT_ID"),
            env::var("GOOGLE_CLIENT_SECRET"),
            env::var("GOOGLE_REDIRECT_URL"),
        ) {
            (Ok(client_id), Ok(client_secret), Ok(redirect_url)) => Some(GoogleOAuthConfig {
                client_id,
                client_secret,
                redirect_url,
            }),
            _ => None,
        };
        config.google_client_id = env::var("GOOGLE_CLIENT_ID").ok().filter(|id| !id.is_empty());

        if let Ok(url) = env::var("GOOGLE_TOKENINFO_URL") {
            config.google_tokeninfo_url = url;
        }
        if let Ok(url) = env::var("GOOGLE_USERINFO_URL") {
            config.google_userinfo_url = url;
        }
        if let Ok(url) = env::var("GOOGLE_TOKEN_URL") {
            config.google_token_url = url;
        }
        if let Ok(url) = env::var("FRONTEND_URL") {
            config.frontend_url = url;
        }
        if let Ok(dist) = env::var("FRONTEND_DIST") {
            config.frontend_dist = dist;
        }
        config.cookie_secure = env::var("COOKIE_SECURE")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);

        Ok(config)
    }
}

/// 데이터베이스 이름으로 SQLite 연결 문자열을 만듭니다 (파일이 없으면 생성).
pub fn sqlite_url_for(name: &str) -> String {
    format!("sqlite:data/{}.db?mode=rwc", name)
}

fn required_var(name: &str) -> anyhow::Result<String> {
    env::var(name).with_context(|| format!("{} must be set", name))
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
