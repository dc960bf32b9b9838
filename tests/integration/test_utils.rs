//! 테스트 공용 도우미: 앱 생성, 요청 전송, 가짜 Google 서버 (tokeninfo / token / userinfo)

use std::collections::HashMap;

use axum::{
    body::Body,
    extract::Query,
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Form, Json, Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use sqlx::SqlitePool;
use tower::ServiceExt;

use travel_ar::{
    build_app,
    config::{Config, GoogleOAuthConfig},
    db,
    routes::AppState,
};

pub const JWT_SECRET: &str = "test-access-secret";
pub const JWT_REFRESH_SECRET: &str = "test-refresh-secret";

/// 가짜 tokeninfo가 유효하다고 답하는 ID 토큰
pub const GOOD_ID_TOKEN: &str = "good-id-token";
/// 유효하지만 email이 빠진 프로필을 돌려주는 ID 토큰
pub const NO_EMAIL_ID_TOKEN: &str = "no-email-id-token";
/// 다른 클라이언트(`aud`)에 발급된 ID 토큰
pub const OTHER_CLIENT_ID_TOKEN: &str = "other-client-id-token";

pub const GOOGLE_CLIENT_ID: &str = "test-client-id";
pub const FRONTEND_URL: &str = "http://localhost:5173";
/// 가짜 token 엔드포인트가 받아 주는 인가 코드
pub const GOOD_AUTH_CODE: &str = "good-auth-code";
const MOCK_ACCESS_TOKEN: &str = "mock-google-access-token";

pub struct TestApp {
    pub router: Router,
    pub pool: SqlitePool,
}

impl TestApp {
    /// Google 엔드포인트는 아무도 듣지 않는 포트를 가리킵니다.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// `base`에 떠 있는 가짜 Google 서버를 씁니다. OAuth 자격 증명과 client id도 채웁니다.
    pub async fn with_mock_google(base: &str) -> Self {
        Self::with_config(|config| {
            config.google_tokeninfo_url = format!("{}/tokeninfo", base);
            config.google_token_url = format!("{}/token", base);
            config.google_userinfo_url = format!("{}/userinfo", base);
            config.google_client_id = Some(GOOGLE_CLIENT_ID.to_string());
            config.google_oauth = Some(GoogleOAuthConfig {
                client_id: GOOGLE_CLIENT_ID.to_string(),
                client_secret: "test-client-secret".to_string(),
                redirect_url: "http://localhost:8080/api/auth/google/callback".to_string(),
            });
        })
        .await
    }

    pub async fn with_config(configure: impl FnOnce(&mut Config)) -> Self {
        let pool = db::connect("sqlite::memory:").await.unwrap();
        db::migrate(&pool).await.unwrap();

        let mut config = Config::new("sqlite::memory:", JWT_SECRET, JWT_REFRESH_SECRET);
        config.google_tokeninfo_url = "http://127.0.0.1:9/tokeninfo".to_string();
        config.google_token_url = "http://127.0.0.1:9/token".to_string();
        config.google_userinfo_url = "http://127.0.0.1:9/userinfo".to_string();
        config.frontend_url = FRONTEND_URL.to_string();
        configure(&mut config);

        let state = AppState::new(pool.clone(), &config).unwrap();
        let router = build_app(state, None);

        Self { router, pool }
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        body: Option<Value>,
        bearer: Option<&str>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = bearer {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }

        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };

        (status, json)
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body), None).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(body), None).await
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None, None).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::DELETE, uri, None, None).await
    }

    /// 가입 후 DB에 저장된 인증 코드로 계정을 활성화합니다.
    pub async fn register_and_verify(&self, email: &str, password: &str) -> Value {
        let (status, body) = self
            .post("/api/register", json!({ "email": email, "password": password }))
            .await;
        assert_eq!(status, StatusCode::OK, "register failed: {}", body);

        let code = self.stored_verify_code(email).await;
        let (status, _) = self
            .post("/api/verify", json!({ "email": email, "code": code }))
            .await;
        assert_eq!(status, StatusCode::OK);

        body
    }

    pub async fn stored_verify_code(&self, email: &str) -> String {
        sqlx::query_scalar::<_, String>("SELECT verify_code FROM users WHERE email = ?")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}

pub fn store_body(name: &str) -> Value {
    json!({
        "store_name": name,
        "store_category": "cafe",
        "location": "Kyoto",
        "description": "matcha",
        "address": "1-2-3 Gion",
        "latitude": 35.0037,
        "longitude": 135.7788,
        "business_hours": "09:00-18:00",
        "rating_score": 4.5,
        "phone_number": "075-000-0000"
    })
}

pub fn facility_body(name: &str) -> Value {
    json!({
        "facility_name": name,
        "location": "Nara",
        "description": "deer park",
        "latitude": 34.685,
        "longitude": 135.843
    })
}

async fn tokeninfo(Query(params): Query<HashMap<String, String>>) -> impl IntoResponse {
    match params.get("id_token").map(String::as_str) {
        Some(GOOD_ID_TOKEN) => (
            StatusCode::OK,
            Json(json!({
                "sub": "google-sub-1",
                "aud": GOOGLE_CLIENT_ID,
                "email": "hanako@example.com",
                "name": "Hanako",
                "picture": "https://example.com/hanako.png"
            })),
        ),
        Some(NO_EMAIL_ID_TOKEN) => (
            StatusCode::OK,
            Json(json!({ "sub": "google-sub-2", "aud": GOOGLE_CLIENT_ID })),
        ),
        Some(OTHER_CLIENT_ID_TOKEN) => (
            StatusCode::OK,
            Json(json!({
                "sub": "google-sub-1",
                "aud": "someone-elses-client",
                "email": "hanako@example.com"
            })),
        ),
        _ => (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_token" })),
        ),
    }
}

async fn token(Form(params): Form<HashMap<String, String>>) -> impl IntoResponse {
    if params.get("code").map(String::as_str) != Some(GOOD_AUTH_CODE) {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "invalid_grant" })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "access_token": MOCK_ACCESS_TOKEN,
            "token_type": "Bearer",
            "expires_in": 3600
        })),
    )
}

async fn userinfo(headers: HeaderMap) -> impl IntoResponse {
    let expected = format!("Bearer {}", MOCK_ACCESS_TOKEN);
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        == Some(expected.as_str());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, Json(json!({ "error": "invalid_token" })));
    }

    (
        StatusCode::OK,
        Json(json!({
            "sub": "google-sub-3",
            "email": "jiro@example.com",
            "name": "Jiro"
        })),
    )
}

/// 임의 포트에 가짜 Google 서버를 띄우고 베이스 URL을 돌려줍니다.
pub async fn spawn_mock_google() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new()
        .route("/tokeninfo", get(tokeninfo))
        .route("/token", post(token))
        .route("/userinfo", get(userinfo));

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
