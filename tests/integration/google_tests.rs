//! Google ID 토큰 로그인, OAuth 리다이렉트 진입점, 쿠키 세션

use axum::{
    body::Body,
    http::{header, HeaderMap, Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use travel_ar::middleware::auth::{create_access_token, verify_access_token};

use super::test_utils::{
    spawn_mock_google, TestApp, FRONTEND_URL, GOOD_AUTH_CODE, GOOD_ID_TOKEN, JWT_SECRET,
    NO_EMAIL_ID_TOKEN, OTHER_CLIENT_ID_TOKEN,
};

#[tokio::test]
async fn test_google_id_token_creates_and_reuses_user() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    let (status, first) = app
        .post("/api/auth/google", json!({ "id_token": GOOD_ID_TOKEN }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["data"]["user"]["email"], "hanako@example.com");
    assert_eq!(first["data"]["user"]["google_id"], "google-sub-1");
    assert_eq!(first["data"]["user"]["provider"], "google");
    assert_eq!(first["data"]["user"]["status"], "active");

    let user_id = first["data"]["user"]["user_id"].as_i64().unwrap();
    let access = first["data"]["access_token"].as_str().unwrap();
    assert_eq!(
        verify_access_token(access, JWT_SECRET).unwrap().user_id(),
        Some(user_id)
    );

    let (_, second) = app
        .post("/api/auth/google", json!({ "id_token": GOOD_ID_TOKEN }))
        .await;
    assert_eq!(second["data"]["user"]["user_id"], user_id);
}

#[tokio::test]
async fn test_google_login_links_existing_email_account() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;
    let registered = app.register_and_verify("hanako@example.com", "secret1").await;
    let user_id = registered["data"]["user"]["user_id"].as_i64().unwrap();

    let (status, body) = app
        .post("/api/auth/google", json!({ "id_token": GOOD_ID_TOKEN }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["user_id"], user_id);
    assert_eq!(body["data"]["user"]["google_id"], "google-sub-1");
}

#[tokio::test]
async fn test_google_rejects_bad_tokens() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    let (status, body) = app
        .post("/api/auth/google", json!({ "id_token": "forged" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "Google token无效");

    let (status, body) = app
        .post("/api/auth/google", json!({ "id_token": NO_EMAIL_ID_TOKEN }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "Google用户信息不完整");
}

#[tokio::test]
async fn test_google_unreachable_is_invalid_token() {
    // 기본 TestApp은 아무도 듣지 않는 포트를 가리킴
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/auth/google", json!({ "id_token": GOOD_ID_TOKEN }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "Google token无效");
}

#[tokio::test]
async fn test_unknown_provider_and_unconfigured_oauth() {
    let app = TestApp::new().await;

    let (status, _) = app
        .post("/api/auth/apple", json!({ "id_token": GOOD_ID_TOKEN }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Google 자격 증명 없이 리다이렉트 플로우 진입
    let (status, body) = app.get("/api/auth/google").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "Google登录未配置");
}

async fn cookie_request(
    app: &TestApp,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
) -> (StatusCode, HeaderMap, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = app
        .router
        .clone()
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, headers, body)
}

/// `name=value` 형태로 해당 쿠키의 `Set-Cookie` 값을 찾습니다.
fn set_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let prefix = format!("{}=", name);
    headers
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(str::to_string)
}

fn cookie_pair(set_cookie: &str) -> &str {
    set_cookie.split(';').next().unwrap()
}

#[tokio::test]
async fn test_cookie_session() {
    let app = TestApp::new().await;
    let registered = app.register_and_verify("taro@example.com", "secret1").await;
    let user_id = registered["data"]["user"]["user_id"].as_i64().unwrap();

    let (status, _, body) = cookie_request(&app, "GET", "/api/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errCode"], "missing_token");

    let token = create_access_token(user_id, JWT_SECRET).unwrap();
    let cookie = format!("theme=dark; token={}", token);
    let (status, _, body) = cookie_request(&app, "GET", "/api/me", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "taro@example.com");

    let (status, headers, body) =
        cookie_request(&app, "POST", "/api/auth/session/logout", Some(&cookie)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let cleared = set_cookie(&headers, "token").unwrap();
    assert!(cleared.starts_with("token=;"));
    assert!(cleared.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_google_login_activates_pending_account() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    // 인증 코드를 입력하지 않은 가입자
    let (status, registered) = app
        .post(
            "/api/register",
            json!({ "email": "hanako@example.com", "password": "secret1" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(registered["data"]["user"]["status"], "pending");

    let (status, body) = app
        .post("/api/auth/google", json!({ "id_token": GOOD_ID_TOKEN }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["status"], "active");
    let user_id = body["data"]["user"]["user_id"].as_i64().unwrap();

    // 이미 연결된 google_id로 찾은 사용자도 활성화
    let (status, _) = app
        .put("/api/users", json!({ "user_id": user_id, "status": "pending" }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app
        .post("/api/auth/google", json!({ "id_token": GOOD_ID_TOKEN }))
        .await;
    assert_eq!(body["data"]["user"]["user_id"], user_id);
    assert_eq!(body["data"]["user"]["status"], "active");
}

#[tokio::test]
async fn test_id_token_for_another_client_is_rejected() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    let (status, body) = app
        .post("/api/auth/google", json!({ "id_token": OTHER_CLIENT_ID_TOKEN }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "Google token无效");
}

#[tokio::test]
async fn test_oauth_begin_redirects_with_state_cookie() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    let (status, headers, _) = cookie_request(&app, "GET", "/api/auth/google", None).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);

    let location = headers[header::LOCATION].to_str().unwrap();
    assert!(location.starts_with("https://accounts.google.com/"));
    assert!(location.contains("client_id=test-client-id"));

    let state_cookie = set_cookie(&headers, "oauth_state").unwrap();
    assert!(state_cookie.contains("HttpOnly"));
    let state = cookie_pair(&state_cookie).trim_start_matches("oauth_state=");
    assert!(!state.is_empty());
    assert!(location.contains(&format!("state={}", state)));
}

#[tokio::test]
async fn test_oauth_callback_rejects_state_mismatch() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    let uri = format!("/api/auth/google/callback?code={}&state=wrong", GOOD_AUTH_CODE);

    // state 쿠키 없음
    let (status, _, body) = cookie_request(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "OAuth state校验失败");

    // 쿠키와 쿼리의 state가 다름
    let (status, _, body) =
        cookie_request(&app, "GET", &uri, Some("oauth_state=expected")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "OAuth state校验失败");

    // code 없음
    let (status, _, body) = cookie_request(
        &app,
        "GET",
        "/api/auth/google/callback?state=expected",
        Some("oauth_state=expected"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "OAuth state校验失败");

    let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[tokio::test]
async fn test_oauth_callback_denied_or_bad_code() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    let (status, _, body) = cookie_request(
        &app,
        "GET",
        "/api/auth/google/callback?error=access_denied&state=s1",
        Some("oauth_state=s1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "Google授权失败");

    let (status, _, body) = cookie_request(
        &app,
        "GET",
        "/api/auth/google/callback?code=stolen-code&state=s1",
        Some("oauth_state=s1"),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "Google授权失败");
}

#[tokio::test]
async fn test_oauth_round_trip_sets_session_cookie() {
    let base = spawn_mock_google().await;
    let app = TestApp::with_mock_google(&base).await;

    let (_, headers, _) = cookie_request(&app, "GET", "/api/auth/google", None).await;
    let state_cookie = set_cookie(&headers, "oauth_state").unwrap();
    let state_pair = cookie_pair(&state_cookie).to_string();
    let state = state_pair.trim_start_matches("oauth_state=");

    let uri = format!(
        "/api/auth/google/callback?code={}&state={}",
        GOOD_AUTH_CODE, state
    );
    let (status, headers, _) = cookie_request(&app, "GET", &uri, Some(&state_pair)).await;
    assert_eq!(status, StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(headers[header::LOCATION], FRONTEND_URL);

    let cleared = set_cookie(&headers, "oauth_state").unwrap();
    assert!(cleared.contains("Max-Age=0"));

    let token_cookie = set_cookie(&headers, "token").unwrap();
    assert!(token_cookie.contains("Max-Age=900"));
    let token = cookie_pair(&token_cookie).trim_start_matches("token=");
    let claims = verify_access_token(token, JWT_SECRET).unwrap();

    let (status, _, body) =
        cookie_request(&app, "GET", "/api/me", Some(cookie_pair(&token_cookie))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "jiro@example.com");
    assert_eq!(body["data"]["google_id"], "google-sub-3");
    assert_eq!(body["data"]["status"], "active");
    assert_eq!(claims.user_id(), body["data"]["user_id"].as_i64());
}
