//! 가입, 인증, 로그인, 토큰 갱신/폐기, 보호된 라우트

use axum::http::{Method, StatusCode};
use serde_json::json;

use travel_ar::middleware::auth::{verify_access_token, verify_refresh_token};

use super::test_utils::{TestApp, JWT_REFRESH_SECRET, JWT_SECRET};

// =============================================================================
// Register / Verify
// =============================================================================

#[tokio::test]
async fn test_register_creates_pending_user_with_tokens() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/register", json!({ "email": "taro@example.com", "password": "secret1" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["user"]["status"], "pending");
    assert_eq!(body["data"]["user"]["provider"], "email");
    assert!(body["data"]["user"].get("password").is_none());
    assert!(body["data"]["user"].get("verify_code").is_none());
    assert!(body["data"]["access_token"].is_string());
    assert!(body["data"]["refresh_token"].is_string());
}

#[tokio::test]
async fn test_register_validates_email_and_password() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/register", json!({ "email": "not-an-email", "password": "secret1" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "邮箱格式不正确");

    let (status, body) = app
        .post("/api/register", json!({ "email": "taro@example.com", "password": "12345" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "密码长度不能少于6位");
}

#[tokio::test]
async fn test_register_again_while_pending_resends_code() {
    let app = TestApp::new().await;
    let body = json!({ "email": "taro@example.com", "password": "secret1" });

    app.post("/api/register", body.clone()).await;
    let (status, resent) = app.post("/api/register", body).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(resent["success"], true);
    assert_eq!(resent["errMessage"], "验证码已重新发送，请查收邮箱");
    assert!(resent.get("data").is_none());

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_active_email_conflicts() {
    let app = TestApp::new().await;
    app.register_and_verify("taro@example.com", "secret1").await;

    let (status, body) = app
        .post("/api/register", json!({ "email": "taro@example.com", "password": "secret1" }))
        .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["errMessage"], "邮箱已被注册");
}

#[tokio::test]
async fn test_verify_rejects_wrong_code_then_activates() {
    let app = TestApp::new().await;
    app.post("/api/register", json!({ "email": "taro@example.com", "password": "secret1" }))
        .await;

    let code = app.stored_verify_code("taro@example.com").await;
    let wrong = if code == "0000" { "1111" } else { "0000" };

    let (status, body) = app
        .post("/api/verify", json!({ "email": "taro@example.com", "code": wrong }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "验证码错误或已过期");

    let (status, _) = app
        .post("/api/verify", json!({ "email": "taro@example.com", "code": code }))
        .await;
    assert_eq!(status, StatusCode::OK);

    let user_status: String = sqlx::query_scalar("SELECT status FROM users WHERE email = ?")
        .bind("taro@example.com")
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(user_status, "active");

    // 이미 active면 다시 인증할 수 없음
    let (status, _) = app
        .post("/api/verify", json!({ "email": "taro@example.com", "code": code }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_verify_expired_code() {
    let app = TestApp::new().await;
    app.post("/api/register", json!({ "email": "taro@example.com", "password": "secret1" }))
        .await;
    sqlx::query("UPDATE users SET verify_code_expire = '2000-01-01T00:00:00.000Z'")
        .execute(&app.pool)
        .await
        .unwrap();

    let code = app.stored_verify_code("taro@example.com").await;
    let (status, body) = app
        .post("/api/verify", json!({ "email": "taro@example.com", "code": code }))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "验证码错误或已过期");
}

#[tokio::test]
async fn test_verify_unknown_email() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/verify", json!({ "email": "nobody@example.com", "code": "1234" }))
        .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errMessage"], "用户不存在");
}

// =============================================================================
// Login
// =============================================================================

#[tokio::test]
async fn test_login_returns_tokens_for_the_user() {
    let app = TestApp::new().await;
    app.register_and_verify("taro@example.com", "secret1").await;

    let (status, body) = app
        .post("/api/login", json!({ "email": "taro@example.com", "password": "secret1" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    let user_id = body["data"]["user"]["user_id"].as_i64().unwrap();

    let access = body["data"]["access_token"].as_str().unwrap();
    let claims = verify_access_token(access, JWT_SECRET).unwrap();
    assert_eq!(claims.user_id(), Some(user_id));

    let refresh = body["data"]["refresh_token"].as_str().unwrap();
    assert!(verify_refresh_token(refresh, JWT_REFRESH_SECRET).is_ok());
    assert!(verify_access_token(refresh, JWT_SECRET).is_err());

    let stored: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM refresh_tokens WHERE user_id = ? AND revoked = 0",
    )
    .bind(user_id)
    .fetch_one(&app.pool)
    .await
    .unwrap();
    // 가입 1건 + 로그인 1건
    assert_eq!(stored, 2);
}

#[tokio::test]
async fn test_login_wrong_password() {
    let app = TestApp::new().await;
    app.register_and_verify("taro@example.com", "secret1").await;

    let (status, body) = app
        .post("/api/login", json!({ "email": "taro@example.com", "password": "wrong!" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["success"], false);
    assert_eq!(body["errMessage"], "密码错误");
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn test_login_unknown_email() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/login", json!({ "email": "nobody@example.com", "password": "secret1" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errMessage"], "用户不存在");
}

#[tokio::test]
async fn test_user_created_without_password_cannot_log_in() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/users",
            json!({ "email": "a@b.com", "provider": "email", "status": "pending" }),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["user_id"].as_i64().unwrap() > 0);

    let (status, body) = app
        .post("/api/login", json!({ "email": "a@b.com", "password": "wrong" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "success": false, "errCode": "unauthorized", "errMessage": "密码错误" }));
}

#[tokio::test]
async fn test_user_created_with_password_can_log_in() {
    let app = TestApp::new().await;
    app.post(
        "/api/users",
        json!({ "email": "admin@example.com", "password": "admin123", "provider": "email", "status": "active" }),
    )
    .await;

    let (status, _) = app
        .post("/api/login", json!({ "email": "admin@example.com", "password": "admin123" }))
        .await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Refresh / Logout
// =============================================================================

#[tokio::test]
async fn test_refresh_issues_new_access_token_and_keeps_refresh_token() {
    let app = TestApp::new().await;
    let registered = app.register_and_verify("taro@example.com", "secret1").await;
    let refresh = registered["data"]["refresh_token"].as_str().unwrap();

    let (status, body) = app
        .post("/api/refresh", json!({ "refresh_token": refresh }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["refresh_token"], refresh);
    let access = body["data"]["access_token"].as_str().unwrap();
    let claims = verify_access_token(access, JWT_SECRET).unwrap();
    assert_eq!(claims.user_id(), registered["data"]["user"]["user_id"].as_i64());
}

#[tokio::test]
async fn test_refresh_rejects_garbage() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/refresh", json!({ "refresh_token": "garbage" }))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errMessage"], "refresh token无效");
}

#[tokio::test]
async fn test_refresh_after_logout_fails() {
    let app = TestApp::new().await;
    let registered = app.register_and_verify("taro@example.com", "secret1").await;
    let refresh = registered["data"]["refresh_token"].as_str().unwrap();

    let (status, body) = app
        .post("/api/logout", json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let (status, body) = app
        .post("/api/refresh", json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errMessage"], "refresh token无效或已过期");

    // 두 번째 폐기는 클라이언트 에러
    let (status, body) = app
        .post("/api/logout", json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errMessage"], "无效或已撤销的refresh token");
}

#[tokio::test]
async fn test_refresh_with_expired_row_fails() {
    let app = TestApp::new().await;
    let registered = app.register_and_verify("taro@example.com", "secret1").await;
    let refresh = registered["data"]["refresh_token"].as_str().unwrap();

    sqlx::query("UPDATE refresh_tokens SET expires_at = '2000-01-01T00:00:00.000Z'")
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, _) = app
        .post("/api/refresh", json!({ "refresh_token": refresh }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Protected routes
// =============================================================================

#[tokio::test]
async fn test_profile_requires_bearer_token() {
    let app = TestApp::new().await;

    let (status, body) = app.get("/api/auth/user/profile").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errCode"], "missing_token");
    assert_eq!(body["errMessage"], "未登录，缺少token");

    let (status, body) = app
        .request(Method::GET, "/api/auth/user/profile", None, Some("not-a-jwt"))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errMessage"], "token无效或已过期");
}

#[tokio::test]
async fn test_profile_returns_current_user() {
    let app = TestApp::new().await;
    let registered = app.register_and_verify("taro@example.com", "secret1").await;
    let access = registered["data"]["access_token"].as_str().unwrap();

    let (status, body) = app
        .request(Method::GET, "/api/auth/user/profile", None, Some(access))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["email"], "taro@example.com");
    assert_eq!(body["data"]["status"], "active");
}

#[tokio::test]
async fn test_article_writes_require_authentication() {
    let app = TestApp::new().await;
    let article = json!({
        "title": "Fushimi Inari",
        "body_text": "Thousands of torii gates",
        "like_count": 0,
        "comment_count": 0
    });

    let (status, body) = app.post("/api/articles", article.clone()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errMessage"], "未登录，缺少token");

    let registered = app.register_and_verify("taro@example.com", "secret1").await;
    let access = registered["data"]["access_token"].as_str().unwrap();

    let (status, body) = app
        .request(Method::POST, "/api/articles", Some(article), Some(access))
        .await;
    assert_eq!(status, StatusCode::OK);
    let id = body["data"]["article_id"].as_i64().unwrap();

    // 읽기는 공개
    let (status, body) = app.get(&format!("/api/articles/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Fushimi Inari");

    let (status, _) = app.delete(&format!("/api/articles/{}", id)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .request(Method::DELETE, &format!("/api/articles/{}", id), None, Some(access))
        .await;
    assert_eq!(status, StatusCode::OK);
}
