//! # Google 로그인과 쿠키 세션 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/auth/{provider}`: 클라이언트가 받은 Google ID 토큰으로 로그인
//! - `GET /api/auth/{provider}`: Google 인가 페이지로 리다이렉트
//! - `GET /api/auth/{provider}/callback`: 인가 코드 교환 후 `token` 쿠키 설정
//! - `GET /api/me`: `token` 쿠키의 사용자
//! - `POST /api/auth/session/logout`: `token` 쿠키 만료
//!
//! `provider`는 현재 `google`만 지원합니다.
//! 정적 경로 `/auth/google`을 따로 두면 같은 모양의 `{provider}` 경로와 충돌하므로
//! 두 메서드를 한 경로에 묶었습니다.

use axum::{
    extract::{Query, State},
    http::{header::SET_COOKIE, HeaderMap},
    response::{AppendHeaders, IntoResponse, Redirect},
    routing::{get, post},
    Json, Router,
};
use oauth2::{AuthorizationCode, CsrfToken, Scope, TokenResponse};
use serde::Deserialize;

use crate::{
    db::users as db_users,
    error::AppError,
    extract::{AppJson, AppPath},
    middleware::auth::{read_cookie, CookieUser, ACCESS_TOKEN_TTL_MINUTES, TOKEN_COOKIE},
    models::*,
    routes::{auth::issue_tokens, AppState},
    services::google::{self, GoogleOAuthClient},
};

const OAUTH_STATE_COOKIE: &str = "oauth_state";
const OAUTH_STATE_MAX_AGE: i64 = 600;

const UNSUPPORTED_PROVIDER: &str = "不支持的登录方式";
const OAUTH_NOT_CONFIGURED: &str = "Google登录未配置";
const STATE_MISMATCH: &str = "OAuth state校验失败";
const OAUTH_DENIED: &str = "Google授权失败";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/auth/{provider}", get(begin).post(google_login))
        .route("/auth/{provider}/callback", get(callback))
        .route("/me", get(me))
        .route("/auth/session/logout", post(session_logout))
}

#[derive(Debug, Deserialize)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
}

fn ensure_google(provider: &str) -> Result<(), AppError> {
    if provider == PROVIDER_GOOGLE {
        Ok(())
    } else {
        Err(AppError::bad_request(UNSUPPORTED_PROVIDER))
    }
}

fn oauth_client(state: &AppState) -> Result<&GoogleOAuthClient, AppError> {
    state
        .oauth_client
        .as_ref()
        .ok_or(AppError::bad_request(OAUTH_NOT_CONFIGURED))
}

/// `Set-Cookie` 값: 항상 HttpOnly, SameSite=Lax, 경로 `/`
fn session_cookie(name: &str, value: &str, max_age: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, value, max_age
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `POST /api/auth/google` + `{ "id_token": "..." }`
pub async fn google_login(
    State(state): State<AppState>,
    AppPath(provider): AppPath<String>,
    AppJson(req): AppJson<GoogleLoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    ensure_google(&provider)?;

    let profile = google::verify_id_token(
        &state.http_client,
        &state.google_tokeninfo_url,
        &req.id_token,
        state.google_client_id.as_deref(),
    )
    .await?;
    let user = db_users::upsert_google_user(&state.pool, &profile.into_new_user()?).await?;
    tracing::info!("User {} logged in with Google ID token", user.user_id);

    let auth = issue_tokens(&state, user).await?;
    Ok(Json(ApiResponse::ok(auth)))
}

pub async fn begin(
    State(state): State<AppState>,
    AppPath(provider): AppPath<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_google(&provider)?;

    let (url, csrf_state) = oauth_client(&state)?
        .authorize_url(CsrfToken::new_random)
        .add_scope(Scope::new("openid".to_string()))
        .add_scope(Scope::new("email".to_string()))
        .add_scope(Scope::new("profile".to_string()))
        .url();

    let cookie = session_cookie(
        OAUTH_STATE_COOKIE,
        csrf_state.secret(),
        OAUTH_STATE_MAX_AGE,
        state.cookie_secure,
    );

    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Redirect::temporary(url.as_str()),
    ))
}

pub async fn callback(
    State(state): State<AppState>,
    AppPath(provider): AppPath<String>,
    headers: HeaderMap,
    Query(params): Query<CallbackParams>,
) -> Result<impl IntoResponse, AppError> {
    ensure_google(&provider)?;
    let client = oauth_client(&state)?;

    if let Some(error) = params.error {
        tracing::warn!("Google authorization denied: {}", error);
        return Err(AppError::bad_request(OAUTH_DENIED));
    }

    let expected = read_cookie(&headers, OAUTH_STATE_COOKIE);
    let (Some(code), Some(returned)) = (params.code, params.state) else {
        return Err(AppError::bad_request(STATE_MISMATCH));
    };
    if expected != Some(returned.as_str()) {
        return Err(AppError::bad_request(STATE_MISMATCH));
    }

    let token = client
        .exchange_code(AuthorizationCode::new(code))
        .request_async(&state.http_client)
        .await
        .map_err(|e| {
            tracing::warn!("Google code exchange failed: {}", e);
            AppError::bad_request(OAUTH_DENIED)
        })?;

    let profile = google::fetch_userinfo(
        &state.http_client,
        &state.google_userinfo_url,
        token.access_token().secret(),
    )
    .await?;
    let user = db_users::upsert_google_user(&state.pool, &profile.into_new_user()?).await?;
    tracing::info!("User {} logged in with Google OAuth", user.user_id);

    let auth = issue_tokens(&state, user).await?;

    Ok((
        AppendHeaders([
            (
                SET_COOKIE,
                session_cookie(
                    TOKEN_COOKIE,
                    &auth.access_token,
                    ACCESS_TOKEN_TTL_MINUTES * 60,
                    state.cookie_secure,
                ),
            ),
            (
                SET_COOKIE,
                session_cookie(OAUTH_STATE_COOKIE, "", 0, state.cookie_secure),
            ),
        ]),
        Redirect::temporary(&state.frontend_url),
    ))
}

pub async fn me(
    State(state): State<AppState>,
    cookie_user: CookieUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = db_users::find_by_id(&state.pool, cookie_user.user_id)
        .await?
        .ok_or(AppError::not_found(USER_NOT_FOUND))?;

    Ok(Json(ApiResponse::ok(user)))
}

pub async fn session_logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        AppendHeaders([(
            SET_COOKIE,
            session_cookie(TOKEN_COOKIE, "", 0, state.cookie_secure),
        )]),
        Json(BaseResponse::ok()),
    )
}
