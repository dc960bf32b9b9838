//! # 이메일 인증 핸들러
//!
//! ## 엔드포인트
//! - `POST /api/register`: 가입 (pending 상태 + 4자리 인증 코드)
//! - `POST /api/login`: 로그인, access/refresh 토큰 발급
//! - `POST /api/refresh`: access 토큰 재발급 (refresh 토큰은 그대로)
//! - `POST /api/logout`: refresh 토큰 폐기
//! - `POST /api/verify`: 인증 코드 확인 후 active 전환
//! - `GET /api/auth/user/profile`: 현재 사용자 (Bearer 필요)
//!
//! refresh 토큰은 DB에 SHA-256 해시로만 저장됩니다.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};

use crate::{
    db::{refresh_tokens as db_tokens, users as db_users},
    error::AppError,
    extract::AppJson,
    middleware::auth::{
        create_access_token, create_refresh_token, hash_token, verify_refresh_token, AuthUser,
    },
    models::*,
    routes::AppState,
    services::password::{
        generate_verify_code, hash_password, is_valid_email, verify_password, MIN_PASSWORD_LEN,
    },
};

const INVALID_EMAIL: &str = "邮箱格式不正确";
const PASSWORD_TOO_SHORT: &str = "密码长度不能少于6位";
const CODE_RESENT: &str = "验证码已重新发送，请查收邮箱";
const WRONG_PASSWORD: &str = "密码错误";
const INVALID_REFRESH_TOKEN: &str = "refresh token无效";
const EXPIRED_REFRESH_TOKEN: &str = "refresh token无效或已过期";
const REVOKED_REFRESH_TOKEN: &str = "无效或已撤销的refresh token";
const NOT_PENDING: &str = "账号无需验证";
const WRONG_CODE: &str = "验证码错误或已过期";

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/refresh", post(refresh))
        .route("/logout", post(logout))
        .route("/verify", post(verify))
        .route("/auth/user/profile", get(profile))
}

/// access 토큰과 refresh 토큰을 발급하고 refresh 토큰 해시를 저장합니다.
///
/// 이메일 로그인, 가입, Google 로그인이 모두 이 함수를 거칩니다.
pub(crate) async fn issue_tokens(state: &AppState, user: User) -> Result<AuthResponse, AppError> {
    let token_error = |e: jsonwebtoken::errors::Error| {
        AppError::Internal(format!("Token generation failed: {}", e))
    };

    let access_token = create_access_token(user.user_id, &state.jwt_secret).map_err(token_error)?;
    let (refresh_token, expires_at) =
        create_refresh_token(user.user_id, &state.jwt_refresh_secret).map_err(token_error)?;

    db_tokens::store_refresh_token(
        &state.pool,
        user.user_id,
        &hash_token(&refresh_token),
        &format_timestamp(expires_at),
        false,
    )
    .await?;

    Ok(AuthResponse {
        user,
        access_token,
        refresh_token,
    })
}

/// 이미 pending인 이메일이면 코드만 새로 발급하고 메시지 봉투를 돌려줍니다.
pub async fn register(
    State(state): State<AppState>,
    AppJson(req): AppJson<RegisterRequest>,
) -> Result<Response, AppError> {
    let email = req.email.trim();
    if !is_valid_email(email) {
        return Err(AppError::bad_request(INVALID_EMAIL));
    }
    if req.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::bad_request(PASSWORD_TOO_SHORT));
    }

    if let Some(existing) = db_users::find_by_email(&state.pool, email).await? {
        if existing.status != STATUS_PENDING {
            return Err(AppError::Conflict(EMAIL_TAKEN.to_string()));
        }

        let (code, expires_at) = generate_verify_code();
        db_users::set_verify_code(&state.pool, existing.user_id, &code, &format_timestamp(expires_at))
            .await?;
        tracing::info!("Verification code resent to user {}", existing.user_id);
        tracing::debug!("Verification code for {}: {}", email, code);

        return Ok(Json(BaseResponse::ok_with_message(CODE_RESENT)).into_response());
    }

    let password_hash = hash_password(&req.password)?;
    let (code, expires_at) = generate_verify_code();
    let user = db_users::create_pending_user(
        &state.pool,
        email,
        &password_hash,
        &code,
        &format_timestamp(expires_at),
    )
    .await?;
    tracing::info!("Registered user {} ({})", user.user_id, email);
    tracing::debug!("Verification code for {}: {}", email, code);

    let auth = issue_tokens(&state, user).await?;
    Ok(Json(ApiResponse::ok(auth)).into_response())
}

pub async fn login(
    State(state): State<AppState>,
    AppJson(req): AppJson<LoginRequest>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let user = db_users::find_by_email(&state.pool, req.email.trim())
        .await?
        .ok_or(AppError::Unauthorized(USER_NOT_FOUND.to_string()))?;

    // Google 전용 계정처럼 비밀번호가 없으면 틀린 것과 같게 취급
    let matches = match user.password.as_deref() {
        Some(hash) => verify_password(&req.password, hash)?,
        None => false,
    };
    if !matches {
        return Err(AppError::Unauthorized(WRONG_PASSWORD.to_string()));
    }

    tracing::info!("User {} logged in", user.user_id);
    let auth = issue_tokens(&state, user).await?;
    Ok(Json(ApiResponse::ok(auth)))
}

pub async fn refresh(
    State(state): State<AppState>,
    AppJson(req): AppJson<RefreshRequest>,
) -> Result<Json<ApiResponse<RefreshResponse>>, AppError> {
    verify_refresh_token(&req.refresh_token, &state.jwt_refresh_secret)
        .map_err(|_| AppError::Unauthorized(INVALID_REFRESH_TOKEN.to_string()))?;

    let stored = db_tokens::find_active_refresh_token(&state.pool, &hash_token(&req.refresh_token))
        .await?
        .ok_or(AppError::Unauthorized(EXPIRED_REFRESH_TOKEN.to_string()))?;

    let access_token = create_access_token(stored.user_id, &state.jwt_secret)
        .map_err(|e| AppError::Internal(format!("Token generation failed: {}", e)))?;

    Ok(Json(ApiResponse::ok(RefreshResponse {
        access_token,
        refresh_token: req.refresh_token,
    })))
}

pub async fn logout(
    State(state): State<AppState>,
    AppJson(req): AppJson<RefreshRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db_tokens::revoke_refresh_token(&state.pool, &hash_token(&req.refresh_token)).await? {
        return Err(AppError::bad_request(REVOKED_REFRESH_TOKEN));
    }

    tracing::info!("Refresh token revoked");
    Ok(Json(BaseResponse::ok()))
}

pub async fn verify(
    State(state): State<AppState>,
    AppJson(req): AppJson<VerifyRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    let user = db_users::find_by_email(&state.pool, req.email.trim())
        .await?
        .ok_or(AppError::not_found(USER_NOT_FOUND))?;

    if user.status != STATUS_PENDING {
        return Err(AppError::bad_request(NOT_PENDING));
    }

    // 같은 형식의 타임스탬프 문자열이라 사전순 비교가 곧 시간 비교
    let code_ok = match (user.verify_code.as_deref(), user.verify_code_expire.as_deref()) {
        (Some(code), Some(expire)) => code == req.code.trim() && expire > now_timestamp().as_str(),
        _ => false,
    };
    if !code_ok {
        return Err(AppError::bad_request(WRONG_CODE));
    }

    db_users::activate_user(&state.pool, user.user_id).await?;
    tracing::info!("User {} verified", user.user_id);
    Ok(Json(BaseResponse::ok()))
}

pub async fn profile(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> Result<Json<ApiResponse<User>>, AppError> {
    let user = db_users::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or(AppError::not_found(USER_NOT_FOUND))?;

    Ok(Json(ApiResponse::ok(user)))
}
