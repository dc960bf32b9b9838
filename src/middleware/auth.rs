//! # JWT 인증
//!
//! access 토큰(15분)과 refresh 토큰(7일)을 서로 다른 비밀키로 서명합니다.
//! 두 토큰 모두 `sub`에 사용자 ID를, `jti`에 UUIDv7을 담아
//! 같은 초에 발급된 토큰끼리도 값이 겹치지 않게 합니다.
//!
//! `AuthUser`를 핸들러 인자로 받으면 `Authorization: Bearer <token>` 검증이 먼저 실행되고,
//! 실패 시 핸들러는 호출되지 않고 401 봉투가 반환됩니다.
//! `CookieUser`는 같은 검증을 OAuth 플로우가 심어 둔 `token` 쿠키로 합니다.

use axum::{
    extract::FromRequestParts,
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap, StatusCode,
    },
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::{models::BaseResponse, routes::AppState};

pub const ACCESS_TOKEN_TTL_MINUTES: i64 = 15;
pub const REFRESH_TOKEN_TTL_DAYS: i64 = 7;

/// OAuth 리다이렉트 플로우에서 access 토큰을 담는 쿠키
pub const TOKEN_COOKIE: &str = "token";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String, // user id
    pub exp: i64,
    pub iat: i64,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// 인증된 요청의 사용자
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::MissingToken)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = verify_access_token(token, &state.jwt_secret)?;
        let user_id = claims.user_id().ok_or(AuthError::InvalidToken)?;

        Ok(AuthUser { user_id })
    }
}

/// `token` 쿠키로 인증된 요청의 사용자
#[derive(Debug, Clone)]
pub struct CookieUser {
    pub user_id: i64,
}

impl FromRequestParts<AppState> for CookieUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = read_cookie(&parts.headers, TOKEN_COOKIE)
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::MissingToken)?;

        let claims = verify_access_token(token, &state.jwt_secret)?;
        let user_id = claims.user_id().ok_or(AuthError::InvalidToken)?;

        Ok(CookieUser { user_id })
    }
}

/// `Cookie` 헤더(여러 개일 수 있음)에서 이름이 일치하는 첫 값을 찾습니다.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

#[derive(Debug, PartialEq, Eq)]
pub enum AuthError {
    MissingToken,
    InvalidToken,
    ExpiredToken,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (code, message) = match self {
            AuthError::MissingToken => ("missing_token", "未登录，缺少token"),
            AuthError::InvalidToken => ("invalid_token", "token无效或已过期"),
            AuthError::ExpiredToken => ("expired_token", "token无效或已过期"),
        };

        (
            StatusCode::UNAUTHORIZED,
            Json(BaseResponse::error(code, message)),
        )
            .into_response()
    }
}

fn sign(user_id: i64, secret: &str, expires_at: DateTime<Utc>) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = Claims {
        sub: user_id.to_string(),
        iat: Utc::now().timestamp(),
        exp: expires_at.timestamp(),
        jti: uuid::Uuid::now_v7().to_string(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

pub fn create_access_token(
    user_id: i64,
    secret: &str,
) -> Result<String, jsonwebtoken::errors::Error> {
    sign(
        user_id,
        secret,
        Utc::now() + Duration::minutes(ACCESS_TOKEN_TTL_MINUTES),
    )
}

/// refresh 토큰과 만료 시각을 함께 반환합니다 (만료 시각은 DB 행에도 저장).
pub fn create_refresh_token(
    user_id: i64,
    secret: &str,
) -> Result<(String, DateTime<Utc>), jsonwebtoken::errors::Error> {
    let expires_at = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
    let token = sign(user_id, secret, expires_at)?;
    Ok((token, expires_at))
}

fn decode_claims(token: &str, secret: &str) -> Result<Claims, AuthError> {
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
        _ => AuthError::InvalidToken,
    })?;

    Ok(token_data.claims)
}

pub fn verify_access_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode_claims(token, secret)
}

pub fn verify_refresh_token(token: &str, secret: &str) -> Result<Claims, AuthError> {
    decode_claims(token, secret)
}

/// refresh 토큰은 원문 대신 SHA-256 hex로 저장/조회합니다.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
