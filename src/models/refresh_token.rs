//! # Refresh 토큰 모델
//!
//! DB에는 토큰 원문이 아니라 SHA-256 해시(`token_hash`)만 저장됩니다.
//! 관리용 CRUD에서 토큰을 직접 등록할 때도 원문(`token`)을 받아 해시로 바꿔 저장합니다.

use serde::{Deserialize, Serialize};

pub const REFRESH_TOKEN_NOT_FOUND: &str = "Token不存在";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct RefreshToken {
    pub token_id: i64,
    pub user_id: i64,
    pub token_hash: String,
    pub expires_at: String,
    pub created_at: String,
    pub revoked: bool,
}

#[derive(Debug, Deserialize)]
pub struct CreateRefreshTokenRequest {
    pub user_id: i64,
    /// 토큰 원문 (저장 전에 해시됨)
    pub token: String,
    pub expires_at: String,
    #[serde(default)]
    pub revoked: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateRefreshTokenRequest {
    pub token_id: i64,
    pub expires_at: Option<String>,
    pub revoked: Option<bool>,
}
