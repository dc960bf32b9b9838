//! # 사용자 모델과 인증 요청/응답
//!
//! `password`, `verify_code`, `verify_code_expire`는 JSON으로 절대 내보내지 않습니다.

use serde::{Deserialize, Serialize};

pub const USER_NOT_FOUND: &str = "用户不存在";
pub const EMAIL_TAKEN: &str = "邮箱已被注册";

/// 사용자 상태: 이메일 가입 직후에는 `pending`, 인증 후 `active`
pub const STATUS_PENDING: &str = "pending";
pub const STATUS_ACTIVE: &str = "active";

pub const PROVIDER_EMAIL: &str = "email";
pub const PROVIDER_GOOGLE: &str = "google";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub name: Option<String>,
    pub name_kana: Option<String>,
    pub birth: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: String,
    /// Argon2id PHC 문자열
    #[serde(skip_serializing)]
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub google_id: Option<String>,
    pub apple_id: Option<String>,
    pub provider: String,
    pub status: String,
    #[serde(skip_serializing)]
    pub verify_code: Option<String>,
    #[serde(skip_serializing)]
    pub verify_code_expire: Option<String>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// 관리용 `POST /api/users` 요청 본문: password가 있으면 해시해서 저장합니다.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub name_kana: Option<String>,
    pub birth: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: String,
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub google_id: Option<String>,
    pub apple_id: Option<String>,
    pub provider: String,
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub user_id: i64,
    pub name: Option<String>,
    pub name_kana: Option<String>,
    pub birth: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub avatar: Option<String>,
    pub google_id: Option<String>,
    pub apple_id: Option<String>,
    pub provider: Option<String>,
    pub status: Option<String>,
}

/// Google 프로필로 찾거나 만든 사용자 정보
#[derive(Debug, Clone)]
pub struct NewGoogleUser {
    pub google_id: String,
    pub email: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
}

// ── 인증 ──

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// refresh와 logout이 같이 쓰는 요청 본문
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize)]
pub struct VerifyRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Deserialize)]
pub struct GoogleLoginRequest {
    pub id_token: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub access_token: String,
    pub refresh_token: String,
}
