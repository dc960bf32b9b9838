//! # 비밀번호와 인증 코드
//!
//! 비밀번호는 Argon2id(솔트 포함 PHC 문자열)로 저장합니다.
//! 이메일 가입 인증 코드는 4자리 숫자이며 10분 뒤 만료됩니다.

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Duration, Utc};
use rand_core::{OsRng, RngCore};

use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const VERIFY_CODE_TTL_MINUTES: i64 = 10;

pub fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| AppError::Internal(format!("Password hashing failed: {}", e)))?
        .to_string();

    Ok(hash)
}

/// 해시가 손상되어 파싱할 수 없으면 Internal 에러, 단순 불일치면 `Ok(false)`
pub fn verify_password(password: &str, hash: &str) -> Result<bool, AppError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Password hash parse error: {}", e)))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// 4자리 인증 코드와 만료 시각
pub fn generate_verify_code() -> (String, DateTime<Utc>) {
    let code = format!("{:04}", OsRng.next_u32() % 10_000);
    (code, Utc::now() + Duration::minutes(VERIFY_CODE_TTL_MINUTES))
}

/// 가벼운 형식 검사: 공백 없음, `@` 하나, 로컬 파트 있음, 도메인에 점 포함
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}
