//! # 사용자 쿼리
//!
//! 관리용 CRUD와 인증 플로우(가입, 인증 코드, Google 연동)가 함께 씁니다.
//! 이 모듈은 재공개하지 않고 `db::users::find_by_email`처럼 경로로 부릅니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

const USER_COLUMNS: &str = "user_id, name, name_kana, birth, address, gender, phone_number, \
    email, password, avatar, google_id, apple_id, provider, status, verify_code, \
    verify_code_expire, created_at, updated_at";

pub async fn find_by_id(pool: &SqlitePool, user_id: i64) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE user_id = ?",
        USER_COLUMNS
    ))
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE email = ?",
        USER_COLUMNS
    ))
    .bind(email)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn find_by_google_id(
    pool: &SqlitePool,
    google_id: &str,
) -> Result<Option<User>, AppError> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE google_id = ?",
        USER_COLUMNS
    ))
    .bind(google_id)
    .fetch_optional(pool)
    .await?;

    Ok(user)
}

pub async fn list_users(pool: &SqlitePool, req: &ListRequest) -> Result<(i64, Vec<User>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE (? IS NULL OR name LIKE ? ESCAPE '\\')")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    let users = sqlx::query_as::<_, User>(&format!(
        "SELECT {} FROM users WHERE (? IS NULL OR name LIKE ? ESCAPE '\\') ORDER BY user_id LIMIT ? OFFSET ?",
        USER_COLUMNS
    ))
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, users))
}

/// `req.password`는 이미 해시된 값이어야 합니다.
pub async fn create_user(pool: &SqlitePool, req: &CreateUserRequest) -> Result<User, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (name, name_kana, birth, address, gender, phone_number, email,
                           password, avatar, google_id, apple_id, provider, status)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.name)
    .bind(&req.name_kana)
    .bind(&req.birth)
    .bind(&req.address)
    .bind(&req.gender)
    .bind(&req.phone_number)
    .bind(&req.email)
    .bind(&req.password)
    .bind(&req.avatar)
    .bind(&req.google_id)
    .bind(&req.apple_id)
    .bind(&req.provider)
    .bind(&req.status)
    .execute(pool)
    .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

/// 이메일 가입: `provider = email`, `status = pending`, 인증 코드 포함
pub async fn create_pending_user(
    pool: &SqlitePool,
    email: &str,
    password_hash: &str,
    verify_code: &str,
    verify_code_expire: &str,
) -> Result<User, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO users (email, password, provider, status, verify_code, verify_code_expire)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(email)
    .bind(password_hash)
    .bind(PROVIDER_EMAIL)
    .bind(STATUS_PENDING)
    .bind(verify_code)
    .bind(verify_code_expire)
    .execute(pool)
    .await?;

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}

pub async fn set_verify_code(
    pool: &SqlitePool,
    user_id: i64,
    verify_code: &str,
    verify_code_expire: &str,
) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET verify_code = ?, verify_code_expire = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE user_id = ?
        "#,
    )
    .bind(verify_code)
    .bind(verify_code_expire)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// 인증 완료: 상태를 active로 바꾸고 코드를 지웁니다.
pub async fn activate_user(pool: &SqlitePool, user_id: i64) -> Result<(), AppError> {
    sqlx::query(
        r#"
        UPDATE users
        SET status = ?, verify_code = NULL, verify_code_expire = NULL,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE user_id = ?
        "#,
    )
    .bind(STATUS_ACTIVE)
    .bind(user_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// `req.password`가 있으면 이미 해시된 값이어야 합니다.
pub async fn update_user(pool: &SqlitePool, req: &UpdateUserRequest) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE users
        SET name = COALESCE(?, name),
            name_kana = COALESCE(?, name_kana),
            birth = COALESCE(?, birth),
            address = COALESCE(?, address),
            gender = COALESCE(?, gender),
            phone_number = COALESCE(?, phone_number),
            email = COALESCE(?, email),
            password = COALESCE(?, password),
            avatar = COALESCE(?, avatar),
            google_id = COALESCE(?, google_id),
            apple_id = COALESCE(?, apple_id),
            provider = COALESCE(?, provider),
            status = COALESCE(?, status),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE user_id = ?
        "#,
    )
    .bind(&req.name)
    .bind(&req.name_kana)
    .bind(&req.birth)
    .bind(&req.address)
    .bind(&req.gender)
    .bind(&req.phone_number)
    .bind(&req.email)
    .bind(&req.password)
    .bind(&req.avatar)
    .bind(&req.google_id)
    .bind(&req.apple_id)
    .bind(&req.provider)
    .bind(&req.status)
    .bind(req.user_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// refresh_tokens는 `ON DELETE CASCADE`로 함께 삭제됩니다.
pub async fn delete_user(pool: &SqlitePool, user_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM users WHERE user_id = ?")
        .bind(user_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Google 계정으로 사용자를 찾거나 만듭니다.
///
/// 1. google_id가 같은 사용자가 있으면 그대로 사용
/// 2. 이메일이 같은 기존 사용자가 있으면 google_id를 연결 (아바타/이름은 비어 있을 때만 채움)
/// 3. 둘 다 없으면 `provider = google`, `status = active`로 새로 생성
///
/// 어느 경우든 결과 사용자는 active입니다.
pub async fn upsert_google_user(pool: &SqlitePool, profile: &NewGoogleUser) -> Result<User, AppError> {
    if let Some(user) = find_by_google_id(pool, &profile.google_id).await? {
        if user.status == STATUS_ACTIVE {
            return Ok(user);
        }

        activate_user(pool, user.user_id).await?;
        return find_by_id(pool, user.user_id)
            .await?
            .ok_or(AppError::Internal("Failed to retrieve activated user".to_string()));
    }

    if let Some(user) = find_by_email(pool, &profile.email).await? {
        tracing::info!("Linking Google account to existing user {}", user.user_id);
        sqlx::query(
            r#"
            UPDATE users
            SET google_id = ?,
                name = COALESCE(name, ?),
                avatar = COALESCE(avatar, ?),
                status = ?,
                verify_code = NULL,
                verify_code_expire = NULL,
                updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
            WHERE user_id = ?
            "#,
        )
        .bind(&profile.google_id)
        .bind(&profile.name)
        .bind(&profile.avatar)
        .bind(STATUS_ACTIVE)
        .bind(user.user_id)
        .execute(pool)
        .await?;

        return find_by_id(pool, user.user_id)
            .await?
            .ok_or(AppError::Internal("Failed to retrieve linked user".to_string()));
    }

    let result = sqlx::query(
        r#"
        INSERT INTO users (name, email, avatar, google_id, provider, status)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&profile.name)
    .bind(&profile.email)
    .bind(&profile.avatar)
    .bind(&profile.google_id)
    .bind(PROVIDER_GOOGLE)
    .bind(STATUS_ACTIVE)
    .execute(pool)
    .await?;

    tracing::info!("Registered Google user {}", result.last_insert_rowid());

    find_by_id(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created user".to_string()))
}
