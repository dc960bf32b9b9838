//! # Refresh 토큰 쿼리
//!
//! 로그인 플로우(`store_refresh_token`, `find_active_refresh_token`, `revoke_refresh_token`)와
//! 관리용 CRUD가 같은 테이블을 씁니다. 토큰은 항상 해시로만 조회합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_refresh_token(
    pool: &SqlitePool,
    token_id: i64,
) -> Result<Option<RefreshToken>, AppError> {
    let token = sqlx::query_as::<_, RefreshToken>(
        r#"
        SELECT token_id, user_id, token_hash, expires_at, created_at, revoked
        FROM refresh_tokens
        WHERE token_id = ?
        "#,
    )
    .bind(token_id)
    .fetch_optional(pool)
    .await?;

    Ok(token)
}

/// 키워드 검색 대상 컬럼이 없어 keyword는 무시합니다.
pub async fn list_refresh_tokens(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<RefreshToken>), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM refresh_tokens")
        .fetch_one(pool)
        .await?;

    let tokens = sqlx::query_as::<_, RefreshToken>(
        r#"
        SELECT token_id, user_id, token_hash, expires_at, created_at, revoked
        FROM refresh_tokens
        ORDER BY token_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, tokens))
}

pub async fn store_refresh_token(
    pool: &SqlitePool,
    user_id: i64,
    token_hash: &str,
    expires_at: &str,
    revoked: bool,
) -> Result<RefreshToken, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO refresh_tokens (user_id, token_hash, expires_at, revoked)
        VALUES (?, ?, ?, ?)
        "#,
    )
    .bind(user_id)
    .bind(token_hash)
    .bind(expires_at)
    .bind(revoked)
    .execute(pool)
    .await?;

    get_refresh_token(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve stored refresh token".to_string()))
}

/// 폐기되지 않았고 아직 만료되지 않은 행만 찾습니다.
pub async fn find_active_refresh_token(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<Option<RefreshToken>, AppError> {
    let token = sqlx::query_as::<_, RefreshToken>(
        r#"
        SELECT token_id, user_id, token_hash, expires_at, created_at, revoked
        FROM refresh_tokens
        WHERE token_hash = ?
          AND revoked = 0
          AND expires_at > strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        "#,
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await?;

    Ok(token)
}

/// 폐기되지 않은 행을 폐기합니다. 해당하는 행이 없으면 `false`.
pub async fn revoke_refresh_token(pool: &SqlitePool, token_hash: &str) -> Result<bool, AppError> {
    let result =
        sqlx::query("UPDATE refresh_tokens SET revoked = 1 WHERE token_hash = ? AND revoked = 0")
            .bind(token_hash)
            .execute(pool)
            .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn update_refresh_token(
    pool: &SqlitePool,
    req: &UpdateRefreshTokenRequest,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE refresh_tokens
        SET expires_at = COALESCE(?, expires_at),
            revoked = COALESCE(?, revoked)
        WHERE token_id = ?
        "#,
    )
    .bind(&req.expires_at)
    .bind(req.revoked)
    .bind(req.token_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_refresh_token(pool: &SqlitePool, token_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM refresh_tokens WHERE token_id = ?")
        .bind(token_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
