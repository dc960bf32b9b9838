//! # 방문 기록 쿼리
//!
//! 검색 대상 텍스트 컬럼이 없으므로 목록의 keyword는 무시합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_visit_history(
    pool: &SqlitePool,
    history_id: i64,
) -> Result<Option<VisitHistory>, AppError> {
    let history = sqlx::query_as::<_, VisitHistory>(
        r#"
        SELECT history_id, user_id, facility_id, scan_at, is_active, created_at, updated_at
        FROM visit_history
        WHERE history_id = ?
        "#,
    )
    .bind(history_id)
    .fetch_optional(pool)
    .await?;

    Ok(history)
}

pub async fn list_visit_history(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<VisitHistory>), AppError> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visit_history")
        .fetch_one(pool)
        .await?;

    let history = sqlx::query_as::<_, VisitHistory>(
        r#"
        SELECT history_id, user_id, facility_id, scan_at, is_active, created_at, updated_at
        FROM visit_history
        ORDER BY history_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, history))
}

pub async fn create_visit_history(
    pool: &SqlitePool,
    req: &CreateVisitHistoryRequest,
) -> Result<VisitHistory, AppError> {
    let result = sqlx::query(
        "INSERT INTO visit_history (user_id, facility_id, scan_at, is_active) VALUES (?, ?, ?, ?)",
    )
    .bind(req.user_id)
    .bind(req.facility_id)
    .bind(&req.scan_at)
    .bind(req.is_active)
    .execute(pool)
    .await?;

    get_visit_history(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created visit history".to_string()))
}

pub async fn update_visit_history(
    pool: &SqlitePool,
    req: &UpdateVisitHistoryRequest,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE visit_history
        SET user_id = COALESCE(?, user_id),
            facility_id = COALESCE(?, facility_id),
            scan_at = COALESCE(?, scan_at),
            is_active = COALESCE(?, is_active),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE history_id = ?
        "#,
    )
    .bind(req.user_id)
    .bind(req.facility_id)
    .bind(&req.scan_at)
    .bind(req.is_active)
    .bind(req.history_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_visit_history(pool: &SqlitePool, history_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM visit_history WHERE history_id = ?")
        .bind(history_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
