use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_notice(pool: &SqlitePool, notice_id: i64) -> Result<Option<Notice>, AppError> {
    let notice = sqlx::query_as::<_, Notice>(
        r#"
        SELECT notice_id, title, content, notice_type, user_id, published_at,
               is_active, is_read, created_at, updated_at
        FROM notices
        WHERE notice_id = ?
        "#,
    )
    .bind(notice_id)
    .fetch_optional(pool)
    .await?;

    Ok(notice)
}

pub async fn list_notices(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<Notice>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM notices WHERE (? IS NULL OR title LIKE ? ESCAPE '\\')")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    let notices = sqlx::query_as::<_, Notice>(
        r#"
        SELECT notice_id, title, content, notice_type, user_id, published_at,
               is_active, is_read, created_at, updated_at
        FROM notices
        WHERE (? IS NULL OR title LIKE ? ESCAPE '\')
        ORDER BY notice_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, notices))
}

pub async fn create_notice(
    pool: &SqlitePool,
    req: &CreateNoticeRequest,
) -> Result<Notice, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO notices (title, content, notice_type, user_id, published_at, is_active, is_read)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.title)
    .bind(&req.content)
    .bind(req.notice_type)
    .bind(req.user_id)
    .bind(&req.published_at)
    .bind(req.is_active)
    .bind(req.is_read)
    .execute(pool)
    .await?;

    get_notice(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created notice".to_string()))
}

pub async fn update_notice(pool: &SqlitePool, req: &UpdateNoticeRequest) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE notices
        SET title = COALESCE(?, title),
            content = COALESCE(?, content),
            notice_type = COALESCE(?, notice_type),
            user_id = COALESCE(?, user_id),
            published_at = COALESCE(?, published_at),
            is_active = COALESCE(?, is_active),
            is_read = COALESCE(?, is_read),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE notice_id = ?
        "#,
    )
    .bind(&req.title)
    .bind(&req.content)
    .bind(req.notice_type)
    .bind(req.user_id)
    .bind(&req.published_at)
    .bind(req.is_active)
    .bind(req.is_read)
    .bind(req.notice_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_notice(pool: &SqlitePool, notice_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM notices WHERE notice_id = ?")
        .bind(notice_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
