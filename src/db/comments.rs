use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_comment(pool: &SqlitePool, comment_id: i64) -> Result<Option<Comment>, AppError> {
    let comment = sqlx::query_as::<_, Comment>(
        r#"
        SELECT comment_id, article_id, user_id, comment_text, is_published,
               reply_to_comment_id, created_at, updated_at
        FROM comments
        WHERE comment_id = ?
        "#,
    )
    .bind(comment_id)
    .fetch_optional(pool)
    .await?;

    Ok(comment)
}

pub async fn list_comments(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<Comment>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM comments WHERE (? IS NULL OR comment_text LIKE ? ESCAPE '\\')",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let comments = sqlx::query_as::<_, Comment>(
        r#"
        SELECT comment_id, article_id, user_id, comment_text, is_published,
               reply_to_comment_id, created_at, updated_at
        FROM comments
        WHERE (? IS NULL OR comment_text LIKE ? ESCAPE '\')
        ORDER BY comment_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, comments))
}

/// 존재하지 않는 기사/사용자를 가리키면 외래 키 위반으로 Database 에러가 납니다.
pub async fn create_comment(
    pool: &SqlitePool,
    req: &CreateCommentRequest,
) -> Result<Comment, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO comments (article_id, user_id, comment_text, is_published, reply_to_comment_id)
        VALUES (?, ?, ?, ?, ?)
        "#,
    )
    .bind(req.article_id)
    .bind(req.user_id)
    .bind(&req.comment_text)
    .bind(req.is_published)
    .bind(req.reply_to_comment_id)
    .execute(pool)
    .await?;

    get_comment(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created comment".to_string()))
}

pub async fn update_comment(
    pool: &SqlitePool,
    req: &UpdateCommentRequest,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE comments
        SET article_id = COALESCE(?, article_id),
            user_id = COALESCE(?, user_id),
            comment_text = COALESCE(?, comment_text),
            is_published = COALESCE(?, is_published),
            reply_to_comment_id = COALESCE(?, reply_to_comment_id),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE comment_id = ?
        "#,
    )
    .bind(req.article_id)
    .bind(req.user_id)
    .bind(&req.comment_text)
    .bind(req.is_published)
    .bind(req.reply_to_comment_id)
    .bind(req.comment_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_comment(pool: &SqlitePool, comment_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM comments WHERE comment_id = ?")
        .bind(comment_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
