//! # 기사 쿼리
//!
//! 목록 검색은 `title`에 대한 부분 일치(LIKE, ASCII 대소문자 무시)입니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_article(pool: &SqlitePool, article_id: i64) -> Result<Option<Article>, AppError> {
    let article = sqlx::query_as::<_, Article>(
        r#"
        SELECT article_id, title, body_text, category, like_count, article_image,
               comment_count, created_at, updated_at
        FROM articles
        WHERE article_id = ?
        "#,
    )
    .bind(article_id)
    .fetch_optional(pool)
    .await?;

    Ok(article)
}

/// 키워드가 None이면 `? IS NULL` 조건이 참이 되어 필터 없이 전체를 셉니다.
pub async fn list_articles(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<Article>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM articles WHERE (? IS NULL OR title LIKE ? ESCAPE '\\')")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    let articles = sqlx::query_as::<_, Article>(
        r#"
        SELECT article_id, title, body_text, category, like_count, article_image,
               comment_count, created_at, updated_at
        FROM articles
        WHERE (? IS NULL OR title LIKE ? ESCAPE '\')
        ORDER BY article_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, articles))
}

pub async fn create_article(
    pool: &SqlitePool,
    req: &CreateArticleRequest,
) -> Result<Article, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO articles (title, body_text, category, like_count, article_image, comment_count)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.title)
    .bind(&req.body_text)
    .bind(&req.category)
    .bind(req.like_count)
    .bind(&req.article_image)
    .bind(req.comment_count)
    .execute(pool)
    .await?;

    get_article(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created article".to_string()))
}

/// 해당 ID가 없으면 `false`
pub async fn update_article(
    pool: &SqlitePool,
    req: &UpdateArticleRequest,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE articles
        SET title = COALESCE(?, title),
            body_text = COALESCE(?, body_text),
            category = COALESCE(?, category),
            like_count = COALESCE(?, like_count),
            article_image = COALESCE(?, article_image),
            comment_count = COALESCE(?, comment_count),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE article_id = ?
        "#,
    )
    .bind(&req.title)
    .bind(&req.body_text)
    .bind(&req.category)
    .bind(req.like_count)
    .bind(&req.article_image)
    .bind(req.comment_count)
    .bind(req.article_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_article(pool: &SqlitePool, article_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM articles WHERE article_id = ?")
        .bind(article_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
