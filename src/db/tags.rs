//! # 태그 데이터베이스 쿼리 모듈
//!
//! 태그 CRUD, 태깅(다형 연결) CRUD, 상점-태그 관계 쿼리입니다.
//!
//! ## 테이블 구조
//! - `tags`: 태그 엔티티
//! - `taggings`: (tag_id, taggable_type, taggable_id) 연결 테이블.
//!   상점 태그는 `taggable_type = 'Store'` 행입니다.
//!
//! ```sql
//! tags ←── taggings ──→ stores (taggable_type = 'Store')
//! ```

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_tag(pool: &SqlitePool, tag_id: i64) -> Result<Option<Tag>, AppError> {
    let tag = sqlx::query_as::<_, Tag>(
        "SELECT tag_id, tag_name, is_active, created_at, updated_at FROM tags WHERE tag_id = ?",
    )
    .bind(tag_id)
    .fetch_optional(pool)
    .await?;

    Ok(tag)
}

pub async fn list_tags(pool: &SqlitePool, req: &ListRequest) -> Result<(i64, Vec<Tag>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM tags WHERE (? IS NULL OR tag_name LIKE ? ESCAPE '\\')")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT tag_id, tag_name, is_active, created_at, updated_at
        FROM tags
        WHERE (? IS NULL OR tag_name LIKE ? ESCAPE '\')
        ORDER BY tag_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, tags))
}

pub async fn create_tag(pool: &SqlitePool, req: &CreateTagRequest) -> Result<Tag, AppError> {
    let result = sqlx::query("INSERT INTO tags (tag_name, is_active) VALUES (?, ?)")
        .bind(&req.tag_name)
        .bind(req.is_active)
        .execute(pool)
        .await?;

    get_tag(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created tag".to_string()))
}

pub async fn update_tag(pool: &SqlitePool, req: &UpdateTagRequest) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE tags
        SET tag_name = COALESCE(?, tag_name),
            is_active = COALESCE(?, is_active),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE tag_id = ?
        "#,
    )
    .bind(&req.tag_name)
    .bind(req.is_active)
    .bind(req.tag_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// `taggings`에 `ON DELETE CASCADE`가 걸려 있어 연결도 함께 삭제됩니다.
pub async fn delete_tag(pool: &SqlitePool, tag_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM tags WHERE tag_id = ?")
        .bind(tag_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ── 태깅 ──

pub async fn get_tagging(pool: &SqlitePool, tagging_id: i64) -> Result<Option<Tagging>, AppError> {
    let tagging = sqlx::query_as::<_, Tagging>(
        r#"
        SELECT tagging_id, tag_id, taggable_type, taggable_id, created_at, updated_at
        FROM taggings
        WHERE tagging_id = ?
        "#,
    )
    .bind(tagging_id)
    .fetch_optional(pool)
    .await?;

    Ok(tagging)
}

pub async fn list_taggings(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<Tagging>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM taggings WHERE (? IS NULL OR taggable_type LIKE ? ESCAPE '\\')",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let taggings = sqlx::query_as::<_, Tagging>(
        r#"
        SELECT tagging_id, tag_id, taggable_type, taggable_id, created_at, updated_at
        FROM taggings
        WHERE (? IS NULL OR taggable_type LIKE ? ESCAPE '\')
        ORDER BY tagging_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, taggings))
}

/// 같은 (tag_id, taggable_type, taggable_id) 조합이 이미 있으면 UNIQUE 위반 에러입니다.
pub async fn create_tagging(
    pool: &SqlitePool,
    req: &CreateTaggingRequest,
) -> Result<Tagging, AppError> {
    let result =
        sqlx::query("INSERT INTO taggings (tag_id, taggable_type, taggable_id) VALUES (?, ?, ?)")
            .bind(req.tag_id)
            .bind(&req.taggable_type)
            .bind(req.taggable_id)
            .execute(pool)
            .await?;

    get_tagging(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created tagging".to_string()))
}

pub async fn update_tagging(pool: &SqlitePool, req: &UpdateTaggingRequest) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE taggings
        SET tag_id = COALESCE(?, tag_id),
            taggable_type = COALESCE(?, taggable_type),
            taggable_id = COALESCE(?, taggable_id),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE tagging_id = ?
        "#,
    )
    .bind(req.tag_id)
    .bind(&req.taggable_type)
    .bind(req.taggable_id)
    .bind(req.tagging_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_tagging(pool: &SqlitePool, tagging_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM taggings WHERE tagging_id = ?")
        .bind(tagging_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

// ── 상점-태그 ──

/// 상점에 태그를 연결합니다. 이미 연결되어 있으면 `INSERT OR IGNORE`로 무시합니다.
pub async fn add_store_tag(pool: &SqlitePool, store_id: i64, tag_id: i64) -> Result<(), AppError> {
    sqlx::query(
        "INSERT OR IGNORE INTO taggings (tag_id, taggable_type, taggable_id) VALUES (?, ?, ?)",
    )
    .bind(tag_id)
    .bind(STORE_TAGGABLE_TYPE)
    .bind(store_id)
    .execute(pool)
    .await?;

    Ok(())
}

/// ## 반환값
/// - `true`: 연결 해제 성공
/// - `false`: 해당 상점-태그 연결이 없음
pub async fn remove_store_tag(
    pool: &SqlitePool,
    store_id: i64,
    tag_id: i64,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "DELETE FROM taggings WHERE tag_id = ? AND taggable_type = ? AND taggable_id = ?",
    )
    .bind(tag_id)
    .bind(STORE_TAGGABLE_TYPE)
    .bind(store_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn get_store_tags(pool: &SqlitePool, store_id: i64) -> Result<Vec<Tag>, AppError> {
    let tags = sqlx::query_as::<_, Tag>(
        r#"
        SELECT t.tag_id, t.tag_name, t.is_active, t.created_at, t.updated_at
        FROM tags t
        JOIN taggings tg ON tg.tag_id = t.tag_id
        WHERE tg.taggable_type = ? AND tg.taggable_id = ?
        ORDER BY t.tag_id
        "#,
    )
    .bind(STORE_TAGGABLE_TYPE)
    .bind(store_id)
    .fetch_all(pool)
    .await?;

    Ok(tags)
}
