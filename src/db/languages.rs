use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_language(
    pool: &SqlitePool,
    language_id: i64,
) -> Result<Option<Language>, AppError> {
    let language = sqlx::query_as::<_, Language>(
        r#"
        SELECT language_id, language_name, display_order, is_active, created_at, updated_at
        FROM languages
        WHERE language_id = ?
        "#,
    )
    .bind(language_id)
    .fetch_optional(pool)
    .await?;

    Ok(language)
}

pub async fn list_languages(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<Language>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM languages WHERE (? IS NULL OR language_name LIKE ? ESCAPE '\\')",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let languages = sqlx::query_as::<_, Language>(
        r#"
        SELECT language_id, language_name, display_order, is_active, created_at, updated_at
        FROM languages
        WHERE (? IS NULL OR language_name LIKE ? ESCAPE '\')
        ORDER BY language_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, languages))
}

pub async fn create_language(
    pool: &SqlitePool,
    req: &CreateLanguageRequest,
) -> Result<Language, AppError> {
    let result = sqlx::query(
        "INSERT INTO languages (language_name, display_order, is_active) VALUES (?, ?, ?)",
    )
    .bind(&req.language_name)
    .bind(req.display_order)
    .bind(req.is_active)
    .execute(pool)
    .await?;

    get_language(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created language".to_string()))
}

pub async fn update_language(
    pool: &SqlitePool,
    req: &UpdateLanguageRequest,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE languages
        SET language_name = COALESCE(?, language_name),
            display_order = COALESCE(?, display_order),
            is_active = COALESCE(?, is_active),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE language_id = ?
        "#,
    )
    .bind(&req.language_name)
    .bind(req.display_order)
    .bind(req.is_active)
    .bind(req.language_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_language(pool: &SqlitePool, language_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM languages WHERE language_id = ?")
        .bind(language_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
