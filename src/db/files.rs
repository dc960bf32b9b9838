use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_file(pool: &SqlitePool, file_id: i64) -> Result<Option<File>, AppError> {
    let file = sqlx::query_as::<_, File>(
        r#"
        SELECT file_id, file_name, file_type, file_size, file_data, location, related_id,
               created_at, updated_at
        FROM files
        WHERE file_id = ?
        "#,
    )
    .bind(file_id)
    .fetch_optional(pool)
    .await?;

    Ok(file)
}

pub async fn list_files(pool: &SqlitePool, req: &ListRequest) -> Result<(i64, Vec<File>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM files WHERE (? IS NULL OR file_name LIKE ? ESCAPE '\\')")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    let files = sqlx::query_as::<_, File>(
        r#"
        SELECT file_id, file_name, file_type, file_size, file_data, location, related_id,
               created_at, updated_at
        FROM files
        WHERE (? IS NULL OR file_name LIKE ? ESCAPE '\')
        ORDER BY file_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, files))
}

/// file_size를 보내지 않으면 실제 데이터 길이로 채웁니다.
pub async fn create_file(pool: &SqlitePool, req: &CreateFileRequest) -> Result<File, AppError> {
    let file_size = req.file_size.unwrap_or(req.file_data.len() as i64);

    let result = sqlx::query(
        r#"
        INSERT INTO files (file_name, file_type, file_size, file_data, location, related_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.file_name)
    .bind(&req.file_type)
    .bind(file_size)
    .bind(&req.file_data)
    .bind(&req.location)
    .bind(req.related_id)
    .execute(pool)
    .await?;

    get_file(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created file".to_string()))
}

pub async fn update_file(pool: &SqlitePool, req: &UpdateFileRequest) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE files
        SET file_name = COALESCE(?, file_name),
            file_type = COALESCE(?, file_type),
            file_size = COALESCE(?, file_size),
            file_data = COALESCE(?, file_data),
            location = COALESCE(?, location),
            related_id = COALESCE(?, related_id),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE file_id = ?
        "#,
    )
    .bind(&req.file_name)
    .bind(&req.file_type)
    .bind(req.file_size)
    .bind(&req.file_data)
    .bind(&req.location)
    .bind(req.related_id)
    .bind(req.file_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_file(pool: &SqlitePool, file_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM files WHERE file_id = ?")
        .bind(file_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
