//! # 상점 쿼리
//!
//! 상점-태그 연결은 `tags` 모듈의 `*_store_tag*` 함수들이 담당합니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_store(pool: &SqlitePool, store_id: i64) -> Result<Option<Store>, AppError> {
    let store = sqlx::query_as::<_, Store>(
        r#"
        SELECT store_id, store_name, store_category, location, description_text AS description,
               address, latitude, longitude, business_hours, rating_score, phone_number,
               created_at, updated_at
        FROM stores
        WHERE store_id = ?
        "#,
    )
    .bind(store_id)
    .fetch_optional(pool)
    .await?;

    Ok(store)
}

pub async fn list_stores(pool: &SqlitePool, req: &ListRequest) -> Result<(i64, Vec<Store>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM stores WHERE (? IS NULL OR store_name LIKE ? ESCAPE '\\')")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    let stores = sqlx::query_as::<_, Store>(
        r#"
        SELECT store_id, store_name, store_category, location, description_text AS description,
               address, latitude, longitude, business_hours, rating_score, phone_number,
               created_at, updated_at
        FROM stores
        WHERE (? IS NULL OR store_name LIKE ? ESCAPE '\')
        ORDER BY store_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, stores))
}

pub async fn create_store(pool: &SqlitePool, req: &CreateStoreRequest) -> Result<Store, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO stores (store_name, store_category, location, description_text, address,
                            latitude, longitude, business_hours, rating_score, phone_number)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.store_name)
    .bind(&req.store_category)
    .bind(&req.location)
    .bind(&req.description)
    .bind(&req.address)
    .bind(req.latitude)
    .bind(req.longitude)
    .bind(&req.business_hours)
    .bind(req.rating_score)
    .bind(&req.phone_number)
    .execute(pool)
    .await?;

    get_store(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created store".to_string()))
}

pub async fn update_store(pool: &SqlitePool, req: &UpdateStoreRequest) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE stores
        SET store_name = COALESCE(?, store_name),
            store_category = COALESCE(?, store_category),
            location = COALESCE(?, location),
            description_text = COALESCE(?, description_text),
            address = COALESCE(?, address),
            latitude = COALESCE(?, latitude),
            longitude = COALESCE(?, longitude),
            business_hours = COALESCE(?, business_hours),
            rating_score = COALESCE(?, rating_score),
            phone_number = COALESCE(?, phone_number),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE store_id = ?
        "#,
    )
    .bind(&req.store_name)
    .bind(&req.store_category)
    .bind(&req.location)
    .bind(&req.description)
    .bind(&req.address)
    .bind(req.latitude)
    .bind(req.longitude)
    .bind(&req.business_hours)
    .bind(req.rating_score)
    .bind(&req.phone_number)
    .bind(req.store_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// 상점에 붙은 태깅 행도 함께 지웁니다 (taggings는 다형 연결이라 FK가 없음).
pub async fn delete_store(pool: &SqlitePool, store_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM stores WHERE store_id = ?")
        .bind(store_id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Ok(false);
    }

    sqlx::query("DELETE FROM taggings WHERE taggable_type = ? AND taggable_id = ?")
        .bind(STORE_TAGGABLE_TYPE)
        .bind(store_id)
        .execute(pool)
        .await?;

    Ok(true)
}
