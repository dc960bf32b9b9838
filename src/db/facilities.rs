//! # 시설 쿼리
//!
//! `description_text` 컬럼은 `AS description`으로 읽어 모델 필드 이름에 맞춥니다.
//! 수정은 부분 수정이 아니라 전체 덮어쓰기입니다.

use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_facility(
    pool: &SqlitePool,
    facility_id: i64,
) -> Result<Option<Facility>, AppError> {
    let facility = sqlx::query_as::<_, Facility>(
        r#"
        SELECT facility_id, facility_name, location, description_text AS description,
               latitude, longitude, person_id, created_at, updated_at
        FROM facilities
        WHERE facility_id = ?
        "#,
    )
    .bind(facility_id)
    .fetch_optional(pool)
    .await?;

    Ok(facility)
}

pub async fn list_facilities(
    pool: &SqlitePool,
    req: &ListRequest,
) -> Result<(i64, Vec<Facility>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM facilities WHERE (? IS NULL OR facility_name LIKE ? ESCAPE '\\')",
    )
    .bind(&pattern)
    .bind(&pattern)
    .fetch_one(pool)
    .await?;

    let facilities = sqlx::query_as::<_, Facility>(
        r#"
        SELECT facility_id, facility_name, location, description_text AS description,
               latitude, longitude, person_id, created_at, updated_at
        FROM facilities
        WHERE (? IS NULL OR facility_name LIKE ? ESCAPE '\')
        ORDER BY facility_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, facilities))
}

pub async fn create_facility(
    pool: &SqlitePool,
    req: &FacilityRequest,
) -> Result<Facility, AppError> {
    let result = sqlx::query(
        r#"
        INSERT INTO facilities (facility_name, location, description_text, latitude, longitude, person_id)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&req.facility_name)
    .bind(&req.location)
    .bind(&req.description)
    .bind(req.latitude)
    .bind(req.longitude)
    .bind(req.person_id)
    .execute(pool)
    .await?;

    get_facility(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created facility".to_string()))
}

/// 모든 컬럼을 요청 값으로 덮어쓰고 갱신된 시설을 반환합니다.
/// 보내지 않은 선택 필드(description, person_id)는 NULL이 됩니다.
pub async fn replace_facility(
    pool: &SqlitePool,
    facility_id: i64,
    req: &FacilityRequest,
) -> Result<Option<Facility>, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE facilities
        SET facility_name = ?,
            location = ?,
            description_text = ?,
            latitude = ?,
            longitude = ?,
            person_id = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE facility_id = ?
        "#,
    )
    .bind(&req.facility_name)
    .bind(&req.location)
    .bind(&req.description)
    .bind(req.latitude)
    .bind(req.longitude)
    .bind(req.person_id)
    .bind(facility_id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    get_facility(pool, facility_id).await
}

pub async fn delete_facility(pool: &SqlitePool, facility_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM facilities WHERE facility_id = ?")
        .bind(facility_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
