use crate::error::AppError;
use crate::models::*;
use sqlx::SqlitePool;

pub async fn get_menu(pool: &SqlitePool, menu_id: i64) -> Result<Option<Menu>, AppError> {
    let menu = sqlx::query_as::<_, Menu>(
        r#"
        SELECT menu_id, menu_name, menu_code, display_order, is_active, created_at, updated_at
        FROM menus
        WHERE menu_id = ?
        "#,
    )
    .bind(menu_id)
    .fetch_optional(pool)
    .await?;

    Ok(menu)
}

pub async fn list_menus(pool: &SqlitePool, req: &ListRequest) -> Result<(i64, Vec<Menu>), AppError> {
    let pattern = req.keyword_pattern();

    let total: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM menus WHERE (? IS NULL OR menu_name LIKE ? ESCAPE '\\')")
            .bind(&pattern)
            .bind(&pattern)
            .fetch_one(pool)
            .await?;

    let menus = sqlx::query_as::<_, Menu>(
        r#"
        SELECT menu_id, menu_name, menu_code, display_order, is_active, created_at, updated_at
        FROM menus
        WHERE (? IS NULL OR menu_name LIKE ? ESCAPE '\')
        ORDER BY menu_id
        LIMIT ? OFFSET ?
        "#,
    )
    .bind(&pattern)
    .bind(&pattern)
    .bind(req.limit())
    .bind(req.offset())
    .fetch_all(pool)
    .await?;

    Ok((total, menus))
}

pub async fn create_menu(pool: &SqlitePool, req: &CreateMenuRequest) -> Result<Menu, AppError> {
    let result = sqlx::query(
        "INSERT INTO menus (menu_name, menu_code, display_order, is_active) VALUES (?, ?, ?, ?)",
    )
    .bind(&req.menu_name)
    .bind(&req.menu_code)
    .bind(req.display_order)
    .bind(req.is_active)
    .execute(pool)
    .await?;

    get_menu(pool, result.last_insert_rowid())
        .await?
        .ok_or(AppError::Internal("Failed to retrieve created menu".to_string()))
}

pub async fn update_menu(pool: &SqlitePool, req: &UpdateMenuRequest) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"
        UPDATE menus
        SET menu_name = COALESCE(?, menu_name),
            menu_code = COALESCE(?, menu_code),
            display_order = COALESCE(?, display_order),
            is_active = COALESCE(?, is_active),
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        WHERE menu_id = ?
        "#,
    )
    .bind(&req.menu_name)
    .bind(&req.menu_code)
    .bind(req.display_order)
    .bind(req.is_active)
    .bind(req.menu_id)
    .execute(pool)
    .await?;

    Ok(result.rows_affected() > 0)
}

pub async fn delete_menu(pool: &SqlitePool, menu_id: i64) -> Result<bool, AppError> {
    let result = sqlx::query("DELETE FROM menus WHERE menu_id = ?")
        .bind(menu_id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
