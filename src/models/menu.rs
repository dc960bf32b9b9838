use serde::{Deserialize, Serialize};

pub const MENU_NOT_FOUND: &str = "菜单不存在";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Menu {
    pub menu_id: i64,
    pub menu_name: String,
    pub menu_code: String,
    pub display_order: Option<i64>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub menu_name: String,
    pub menu_code: String,
    #[serde(default)]
    pub display_order: Option<i64>,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateMenuRequest {
    pub menu_id: i64,
    pub menu_name: Option<String>,
    pub menu_code: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
}
