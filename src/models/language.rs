use serde::{Deserialize, Serialize};

pub const LANGUAGE_NOT_FOUND: &str = "语言不存在";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Language {
    pub language_id: i64,
    pub language_name: String,
    pub display_order: Option<i64>,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateLanguageRequest {
    pub language_name: String,
    #[serde(default)]
    pub display_order: Option<i64>,
    /// 생략하면 활성 상태로 생성
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateLanguageRequest {
    pub language_id: i64,
    pub language_name: Option<String>,
    pub display_order: Option<i64>,
    pub is_active: Option<bool>,
}
