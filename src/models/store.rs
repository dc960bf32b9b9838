use serde::{Deserialize, Serialize};

pub const STORE_NOT_FOUND: &str = "商铺不存在";

/// 상점: 태그는 `taggings` 테이블(`taggable_type = "Store"`)로 연결됩니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Store {
    pub store_id: i64,
    pub store_name: String,
    pub store_category: String,
    pub location: String,
    pub description: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub business_hours: String,
    pub rating_score: f64,
    pub phone_number: String,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateStoreRequest {
    pub store_name: String,
    pub store_category: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub business_hours: String,
    pub rating_score: f64,
    pub phone_number: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateStoreRequest {
    pub store_id: i64,
    pub store_name: Option<String>,
    pub store_category: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
    pub address: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub business_hours: Option<String>,
    pub rating_score: Option<f64>,
    pub phone_number: Option<String>,
}
