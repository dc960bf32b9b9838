use serde::{Deserialize, Serialize};

pub const VISIT_HISTORY_NOT_FOUND: &str = "访问记录不存在";

/// AR 마커 스캔으로 남는 시설 방문 기록
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct VisitHistory {
    pub history_id: i64,
    pub user_id: i64,
    pub facility_id: i64,
    pub scan_at: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateVisitHistoryRequest {
    pub user_id: i64,
    pub facility_id: i64,
    pub scan_at: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateVisitHistoryRequest {
    pub history_id: i64,
    pub user_id: Option<i64>,
    pub facility_id: Option<i64>,
    pub scan_at: Option<String>,
    pub is_active: Option<bool>,
}
