//! # 시설(Facility) 모델
//!
//! 시설은 다른 엔티티와 달리 `PUT /api/facilities/{id}`로 **전체 덮어쓰기**를 하고,
//! 수정된 시설을 그대로 돌려줍니다. 그래서 생성/수정 요청이 같은 형태입니다.
//!
//! DB 컬럼은 `description_text`이지만 JSON 필드 이름은 `description`입니다.

use serde::{Deserialize, Serialize};

pub const FACILITY_NOT_FOUND: &str = "设施不存在";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Facility {
    pub facility_id: i64,
    pub facility_name: String,
    pub location: String,
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    /// 관련 인물 ID (선택)
    pub person_id: Option<i64>,
    pub created_at: String,
    pub updated_at: String,
}

/// 생성과 전체 수정에 같이 쓰는 요청 본문
///
/// 수정 시 본문에 `facility_id`가 있어도 무시하고 경로의 ID를 사용합니다.
#[derive(Debug, Deserialize)]
pub struct FacilityRequest {
    pub facility_name: String,
    pub location: String,
    #[serde(default)]
    pub description: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub person_id: Option<i64>,
}
