//! # 태그 모델 정의
//!
//! 태그(Tag)와, 태그를 임의의 엔티티에 붙이는 다형(polymorphic) 연결인
//! 태깅(Tagging)을 정의합니다.
//!
//! ## 구조체 역할
//! - `Tag`: `tags` 테이블 한 행
//! - `Tagging`: `taggings` 테이블 한 행 (`taggable_type` + `taggable_id`로 대상 지정)
//! - `StoreTagRequest`: 상점에 태그를 붙일 때의 요청 본문

use serde::{Deserialize, Serialize};

pub const TAG_NOT_FOUND: &str = "标签不存在";
pub const TAGGING_NOT_FOUND: &str = "标签关联不存在";

/// 상점 태깅에 쓰는 `taggable_type` 값
pub const STORE_TAGGABLE_TYPE: &str = "Store";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tag {
    pub tag_id: i64,
    pub tag_name: String,
    pub is_active: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub tag_name: String,
    #[serde(default = "super::default_true")]
    pub is_active: bool,
}

/// 모든 필드가 Option: 보낸 필드만 변경합니다.
#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    pub tag_id: i64,
    pub tag_name: Option<String>,
    pub is_active: Option<bool>,
}

/// 태그와 대상 엔티티의 연결
///
/// (tag_id, taggable_type, taggable_id) 조합은 유일합니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Tagging {
    pub tagging_id: i64,
    pub tag_id: i64,
    pub taggable_type: String,
    pub taggable_id: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTaggingRequest {
    pub tag_id: i64,
    pub taggable_type: String,
    pub taggable_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateTaggingRequest {
    pub tagging_id: i64,
    pub tag_id: Option<i64>,
    pub taggable_type: Option<String>,
    pub taggable_id: Option<i64>,
}

/// `POST /api/stores/{store_id}/tags` 요청 본문
///
/// 상점 ID는 경로에서, 붙일 태그는 본문의 tag_id로 지정합니다.
#[derive(Debug, Deserialize)]
pub struct StoreTagRequest {
    pub tag_id: i64,
}
