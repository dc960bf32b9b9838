//! # 공지(Notice) 모델
//!
//! `user_id`가 없으면 전체 공지, 있으면 특정 사용자에게 보내는 알림입니다.

use serde::{Deserialize, Serialize};

pub const NOTICE_NOT_FOUND: &str = "通知不存在";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Notice {
    pub notice_id: i64,
    pub title: String,
    pub content: String,
    pub notice_type: i64,
    pub user_id: Option<i64>,
    pub published_at: String,
    pub is_active: bool,
    pub is_read: bool,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateNoticeRequest {
    pub title: String,
    pub content: String,
    pub notice_type: i64,
    #[serde(default)]
    pub user_id: Option<i64>,
    pub published_at: String,
    pub is_active: bool,
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Deserialize)]
pub struct UpdateNoticeRequest {
    pub notice_id: i64,
    pub title: Option<String>,
    pub content: Option<String>,
    pub notice_type: Option<i64>,
    pub user_id: Option<i64>,
    pub published_at: Option<String>,
    pub is_active: Option<bool>,
    pub is_read: Option<bool>,
}
