//! # 기사(Article) 모델
//!
//! `article_image`는 BLOB이며 JSON에서는 base64 문자열로 주고받습니다.

use serde::{Deserialize, Serialize};

use super::common::base64_bytes_opt;

pub const ARTICLE_NOT_FOUND: &str = "文章不存在";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Article {
    pub article_id: i64,
    pub title: String,
    pub body_text: String,
    pub category: Option<String>,
    pub like_count: i64,
    #[serde(with = "base64_bytes_opt")]
    pub article_image: Option<Vec<u8>>,
    pub comment_count: i64,
    pub created_at: String,
    pub updated_at: Option<String>,
}

/// `POST /api/articles` 요청 본문
#[derive(Debug, Deserialize)]
pub struct CreateArticleRequest {
    pub title: String,
    pub body_text: String,
    #[serde(default)]
    pub category: Option<String>,
    pub like_count: i64,
    #[serde(default, with = "base64_bytes_opt")]
    pub article_image: Option<Vec<u8>>,
    pub comment_count: i64,
}

/// `PUT /api/articles` 요청 본문: 키 외의 필드는 보낸 것만 바뀝니다.
#[derive(Debug, Deserialize)]
pub struct UpdateArticleRequest {
    pub article_id: i64,
    pub title: Option<String>,
    pub body_text: Option<String>,
    pub category: Option<String>,
    pub like_count: Option<i64>,
    #[serde(default, with = "base64_bytes_opt")]
    pub article_image: Option<Vec<u8>>,
    pub comment_count: Option<i64>,
}
