use serde::{Deserialize, Serialize};

pub const COMMENT_NOT_FOUND: &str = "评论不存在";

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Comment {
    pub comment_id: i64,
    pub article_id: i64,
    pub user_id: i64,
    pub comment_text: String,
    pub is_published: bool,
    /// 답글이면 부모 댓글 ID
    pub reply_to_comment_id: Option<i64>,
    pub created_at: String,
    pub updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub article_id: i64,
    pub user_id: i64,
    pub comment_text: String,
    pub is_published: bool,
    #[serde(default)]
    pub reply_to_comment_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateCommentRequest {
    pub comment_id: i64,
    pub article_id: Option<i64>,
    pub user_id: Option<i64>,
    pub comment_text: Option<String>,
    pub is_published: Option<bool>,
    pub reply_to_comment_id: Option<i64>,
}
