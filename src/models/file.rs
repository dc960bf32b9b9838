use serde::{Deserialize, Serialize};

use super::common::{base64_bytes, base64_bytes_opt};

pub const FILE_NOT_FOUND: &str = "文件不存在";

/// 업로드된 파일: 내용은 `file_data` BLOB에 그대로 저장됩니다.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct File {
    pub file_id: i64,
    pub file_name: String,
    pub file_type: String,
    pub file_size: Option<i64>,
    #[serde(with = "base64_bytes")]
    pub file_data: Vec<u8>,
    /// 파일이 쓰이는 위치 (예: "store", "facility")
    pub location: String,
    pub related_id: i64,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateFileRequest {
    pub file_name: String,
    pub file_type: String,
    #[serde(default)]
    pub file_size: Option<i64>,
    #[serde(with = "base64_bytes")]
    pub file_data: Vec<u8>,
    pub location: String,
    pub related_id: i64,
}

#[derive(Debug, Deserialize)]
pub struct UpdateFileRequest {
    pub file_id: i64,
    pub file_name: Option<String>,
    pub file_type: Option<String>,
    pub file_size: Option<i64>,
    #[serde(default, with = "base64_bytes_opt")]
    pub file_data: Option<Vec<u8>>,
    pub location: Option<String>,
    pub related_id: Option<i64>,
}
