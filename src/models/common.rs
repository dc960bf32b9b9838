//! # 공통 요청/응답 구조체
//!
//! 모든 엔드포인트가 공유하는 응답 봉투(envelope)와 페이지네이션 요청,
//! 타임스탬프 포맷, BLOB 컬럼의 base64 직렬화 헬퍼를 정의합니다.
//!
//! ## 응답 형식
//! - 데이터 없음: `{ "success": true }`
//! - 단건: `{ "success": true, "data": {...} }`
//! - 목록: `{ "success": true, "total": 42, "list": [...] }`
//! - 에러: `{ "success": false, "errCode": "not_found", "errMessage": "..." }`

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// DB에 저장하는 타임스탬프 형식 (SQLite `strftime('%Y-%m-%dT%H:%M:%fZ', 'now')`와 동일)
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn now_timestamp() -> String {
    format_timestamp(Utc::now())
}

/// 데이터가 없는 응답 (성공 플래그 + 선택적 에러 정보)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseResponse {
    pub success: bool,
    #[serde(rename = "errCode", skip_serializing_if = "Option::is_none")]
    pub err_code: Option<String>,
    #[serde(rename = "errMessage", skip_serializing_if = "Option::is_none")]
    pub err_message: Option<String>,
}

impl BaseResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            err_code: None,
            err_message: None,
        }
    }

    /// 성공이지만 안내 메시지를 함께 돌려줄 때 (예: 인증 코드 재발송)
    pub fn ok_with_message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            err_code: None,
            err_message: Some(message.into()),
        }
    }

    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            err_code: Some(code.to_string()),
            err_message: Some(message.into()),
        }
    }
}

/// 단건 데이터를 담는 응답
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// 목록 응답: `total`은 페이지와 무관한 전체(필터 적용) 행 수
#[derive(Debug, Serialize)]
pub struct ListResponse<T> {
    pub success: bool,
    pub total: i64,
    pub list: Vec<T>,
}

impl<T: Serialize> ListResponse<T> {
    pub fn new(total: i64, list: Vec<T>) -> Self {
        Self {
            success: true,
            total,
            list,
        }
    }
}

/// `POST /api/<group>/list`의 요청 본문
///
/// page는 1부터 시작합니다. keyword가 비어 있으면 필터를 적용하지 않습니다.
#[derive(Debug, Clone, Deserialize)]
pub struct ListRequest {
    pub page: i64,
    pub page_size: i64,
    #[serde(default)]
    pub keyword: Option<String>,
}

impl ListRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.page < 1 {
            return Err(AppError::bad_request("page must be at least 1"));
        }
        if self.page_size < 1 {
            return Err(AppError::bad_request("page_size must be at least 1"));
        }
        Ok(())
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    /// LIKE 패턴 (`%keyword%`), 키워드가 없거나 공백뿐이면 None
    ///
    /// 키워드 안의 `%`, `_`, `\`는 글자 그대로 찾도록 `\`로 이스케이프합니다.
    /// 쿼리 쪽은 `LIKE ? ESCAPE '\'`로 맞춰야 합니다.
    pub fn keyword_pattern(&self) -> Option<String> {
        self.keyword
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| {
                let mut pattern = String::with_capacity(k.len() + 2);
                pattern.push('%');
                for c in k.chars() {
                    if matches!(c, '%' | '_' | '\\') {
                        pattern.push('\\');
                    }
                    pattern.push(c);
                }
                pattern.push('%');
                pattern
            })
    }
}

/// 필수 문자열 필드가 비어 있으면 400을 반환합니다.
pub fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::bad_request(format!("{} is required", field)));
    }
    Ok(())
}

/// BLOB 컬럼을 JSON에서 base64 문자열로 표현합니다.
pub mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

/// nullable BLOB 컬럼용 (`null` 또는 base64 문자열)
pub mod base64_bytes_opt {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        bytes: &Option<Vec<u8>>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bytes {
            Some(bytes) => serializer.serialize_some(&STANDARD.encode(bytes)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Vec<u8>>, D::Error> {
        Option::<String>::deserialize(deserializer)?
            .map(|encoded| STANDARD.decode(encoded.as_bytes()))
            .transpose()
            .map_err(serde::de::Error::custom)
    }
}
