//! # 에러 처리 모듈
//!
//! 애플리케이션에서 발생할 수 있는 모든 에러 타입을 정의합니다.
//!
//! 이 모듈의 핵심:
//! - `AppError` 열거형(enum): 모든 에러 종류를 하나의 타입으로 통합
//! - `IntoResponse` 구현: 에러를 공통 응답 봉투(envelope)로 변환
//!   `{ "success": false, "errCode": "...", "errMessage": "..." }`
//! - 추출기 거부(rejection) 변환: 잘못된 JSON 본문이나 경로 파라미터도
//!   같은 봉투 형식의 400 응답이 됩니다.

use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::BaseResponse;

/// 애플리케이션에서 발생할 수 있는 모든 에러 종류
///
/// 핸들러에서 `Result<T, AppError>`를 반환하면,
/// Axum이 자동으로 `IntoResponse`를 호출하여 HTTP 응답으로 변환합니다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 요청한 리소스를 찾을 수 없음 (HTTP 404)
    /// 엔티티마다 다른 메시지("文章不存在" 등)를 담습니다.
    #[error("{0}")]
    NotFound(String),

    /// 잘못된 요청 (HTTP 400)
    #[error("{0}")]
    BadRequest(String),

    /// 인증 실패 (HTTP 401)
    #[error("{0}")]
    Unauthorized(String),

    /// 리소스 충돌 (HTTP 409)
    #[error("{0}")]
    Conflict(String),

    /// 서버 내부 오류 (HTTP 500)
    #[error("Internal error: {0}")]
    Internal(String),

    /// 데이터베이스 오류 (HTTP 500)
    /// #[from]: sqlx::Error에 `?`를 쓰면 자동으로 AppError::Database로 변환됩니다.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// 외부 HTTP 호출(Google) 실패 (HTTP 502)
    #[error("Upstream error: {0}")]
    Http(#[from] reqwest::Error),
}

impl AppError {
    /// `NotFound`를 간단히 만들기 위한 헬퍼
    pub fn not_found(message: &str) -> Self {
        AppError::NotFound(message.to_string())
    }

    /// `BadRequest`를 간단히 만들기 위한 헬퍼
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    /// 이 에러에 대응하는 HTTP 상태 코드
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Http(_) => StatusCode::BAD_GATEWAY,
            AppError::Internal(_) | AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    /// AppError를 HTTP 응답으로 변환합니다.
    ///
    /// 내부 에러(Database, Internal, Http)는 실제 에러 내용을 로그에만 기록하고,
    /// 클라이언트에는 일반적인 메시지만 반환합니다.
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::NotFound(msg) => ("not_found", msg),
            AppError::BadRequest(msg) => ("bad_request", msg),
            AppError::Unauthorized(msg) => ("unauthorized", msg),
            AppError::Conflict(msg) => ("conflict", msg),
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                ("internal_error", "An internal error occurred".to_string())
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {}", e);
                ("database_error", "A database error occurred".to_string())
            }
            AppError::Http(e) => {
                tracing::error!("Upstream HTTP error: {}", e);
                ("upstream_error", "An upstream service error occurred".to_string())
            }
        };

        (status, Json(BaseResponse::error(code, message))).into_response()
    }
}

// JSON 본문 파싱 실패 (문법 오류, 필수 필드 누락, 타입 불일치, Content-Type 누락)
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

// 경로 파라미터 파싱 실패 (예: /api/articles/abc)
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}
