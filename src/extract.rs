//! # 커스텀 추출기(Extractor)
//!
//! axum 기본 `Json`/`Path`는 파싱 실패 시 일반 텍스트 응답을 돌려줍니다.
//! 여기서는 거부(rejection)를 `AppError`로 바꿔 모든 에러가 같은 JSON 봉투로 나가게 합니다.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::AppError;

/// 요청 본문 JSON 추출기: 실패하면 400 `bad_request` 봉투
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// 경로 파라미터 추출기: `/api/articles/abc` 같은 잘못된 ID도 400 봉투
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);
