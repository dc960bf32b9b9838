//! # 데이터 모델 모듈
//!
//! 엔티티 구조체와 요청/응답 본문을 정의합니다.
//! 엔티티마다 하나의 하위 모듈이 있고, 공통 응답 봉투는 `common`에 있습니다.
//!
//! `pub use X::*;`로 재공개하므로 `crate::models::Article`처럼 짧게 접근할 수 있습니다.

pub mod article;
pub mod comment;
pub mod common;
pub mod facility;
pub mod file;
pub mod language;
pub mod menu;
pub mod notice;
pub mod refresh_token;
pub mod store;
pub mod tag;
pub mod user;
pub mod visit_history;

pub use article::*;
pub use comment::*;
pub use common::*;
pub use facility::*;
pub use file::*;
pub use language::*;
pub use menu::*;
pub use notice::*;
pub use refresh_token::*;
pub use store::*;
pub use tag::*;
pub use user::*;
pub use visit_history::*;

/// `#[serde(default = "...")]`용: 생략 시 활성 상태
pub(crate) fn default_true() -> bool {
    true
}
