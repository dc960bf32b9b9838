//! # 서비스 모듈
//!
//! 핸들러와 DB 사이에 들어가는 도메인 로직입니다.
//! - `password`: Argon2id 비밀번호 해싱/검증, 인증 코드 생성
//! - `google`: Google ID 토큰 검증, OAuth 클라이언트, 프로필 조회

pub mod google;
pub mod password;
