//! # 데이터베이스 접근 계층 (Data Access Layer)
//!
//! 라우트 핸들러(routes/)는 이 모듈의 함수를 호출해 DB 작업을 수행합니다.
//! 엔티티마다 하위 모듈이 하나씩 있고, 함수 이름은 `get_x` / `list_x` / `create_x` /
//! `update_x` / `delete_x` 규칙을 따릅니다.
//!
//! 공통 규칙:
//! - 조회 결과가 없으면 `Ok(None)`, 404 변환은 핸들러가 합니다.
//! - 수정/삭제는 영향받은 행이 있었는지를 `bool`로 돌려줍니다.
//! - 목록은 `(전체 행 수, 현재 페이지)` 튜플이며 키 오름차순입니다.
//! - 부분 수정은 `COALESCE(?, column)`으로 보낸 필드만 바꿉니다.

pub mod articles;
pub mod comments;
pub mod facilities;
pub mod files;
pub mod languages;
pub mod menus;
pub mod notices;
pub mod refresh_tokens;
pub mod stores;
pub mod tags;
pub mod users;
pub mod visit_history;

pub use articles::*;
pub use comments::*;
pub use facilities::*;
pub use files::*;
pub use languages::*;
pub use menus::*;
pub use notices::*;
pub use stores::*;
pub use tags::*;
pub use visit_history::*;

use std::str::FromStr;

use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};

/// 연결 풀을 만듭니다.
///
/// `sqlite::memory:`는 연결마다 별도의 DB가 생기므로 연결 하나를 계속 유지합니다.
pub async fn connect(database_url: &str) -> Result<SqlitePool, sqlx::Error> {
    let options = SqliteConnectOptions::from_str(database_url)?.foreign_keys(true);

    if database_url.contains(":memory:") {
        return SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await;
    }

    SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await
}

/// 아직 적용되지 않은 `migrations/` 파일을 순서대로 실행합니다.
pub async fn migrate(pool: &SqlitePool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// 헬스체크용: 연결이 살아 있는지 확인
pub async fn ping(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query("SELECT 1").execute(pool).await?;
    Ok(())
}
