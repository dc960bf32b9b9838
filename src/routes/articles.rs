//! # 기사(Article) 라우트 핸들러
//!
//! ## 엔드포인트
//! | 메서드 | 경로 | 핸들러 | 인증 |
//! |--------|------|--------|------|
//! | POST | /api/articles | `create_article` | 필요 |
//! | PUT | /api/articles | `update_article` | 필요 |
//! | DELETE | /api/articles/{id} | `delete_article` | 필요 |
//! | GET | /api/articles/{id} | `get_article` | - |
//! | POST | /api/articles/list | `list_articles` | - |
//!
//! 쓰기 핸들러는 `AuthUser`를 인자로 받으므로, 토큰 검증이 실패하면
//! 본문을 파싱하기 전에 401이 반환됩니다.

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};

use crate::{
    db,
    error::AppError,
    extract::{AppJson, AppPath},
    middleware::auth::AuthUser,
    models::*,
    routes::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/articles", post(create_article).put(update_article))
        .route("/articles/list", post(list_articles))
        .route("/articles/{id}", get(get_article).delete(delete_article))
}

/// `POST /api/articles` → `{ "success": true, "data": Article }`
pub async fn create_article(
    State(state): State<AppState>,
    auth_user: AuthUser,
    AppJson(req): AppJson<CreateArticleRequest>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    require_text(&req.title, "title")?;
    require_text(&req.body_text, "body_text")?;

    let article = db::create_article(&state.pool, &req).await?;
    tracing::info!("User {} created article {}", auth_user.user_id, article.article_id);
    Ok(Json(ApiResponse::ok(article)))
}

/// `PUT /api/articles`: 본문의 article_id로 대상을 찾고 보낸 필드만 바꿉니다.
pub async fn update_article(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    AppJson(req): AppJson<UpdateArticleRequest>,
) -> Result<Json<BaseResponse>, AppError> {
    if let Some(title) = &req.title {
        require_text(title, "title")?;
    }

    if !db::update_article(&state.pool, &req).await? {
        return Err(AppError::not_found(ARTICLE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn delete_article(
    State(state): State<AppState>,
    _auth_user: AuthUser,
    AppPath(id): AppPath<i64>,
) -> Result<Json<BaseResponse>, AppError> {
    if !db::delete_article(&state.pool, id).await? {
        return Err(AppError::not_found(ARTICLE_NOT_FOUND));
    }
    Ok(Json(BaseResponse::ok()))
}

pub async fn get_article(
    State(state): State<AppState>,
    AppPath(id): AppPath<i64>,
) -> Result<Json<ApiResponse<Article>>, AppError> {
    let article = db::get_article(&state.pool, id)
        .await?
        .ok_or(AppError::not_found(ARTICLE_NOT_FOUND))?;
    Ok(Json(ApiResponse::ok(article)))
}

/// `POST /api/articles/list` + `{ "page": 1, "page_size": 10, "keyword": "..." }`
pub async fn list_articles(
    State(state): State<AppState>,
    AppJson(req): AppJson<ListRequest>,
) -> Result<Json<ListResponse<Article>>, AppError> {
    req.validate()?;
    let (total, list) = db::list_articles(&state.pool, &req).await?;
    Ok(Json(ListResponse::new(total, list)))
}
