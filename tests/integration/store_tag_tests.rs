//! 상점-태그 연결 (`/api/stores/{id}/tags`)

use axum::http::StatusCode;
use serde_json::json;

use super::test_utils::{store_body, TestApp};

async fn create_store(app: &TestApp, name: &str) -> i64 {
    let (_, body) = app.post("/api/stores", store_body(name)).await;
    body["data"]["store_id"].as_i64().unwrap()
}

async fn create_tag(app: &TestApp, name: &str) -> i64 {
    let (_, body) = app.post("/api/tags", json!({ "tag_name": name })).await;
    body["data"]["tag_id"].as_i64().unwrap()
}

#[tokio::test]
async fn test_attach_list_detach() {
    let app = TestApp::new().await;
    let store = create_store(&app, "Matcha House").await;
    let cafe = create_tag(&app, "cafe").await;
    let sweets = create_tag(&app, "sweets").await;

    for tag in [cafe, sweets] {
        let (status, body) = app
            .post(&format!("/api/stores/{}/tags", store), json!({ "tag_id": tag }))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["data"]["store_id"], store);
    }

    let (status, body) = app.get(&format!("/api/stores/{}/tags", store)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 2);

    let (status, _) = app
        .delete(&format!("/api/stores/{}/tags/{}", store, cafe))
        .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = app.get(&format!("/api/stores/{}/tags", store)).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["list"][0]["tag_name"], "sweets");

    // 이미 떼어낸 태그
    let (status, body) = app
        .delete(&format!("/api/stores/{}/tags/{}", store, cafe))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errMessage"], "标签关联不存在");
}

#[tokio::test]
async fn test_attaching_twice_keeps_one_link() {
    let app = TestApp::new().await;
    let store = create_store(&app, "Matcha House").await;
    let tag = create_tag(&app, "cafe").await;

    for _ in 0..2 {
        let (status, _) = app
            .post(&format!("/api/stores/{}/tags", store), json!({ "tag_id": tag }))
            .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (_, body) = app.get(&format!("/api/stores/{}/tags", store)).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn test_missing_store_or_tag() {
    let app = TestApp::new().await;
    let store = create_store(&app, "Matcha House").await;
    let tag = create_tag(&app, "cafe").await;

    let (status, body) = app
        .post("/api/stores/999/tags", json!({ "tag_id": tag }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errMessage"], "商铺不存在");

    let (status, body) = app
        .post(&format!("/api/stores/{}/tags", store), json!({ "tag_id": 999 }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errMessage"], "标签不存在");

    let (status, _) = app.get("/api/stores/999/tags").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deleting_store_or_tag_clears_links() {
    let app = TestApp::new().await;
    let store = create_store(&app, "Matcha House").await;
    let other = create_store(&app, "Ramen Stand").await;
    let tag = create_tag(&app, "food").await;

    for s in [store, other] {
        app.post(&format!("/api/stores/{}/tags", s), json!({ "tag_id": tag }))
            .await;
    }

    app.delete(&format!("/api/stores/{}", store)).await;
    let (_, body) = app
        .post("/api/taggings/list", json!({ "page": 1, "page_size": 10 }))
        .await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["list"][0]["taggable_id"], other);
    assert_eq!(body["list"][0]["taggable_type"], "Store");

    app.delete(&format!("/api/tags/{}", tag)).await;
    let (_, body) = app
        .post("/api/taggings/list", json!({ "page": 1, "page_size": 10 }))
        .await;
    assert_eq!(body["total"], 0);
}
