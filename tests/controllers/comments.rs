use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use manga_catalog::{db::Store, model::Comment};
use serde_json::json;

use crate::{AppStateTest, empty_request, insert_fake_manga, json_request, response_json};

#[tokio::test]
async fn store_should_attach_comment_to_authenticated_user() {
    let test_state = AppStateTest::new().await;
    let manga = insert_fake_manga(&test_state.store, "Action").await;

    let request = json_request(
        "POST",
        &format!("/api/manga/{}/comments", manga.id),
        Some(test_state.bearer(2).as_str()),
        &json!({"text": "Good one!", "user_id": 99}),
    );
    let response = test_state.generate_response(request).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let comment: Comment = response_json(response).await;
    assert_eq!(comment.manga_id, manga.id);
    assert_eq!(comment.user_id, 2);
    assert_eq!(comment.text, "Good one!");
}

#[tokio::test]
async fn store_should_be_error_when_text_is_empty_or_missing() {
    let test_state = AppStateTest::new().await;
    let manga = insert_fake_manga(&test_state.store, "Action").await;
    let uri = format!("/api/manga/{}/comments", manga.id);
    let token = test_state.bearer(2);

    for body in [json!({"text": ""}), json!({})] {
        let request = json_request("POST", &uri, Some(token.as_str()), &body);
        let response = test_state.generate_response(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{}", body);
    }

    let request = Request::builder()
        .method("POST")
        .uri(&uri)
        .header(header::AUTHORIZATION, token.as_str())
        .body(Body::from("invalid"))
        .unwrap();
    let response = test_state.generate_response(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(test_state.store.list_comments(manga.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn store_should_be_error_when_manga_id_is_invalid() {
    let test_state = AppStateTest::new().await;
    let token = test_state.bearer(2);

    let request = json_request(
        "POST",
        "/api/manga/abc/comments",
        Some(token.as_str()),
        &json!({"text": "hi"}),
    );
    let response = test_state.generate_response(request).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = json_request(
        "POST",
        "/api/manga/999999/comments",
        Some(token.as_str()),
        &json!({"text": "hi"}),
    );
    let response = test_state.generate_response(request).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn index_should_list_newest_first() {
    let test_state = AppStateTest::new().await;
    let manga = insert_fake_manga(&test_state.store, "Action").await;
    let other = insert_fake_manga(&test_state.store, "Action").await;

    for text in ["first", "second", "third"] {
        test_state.store.add_comment(manga.id, 1, text).await.unwrap();
    }
    test_state.store.add_comment(other.id, 1, "elsewhere").await.unwrap();

    let response = test_state
        .generate_response(empty_request(
            "GET",
            &format!("/api/manga/{}/comments", manga.id),
            None,
        ))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let comments: Vec<Comment> = response_json(response).await;
    let texts: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    assert_eq!(texts, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn index_should_be_empty_for_unknown_manga() {
    let test_state = AppStateTest::new().await;

    let response = test_state
        .generate_response(empty_request("GET", "/api/manga/999999/comments", None))
        .await;
    assert_eq!(response.status(), StatusCode::OK);

    let comments: Vec<Comment> = response_json(response).await;
    assert!(comments.is_empty());
}
