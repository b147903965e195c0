use super::*;
use crate::error::ApiErrorKind;
use crate::web::http::MockHttpClient;
use gymnasium_shared::UserRole;
use gymnasium_shared::protocol::HttpMethod;
use serde_json::json;

const BASE: &str = "https://gymn.example.ru/api";

fn api() -> GymnasiumApi<MockHttpClient> {
    GymnasiumApi::new(format!("{}/", BASE), MockHttpClient::new())
}

fn url(path: &str) -> String {
    format!("{}{}", BASE, path)
}

// =========================================================
// Success paths
// =========================================================

#[tokio::test]
async fn get_profile_decodes_user() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Get,
        &url("/auth/profile"),
        200,
        json!({ "id": "u1", "name": "Анна", "role": "ADMIN" }),
    );

    let user = api.get_profile(&CancelToken::never()).await.unwrap();
    assert_eq!(user.role, UserRole::Admin);
    assert_eq!(user.email, None);

    let reqs = api.client.requests.borrow();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].0, url("/auth/profile"));
    assert_eq!(reqs[0].1, "GET");
    assert_eq!(reqs[0].2, None);
}

#[tokio::test]
async fn update_comment_sends_patch_with_form() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Patch,
        &url("/comments/42"),
        200,
        json!({ "id": "42", "authorId": "u1", "authorName": "Анна", "text": "hello" }),
    );

    let form = CommentForm {
        text: "hello".into(),
    };
    let review = api
        .update_comment("42", &form, &CancelToken::never())
        .await
        .unwrap();
    assert_eq!(review.text, "hello");

    let reqs = api.client.requests.borrow();
    assert_eq!(reqs.len(), 1);
    assert_eq!(reqs[0].1, "PATCH");
    let body: serde_json::Value = serde_json::from_str(reqs[0].2.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "text": "hello" }));
}

#[tokio::test]
async fn empty_body_decodes_as_unit() {
    let api = api();
    api.client
        .mock_raw(HttpMethod::Delete, &url("/comments/7"), 204, "");

    api.delete_comment("7", &CancelToken::never()).await.unwrap();
    assert_eq!(api.client.requests.borrow()[0].1, "DELETE");
}

#[tokio::test]
async fn posts_path_is_scoped_by_category() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Get,
        &url("/posts/category/news"),
        200,
        json!([{ "id": "p1", "category": "news", "title": "День знаний", "content": "..." }]),
    );

    let posts = api.get_posts("news", &CancelToken::never()).await.unwrap();
    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0].title, "День знаний");
}

// =========================================================
// Error normalisation
// =========================================================

#[tokio::test]
async fn unauthorized_status_is_classified() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Get,
        &url("/auth/profile"),
        401,
        json!({ "message": "Unauthorized", "statusCode": 401 }),
    );

    let err = api.get_profile(&CancelToken::never()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Unauthorized);
    assert_eq!(err.status, Some(401));
    assert_eq!(err.message, "Unauthorized");
    assert_eq!(err.spans(), &["auth.profile".to_string()]);
}

#[tokio::test]
async fn server_error_uses_backend_message_list() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Post,
        &url("/comments"),
        400,
        json!({ "message": ["text should not be empty"], "error": "Bad Request" }),
    );

    let err = api
        .create_comment(&CommentForm::default(), &CancelToken::never())
        .await
        .unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.message, "text should not be empty");
}

#[tokio::test]
async fn server_error_without_json_body() {
    let api = api();
    // 未注册的 URL 由 mock 返回 404 "Not Found"
    let err = api.get_comments(&CancelToken::never()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Server);
    assert_eq!(err.message, "HTTP 404");
}

#[tokio::test]
async fn wrong_shape_is_malformed() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Get,
        &url("/categories"),
        200,
        json!({ "items": [] }),
    );

    let err = api.get_categories(&CancelToken::never()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Malformed);
}

#[tokio::test]
async fn failed_validation_is_malformed() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Get,
        &url("/categories"),
        200,
        json!([{ "id": 1, "path": "news/today", "label": "News" }]),
    );

    let err = api.get_categories(&CancelToken::never()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Malformed);
    assert!(err.message.contains("[0]"), "{}", err.message);
}

#[tokio::test]
async fn unknown_role_is_malformed() {
    let api = api();
    api.client.mock_response(
        HttpMethod::Get,
        &url("/auth/profile"),
        200,
        json!({ "id": "u1", "name": "Root", "role": "SUPERUSER" }),
    );

    let err = api.get_profile(&CancelToken::never()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Malformed);
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let api = api();
    api.client.mock_network_failure(&url("/categories"));

    let err = api.get_categories(&CancelToken::never()).await.unwrap_err();
    assert_eq!(err.kind, ApiErrorKind::Network);
}

// =========================================================
// Cancellation
// =========================================================

#[tokio::test]
async fn cancelled_token_skips_the_request() {
    let api = api();
    let token = CancelToken::new();
    token.cancel();

    let err = api.get_comments(&token).await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(api.client.request_count(), 0);
}

/// 在响应到达前取消：请求已发出，但数据不会交给调用方
struct CancelDuringSend {
    inner: MockHttpClient,
    token: CancelToken,
}

#[async_trait::async_trait(?Send)]
impl HttpClient for CancelDuringSend {
    async fn send(&self, req: HttpRequest) -> ApiResult<HttpResponse> {
        let response = self.inner.send(req).await;
        self.token.cancel();
        response
    }
}

#[tokio::test]
async fn late_response_is_discarded() {
    let token = CancelToken::new();
    let client = CancelDuringSend {
        inner: MockHttpClient::new(),
        token: token.clone(),
    };
    client.inner.mock_response(
        HttpMethod::Get,
        &url("/comments"),
        200,
        json!([{ "id": "1", "authorId": "u1", "authorName": "Анна", "text": "Спасибо" }]),
    );
    let api = GymnasiumApi::new(BASE, client);

    let err = api.get_comments(&token).await.unwrap_err();
    assert!(err.is_cancelled());
    assert_eq!(api.client.inner.request_count(), 1);
}
