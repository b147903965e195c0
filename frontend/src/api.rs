//! 后端 API 网关
//!
//! 每个后端能力对应一个方法，每个方法只发出一次请求，
//! 结果统一为 `ApiResult<T>`：解码并校验过的数据，或归类后的错误。

use crate::cancel::CancelToken;
use crate::error::{ApiError, ApiResult};
use crate::web::http::{FetchHttpClient, HttpClient, HttpRequest, HttpResponse};
use gymnasium_shared::protocol::{
    ApiRequest, DeleteCommentRequest, GetProfileRequest, ListCategoriesRequest,
    ListCommentsRequest, ListPostsRequest, LogoutRequest, UpdateCommentRequest,
};
use gymnasium_shared::{
    Category, CommentForm, CreatePostForm, ErrorResponse, LoginForm, Post, Review, User, Validate,
};

#[derive(Clone, Debug)]
pub struct GymnasiumApi<C> {
    base_url: String,
    client: C,
}

/// 浏览器环境下的网关
pub type BrowserApi = GymnasiumApi<FetchHttpClient>;

/// 从 Context 获取网关
pub fn use_api() -> BrowserApi {
    leptos::prelude::use_context::<BrowserApi>().expect("BrowserApi should be provided")
}

impl<C: HttpClient> GymnasiumApi<C> {
    pub fn new(base_url: impl Into<String>, client: C) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, client }
    }

    #[cfg(test)]
    pub(crate) fn client(&self) -> &C {
        &self.client
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// 执行任意 `ApiRequest`
    pub async fn execute<R: ApiRequest>(
        &self,
        request: &R,
        cancel: &CancelToken,
    ) -> ApiResult<R::Response> {
        if cancel.is_cancelled() {
            return Err(ApiError::cancelled());
        }

        let url = self.url(&request.path());
        let mut http = HttpRequest::new(&url, R::METHOD).with_header("Accept", "application/json");
        if let Some(body) = request.body() {
            http = http.with_json(body);
        }

        tracing::debug!(method = R::METHOD.as_str(), %url, "api request");
        let response = self.client.send(http).await;

        // 页面卸载后到达的响应一律丢弃，无论成功与否
        if cancel.is_cancelled() {
            return Err(ApiError::cancelled());
        }

        let response = response?;
        tracing::debug!(status = response.status, %url, "api response");
        decode(response)
    }

    // =========================================================
    // Auth / Profile
    // =========================================================

    pub async fn get_profile(&self, cancel: &CancelToken) -> ApiResult<User> {
        self.execute(&GetProfileRequest, cancel)
            .await
            .map_err(|e| e.in_op("auth.profile"))
    }

    pub async fn login(&self, form: &LoginForm, cancel: &CancelToken) -> ApiResult<User> {
        self.execute(form, cancel)
            .await
            .map_err(|e| e.in_op("auth.login"))
    }

    pub async fn logout(&self, cancel: &CancelToken) -> ApiResult<()> {
        self.execute(&LogoutRequest, cancel)
            .await
            .map_err(|e| e.in_op("auth.logout"))
    }

    // =========================================================
    // Categories / Posts
    // =========================================================

    pub async fn get_categories(&self, cancel: &CancelToken) -> ApiResult<Vec<Category>> {
        self.execute(&ListCategoriesRequest, cancel)
            .await
            .map_err(|e| e.in_op("categories.list"))
    }

    pub async fn get_posts(&self, category: &str, cancel: &CancelToken) -> ApiResult<Vec<Post>> {
        let request = ListPostsRequest {
            category: category.to_string(),
        };
        self.execute(&request, cancel)
            .await
            .map_err(|e| e.in_op("posts.list"))
    }

    pub async fn create_post(&self, form: &CreatePostForm, cancel: &CancelToken) -> ApiResult<Post> {
        self.execute(form, cancel)
            .await
            .map_err(|e| e.in_op("posts.create"))
    }

    // =========================================================
    // Comments / Reviews
    // =========================================================

    pub async fn get_comments(&self, cancel: &CancelToken) -> ApiResult<Vec<Review>> {
        self.execute(&ListCommentsRequest, cancel)
            .await
            .map_err(|e| e.in_op("comments.list"))
    }

    pub async fn create_comment(
        &self,
        form: &CommentForm,
        cancel: &CancelToken,
    ) -> ApiResult<Review> {
        self.execute(form, cancel)
            .await
            .map_err(|e| e.in_op("comments.create"))
    }

    pub async fn update_comment(
        &self,
        id: &str,
        form: &CommentForm,
        cancel: &CancelToken,
    ) -> ApiResult<Review> {
        let request = UpdateCommentRequest {
            id: id.to_string(),
            form: form.clone(),
        };
        self.execute(&request, cancel)
            .await
            .map_err(|e| e.in_op("comments.update"))
    }

    pub async fn delete_comment(&self, id: &str, cancel: &CancelToken) -> ApiResult<()> {
        let request = DeleteCommentRequest { id: id.to_string() };
        self.execute(&request, cancel)
            .await
            .map_err(|e| e.in_op("comments.delete"))
    }
}

// =========================================================
// 响应归一化
// =========================================================

fn decode<T: serde::de::DeserializeOwned + Validate>(response: HttpResponse) -> ApiResult<T> {
    let status = response.status;

    if !response.ok() {
        let message = backend_message(&response.body).unwrap_or_else(|| format!("HTTP {}", status));
        return Err(match status {
            401 | 403 => ApiError::unauthorized(status, message),
            _ => ApiError::server(status, message),
        });
    }

    // 204 / 空响应体按 JSON null 处理，对应 `()` 响应
    let body = match response.body.trim() {
        "" => "null",
        body => body,
    };

    let data: T = serde_json::from_str(body)
        .map_err(|e| ApiError::malformed(format!("unexpected response shape: {}", e)).with_status(status))?;
    data.validate()
        .map_err(|e| ApiError::malformed(format!("invalid response: {}", e)).with_status(status))?;
    Ok(data)
}

fn backend_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .map(|e| e.message.joined())
        .filter(|m| !m.trim().is_empty())
}

#[cfg(test)]
mod tests;
