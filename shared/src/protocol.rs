use crate::{
    Category, CommentForm, CreatePostForm, LoginForm, PREFIX_API_AUTH, PREFIX_API_COMMENTS,
    PREFIX_API_POSTS, Post, Review, User, Validate,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// Path parameters are encoded by the implementor, the gateway only prefixes the base URL.
pub trait ApiRequest {
    /// The response type returned by this request. Validated after decoding.
    type Response: DeserializeOwned + Validate;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base.
    fn path(&self) -> String;
    /// JSON body, if the endpoint takes one.
    fn body(&self) -> Option<serde_json::Value> {
        None
    }
}

fn segment(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

fn json_body<T: Serialize>(value: &T) -> Option<serde_json::Value> {
    // 表单结构只包含字符串字段，序列化不会失败
    serde_json::to_value(value).ok()
}

// =========================================================
// Auth
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/profile", PREFIX_API_AUTH)
    }
}

impl ApiRequest for LoginForm {
    type Response = User;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/login", PREFIX_API_AUTH)
    }

    fn body(&self) -> Option<serde_json::Value> {
        json_body(self)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LogoutRequest;

impl ApiRequest for LogoutRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        format!("{}/logout", PREFIX_API_AUTH)
    }
}

// =========================================================
// Categories & Posts
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListCategoriesRequest;

impl ApiRequest for ListCategoriesRequest {
    type Response = Vec<Category>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        "/categories".to_string()
    }
}

/// List the posts of one category
#[derive(Debug, Clone)]
pub struct ListPostsRequest {
    pub category: String,
}

impl ApiRequest for ListPostsRequest {
    type Response = Vec<Post>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        format!("{}/category/{}", PREFIX_API_POSTS, segment(&self.category))
    }
}

impl ApiRequest for CreatePostForm {
    type Response = Post;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PREFIX_API_POSTS.to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        json_body(self)
    }
}

// =========================================================
// Comments
// =========================================================

#[derive(Debug, Clone, Copy, Default)]
pub struct ListCommentsRequest;

impl ApiRequest for ListCommentsRequest {
    type Response = Vec<Review>;
    const METHOD: HttpMethod = HttpMethod::Get;

    fn path(&self) -> String {
        PREFIX_API_COMMENTS.to_string()
    }
}

impl ApiRequest for CommentForm {
    type Response = Review;
    const METHOD: HttpMethod = HttpMethod::Post;

    fn path(&self) -> String {
        PREFIX_API_COMMENTS.to_string()
    }

    fn body(&self) -> Option<serde_json::Value> {
        json_body(self)
    }
}

#[derive(Debug, Clone)]
pub struct UpdateCommentRequest {
    pub id: String,
    pub form: CommentForm,
}

impl ApiRequest for UpdateCommentRequest {
    type Response = Review;
    const METHOD: HttpMethod = HttpMethod::Patch;

    fn path(&self) -> String {
        format!("{}/{}", PREFIX_API_COMMENTS, segment(&self.id))
    }

    fn body(&self) -> Option<serde_json::Value> {
        json_body(&self.form)
    }
}

#[derive(Debug, Clone)]
pub struct DeleteCommentRequest {
    pub id: String,
}

impl ApiRequest for DeleteCommentRequest {
    type Response = ();
    const METHOD: HttpMethod = HttpMethod::Delete;

    fn path(&self) -> String {
        format!("{}/{}", PREFIX_API_COMMENTS, segment(&self.id))
    }
}
