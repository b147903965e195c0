use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod protocol;
pub mod validate;

pub use validate::Validate;

// =========================================================
// 常量定义 (Constants)
// =========================================================

pub const PREFIX_API_AUTH: &str = "/auth";
pub const PREFIX_API_POSTS: &str = "/posts";
pub const PREFIX_API_COMMENTS: &str = "/comments";

// =========================================================
// 用户 (User)
// =========================================================

/// 用户角色
///
/// 后端以大写字符串传输，未知的取值视为格式错误的响应，而不是降级为访客。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UserRole {
    Admin,
    Member,
    Guest,
}

impl UserRole {
    pub const ALL: [UserRole; 3] = [UserRole::Admin, UserRole::Member, UserRole::Guest];

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub role: UserRole,
}

// =========================================================
// 分类与文章 (Categories & Posts)
// =========================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: u64,
    /// URL 中使用的路径片段，例如 `/posts/news` 中的 `news`
    pub path: String,
    pub label: String,
}

/// 按路径片段查找分类
pub fn find_category_by_path<'a>(categories: &'a [Category], path: &str) -> Option<&'a Category> {
    categories.iter().find(|c| c.path == path)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub category: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CreatePostForm {
    pub title: String,
    pub content: String,
    pub category: String,
    #[serde(default)]
    pub images: Vec<String>,
}

// =========================================================
// 评论 (Reviews / Comments)
// =========================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub id: String,
    #[serde(rename = "authorId")]
    pub author_id: String,
    #[serde(rename = "authorName")]
    pub author_name: String,
    pub text: String,
    #[serde(default, rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// 作者本人或管理员可以修改/删除评论
    pub fn can_edit(&self, user: Option<&User>) -> bool {
        match user {
            Some(u) => u.role.is_admin() || u.id == self.author_id,
            None => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommentForm {
    pub text: String,
}

// =========================================================
// 认证 (Auth)
// =========================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// =========================================================
// 错误响应 (Backend Error Body)
// =========================================================

/// 后端返回的 `message` 既可能是字符串，也可能是校验错误列表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ErrorMessage {
    One(String),
    Many(Vec<String>),
}

impl ErrorMessage {
    pub fn joined(&self) -> String {
        match self {
            ErrorMessage::One(msg) => msg.clone(),
            ErrorMessage::Many(list) => list.join("; "),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub message: ErrorMessage,
    #[serde(default, rename = "statusCode", skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
