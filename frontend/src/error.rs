//! 客户端错误类型
//!
//! 网关把传输失败、后端业务错误和格式错误的响应统一归一为 `ApiError`，
//! 由请求封装助手转换为提示消息，不会继续向页面抛出。

use std::fmt;

// =========================================================
// 错误类别
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// 网络或传输层失败，请求未得到响应
    Network,
    /// 后端返回的非 2xx 业务错误
    Server,
    /// 401 / 403
    Unauthorized,
    /// 2xx 响应但无法解码或未通过校验
    Malformed,
    /// 页面已卸载，响应被丢弃
    Cancelled,
}

impl ApiErrorKind {
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiErrorKind::Network => "NETWORK_ERROR",
            ApiErrorKind::Server => "SERVER_ERROR",
            ApiErrorKind::Unauthorized => "UNAUTHORIZED",
            ApiErrorKind::Malformed => "MALFORMED_RESPONSE",
            ApiErrorKind::Cancelled => "CANCELLED",
        }
    }
}

// =========================================================
// 核心错误类型
// =========================================================

#[derive(Debug, Clone, thiserror::Error)]
#[error("[{}] {message}{}", .kind.error_code(), Trace(.spans))]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
    /// 后端返回的 HTTP 状态码（传输失败时为空）
    pub status: Option<u16>,
    spans: Vec<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            spans: Vec::new(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Network, message)
    }

    pub fn server(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Server, message).with_status(status)
    }

    pub fn unauthorized(status: u16, message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Unauthorized, message).with_status(status)
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Malformed, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ApiErrorKind::Cancelled, "request cancelled")
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// 添加操作追踪，如 "comments.update"
    pub fn in_op(mut self, operation: impl Into<String>) -> Self {
        self.spans.push(operation.into());
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ApiErrorKind::Cancelled
    }

    pub fn error_code(&self) -> &'static str {
        self.kind.error_code()
    }

    pub fn spans(&self) -> &[String] {
        &self.spans
    }
}

struct Trace<'a>(&'a [String]);

impl fmt::Display for Trace<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return Ok(());
        }
        write!(f, " | trace: {}", self.0.join(" -> "))
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
