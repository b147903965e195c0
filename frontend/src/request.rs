//! 请求封装助手
//!
//! 页面级数据请求统一经过 `on_request`：成功返回数据，失败时弹出提示并返回 `None`。
//! 调用方应把 `None` 理解为「不要更新状态」，这里没有任何重试策略。

use crate::error::ApiResult;
use crate::notify::Notifier;
use std::future::Future;

/// 页面数据的加载状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
}

impl LoadState {
    /// 请求结束后的状态：拿到数据为 `Loaded`，否则回到 `Idle`（保留旧数据）
    pub fn settled<T>(data: &Option<T>) -> Self {
        if data.is_some() { Self::Loaded } else { Self::Idle }
    }
}

pub async fn on_request<T, F, N>(request: F, notifier: &N) -> Option<T>
where
    F: Future<Output = ApiResult<T>>,
    N: Notifier,
{
    match request.await {
        Ok(data) => Some(data),
        Err(e) if e.is_cancelled() => {
            tracing::debug!("dropping response of an unmounted view: {}", e);
            None
        }
        Err(e) => {
            tracing::warn!(code = e.error_code(), status = ?e.status, "request failed: {}", e);
            notifier.error(e.message);
            None
        }
    }
}
