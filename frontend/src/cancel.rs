//! 页面级取消令牌
//!
//! 页面卸载时取消令牌，网关在发送前和收到响应后检查，
//! 已取消的请求一律返回 `Cancelled`，迟到的响应不会写入已销毁视图的状态。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    cancelled: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// 永不取消的令牌，用于应用级请求（启动引导、表单提交）
    pub fn never() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// 创建与当前响应式 Owner 绑定的令牌：组件卸载时自动取消
pub fn scoped_token() -> CancelToken {
    let token = CancelToken::new();
    let on_drop = token.clone();
    leptos::prelude::on_cleanup(move || on_drop.cancel());
    token
}
