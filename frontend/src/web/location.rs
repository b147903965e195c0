//! window.location / window.history 封装
//!
//! 所有对浏览器地址栏的直接操作都集中在此模块。

use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态
pub fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（用于重定向）
pub fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

// =========================================================
// 整页重新加载
// =========================================================

/// 丢弃所有客户端状态并重新加载文档
pub trait Reloader {
    fn reload(&self);
}

#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserReloader;

impl Reloader for BrowserReloader {
    fn reload(&self) {
        tracing::debug!("reloading document");
        if let Some(window) = web_sys::window() {
            let _ = window.location().reload();
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::cell::Cell;

    #[derive(Default)]
    pub struct CountingReloader {
        pub count: Cell<usize>,
    }

    impl Reloader for CountingReloader {
        fn reload(&self) {
            self.count.set(self.count.get() + 1);
        }
    }
}
