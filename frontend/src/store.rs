//! 全局应用状态
//!
//! 显式构造的状态容器：纯 reducer (`AppState::apply`) + 注入的写入边界 (`Dispatch`)。
//! 组件通过 Context 获取 `AppStore`，通过 hooks 读取各个切片。

use gymnasium_shared::{Category, User};
use leptos::prelude::*;

// =========================================================
// 状态 (State)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub struct UserState {
    pub user: Option<User>,
    pub is_auth: bool,
    pub is_loading: bool,
}

impl Default for UserState {
    fn default() -> Self {
        // 启动时资料请求尚未完成，视为加载中
        Self {
            user: None,
            is_auth: false,
            is_loading: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoriesState {
    pub list: Vec<Category>,
    /// 是否已收到过一次成功的分类响应
    pub loaded: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct AppState {
    pub user: UserState,
    pub categories: CategoriesState,
    /// 递增时重新执行认证检查
    pub refresh_trigger: u32,
}

// =========================================================
// 动作 (Actions)
// =========================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetLoading(bool),
    Login(User),
    Logout,
    SetCategories(Vec<Category>),
    RefreshUser,
}

impl AppState {
    /// 纯状态转换：user 与 is_auth 总是一起写入，不会出现半填充的用户
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::SetLoading(loading) => self.user.is_loading = loading,
            Action::Login(user) => {
                self.user.user = Some(user);
                self.user.is_auth = true;
            }
            Action::Logout => {
                self.user.user = None;
                self.user.is_auth = false;
            }
            Action::SetCategories(list) => {
                self.categories.list = list;
                self.categories.loaded = true;
            }
            Action::RefreshUser => {
                self.refresh_trigger = self.refresh_trigger.wrapping_add(1);
            }
        }
    }
}

// =========================================================
// 写入边界 (Dispatch)
// =========================================================

pub trait Dispatch {
    fn dispatch(&self, action: Action);
}

/// 基于信号的全局 Store
#[derive(Clone, Copy)]
pub struct AppStore {
    state: RwSignal<AppState>,
}

impl AppStore {
    pub fn new() -> Self {
        Self {
            state: RwSignal::new(AppState::default()),
        }
    }

    pub fn state(&self) -> Signal<AppState> {
        self.state.into()
    }
}

impl Default for AppStore {
    fn default() -> Self {
        Self::new()
    }
}

impl Dispatch for AppStore {
    fn dispatch(&self, action: Action) {
        tracing::debug!(?action, "dispatch");
        // 视图已销毁时信号也会被释放，此时丢弃写入
        let _ = self.state.try_update(|state| state.apply(action));
    }
}

// =========================================================
// Hooks
// =========================================================

/// 从 Context 获取 Store
pub fn use_store() -> AppStore {
    use_context::<AppStore>().expect("AppStore should be provided")
}

pub fn use_user_data() -> Signal<UserState> {
    let state = use_store().state;
    Signal::derive(move || state.with(|s| s.user.clone()))
}

pub fn use_categories() -> Signal<CategoriesState> {
    let state = use_store().state;
    Signal::derive(move || state.with(|s| s.categories.clone()))
}

pub fn use_update_user_trigger() -> Signal<u32> {
    let state = use_store().state;
    Signal::derive(move || state.with(|s| s.refresh_trigger))
}
