//! 路由服务模块 - 核心引擎
//!
//! 持有路由表与当前路由信号，基于 History API 实现"解析 -> 更新 -> 渲染"的导航流程。
//! 角色守卫不在这里执行，而是由 `ProtectedRoute` 在渲染时判定。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::location::{current_path, push_history_state, replace_history_state};
use super::route::{AppRoute, RouteTable};

/// 页面控制器使用的导航边界
pub trait Navigator {
    /// 导航到指定路由（新增历史记录）
    fn navigate_to(&self, route: AppRoute);
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
#[derive(Clone, Copy)]
pub struct RouterService {
    current_route: RwSignal<AppRoute>,
    table: StoredValue<RouteTable>,
}

impl RouterService {
    fn new(table: RouteTable) -> Self {
        // 1. 初始化当前路由（从 URL 解析）
        let initial_route = table.resolve(&current_path());
        Self {
            current_route: RwSignal::new(initial_route),
            table: StoredValue::new(table),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> Signal<AppRoute> {
        self.current_route.into()
    }

    /// 读取路由表
    pub fn with_table<T>(&self, f: impl FnOnce(&RouteTable) -> T) -> T {
        self.table.with_value(f)
    }

    pub fn path_of(&self, route: &AppRoute) -> String {
        self.with_table(|table| table.to_path(route))
    }

    /// 按 URL path 导航（pushState）
    pub fn navigate(&self, path: &str) {
        let route = self.with_table(|table| table.resolve(path));
        self.go(route, true);
    }

    /// 重定向（replaceState），用于守卫拒绝等不应留下历史记录的跳转
    pub fn redirect(&self, route: AppRoute) {
        self.go(route, false);
    }

    fn go(&self, route: AppRoute, use_push: bool) {
        let path = self.path_of(&route);
        tracing::debug!(%path, push = use_push, "route change");
        if use_push {
            push_history_state(&path);
        } else {
            replace_history_state(&path);
        }
        self.current_route.set(route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let current_route = self.current_route;
        let table = self.table;

        let closure = Closure::<dyn Fn()>::new(move || {
            let route = table.with_value(|t| t.resolve(&current_path()));
            current_route.set(route);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

impl Navigator for RouterService {
    fn navigate_to(&self, route: AppRoute) {
        self.go(route, true);
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(table: RouteTable) -> RouterService {
    let router = RouterService::new(table);
    router.init_popstate_listener();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 路由表（已按配置开关）
    table: RouteTable,
    children: Children,
) -> impl IntoView {
    provide_router(table);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}

/// 只有无修饰键的主键点击才由路由接管，其余交给浏览器（新标签页等）
fn is_plain_click(button: i16, ctrl: bool, meta: bool, shift: bool, alt: bool) -> bool {
    button == 0 && !(ctrl || meta || shift || alt)
}

/// 应用内链接：拦截点击，改用 History API 导航
#[component]
pub fn Link(
    #[prop(into)] to: String,
    #[prop(optional, into)] class: String,
    children: Children,
) -> impl IntoView {
    let router = use_router();

    let target = to.clone();
    let on_click = move |ev: web_sys::MouseEvent| {
        if !is_plain_click(
            ev.button(),
            ev.ctrl_key(),
            ev.meta_key(),
            ev.shift_key(),
            ev.alt_key(),
        ) {
            return;
        }
        ev.prevent_default();
        router.navigate(&target);
    };

    view! {
        <a href=to class=class on:click=on_click>
            {children()}
        </a>
    }
}
