//! 学校网站前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `api`: 后端网关（统一的 `ApiResult` 信封）
//! - `store`: 全局状态（纯 reducer + 注入的 Dispatch）
//! - `bootstrap`: 启动时的认证检查与分类加载
//! - `web::route` / `web::router`: 路由表、角色守卫与路由服务
//! - `pages`: 页面控制器与视图
//! - `components`: 通用 UI 组件

mod api;
mod bootstrap;
mod cancel;
pub mod config;
mod error;
pub mod logging;
mod notify;
mod request;
mod store;

mod components {
    pub mod layout;
    pub mod post_list;
    pub mod protected_route;
    pub mod review_list;
    pub mod toast;
}

mod pages {
    pub mod create_post;
    pub mod entry;
    pub mod info;
    pub mod posts;
    pub mod profile;
    pub mod reviews;
}

// 浏览器 API 封装模块
pub(crate) mod web {
    pub mod http;
    pub mod location;
    pub mod route;
    pub mod router;
}

use crate::api::GymnasiumApi;
use crate::cancel::CancelToken;
use crate::components::layout::{Footer, Header};
use crate::components::protected_route::ProtectedRoute;
use crate::components::toast::{ToastHost, Toaster};
use crate::config::AppConfig;
use crate::pages::create_post::CreatePostPage;
use crate::pages::entry::EntryPage;
use crate::pages::info::{ContactsPage, HomePage};
use crate::pages::posts::PostsPage;
use crate::pages::profile::ProfilePage;
use crate::pages::reviews::ReviewsPage;
use crate::store::{AppStore, use_update_user_trigger};

use leptos::prelude::*;
use leptos::task::spawn_local;

use web::http::FetchHttpClient;
use web::route::{AppRoute, RouteKey};
use web::router::{Router, RouterOutlet, use_router};

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Home => view! { <HomePage /> }.into_any(),
        AppRoute::Entry => view! { <EntryPage /> }.into_any(),
        AppRoute::Profile => view! { <ProfilePage /> }.into_any(),
        AppRoute::Contacts => view! { <ContactsPage /> }.into_any(),
        AppRoute::Reviews => view! { <ReviewsPage /> }.into_any(),
        AppRoute::Posts { category } => view! { <PostsPage category=category /> }.into_any(),
        AppRoute::CreatePosts => {
            let allowed = use_router()
                .with_table(|t| t.entry(RouteKey::CreatePosts).allowed_roles.unwrap_or(&[]));
            view! {
                <ProtectedRoute allowed_roles=allowed>
                    <CreatePostPage />
                </ProtectedRoute>
            }
            .into_any()
        }
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-[60vh]">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Страница не найдена"</p>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 配置与网关
    let config = AppConfig::from_build_env();
    let api = GymnasiumApi::new(config.api_base_url.clone(), FetchHttpClient);
    provide_context(api.clone());
    provide_context(config.mutation_strategy);

    // 2. 全局状态与提示
    let store = AppStore::new();
    provide_context(store);
    let toaster = Toaster::new();
    provide_context(toaster);

    // 3. 挂载时及每次 RefreshUser 后执行启动引导
    let trigger = use_update_user_trigger();
    Effect::new(move |_| {
        let round = trigger.get();
        tracing::debug!(round, "bootstrap");
        let api = api.clone();
        spawn_local(async move {
            bootstrap::run(&api, &store, &toaster, &CancelToken::never()).await;
        });
    });

    view! {
        // 4. 路由器组件：注入按配置开关后的路由表
        <Router table=config.route_table()>
            <div class="min-h-screen flex flex-col bg-base-200">
                <Header />
                <div class="flex-1">
                    <RouterOutlet matcher=route_matcher />
                </div>
                <Footer />
            </div>
            <ToastHost />
        </Router>
    }
}
