//! 页面骨架：导航栏、页脚、页面容器与加载指示器

use crate::store::use_user_data;
use crate::web::route::RouteEntry;
use crate::web::router::{Link, use_router};
use leptos::prelude::*;

#[component]
pub fn Header() -> impl IntoView {
    let router = use_router();
    let user = use_user_data();

    // 导航项随角色变化：CreatePosts 只对管理员可见
    let entries = move || {
        let role = user.with(|u| u.user.as_ref().map(|u| u.role));
        router.with_table(|table| {
            table
                .visible_entries(role)
                .cloned()
                .collect::<Vec<RouteEntry>>()
        })
    };

    view! {
        <div class="navbar bg-base-100 shadow-xl">
            <div class="flex-1">
                <Link to="/" class="btn btn-ghost text-xl">"Гимназия"</Link>
            </div>
            <ul class="menu menu-horizontal px-1 gap-1">
                <For
                    each=entries
                    key=|entry| entry.key
                    children=move |entry| {
                        view! {
                            <li>
                                <Link to=entry.path>{entry.label}</Link>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}

#[component]
pub fn Footer() -> impl IntoView {
    view! {
        <footer class="footer footer-center p-4 bg-base-300 text-base-content">
            <p>"© Гимназия"</p>
        </footer>
    }
}

#[component]
pub fn PageContainer(#[prop(into)] title: Signal<String>, children: Children) -> impl IntoView {
    view! {
        <main class="max-w-5xl mx-auto p-4 md:p-8 space-y-6 min-h-screen">
            <h1 class="text-3xl font-bold">{move || title.get()}</h1>
            {children()}
        </main>
    }
}

#[component]
pub fn Loader() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <span class="loading loading-spinner loading-lg text-primary"></span>
        </div>
    }
}
