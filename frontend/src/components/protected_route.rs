//! 角色守卫组件

use crate::components::layout::Loader;
use crate::store::{UserState, use_user_data};
use crate::web::route::{GuardDecision, guard_access};
use crate::web::router::use_router;
use gymnasium_shared::UserRole;
use leptos::prelude::*;

/// 资料请求未完成时不做判定（`None`），避免深链接在用户未知时被弹回
fn decide(state: &UserState, allowed: &[UserRole]) -> Option<GuardDecision> {
    if state.is_loading {
        return None;
    }
    Some(guard_access(state.user.as_ref().map(|u| u.role), allowed))
}

/// 仅当当前用户角色在 `allowed_roles` 中时渲染子组件，否则重定向
#[component]
pub fn ProtectedRoute(allowed_roles: &'static [UserRole], children: ChildrenFn) -> impl IntoView {
    let router = use_router();
    let user = use_user_data();

    let decision = Memo::new(move |_| user.with(|state| decide(state, allowed_roles)));

    Effect::new(move |_| {
        if let Some(GuardDecision::Redirect(route)) = decision.get() {
            tracing::info!(%route, "access denied, redirecting");
            router.redirect(route);
        }
    });

    move || match decision.get() {
        None => view! { <Loader /> }.into_any(),
        Some(GuardDecision::Render) => children().into_any(),
        Some(GuardDecision::Redirect(_)) => ().into_any(),
    }
}
