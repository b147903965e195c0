//! 个人页 `/profile`

use crate::api::{GymnasiumApi, use_api};
use crate::cancel::CancelToken;
use crate::components::layout::{Loader, PageContainer};
use crate::components::toast::use_toaster;
use crate::notify::Notifier;
use crate::request::on_request;
use crate::store::{Action, Dispatch, use_store, use_user_data};
use crate::web::http::HttpClient;
use crate::web::route::{AppRoute, RouteKey};
use crate::web::router::{Link, Navigator, use_router};
use gymnasium_shared::UserRole;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const LOGGED_OUT_MESSAGE: &str = "Вы вышли из системы";

pub struct LogoutController<'a, C, D, N, V> {
    api: &'a GymnasiumApi<C>,
    dispatch: &'a D,
    notifier: &'a N,
    navigator: &'a V,
}

impl<'a, C, D, N, V> LogoutController<'a, C, D, N, V>
where
    C: HttpClient,
    D: Dispatch,
    N: Notifier,
    V: Navigator,
{
    pub fn new(api: &'a GymnasiumApi<C>, dispatch: &'a D, notifier: &'a N, navigator: &'a V) -> Self {
        Self {
            api,
            dispatch,
            notifier,
            navigator,
        }
    }

    /// 后端确认后才清除本地会话，失败时会话 Cookie 仍然有效
    pub async fn logout(&self) -> bool {
        match on_request(self.api.logout(&CancelToken::never()), self.notifier).await {
            Some(()) => {
                tracing::info!("logged out");
                self.dispatch.dispatch(Action::Logout);
                self.notifier.info(LOGGED_OUT_MESSAGE);
                self.navigator.navigate_to(AppRoute::Home);
                true
            }
            None => false,
        }
    }
}

fn role_label(role: UserRole) -> &'static str {
    match role {
        UserRole::Admin => "Администратор",
        UserRole::Member => "Участник",
        UserRole::Guest => "Гость",
    }
}

#[component]
pub fn ProfilePage() -> impl IntoView {
    let api = use_api();
    let store = use_store();
    let toaster = use_toaster();
    let router = use_router();
    let user = use_user_data();

    let on_logout = move |_: leptos::ev::MouseEvent| {
        let api = api.clone();
        spawn_local(async move {
            LogoutController::new(&api, &store, &toaster, &router)
                .logout()
                .await;
        });
    };

    let entry_path = router.with_table(|t| t.path(RouteKey::Entry));

    view! {
        <PageContainer title="Профиль".to_string()>
            {move || {
                let state = user.get();
                match state.user {
                    _ if state.is_loading => view! { <Loader /> }.into_any(),
                    Some(current) => {
                        let on_logout = on_logout.clone();
                        view! {
                            <div class="card bg-base-100 shadow max-w-md">
                                <div class="card-body">
                                    <h2 class="card-title">{current.name}</h2>
                                    {current.email.map(|email| view! { <p>{email}</p> })}
                                    <span class="badge badge-primary">{role_label(current.role)}</span>
                                    <div class="card-actions justify-end">
                                        <button class="btn btn-outline btn-error" on:click=on_logout>
                                            "Выйти"
                                        </button>
                                    </div>
                                </div>
                            </div>
                        }
                        .into_any()
                    }
                    None => view! {
                        <p>
                            "Вы не вошли в систему. "
                            <Link to=entry_path class="link link-primary">"Войти"</Link>
                        </p>
                    }
                    .into_any(),
                }
            }}
        </PageContainer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::RecordingNotifier;
    use crate::store::tests::{RecordingDispatch, admin};
    use crate::web::http::MockHttpClient;
    use crate::web::router::tests::RecordingNavigator;
    use gymnasium_shared::protocol::HttpMethod;

    const BASE: &str = "http://api.test";

    #[tokio::test]
    async fn logout_clears_user_and_goes_home() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        api.client()
            .mock_raw(HttpMethod::Post, &format!("{}/auth/logout", BASE), 201, "");
        let dispatch = RecordingDispatch::default();
        dispatch.dispatch(Action::Login(admin()));
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();

        let ok = LogoutController::new(&api, &dispatch, &notifier, &navigator)
            .logout()
            .await;

        assert!(ok);
        assert!(dispatch.state.borrow().user.user.is_none());
        assert_eq!(*navigator.visited.borrow(), vec![AppRoute::Home]);
        assert_eq!(notifier.infos(), vec![LOGGED_OUT_MESSAGE.to_string()]);
        assert!(notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn failed_logout_keeps_session() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        api.client().mock_network_failure(&format!("{}/auth/logout", BASE));
        let dispatch = RecordingDispatch::default();
        dispatch.dispatch(Action::Login(admin()));
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();

        let ok = LogoutController::new(&api, &dispatch, &notifier, &navigator)
            .logout()
            .await;

        assert!(!ok);
        assert!(dispatch.state.borrow().user.is_auth);
        assert!(navigator.visited.borrow().is_empty());
        assert_eq!(notifier.errors().len(), 1);
        assert!(notifier.infos().is_empty());
    }
}
