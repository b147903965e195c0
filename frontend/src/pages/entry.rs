//! 登录页 `/entry`

use crate::api::{GymnasiumApi, use_api};
use crate::cancel::CancelToken;
use crate::components::layout::PageContainer;
use crate::components::toast::use_toaster;
use crate::notify::Notifier;
use crate::request::on_request;
use crate::store::{Action, Dispatch, use_store};
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::router::{Navigator, use_router};
use gymnasium_shared::LoginForm;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub struct LoginController<'a, C, D, N, V> {
    api: &'a GymnasiumApi<C>,
    dispatch: &'a D,
    notifier: &'a N,
    navigator: &'a V,
}

impl<'a, C, D, N, V> LoginController<'a, C, D, N, V>
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

    /// 登录成功后写入用户、触发资料刷新并跳转到个人页
    pub async fn submit(&self, form: &LoginForm) -> bool {
        if form.email.trim().is_empty() || form.password.is_empty() {
            self.notifier.error("Заполните все поля");
            return false;
        }

        match on_request(self.api.login(form, &CancelToken::never()), self.notifier).await {
            Some(user) => {
                tracing::info!(user = %user.id, "logged in");
                self.notifier.success(format!("Добро пожаловать, {}", user.name));
                self.dispatch.dispatch(Action::Login(user));
                self.dispatch.dispatch(Action::RefreshUser);
                self.navigator.navigate_to(AppRoute::Profile);
                true
            }
            None => false,
        }
    }
}

#[component]
pub fn EntryPage() -> impl IntoView {
    let api = use_api();
    let store = use_store();
    let toaster = use_toaster();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);

        let form = LoginForm {
            email: email.get_untracked(),
            password: password.get_untracked(),
        };
        let api = api.clone();
        spawn_local(async move {
            let ctrl = LoginController::new(&api, &store, &toaster, &router);
            if !ctrl.submit(&form).await {
                let _ = set_is_submitting.try_set(false);
            }
        });
    };

    view! {
        <PageContainer title="Вход".to_string()>
            <div class="card w-full max-w-md shadow-2xl bg-base-100 mx-auto">
                <form class="card-body" on:submit=on_submit>
                    <div class="form-control">
                        <label class="label" for="email">
                            <span class="label-text">"Email"</span>
                        </label>
                        <input
                            id="email"
                            type="email"
                            on:input=move |ev| set_email.set(event_target_value(&ev))
                            prop:value=email
                            class="input input-bordered"
                            required
                        />
                    </div>
                    <div class="form-control">
                        <label class="label" for="password">
                            <span class="label-text">"Пароль"</span>
                        </label>
                        <input
                            id="password"
                            type="password"
                            placeholder="••••••••"
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            prop:value=password
                            class="input input-bordered"
                            required
                        />
                    </div>
                    <div class="form-control mt-6">
                        <button class="btn btn-primary" disabled=move || is_submitting.get()>
                            {move || if is_submitting.get() {
                                view! { <span class="loading loading-spinner"></span> "Вход..." }.into_any()
                            } else {
                                "Войти".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
        </PageContainer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::RecordingNotifier;
    use crate::store::tests::RecordingDispatch;
    use crate::web::http::MockHttpClient;
    use crate::web::router::tests::RecordingNavigator;
    use gymnasium_shared::UserRole;
    use gymnasium_shared::protocol::HttpMethod;
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn form() -> LoginForm {
        LoginForm {
            email: "anna@gymn.ru".into(),
            password: "secret".into(),
        }
    }

    #[tokio::test]
    async fn successful_login_updates_store_and_navigates() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        api.client().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/login", BASE),
            200,
            json!({ "id": "u1", "name": "Анна", "role": "MEMBER" }),
        );
        let dispatch = RecordingDispatch::default();
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();

        let ok = LoginController::new(&api, &dispatch, &notifier, &navigator)
            .submit(&form())
            .await;

        assert!(ok);
        let state = dispatch.state.borrow();
        assert!(state.user.is_auth);
        assert_eq!(state.user.user.as_ref().map(|u| u.role), Some(UserRole::Member));
        assert_eq!(state.refresh_trigger, 1);
        assert_eq!(*navigator.visited.borrow(), vec![AppRoute::Profile]);

        let body: serde_json::Value =
            serde_json::from_str(api.client().requests.borrow()[0].2.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({ "email": "anna@gymn.ru", "password": "secret" }));
    }

    #[tokio::test]
    async fn rejected_login_leaves_state_untouched() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        api.client().mock_response(
            HttpMethod::Post,
            &format!("{}/auth/login", BASE),
            401,
            json!({ "message": "Неверный email или пароль" }),
        );
        let dispatch = RecordingDispatch::default();
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();

        let ok = LoginController::new(&api, &dispatch, &notifier, &navigator)
            .submit(&form())
            .await;

        assert!(!ok);
        assert!(dispatch.actions.borrow().is_empty());
        assert!(navigator.visited.borrow().is_empty());
        assert_eq!(notifier.errors(), vec!["Неверный email или пароль".to_string()]);
    }

    #[tokio::test]
    async fn empty_fields_skip_the_request() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        let dispatch = RecordingDispatch::default();
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();

        let ok = LoginController::new(&api, &dispatch, &notifier, &navigator)
            .submit(&LoginForm::default())
            .await;

        assert!(!ok);
        assert_eq!(api.client().request_count(), 0);
        assert_eq!(notifier.errors().len(), 1);
    }
}
