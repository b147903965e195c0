//! 分类文章列表 `/posts/:category`

use crate::api::{GymnasiumApi, use_api};
use crate::cancel::{CancelToken, scoped_token};
use crate::components::layout::{Loader, PageContainer};
use crate::components::post_list::PostList;
use crate::components::toast::use_toaster;
use crate::notify::Notifier;
use crate::request::{LoadState, on_request};
use crate::store::{CategoriesState, use_categories};
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::router::{Navigator, use_router};
use gymnasium_shared::{Category, Post, find_category_by_path};
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const INVALID_CATEGORY_MESSAGE: &str = "Invalid category path";

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryResolution {
    /// 分类列表尚未加载，暂不判定
    Pending,
    Found(Category),
    /// 已提示并重定向
    Invalid,
}

pub struct PostsController<'a, C, N, V> {
    api: &'a GymnasiumApi<C>,
    notifier: &'a N,
    navigator: &'a V,
}

impl<'a, C, N, V> PostsController<'a, C, N, V>
where
    C: HttpClient,
    N: Notifier,
    V: Navigator,
{
    pub fn new(api: &'a GymnasiumApi<C>, notifier: &'a N, navigator: &'a V) -> Self {
        Self {
            api,
            notifier,
            navigator,
        }
    }

    /// 按路径片段查找分类，未知路径提示错误并返回首页
    pub fn resolve(&self, categories: &CategoriesState, path: &str) -> CategoryResolution {
        if !categories.loaded {
            return CategoryResolution::Pending;
        }
        match find_category_by_path(&categories.list, path) {
            Some(category) => CategoryResolution::Found(category.clone()),
            None => {
                tracing::warn!(path, "unknown category");
                self.notifier.error(INVALID_CATEGORY_MESSAGE);
                self.navigator.navigate_to(AppRoute::Home);
                CategoryResolution::Invalid
            }
        }
    }

    pub async fn load(&self, category: &Category, cancel: &CancelToken) -> Option<Vec<Post>> {
        on_request(self.api.get_posts(&category.path, cancel), self.notifier).await
    }
}

#[component]
pub fn PostsPage(category: String) -> impl IntoView {
    let api = use_api();
    let toaster = use_toaster();
    let router = use_router();
    let categories = use_categories();
    let cancel = scoped_token();

    let posts = RwSignal::new(Vec::<Post>::new());
    let load_state = RwSignal::new(LoadState::Idle);
    let title = RwSignal::new(String::new());

    // 分类列表加载完成后判定一次
    Effect::new(move |resolved: Option<bool>| {
        if resolved == Some(true) {
            return true;
        }
        let ctrl = PostsController::new(&api, &toaster, &router);
        let resolution = categories.with(|state| ctrl.resolve(state, &category));
        match resolution {
            CategoryResolution::Pending => false,
            CategoryResolution::Invalid => true,
            CategoryResolution::Found(found) => {
                title.set(found.label.clone());
                load_state.set(LoadState::Loading);

                let api = api.clone();
                let cancel = cancel.clone();
                spawn_local(async move {
                    let ctrl = PostsController::new(&api, &toaster, &router);
                    let data = ctrl.load(&found, &cancel).await;
                    let state = LoadState::settled(&data);
                    if let Some(list) = data {
                        let _ = posts.try_set(list);
                    }
                    let _ = load_state.try_set(state);
                });
                true
            }
        }
    });

    view! {
        <PageContainer title=title>
            <Show when=move || load_state.get() != LoadState::Loading fallback=|| view! { <Loader /> }>
                <PostList posts=posts />
            </Show>
        </PageContainer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::notify::tests::RecordingNotifier;
    use crate::web::http::MockHttpClient;
    use crate::web::router::tests::RecordingNavigator;
    use gymnasium_shared::protocol::HttpMethod;
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn categories() -> CategoriesState {
        CategoriesState {
            list: vec![Category {
                id: 1,
                path: "news".into(),
                label: "News".into(),
            }],
            loaded: true,
        }
    }

    fn category_of(path: &str) -> String {
        let table = AppConfig {
            enable_posts: true,
            ..AppConfig::default()
        }
        .route_table();
        match table.resolve(path) {
            AppRoute::Posts { category } => category,
            other => panic!("{} resolved to {:?}", path, other),
        }
    }

    #[test]
    fn known_category_resolves_to_its_label() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let ctrl = PostsController::new(&api, &notifier, &navigator);

        let resolution = ctrl.resolve(&categories(), &category_of("/posts/news"));

        match resolution {
            CategoryResolution::Found(category) => assert_eq!(category.label, "News"),
            other => panic!("unexpected {:?}", other),
        }
        assert!(notifier.seen.borrow().is_empty());
        assert!(navigator.visited.borrow().is_empty());
    }

    #[test]
    fn unknown_category_toasts_and_goes_home() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let ctrl = PostsController::new(&api, &notifier, &navigator);

        let resolution = ctrl.resolve(&categories(), &category_of("/posts/unknown"));

        assert_eq!(resolution, CategoryResolution::Invalid);
        assert_eq!(notifier.errors(), vec![INVALID_CATEGORY_MESSAGE.to_string()]);
        assert_eq!(*navigator.visited.borrow(), vec![AppRoute::Home]);
        assert_eq!(api.client().request_count(), 0);
    }

    #[test]
    fn waits_for_categories_before_deciding() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let ctrl = PostsController::new(&api, &notifier, &navigator);

        let resolution = ctrl.resolve(&CategoriesState::default(), "news");

        assert_eq!(resolution, CategoryResolution::Pending);
        assert!(notifier.seen.borrow().is_empty());
        assert!(navigator.visited.borrow().is_empty());
    }

    #[tokio::test]
    async fn load_fetches_posts_of_the_category() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        api.client().mock_response(
            HttpMethod::Get,
            &format!("{}/posts/category/news", BASE),
            200,
            json!([{ "id": "p1", "category": "news", "title": "Выпускной", "content": "..." }]),
        );
        let notifier = RecordingNotifier::default();
        let navigator = RecordingNavigator::default();
        let ctrl = PostsController::new(&api, &notifier, &navigator);

        let posts = ctrl
            .load(&categories().list[0], &CancelToken::never())
            .await
            .unwrap();

        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Выпускной");
    }
}
