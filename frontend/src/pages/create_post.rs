//! 管理员发布文章 `/create-posts`

use crate::api::{GymnasiumApi, use_api};
use crate::cancel::CancelToken;
use crate::components::layout::PageContainer;
use crate::components::toast::use_toaster;
use crate::notify::Notifier;
use crate::request::on_request;
use crate::store::use_categories;
use crate::web::http::HttpClient;
use gymnasium_shared::CreatePostForm;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const CREATED_MESSAGE: &str = "Post created successfully";

pub struct CreatePostController<'a, C, N> {
    api: &'a GymnasiumApi<C>,
    notifier: &'a N,
}

impl<'a, C: HttpClient, N: Notifier> CreatePostController<'a, C, N> {
    pub fn new(api: &'a GymnasiumApi<C>, notifier: &'a N) -> Self {
        Self { api, notifier }
    }

    /// 成功时返回 `true`，调用方据此重置表单
    pub async fn submit(&self, form: &CreatePostForm) -> bool {
        if form.title.trim().is_empty() || form.content.trim().is_empty() || form.category.is_empty() {
            self.notifier.error("Заполните заголовок, текст и категорию");
            return false;
        }

        match on_request(self.api.create_post(form, &CancelToken::never()), self.notifier).await {
            Some(post) => {
                tracing::info!(post = %post.id, category = %post.category, "post created");
                self.notifier.success(CREATED_MESSAGE);
                true
            }
            None => false,
        }
    }
}

/// 每行一个图片 URL
fn parse_images(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

#[component]
pub fn CreatePostPage() -> impl IntoView {
    let api = use_api();
    let toaster = use_toaster();
    let categories = use_categories();

    let (title, set_title) = signal(String::new());
    let (content, set_content) = signal(String::new());
    let (category, set_category) = signal(String::new());
    let (images, set_images) = signal(String::new());
    let (loading, set_loading) = signal(false);

    let reset_form = move || {
        set_title.set(String::new());
        set_content.set(String::new());
        set_category.set(String::new());
        set_images.set(String::new());
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_loading.set(true);

        let form = CreatePostForm {
            title: title.get_untracked(),
            content: content.get_untracked(),
            category: category.get_untracked(),
            images: parse_images(&images.get_untracked()),
        };
        let api = api.clone();
        spawn_local(async move {
            if CreatePostController::new(&api, &toaster).submit(&form).await {
                reset_form();
            }
            let _ = set_loading.try_set(false);
        });
    };

    view! {
        <PageContainer title="Создать пост".to_string()>
            <form class="card bg-base-100 shadow max-w-2xl" on:submit=on_submit>
                <div class="card-body space-y-2">
                    <input
                        type="text"
                        placeholder="Заголовок"
                        class="input input-bordered w-full"
                        prop:value=title
                        on:input=move |ev| set_title.set(event_target_value(&ev))
                    />
                    <select
                        class="select select-bordered w-full"
                        prop:value=category
                        on:change=move |ev| set_category.set(event_target_value(&ev))
                    >
                        <option value="" disabled selected>"Категория"</option>
                        <For
                            each=move || categories.get().list
                            key=|c| c.id
                            children=|c| view! { <option value=c.path>{c.label}</option> }
                        />
                    </select>
                    <textarea
                        placeholder="Текст"
                        class="textarea textarea-bordered w-full h-40"
                        prop:value=content
                        on:input=move |ev| set_content.set(event_target_value(&ev))
                    ></textarea>
                    <textarea
                        placeholder="Ссылки на изображения, по одной на строку"
                        class="textarea textarea-bordered w-full"
                        prop:value=images
                        on:input=move |ev| set_images.set(event_target_value(&ev))
                    ></textarea>
                    <div class="card-actions justify-end">
                        <button type="submit" class="btn btn-primary" disabled=move || loading.get()>
                            "Опубликовать"
                        </button>
                    </div>
                </div>
            </form>
        </PageContainer>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::tests::RecordingNotifier;
    use crate::web::http::MockHttpClient;
    use gymnasium_shared::protocol::HttpMethod;
    use serde_json::json;

    const BASE: &str = "http://api.test";

    fn form() -> CreatePostForm {
        CreatePostForm {
            title: "День открытых дверей".into(),
            content: "Ждём всех в субботу".into(),
            category: "news".into(),
            images: parse_images("https://cdn/a.jpg\n\n  https://cdn/b.jpg  "),
        }
    }

    #[test]
    fn image_lines_are_trimmed() {
        assert_eq!(form().images, vec!["https://cdn/a.jpg", "https://cdn/b.jpg"]);
    }

    #[tokio::test]
    async fn created_post_is_announced() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        api.client().mock_response(
            HttpMethod::Post,
            &format!("{}/posts", BASE),
            201,
            json!({ "id": "p9", "category": "news", "title": "День открытых дверей", "content": "Ждём всех в субботу" }),
        );
        let notifier = RecordingNotifier::default();

        assert!(CreatePostController::new(&api, &notifier).submit(&form()).await);
        assert_eq!(notifier.successes(), vec![CREATED_MESSAGE.to_string()]);

        let body: serde_json::Value =
            serde_json::from_str(api.client().requests.borrow()[0].2.as_deref().unwrap()).unwrap();
        assert_eq!(body["category"], "news");
        assert_eq!(body["images"], json!(["https://cdn/a.jpg", "https://cdn/b.jpg"]));
    }

    #[tokio::test]
    async fn incomplete_form_is_not_sent() {
        let api = GymnasiumApi::new(BASE, MockHttpClient::new());
        let notifier = RecordingNotifier::default();

        let incomplete = CreatePostForm {
            category: String::new(),
            ..form()
        };
        assert!(!CreatePostController::new(&api, &notifier).submit(&incomplete).await);
        assert_eq!(api.client().request_count(), 0);
        assert_eq!(notifier.errors().len(), 1);
    }
}
