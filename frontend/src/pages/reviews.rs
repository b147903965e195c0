//! 「Люблю свою гимназию」页面：学生访谈 + 评论
//!
//! 评论的增删改默认在请求结束后整页重新加载，
//! 配置为 `Reconcile` 时改为把成功结果合并进本地列表。

use crate::api::{GymnasiumApi, use_api};
use crate::cancel::{CancelToken, scoped_token};
use crate::components::layout::{Loader, PageContainer};
use crate::components::review_list::ReviewList;
use crate::components::toast::use_toaster;
use crate::config::MutationStrategy;
use crate::notify::Notifier;
use crate::request::{LoadState, on_request};
use crate::store::use_user_data;
use crate::web::http::HttpClient;
use crate::web::location::{BrowserReloader, Reloader};
use gymnasium_shared::{CommentForm, Review};
use leptos::prelude::*;
use leptos::task::spawn_local;

// =========================================================
// 静态内容
// =========================================================

pub struct Interview {
    pub name: &'static str,
    pub position: &'static str,
    pub image: &'static str,
    pub text: &'static str,
}

pub const INTERVIEWS: &[Interview] = &[
    Interview {
        name: "Иван Иванов",
        position: "Ученик 10 класса",
        image: "/ivan.jpg",
        text: "Я учусь в гимназии уже 5 лет. Здесь я нашёл друзей и получил много знаний, которые помогут мне в будущем. Также я участвую в различных мероприятиях и олимпиадах, что даёт мне огромный опыт и мотивацию для дальнейшего развития.",
    },
    Interview {
        name: "Мария Петрова",
        position: "Ученица 11 класса",
        image: "/maria.jpg",
        text: "Гимназия дала мне не только знания, но и уверенность в себе. Я участвовала в олимпиадах и научных конференциях. Благодаря этому у меня появилось больше возможностей и шансов поступить в хороший университет.",
    },
    Interview {
        name: "Алексей Сидоров",
        position: "Выпускник",
        image: "/alexey.jpg",
        text: "Благодаря гимназии я поступил в престижный университет. Здесь я научился ставить цели и достигать их. Также я освоил множество полезных навыков, которые помогают мне в учёбе и жизни.",
    },
];

pub const UPDATED_MESSAGE: &str = "Post updated successfully";

// =========================================================
// 控制器
// =========================================================

/// 变更后需要对本地列表做的修改
#[derive(Debug, Clone, PartialEq)]
pub enum ListChange {
    /// 不修改（整页重新加载，或请求失败）
    Keep,
    Append(Review),
    Replace(Review),
    Remove(String),
}

impl ListChange {
    pub fn apply(self, list: &mut Vec<Review>) {
        match self {
            Self::Keep => {}
            Self::Append(review) => list.push(review),
            Self::Replace(review) => {
                if let Some(slot) = list.iter_mut().find(|r| r.id == review.id) {
                    *slot = review;
                }
            }
            Self::Remove(id) => list.retain(|r| r.id != id),
        }
    }
}

pub struct ReviewController<'a, C, N, R> {
    api: &'a GymnasiumApi<C>,
    notifier: &'a N,
    reloader: &'a R,
    strategy: MutationStrategy,
}

impl<'a, C, N, R> ReviewController<'a, C, N, R>
where
    C: HttpClient,
    N: Notifier,
    R: Reloader,
{
    pub fn new(
        api: &'a GymnasiumApi<C>,
        notifier: &'a N,
        reloader: &'a R,
        strategy: MutationStrategy,
    ) -> Self {
        Self {
            api,
            notifier,
            reloader,
            strategy,
        }
    }

    pub async fn load(&self, cancel: &CancelToken) -> Option<Vec<Review>> {
        on_request(self.api.get_comments(cancel), self.notifier).await
    }

    pub async fn create(&self, form: &CommentForm) -> ListChange {
        let created = on_request(
            self.api.create_comment(form, &CancelToken::never()),
            self.notifier,
        )
        .await;
        self.settle(created.map(ListChange::Append))
    }

    /// 恰好一次 PATCH；默认策略下无论成功与否都会重新加载
    pub async fn update(&self, id: &str, form: &CommentForm) -> ListChange {
        let updated = on_request(
            self.api.update_comment(id, form, &CancelToken::never()),
            self.notifier,
        )
        .await;
        if updated.is_some() {
            self.notifier.success(UPDATED_MESSAGE);
        }
        self.settle(updated.map(ListChange::Replace))
    }

    /// 恰好一次 DELETE；重新加载前不从列表中移除
    pub async fn delete(&self, id: &str) -> ListChange {
        let deleted = on_request(
            self.api.delete_comment(id, &CancelToken::never()),
            self.notifier,
        )
        .await;
        self.settle(deleted.map(|_| ListChange::Remove(id.to_string())))
    }

    fn settle(&self, change: Option<ListChange>) -> ListChange {
        match self.strategy {
            MutationStrategy::FullReload => {
                self.reloader.reload();
                ListChange::Keep
            }
            MutationStrategy::Reconcile => change.unwrap_or(ListChange::Keep),
        }
    }
}

// =========================================================
// 视图
// =========================================================

#[component]
pub fn ReviewsPage() -> impl IntoView {
    let api = use_api();
    let toaster = use_toaster();
    let strategy = use_context::<MutationStrategy>().unwrap_or_default();
    let user = use_user_data();
    let cancel = scoped_token();

    let comments = RwSignal::new(Vec::<Review>::new());
    let load_state = RwSignal::new(LoadState::Idle);
    let (new_text, set_new_text) = signal(String::new());

    // 挂载时加载一次
    {
        let api = api.clone();
        load_state.set(LoadState::Loading);
        spawn_local(async move {
            let ctrl = ReviewController::new(&api, &toaster, &BrowserReloader, strategy);
            let data = ctrl.load(&cancel).await;
            let state = LoadState::settled(&data);
            if let Some(list) = data {
                let _ = comments.try_set(list);
            }
            let _ = load_state.try_set(state);
        });
    }

    let apply = move |change: ListChange| {
        let _ = comments.try_update(|list| change.apply(list));
    };

    let on_update = {
        let api = api.clone();
        Callback::new(move |(id, text): (String, String)| {
            let api = api.clone();
            spawn_local(async move {
                let ctrl = ReviewController::new(&api, &toaster, &BrowserReloader, strategy);
                apply(ctrl.update(&id, &CommentForm { text }).await);
            });
        })
    };

    let on_delete = {
        let api = api.clone();
        Callback::new(move |id: String| {
            let api = api.clone();
            spawn_local(async move {
                let ctrl = ReviewController::new(&api, &toaster, &BrowserReloader, strategy);
                apply(ctrl.delete(&id).await);
            });
        })
    };

    let on_create = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let text = new_text.get_untracked();
        if text.trim().is_empty() {
            toaster.error("Введите текст отзыва");
            return;
        }
        let api = api.clone();
        spawn_local(async move {
            let ctrl = ReviewController::new(&api, &toaster, &BrowserReloader, strategy);
            let change = ctrl.create(&CommentForm { text }).await;
            if change != ListChange::Keep {
                let _ = set_new_text.try_set(String::new());
            }
            apply(change);
        });
    };

    let viewer = Signal::derive(move || user.with(|u| u.user.clone()));
    let is_auth = move || user.with(|u| u.is_auth);

    view! {
        <PageContainer title="Люблю свою гимназию".to_string()>
            <section class="grid gap-4 md:grid-cols-3">
                {INTERVIEWS
                    .iter()
                    .map(|interview| {
                        view! {
                            <div class="card bg-base-100 shadow">
                                <figure>
                                    <img src=interview.image alt=interview.name />
                                </figure>
                                <div class="card-body">
                                    <h2 class="card-title">{interview.name}</h2>
                                    <p class="text-sm text-base-content/60">{interview.position}</p>
                                    <p>{interview.text}</p>
                                </div>
                            </div>
                        }
                    })
                    .collect_view()}
            </section>

            <section class="space-y-4">
                <h2 class="text-2xl font-semibold">"Отзывы"</h2>
                <Show when=is_auth>
                    <form class="flex flex-col gap-2" on:submit=on_create.clone()>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            placeholder="Поделитесь впечатлениями"
                            prop:value=new_text
                            on:input=move |ev| set_new_text.set(event_target_value(&ev))
                        ></textarea>
                        <button type="submit" class="btn btn-primary self-end">"Отправить"</button>
                    </form>
                </Show>
                <Show when=move || load_state.get() != LoadState::Loading fallback=|| view! { <Loader /> }>
                    <ReviewList reviews=comments viewer=viewer on_update=on_update on_delete=on_delete />
                </Show>
            </section>
        </PageContainer>
    }
}
