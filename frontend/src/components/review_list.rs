//! 评论列表与单条评论卡片

use gymnasium_shared::{Review, User};
use leptos::prelude::*;

#[component]
pub fn ReviewList(
    #[prop(into)] reviews: Signal<Vec<Review>>,
    #[prop(into)] viewer: Signal<Option<User>>,
    /// (评论 id, 新文本)
    #[prop(into)]
    on_update: Callback<(String, String)>,
    #[prop(into)] on_delete: Callback<String>,
) -> impl IntoView {
    view! {
        <Show
            when=move || reviews.with(|r| !r.is_empty())
            fallback=|| view! { <p class="text-base-content/60">"Отзывов пока нет"</p> }
        >
            <div class="space-y-4">
                <For
                    each=move || reviews.get()
                    key=|review| (review.id.clone(), review.text.clone())
                    children=move |review| {
                        view! {
                            <ReviewCard review=review viewer=viewer on_update=on_update on_delete=on_delete />
                        }
                    }
                />
            </div>
        </Show>
    }
}

#[component]
fn ReviewCard(
    review: Review,
    viewer: Signal<Option<User>>,
    on_update: Callback<(String, String)>,
    on_delete: Callback<String>,
) -> impl IntoView {
    let (editing, set_editing) = signal(false);
    let (draft, set_draft) = signal(review.text.clone());

    let can_edit = {
        let review = review.clone();
        move || viewer.with(|user| review.can_edit(user.as_ref()))
    };

    let id = StoredValue::new(review.id.clone());
    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_editing.set(false);
        on_update.run((id.get_value(), draft.get_untracked()));
    };

    let created = review
        .created_at
        .map(|at| at.format("%d.%m.%Y").to_string())
        .unwrap_or_default();

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex justify-between items-center">
                    <h3 class="card-title text-base">{review.author_name.clone()}</h3>
                    <span class="text-sm text-base-content/60">{created}</span>
                </div>
                <Show
                    when=move || editing.get()
                    fallback={
                        let text = review.text.clone();
                        move || view! { <p class="whitespace-pre-line">{text.clone()}</p> }
                    }
                >
                    <form class="space-y-2" on:submit=on_submit>
                        <textarea
                            class="textarea textarea-bordered w-full"
                            prop:value=draft
                            on:input=move |ev| set_draft.set(event_target_value(&ev))
                        ></textarea>
                        <div class="flex gap-2">
                            <button type="submit" class="btn btn-primary btn-sm">"Сохранить"</button>
                            <button
                                type="button"
                                class="btn btn-ghost btn-sm"
                                on:click=move |_| set_editing.set(false)
                            >
                                "Отмена"
                            </button>
                        </div>
                    </form>
                </Show>
                <Show when=can_edit>
                    <div class="card-actions justify-end">
                        <button class="btn btn-outline btn-sm" on:click=move |_| set_editing.set(true)>
                            "Редактировать"
                        </button>
                        <button
                            class="btn btn-outline btn-error btn-sm"
                            on:click=move |_| on_delete.run(id.get_value())
                        >
                            "Удалить"
                        </button>
                    </div>
                </Show>
            </div>
        </div>
    }
}
