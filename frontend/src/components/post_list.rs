use gymnasium_shared::Post;
use leptos::prelude::*;

#[component]
pub fn PostList(#[prop(into)] posts: Signal<Vec<Post>>) -> impl IntoView {
    view! {
        <Show
            when=move || posts.with(|p| !p.is_empty())
            fallback=|| view! { <p class="text-base-content/60">"Новостей пока нет"</p> }
        >
            <div class="grid gap-6 md:grid-cols-2">
                <For
                    each=move || posts.get()
                    key=|post| post.id.clone()
                    children=|post| view! { <PostCard post=post /> }
                />
            </div>
        </Show>
    }
}

#[component]
fn PostCard(post: Post) -> impl IntoView {
    let date = post
        .created_at
        .map(|at| at.format("%d.%m.%Y").to_string())
        .unwrap_or_default();
    let cover = post.images.first().cloned();

    view! {
        <article class="card bg-base-100 shadow">
            {cover.map(|src| view! { <figure><img src=src alt="" /></figure> })}
            <div class="card-body">
                <h2 class="card-title">{post.title}</h2>
                <span class="text-sm text-base-content/60">{date}</span>
                <p class="whitespace-pre-line">{post.content}</p>
            </div>
        </article>
    }
}
