use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::post_card::PostCard;
use crate::models::ListParams;
use crate::state::AppState;

const PAGE_SIZE: u32 = 10;

#[component]
pub(crate) fn PostList(state: AppState) -> impl IntoView {
    // пустая строка означает "все категории"
    let category = RwSignal::new(String::new());
    let page = RwSignal::new(1_u32);

    Effect::new(move |_| {
        let params = ListParams {
            category: Some(category.get()).filter(|c| !c.is_empty()),
            page: Some(page.get()),
            limit: Some(PAGE_SIZE),
        };
        spawn_local(async move {
            let _ = state.store().fetch_posts(params).await;
        });
    });

    let select_category = move |tag: String| {
        category.set(tag);
        page.set(1);
    };

    let total_pages = move || state.blog.with(|s| s.pagination.total_pages);

    view! {
        <h1>"Последние посты"</h1>

        <nav class="tabs">
            <button
                class:active=move || category.with(String::is_empty)
                on:click=move |_| select_category(String::new())
            >
                "Все посты"
            </button>
            {move || {
                state
                    .blog
                    .with(|s| s.tags.clone())
                    .into_iter()
                    .map(|tag| {
                        let for_class = tag.clone();
                        let for_click = tag.clone();
                        view! {
                            <button
                                class:active=move || category.with(|c| *c == for_class)
                                on:click=move |_| select_category(for_click.clone())
                            >
                                {tag}
                            </button>
                        }
                    })
                    .collect_view()
            }}
        </nav>

        <Show when=move || state.blog.with(|s| s.loading && s.posts.is_empty())>
            <p class="loading">"Загрузка..."</p>
        </Show>

        <Show when=move || state.blog.with(|s| !s.loading && s.posts.is_empty())>
            <p class="empty">"В этой категории пока нет постов."</p>
        </Show>

        <div class="post-list">
            <For
                each=move || state.blog.with(|s| s.posts.clone())
                key=|post| (post.id.clone(), post.updated_at.clone())
                children=move |post| view! { <PostCard state=state post=post /> }
            />
        </div>

        <Show when=move || { total_pages() > 1 }>
            <div class="pagination">
                <button
                    disabled=move || page.get() <= 1
                    on:click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Назад"
                </button>
                <span>{move || format!("{} / {}", page.get(), total_pages())}</span>
                <button
                    disabled=move || u64::from(page.get()) >= total_pages()
                    on:click=move |_| page.update(|p| *p += 1)
                >
                    "Вперёд"
                </button>
            </div>
        </Show>
    }
}
