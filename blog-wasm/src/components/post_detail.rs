use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::post_card::confirm_delete;
use crate::models::Post;
use crate::state::AppState;
use crate::store::Action;
use crate::view_model::{DEFAULT_IMAGE, Route, cover_image, format_date, render_markdown};

#[component]
pub(crate) fn PostDetail(state: AppState, id: String) -> impl IntoView {
    {
        let id = id.clone();
        spawn_local(async move {
            let _ = state.store().fetch_post(&id).await;
        });
    }
    on_cleanup(move || state.dispatch(Action::SelectionCleared));

    let post = Memo::new(move |_| {
        state
            .blog
            .with(|s| s.selected_post.clone())
            .filter(|post| post.id == id)
    });

    view! {
        <button class="back" on:click=move |_| state.navigate(Route::List)>"← Ко всем постам"</button>

        <Show when=move || state.loading() && post.with(Option::is_none)>
            <p class="loading">"Загрузка..."</p>
        </Show>

        {move || post.get().map(|post| view! { <PostArticle state=state post=post /> })}
    }
}

#[component]
fn PostArticle(state: AppState, post: Post) -> impl IntoView {
    let image_failed = RwSignal::new(false);
    let cover = cover_image(&post.image_url).to_string();
    let src = move || {
        if image_failed.get() {
            DEFAULT_IMAGE.to_string()
        } else {
            cover.clone()
        }
    };

    let on_edit = {
        let id = post.id.clone();
        move |_| state.navigate(Route::Edit(id.clone()))
    };

    // после удаления возвращаемся к списку, при ошибке остаёмся на странице
    let on_delete = {
        let id = post.id.clone();
        move |_| {
            if !confirm_delete() {
                return;
            }
            let id = id.clone();
            spawn_local(async move {
                if state.store().delete_post(&id).await.is_ok() {
                    state.navigate(Route::List);
                }
            });
        }
    };

    let body = if post.is_markdown {
        view! { <div class="markdown-body" inner_html=render_markdown(&post.content)></div> }
            .into_any()
    } else {
        view! { <div class="plain-body">{post.content.clone()}</div> }.into_any()
    };

    view! {
        <article class="post-detail">
            <img
                class="cover-large"
                src=src
                alt=post.title.clone()
                on:error=move |_| image_failed.set(true)
            />
            <div class="post-meta">
                <span class="chip">{post.category.clone()}</span>
                <small class="date">{format_date(&post.created_at)}</small>
            </div>
            <h1>{post.title.clone()}</h1>
            <div class="actions">
                <button on:click=on_edit disabled=move || state.loading()>"Изменить"</button>
                <button on:click=on_delete disabled=move || state.loading()>"Удалить"</button>
            </div>
            {body}
        </article>
    }
}
