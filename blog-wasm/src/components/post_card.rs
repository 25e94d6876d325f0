use leptos::ev::MouseEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::Post;
use crate::state::AppState;
use crate::view_model::{DEFAULT_IMAGE, Route, cover_image, excerpt, format_date};

pub(crate) fn confirm_delete() -> bool {
    window()
        .confirm_with_message("Удалить этот пост?")
        .unwrap_or(false)
}

#[component]
pub(crate) fn PostCard(state: AppState, post: Post) -> impl IntoView {
    let image_failed = RwSignal::new(false);
    let cover = cover_image(&post.image_url).to_string();
    let src = move || {
        if image_failed.get() {
            DEFAULT_IMAGE.to_string()
        } else {
            cover.clone()
        }
    };

    let on_open = {
        let id = post.id.clone();
        move |_| state.navigate(Route::Detail(id.clone()))
    };

    let on_edit = {
        let id = post.id.clone();
        move |ev: MouseEvent| {
            ev.stop_propagation();
            state.navigate(Route::Edit(id.clone()));
        }
    };

    let on_delete = {
        let id = post.id.clone();
        move |ev: MouseEvent| {
            ev.stop_propagation();
            if !confirm_delete() {
                return;
            }
            let id = id.clone();
            spawn_local(async move {
                let _ = state.store().delete_post(&id).await;
            });
        }
    };

    view! {
        <article class="post-card" on:click=on_open>
            <img
                class="cover"
                src=src
                alt=post.title.clone()
                on:error=move |_| image_failed.set(true)
            />
            <div class="post-card-body">
                <div class="post-card-top">
                    <span class="chip">{post.category.clone()}</span>
                    <span class="actions">
                        <button on:click=on_edit disabled=move || state.loading()>"Изменить"</button>
                        <button on:click=on_delete disabled=move || state.loading()>"Удалить"</button>
                    </span>
                </div>
                <h2>{post.title.clone()}</h2>
                <p class="excerpt">{excerpt(&post.content)}</p>
                <small class="date">{format_date(&post.created_at)}</small>
            </div>
        </article>
    }
}
