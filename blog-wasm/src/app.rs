use leptos::prelude::*;

use crate::components::post_detail::PostDetail;
use crate::components::post_form::PostForm;
use crate::components::post_list::PostList;
use crate::state::AppState;
use crate::view_model::Route;

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    let error_text = move || state.blog.with(|s| s.error.clone().unwrap_or_default());

    view! {
        <header class="header">
            <section class="container header-row">
                <a
                    class="brand"
                    href="#"
                    on:click=move |ev| {
                        ev.prevent_default();
                        state.navigate(Route::List);
                    }
                >
                    "Rust Blog"
                </a>
                <button on:click=move |_| state.navigate(Route::Create)>"Новый пост"</button>
            </section>
        </header>

        <main class="page">
            <section class="container">
                <Show when=move || state.blog.with(|s| s.error.is_some())>
                    <div class="error-banner">
                        <strong>"Ошибка: "</strong>
                        {error_text}
                        <button class="dismiss" on:click=move |_| state.dismiss_error()>
                            "×"
                        </button>
                    </div>
                </Show>

                {move || match state.route.get() {
                    Route::List => view! { <PostList state=state /> }.into_any(),
                    Route::Detail(id) => view! { <PostDetail state=state id=id /> }.into_any(),
                    Route::Create => view! { <PostForm state=state editing=None /> }.into_any(),
                    Route::Edit(id) => view! { <PostForm state=state editing=Some(id) /> }.into_any(),
                }}
            </section>
        </main>
    }
}
