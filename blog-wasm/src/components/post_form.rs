use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::models::PostInput;
use crate::state::AppState;
use crate::store::DEFAULT_TAGS;
use crate::view_model::{Route, category_options, render_markdown, validate_form};

#[component]
pub(crate) fn PostForm(state: AppState, editing: Option<String>) -> impl IntoView {
    let title = RwSignal::new(String::new());
    let image_url = RwSignal::new(String::new());
    let category = RwSignal::new(DEFAULT_TAGS[0].to_string());
    let is_markdown = RwSignal::new(false);
    let content = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);

    if let Some(id) = editing.clone() {
        spawn_local(async move {
            if let Ok(post) = state.store().fetch_post(&id).await {
                title.set(post.title);
                image_url.set(post.image_url);
                category.set(post.category);
                is_markdown.set(post.is_markdown);
                content.set(post.content);
            }
        });
    }

    let heading = if editing.is_some() {
        "Редактирование поста"
    } else {
        "Новый пост"
    };
    let submit_label = if editing.is_some() {
        "Сохранить"
    } else {
        "Опубликовать"
    };

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        form_error.set(None);

        let input = PostInput {
            title: title.get(),
            content: content.get(),
            image_url: image_url.get().trim().to_string(),
            category: category.get(),
            is_markdown: is_markdown.get(),
        };
        if let Err(message) = validate_form(&input.title, &input.content) {
            form_error.set(Some(message.to_string()));
            return;
        }

        let editing = editing.clone();
        spawn_local(async move {
            let store = state.store();
            let saved = match editing {
                Some(id) => store.update_post(&id, &input).await,
                None => store.create_post(&input).await,
            };
            if let Ok(post) = saved {
                state.navigate(Route::Detail(post.id));
            }
        });
    };

    let options = move || {
        let tags = state.blog.with(|s| s.tags.clone());
        category_options(&tags, &category.get())
            .into_iter()
            .map(|tag| {
                let value = tag.clone();
                view! { <option value=value>{tag}</option> }
            })
            .collect_view()
    };

    view! {
        <h1>{heading}</h1>
        <form class="post-form" on:submit=on_submit>
            <label>
                "Заголовок"
                <input
                    maxlength="100"
                    placeholder="Интересный заголовок"
                    prop:value=move || title.get()
                    on:input=move |ev| title.set(event_target_value(&ev))
                />
            </label>

            <label>
                "URL обложки (необязательно)"
                <input
                    placeholder="Оставьте пустым для обложки по умолчанию"
                    prop:value=move || image_url.get()
                    on:input=move |ev| image_url.set(event_target_value(&ev))
                />
            </label>

            <label>
                "Категория"
                <select
                    prop:value=move || category.get()
                    on:change=move |ev| category.set(event_target_value(&ev))
                >
                    {options}
                </select>
            </label>

            <label class="toggle">
                <input
                    type="checkbox"
                    prop:checked=move || is_markdown.get()
                    on:change=move |ev| is_markdown.set(event_target_checked(&ev))
                />
                "Markdown"
            </label>

            <div class:editor-split=move || is_markdown.get()>
                <textarea
                    rows="14"
                    placeholder="Текст поста..."
                    prop:value=move || content.get()
                    on:input=move |ev| content.set(event_target_value(&ev))
                ></textarea>

                <Show when=move || is_markdown.get()>
                    <div class="preview">
                        <small>"Превью"</small>
                        <div class="markdown-body" inner_html=move || render_markdown(&content.get())></div>
                    </div>
                </Show>
            </div>

            <Show when=move || form_error.with(Option::is_some)>
                <div class="form-error">{move || form_error.get().unwrap_or_default()}</div>
            </Show>

            <button type="submit" disabled=move || state.loading()>
                {move || if state.loading() { "Сохранение..." } else { submit_label }}
            </button>
        </form>
    }
}
