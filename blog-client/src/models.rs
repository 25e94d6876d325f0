use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Публичная модель поста.
pub struct Post {
    /// Идентификатор поста (24 hex-символа).
    pub id: String,
    /// Заголовок поста.
    pub title: String,
    /// Содержимое поста (markdown или обычный текст).
    pub content: String,
    /// URL обложки, пустая строка если обложки нет.
    pub image_url: String,
    /// Категория.
    pub category: String,
    /// Как интерпретировать `content`.
    pub is_markdown: bool,
    /// Дата и время создания поста (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего обновления поста (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
/// Поля поста для создания и полного обновления.
pub struct PostInput {
    /// Заголовок, до 100 символов.
    pub title: String,
    /// Содержимое.
    pub content: String,
    /// URL обложки; `None` означает пустую строку на сервере.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Категория.
    pub category: String,
    /// Markdown-режим.
    pub is_markdown: bool,
}

impl From<&Post> for PostInput {
    fn from(post: &Post) -> Self {
        Self {
            title: post.title.clone(),
            content: post.content.clone(),
            image_url: Some(post.image_url.clone()),
            category: post.category.clone(),
            is_markdown: post.is_markdown,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
/// Параметры выборки списка. Незаданные поля не попадают в query string.
pub struct ListParams {
    /// Только посты этой категории.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Номер страницы, начиная с 1.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page: Option<u32>,
    /// Размер страницы, 1..=100.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Параметры пагинации из ответа сервера.
pub struct Pagination {
    /// Текущая страница.
    pub page: u32,
    /// Размер страницы.
    pub limit: u32,
    /// Общее количество постов по фильтру.
    pub total: u64,
    /// `ceil(total / limit)`.
    pub total_pages: u64,
}

#[derive(Debug, Clone, PartialEq)]
/// Страница постов с пагинацией.
pub struct PostPage {
    /// Посты текущей страницы, от новых к старым.
    pub posts: Vec<Post>,
    /// Пагинация.
    pub pagination: Pagination,
}
