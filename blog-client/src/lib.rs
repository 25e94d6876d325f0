//! Клиентская библиотека для работы с blog-server по HTTP.
//!
//! `BlogClient` покрывает весь REST API: список постов с фильтром по категории
//! и пагинацией, чтение, создание, полное обновление, удаление, сброс
//! хранилища (только в development) и проверку `/healthz`.
//!
//! Ошибки сервера приходят типизированными (`BlogClientError`) с сообщением
//! из поля `error` ответа. Повторных попыток клиент не делает.
#![warn(missing_docs)]

mod error;
mod http_client;
mod models;

pub use error::{BlogClientError, BlogClientResult};
pub use models::{ListParams, Pagination, Post, PostInput, PostPage};

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент блог-сервиса.
pub struct BlogClient {
    http: HttpClient,
}

impl BlogClient {
    /// Создаёт клиент с базовым URL сервера, например `http://127.0.0.1:8080`.
    pub fn new(base_url: impl Into<String>) -> BlogClientResult<Self> {
        Ok(Self {
            http: HttpClient::new(base_url)?,
        })
    }

    /// Возвращает страницу постов, от новых к старым.
    pub async fn list_posts(&self, params: &ListParams) -> BlogClientResult<PostPage> {
        self.http.list_posts(params).await
    }

    /// Возвращает пост по идентификатору.
    pub async fn get_post(&self, id: &str) -> BlogClientResult<Post> {
        self.http.get_post(id).await
    }

    /// Создаёт пост.
    pub async fn create_post(&self, input: &PostInput) -> BlogClientResult<Post> {
        self.http.create_post(input).await
    }

    /// Полностью заменяет редактируемые поля поста.
    pub async fn update_post(&self, id: &str, input: &PostInput) -> BlogClientResult<Post> {
        self.http.update_post(id, input).await
    }

    /// Удаляет пост. Возвращает сообщение сервера.
    pub async fn delete_post(&self, id: &str) -> BlogClientResult<String> {
        self.http.delete_post(id).await
    }

    /// Удаляет все посты. В production сервер отвечает `Forbidden`.
    pub async fn reset(&self) -> BlogClientResult<String> {
        self.http.reset().await
    }

    /// Проверяет доступность сервера, возвращает статус из `/healthz`.
    pub async fn health(&self) -> BlogClientResult<String> {
        self.http.health().await
    }
}
