use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, status_fallback};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub category: String,
    pub is_markdown: bool,
    pub created_at: String,
    pub updated_at: String,
}

/// Тело запросов создания и обновления.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub image_url: String,
    pub category: String,
    pub is_markdown: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            limit: 10,
            total: 0,
            total_pages: 0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    pub category: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

impl ListParams {
    /// Пары query string; незаданные и пустые параметры пропускаются.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(category) = self.category.as_deref().filter(|c| !c.is_empty()) {
            pairs.push(("category", category.to_string()));
        }
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostPage {
    pub posts: Vec<Post>,
    pub pagination: Pagination,
}

/// Конверт ответов `/api/*`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub data: Option<T>,
    pub message: Option<String>,
    pub error: Option<String>,
    pub pagination: Option<Pagination>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: Option<String>,
    message: Option<String>,
}

impl<T: DeserializeOwned> Envelope<T> {
    /// Разбирает ответ: неуспешный статус превращается в `ApiError::Http`
    /// с текстом из `error`, затем `message`, затем по коду статуса.
    pub fn decode(status: u16, body: &str) -> Result<Self, ApiError> {
        if !(200..300).contains(&status) {
            let message = serde_json::from_str::<ErrorBody>(body)
                .ok()
                .and_then(|body| body.error.or(body.message))
                .unwrap_or_else(|| status_fallback(status));
            return Err(ApiError::Http { status, message });
        }

        let envelope: Self =
            serde_json::from_str(body).map_err(|err| ApiError::Decode(err.to_string()))?;
        if !envelope.success {
            let message = envelope
                .error
                .clone()
                .or_else(|| envelope.message.clone())
                .unwrap_or_else(|| status_fallback(status));
            return Err(ApiError::Http { status, message });
        }
        Ok(envelope)
    }

    pub fn into_data(self) -> Result<T, ApiError> {
        self.data
            .ok_or_else(|| ApiError::Decode("data is missing".to_string()))
    }
}

impl Envelope<Vec<Post>> {
    pub fn into_page(self) -> Result<PostPage, ApiError> {
        let pagination = self
            .pagination
            .ok_or_else(|| ApiError::Decode("pagination is missing".to_string()))?;
        Ok(PostPage {
            posts: self.into_data()?,
            pagination,
        })
    }
}
