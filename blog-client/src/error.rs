use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
/// Ошибки клиентской библиотеки `blog-client`.
pub enum BlogClientError {
    /// Запрос не удалось выполнить (соединение, таймаут, TLS).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Сервер отклонил данные (HTTP 400).
    #[error("validation error: {0}")]
    Validation(String),

    /// Запрошенный пост не найден (HTTP 404).
    #[error("not found: {0}")]
    NotFound(String),

    /// Операция запрещена в текущем окружении сервера (HTTP 403).
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// Любой другой неуспешный статус.
    #[error("server error {status}: {message}")]
    Server {
        /// HTTP-статус ответа.
        status: StatusCode,
        /// Сообщение сервера или текст статуса.
        message: String,
    },

    /// Тело ответа не соответствует ожидаемому формату.
    #[error("unexpected response: {0}")]
    Decode(String),
}

/// Результат операций `blog-client`.
pub type BlogClientResult<T> = Result<T, BlogClientError>;

impl BlogClientError {
    pub(crate) fn from_http_status(status: StatusCode, message: Option<String>) -> Self {
        let message = message.unwrap_or_else(|| status_text(status));
        match status {
            StatusCode::BAD_REQUEST => Self::Validation(message),
            StatusCode::NOT_FOUND => Self::NotFound(message),
            StatusCode::FORBIDDEN => Self::Forbidden(message),
            _ => Self::Server { status, message },
        }
    }

    pub(crate) fn from_reqwest(err: reqwest::Error) -> Self {
        if err.is_decode() {
            return Self::Decode(err.to_string());
        }
        if let Some(status) = err.status() {
            return Self::from_http_status(status, None);
        }
        Self::Http(err)
    }
}

fn status_text(status: StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("http status {}", status.as_u16()))
}
