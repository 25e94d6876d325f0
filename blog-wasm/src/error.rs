use core::fmt;

/// Ошибка обращения к REST API из браузера.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Запрос не дошёл до сервера.
    Network(String),
    /// Сервер ответил неуспешным статусом.
    Http { status: u16, message: String },
    /// Ответ не удалось разобрать.
    Decode(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl ApiError {
    /// Текст для баннера ошибки: сообщение сервера, если оно есть, иначе `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Http { message, .. } if !message.trim().is_empty() => message.clone(),
            Self::Network(msg) => format!("Сервер недоступен: {msg}"),
            _ => fallback.to_string(),
        }
    }
}

/// Сообщение по коду статуса, когда тело ответа не содержит текста ошибки.
pub fn status_fallback(status: u16) -> String {
    match status {
        400 => "Некорректный запрос".to_string(),
        403 => "Операция недоступна в этом окружении".to_string(),
        404 => "Пост не найден".to_string(),
        500..=599 => "Ошибка сервера".to_string(),
        _ => format!("HTTP ошибка {status}"),
    }
}
