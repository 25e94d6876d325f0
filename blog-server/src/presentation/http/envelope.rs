use serde::Serialize;
use utoipa::ToSchema;

/// Failure envelope: `{ "success": false, "error": "..." }`.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct ErrorResponseDto {
    pub(crate) success: bool,
    pub(crate) error: String,
}

impl ErrorResponseDto {
    pub(crate) fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}

/// Success envelope without payload.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct MessageResponseDto {
    pub(crate) success: bool,
    pub(crate) message: String,
}

impl MessageResponseDto {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}
