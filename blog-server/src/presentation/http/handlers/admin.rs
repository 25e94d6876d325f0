use axum::{Json, extract::State, http::StatusCode};
use tracing::warn;

use crate::presentation::AppState;
use crate::presentation::http::app_error::{AppError, AppResult};
use crate::presentation::http::envelope::{ErrorResponseDto, MessageResponseDto};

#[utoipa::path(
    post,
    path = "/api/reset",
    tag = "admin",
    responses(
        (status = 200, description = "All posts dropped", body = MessageResponseDto),
        (status = 403, description = "Refused outside development", body = ErrorResponseDto),
        (status = 500, description = "Internal error", body = ErrorResponseDto)
    )
)]
pub(crate) async fn reset_store(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<MessageResponseDto>)> {
    if state.environment.is_production() {
        warn!("reset refused in production");
        return Err(AppError::Forbidden(
            "This route is only available in development",
        ));
    }

    state.blog_service.reset_store().await?;
    warn!("post store reset");
    Ok((
        StatusCode::OK,
        Json(MessageResponseDto::new("Database reset successful")),
    ))
}
