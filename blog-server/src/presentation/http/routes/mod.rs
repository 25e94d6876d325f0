use axum::Router;

use crate::presentation::AppState;

pub(crate) mod admin;
pub(crate) mod posts;

pub(crate) fn router() -> Router<AppState> {
    Router::new()
        .nest("/api/posts", posts::router())
        .merge(admin::router())
}
