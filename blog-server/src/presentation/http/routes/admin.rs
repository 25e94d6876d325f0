use axum::{Router, routing::post};

use crate::presentation::AppState;
use crate::presentation::http::handlers::admin::reset_store;

pub(crate) fn router() -> Router<AppState> {
    Router::new().route("/api/reset", post(reset_store))
}
