use std::sync::Arc;

use crate::application::blog_service::BlogService;
use crate::data::post_repository::PostRepository;
use crate::infrastructure::settings::AppEnvironment;

pub(crate) mod http;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) blog_service: Arc<BlogService<dyn PostRepository>>,
    pub(crate) environment: AppEnvironment,
}

impl AppState {
    pub(crate) fn new(
        blog_service: Arc<BlogService<dyn PostRepository>>,
        environment: AppEnvironment,
    ) -> Self {
        Self {
            blog_service,
            environment,
        }
    }
}
