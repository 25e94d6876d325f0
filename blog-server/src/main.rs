use std::sync::Arc;

use anyhow::Result;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::blog_service::BlogService;
use data::post_repository::PostRepository;
use data::repositories::mongo::post_repository::MongoPostRepository;
use infrastructure::database::{Connector, MongoConnectionFactory};
use infrastructure::logging::init_logging;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    // Nothing is dialed here: the first request opens the connection.
    let connector = Arc::new(Connector::new(MongoConnectionFactory::new(
        settings.mongodb_uri.clone(),
        settings.mongodb_database.clone(),
    )));
    let repo: Arc<dyn PostRepository> = Arc::new(MongoPostRepository::new(connector.clone()));
    let blog_service = Arc::new(BlogService::new(repo));
    let state = AppState::new(blog_service, settings.environment);

    let served = server::run_http(&settings, state).await;
    connector.shutdown().await;
    served
}
