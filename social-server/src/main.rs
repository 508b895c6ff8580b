use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use tracing::info;

mod application;
mod data;
mod domain;
mod infrastructure;
mod presentation;
mod server;

use application::post_service::PostService;
use application::profile_service::ProfileService;
use data::repositories::postgres::post_repository::PostgresPostRepository;
use data::repositories::postgres::profile_repository::PostgresProfileRepository;
use infrastructure::database::{create_pool, run_migrations};
use infrastructure::jwt::JwtService;
use infrastructure::logging::init_logging;
use infrastructure::search::ElasticsearchClient;
use infrastructure::settings::Settings;
use presentation::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;

    init_logging(&settings.log_level)?;

    let pool = create_pool(&settings.database_url, settings.database_max_connections).await?;
    run_migrations(&pool).await?;

    let jwt = JwtService::new(&settings.jwt_secret);
    let search = ElasticsearchClient::new(
        settings.search_url.clone(),
        Duration::from_secs(settings.search_timeout_secs),
    )?;

    let post_service = PostService::new(
        PostgresPostRepository::new(pool.clone()),
        search.clone(),
        settings.posts_page_size,
    );
    let profile_service = ProfileService::new(
        PostgresProfileRepository::new(pool),
        jwt.clone(),
        search,
        settings.profiles_page_size,
    );

    let state = AppState::new(
        Arc::new(post_service),
        Arc::new(profile_service),
        Arc::new(jwt),
    );

    info!(
        posts_page_size = settings.posts_page_size,
        profiles_page_size = settings.profiles_page_size,
        "services ready"
    );
    server::run_http(&settings, state).await
}
