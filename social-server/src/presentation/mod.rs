use std::sync::Arc;

use crate::application::post_service::PostService;
use crate::application::profile_service::ProfileService;
use crate::data::repositories::postgres::post_repository::PostgresPostRepository;
use crate::data::repositories::postgres::profile_repository::PostgresProfileRepository;
use crate::infrastructure::jwt::JwtService;
use crate::infrastructure::search::ElasticsearchClient;

pub(crate) mod app_error;
pub(crate) mod handlers;
pub(crate) mod middleware;
pub(crate) mod openapi;
pub(crate) mod routes;

pub(crate) type AppPostService = PostService<PostgresPostRepository, ElasticsearchClient>;
pub(crate) type AppProfileService =
    ProfileService<PostgresProfileRepository, JwtService, ElasticsearchClient>;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) post_service: Arc<AppPostService>,
    pub(crate) profile_service: Arc<AppProfileService>,
    pub(crate) jwt: Arc<JwtService>,
}

impl AppState {
    pub(crate) fn new(
        post_service: Arc<AppPostService>,
        profile_service: Arc<AppProfileService>,
        jwt: Arc<JwtService>,
    ) -> Self {
        Self {
            post_service,
            profile_service,
            jwt,
        }
    }
}
