use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::presentation::handlers::posts::{
    PagedPostsDto, PostBodyDto, PostDto, SearchPostsDto,
};
use crate::presentation::handlers::profiles::{
    PagedProfilesDto, ProfileBodyDto, ProfileDto, SearchProfilesDto,
};
use crate::presentation::handlers::{PageQueryDto, SearchMetadataDto, SearchQueryDto, WriteResultDto};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::presentation::handlers::posts::list_posts,
        crate::presentation::handlers::posts::get_post,
        crate::presentation::handlers::posts::list_by_mention,
        crate::presentation::handlers::posts::list_by_creator,
        crate::presentation::handlers::posts::list_by_category,
        crate::presentation::handlers::posts::list_shares,
        crate::presentation::handlers::posts::list_mine,
        crate::presentation::handlers::posts::search_posts,
        crate::presentation::handlers::posts::create_post,
        crate::presentation::handlers::posts::update_post,
        crate::presentation::handlers::posts::delete_post,
        crate::presentation::handlers::profiles::list_profiles,
        crate::presentation::handlers::profiles::get_my_profile,
        crate::presentation::handlers::profiles::list_auth_profiles,
        crate::presentation::handlers::profiles::get_profile,
        crate::presentation::handlers::profiles::create_profile,
        crate::presentation::handlers::profiles::update_profile,
        crate::presentation::handlers::profiles::follow_profile,
        crate::presentation::handlers::profiles::unfollow_profile,
        crate::presentation::handlers::profiles::search_profiles
    ),
    components(
        schemas(
            PageQueryDto,
            SearchQueryDto,
            SearchMetadataDto,
            WriteResultDto,
            PostBodyDto,
            PostDto,
            PagedPostsDto,
            SearchPostsDto,
            ProfileBodyDto,
            ProfileDto,
            PagedProfilesDto,
            SearchProfilesDto
        )
    ),
    tags(
        (name = "posts", description = "Post listings and writes"),
        (name = "profiles", description = "Profiles and the follow graph")
    ),
    modifiers(&SecurityAddon)
)]
pub(crate) struct ApiDoc;

pub(crate) struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let mut components = openapi.components.take().unwrap_or_default();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
        openapi.components = Some(components);
    }
}
