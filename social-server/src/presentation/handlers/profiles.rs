use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{PageQueryDto, SearchMetadataDto, SearchQueryDto, WriteResultDto, write_status};
use crate::domain::pagination::Paged;
use crate::domain::profile::{Profile, ProfileRequest};
use crate::domain::search::SearchResult;
use crate::domain::validation::parse_number;
use crate::presentation::AppState;
use crate::presentation::app_error::{AppError, AppResult};
use crate::presentation::middleware::auth::AuthenticatedUser;

/// Editable profile fields. The id is the caller's own; follow lists are
/// changed only through the follow endpoints.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct ProfileBodyDto {
    #[validate(length(max = 64))]
    pub(crate) user_name: String,
    #[validate(length(max = 128))]
    pub(crate) first_name: String,
    #[validate(length(max = 128))]
    pub(crate) last_name: String,
    #[validate(length(max = 254))]
    pub(crate) email: String,
    #[validate(length(max = 2_000))]
    pub(crate) bio: String,
    #[validate(length(max = 2_048))]
    pub(crate) photo_url: String,
    #[validate(length(max = 32))]
    pub(crate) phone: String,
    #[validate(length(max = 32))]
    pub(crate) gender: String,
    #[validate(length(max = 32))]
    pub(crate) category: Vec<String>,
}

impl ProfileBodyDto {
    fn into_request(self, id: String) -> ProfileRequest {
        ProfileRequest {
            id,
            user_name: self.user_name,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            bio: self.bio,
            photo_url: self.photo_url,
            phone: self.phone,
            gender: self.gender,
            category: self.category,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct ProfileDto {
    pub(crate) id: String,
    pub(crate) user_name: String,
    pub(crate) first_name: String,
    pub(crate) last_name: String,
    pub(crate) email: String,
    pub(crate) bio: String,
    pub(crate) photo_url: String,
    pub(crate) phone: String,
    pub(crate) gender: String,
    pub(crate) category: Vec<String>,
    pub(crate) followers: Vec<String>,
    pub(crate) following: Vec<String>,
}

impl From<Profile> for ProfileDto {
    fn from(profile: Profile) -> Self {
        Self {
            id: profile.id,
            user_name: profile.user_name,
            first_name: profile.first_name,
            last_name: profile.last_name,
            email: profile.email,
            bio: profile.bio,
            photo_url: profile.photo_url,
            phone: profile.phone,
            gender: profile.gender,
            category: profile.category,
            followers: profile.followers,
            following: profile.following,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PagedProfilesDto {
    pub(crate) items: Vec<ProfileDto>,
    #[serde(rename = "endpage")]
    pub(crate) end_page: u64,
}

impl From<Paged<Profile>> for PagedProfilesDto {
    fn from(paged: Paged<Profile>) -> Self {
        Self {
            items: paged.items.into_iter().map(ProfileDto::from).collect(),
            end_page: paged.end_page,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SearchProfilesDto {
    pub(crate) results: Vec<ProfileDto>,
    pub(crate) metadata: SearchMetadataDto,
}

impl From<SearchResult<Profile>> for SearchProfilesDto {
    fn from(result: SearchResult<Profile>) -> Self {
        Self {
            results: result.results.into_iter().map(ProfileDto::from).collect(),
            metadata: result.metadata.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/profiles",
    tag = "profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Every profile", body = Vec<ProfileDto>),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn list_profiles(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
) -> AppResult<Json<Vec<ProfileDto>>> {
    let profiles = state.profile_service.get_all().await?;
    Ok(Json(profiles.into_iter().map(ProfileDto::from).collect()))
}

#[utoipa::path(
    get,
    path = "/api/profiles/me",
    tag = "profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's profile", body = ProfileDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "No profile for this caller yet")
    )
)]
pub(crate) async fn get_my_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
) -> AppResult<Json<ProfileDto>> {
    let profile = state.profile_service.get_mine(&auth.token).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    get,
    path = "/api/profiles/auth",
    tag = "profiles",
    security(("bearer_auth" = [])),
    params(("page" = Option<String>, Query, description = "1-based page number")),
    responses(
        (status = 200, description = "Profiles visible to an authenticated caller", body = PagedProfilesDto),
        (status = 400, description = "Invalid or out-of-range page"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn list_auth_profiles(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<PageQueryDto>,
) -> AppResult<Json<PagedProfilesDto>> {
    let page = parse_number(query.page.as_deref());
    let result = state
        .profile_service
        .get_all_auth_profiles(&auth.token, page)
        .await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/profiles/{id}",
    tag = "profiles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile id")),
    responses(
        (status = 200, description = "Profile found", body = ProfileDto),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    )
)]
pub(crate) async fn get_profile(
    State(state): State<AppState>,
    _auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<Json<ProfileDto>> {
    let profile = state.profile_service.get(&id).await?;
    Ok(Json(profile.into()))
}

#[utoipa::path(
    post,
    path = "/api/profiles",
    tag = "profiles",
    security(("bearer_auth" = [])),
    request_body = ProfileBodyDto,
    responses(
        (status = 201, description = "Profile created", body = WriteResultDto),
        (status = 200, description = "A concurrent create won the race", body = WriteResultDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized"),
        (status = 409, description = "Profile already exists")
    )
)]
pub(crate) async fn create_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<ProfileBodyDto>,
) -> AppResult<(StatusCode, Json<WriteResultDto>)> {
    dto.validate()?;
    let created = state
        .profile_service
        .create(dto.into_request(auth.profile_id))
        .await?;
    Ok((write_status(created), Json(WriteResultDto { changed: created })))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}",
    tag = "profiles",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Profile id, must be the caller's")),
    request_body = ProfileBodyDto,
    responses(
        (status = 200, description = "Profile updated", body = WriteResultDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Not the caller's profile"),
        (status = 404, description = "Profile not found")
    )
)]
pub(crate) async fn update_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    Json(dto): Json<ProfileBodyDto>,
) -> AppResult<Json<WriteResultDto>> {
    if id.trim() != auth.profile_id {
        return Err(AppError::Unauthorized);
    }
    dto.validate()?;
    let updated = state
        .profile_service
        .update(dto.into_request(auth.profile_id))
        .await?;
    Ok(Json(WriteResultDto { changed: updated }))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}/follow/{other}",
    tag = "profiles",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Follower, must be the caller"),
        ("other" = String, Path, description = "Profile to follow")
    ),
    responses(
        (status = 200, description = "Follow edge present", body = WriteResultDto),
        (status = 400, description = "Missing id or self-follow"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    )
)]
pub(crate) async fn follow_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((id, other)): Path<(String, String)>,
) -> AppResult<Json<WriteResultDto>> {
    let added = state
        .profile_service
        .follow(&auth.token, &id, &other)
        .await?;
    Ok(Json(WriteResultDto { changed: added }))
}

#[utoipa::path(
    put,
    path = "/api/profiles/{id}/unfollow/{other}",
    tag = "profiles",
    security(("bearer_auth" = [])),
    params(
        ("id" = String, Path, description = "Follower, must be the caller"),
        ("other" = String, Path, description = "Profile to unfollow")
    ),
    responses(
        (status = 200, description = "Follow edge absent", body = WriteResultDto),
        (status = 400, description = "Missing id or self-unfollow"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Profile not found")
    )
)]
pub(crate) async fn unfollow_profile(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path((id, other)): Path<(String, String)>,
) -> AppResult<Json<WriteResultDto>> {
    let removed = state
        .profile_service
        .unfollow(&auth.token, &id, &other)
        .await?;
    Ok(Json(WriteResultDto { changed: removed }))
}

#[utoipa::path(
    get,
    path = "/api/profiles/search/{index}",
    tag = "profiles",
    params(
        ("index" = String, Path, description = "Search index name"),
        ("q" = String, Query, description = "Query string")
    ),
    responses(
        (status = 200, description = "Search hits", body = SearchProfilesDto),
        (status = 400, description = "Empty query"),
        (status = 500, description = "Search backend failure")
    )
)]
pub(crate) async fn search_profiles(
    State(state): State<AppState>,
    Path(index): Path<String>,
    Query(query): Query<SearchQueryDto>,
) -> AppResult<Json<SearchProfilesDto>> {
    let result = state.profile_service.search(&index, &query.q).await?;
    Ok(Json(result.into()))
}

#[cfg(test)]
mod tests {
    use validator::Validate;

    use super::{ProfileBodyDto, ProfileDto};
    use crate::domain::profile::Profile;

    #[test]
    fn body_id_is_taken_from_the_caller() {
        let dto: ProfileBodyDto =
            serde_json::from_str(r#"{ "userName": "alice", "email": "A@x.io" }"#)
                .expect("valid body");
        assert!(dto.validate().is_ok());

        let req = dto.into_request("alice-id".to_string());
        assert_eq!(req.id, "alice-id");
        assert_eq!(req.user_name, "alice");
        assert!(req.category.is_empty());
    }

    #[test]
    fn follow_lists_are_exposed_in_camel_case() {
        let profile = Profile {
            id: "alice".to_string(),
            followers: vec!["bob".to_string()],
            ..Profile::default()
        };
        let json = serde_json::to_value(ProfileDto::from(profile)).expect("serializable");
        assert_eq!(json["followers"][0], "bob");
        assert!(json.get("userName").is_some());
        assert!(json["following"].as_array().is_some_and(Vec::is_empty));
    }
}
