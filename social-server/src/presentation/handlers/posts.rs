use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{PageQueryDto, SearchMetadataDto, SearchQueryDto, WriteResultDto, write_status};
use crate::domain::pagination::Paged;
use crate::domain::post::{Post, PostRequest};
use crate::domain::search::SearchResult;
use crate::domain::validation::parse_number;
use crate::presentation::AppState;
use crate::presentation::app_error::AppResult;
use crate::presentation::middleware::auth::AuthenticatedUser;

/// Post body for both create and update. The creator always comes from the
/// token, never from the body.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostBodyDto {
    #[serde(default)]
    #[validate(length(max = 128))]
    pub(crate) id: String,
    #[serde(default)]
    #[validate(length(max = 10_000))]
    pub(crate) content: String,
    #[serde(default)]
    #[validate(length(max = 16))]
    pub(crate) photo_url: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 32))]
    pub(crate) category: Vec<String>,
    #[serde(default)]
    #[validate(length(max = 64))]
    pub(crate) mention: Vec<String>,
    pub(crate) share_id: Option<String>,
}

impl PostBodyDto {
    fn into_request(self, id: String, creator_id: String) -> PostRequest {
        PostRequest {
            id,
            creator_id,
            content: self.content,
            photo_url: self.photo_url,
            category: self.category,
            mention: self.mention,
            share_id: self.share_id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct PostDto {
    pub(crate) id: String,
    pub(crate) creator_id: String,
    pub(crate) content: String,
    pub(crate) photo_url: Vec<String>,
    pub(crate) category: Vec<String>,
    pub(crate) mention: Vec<String>,
    pub(crate) share_id: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl From<Post> for PostDto {
    fn from(post: Post) -> Self {
        Self {
            id: post.id,
            creator_id: post.creator_id,
            content: post.content,
            photo_url: post.photo_url,
            category: post.category,
            mention: post.mention,
            share_id: post.share_id,
            created_at: post.created_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct PagedPostsDto {
    pub(crate) items: Vec<PostDto>,
    #[serde(rename = "endpage")]
    pub(crate) end_page: u64,
}

impl From<Paged<Post>> for PagedPostsDto {
    fn from(paged: Paged<Post>) -> Self {
        Self {
            items: paged.items.into_iter().map(PostDto::from).collect(),
            end_page: paged.end_page,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct SearchPostsDto {
    pub(crate) results: Vec<PostDto>,
    pub(crate) metadata: SearchMetadataDto,
}

impl From<SearchResult<Post>> for SearchPostsDto {
    fn from(result: SearchResult<Post>) -> Self {
        Self {
            results: result.results.into_iter().map(PostDto::from).collect(),
            metadata: result.metadata.into(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/api/posts",
    tag = "posts",
    params(
        ("page" = Option<String>, Query, description = "1-based page number")
    ),
    responses(
        (status = 200, description = "Posts listed, newest first", body = PagedPostsDto),
        (status = 400, description = "Invalid or out-of-range page"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn list_posts(
    State(state): State<AppState>,
    Query(query): Query<PageQueryDto>,
) -> AppResult<Json<PagedPostsDto>> {
    let page = parse_number(query.page.as_deref());
    let result = state.post_service.get_all_posts(page).await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/{id}",
    tag = "posts",
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 200, description = "Post found", body = PostDto),
        (status = 404, description = "Post not found"),
        (status = 500, description = "Internal error")
    )
)]
pub(crate) async fn get_post(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<PostDto>> {
    let post = state.post_service.get_detail(&id).await?;
    Ok(Json(post.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/mention/{mention}",
    tag = "posts",
    params(
        ("mention" = String, Path, description = "Mentioned profile id"),
        ("page" = Option<String>, Query, description = "1-based page number"),
        ("size" = Option<String>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Posts mentioning the profile", body = PagedPostsDto),
        (status = 400, description = "Invalid paging or key")
    )
)]
pub(crate) async fn list_by_mention(
    State(state): State<AppState>,
    Path(mention): Path<String>,
    Query(query): Query<PageQueryDto>,
) -> AppResult<Json<PagedPostsDto>> {
    let result = state
        .post_service
        .get_by_mention(&mention, query.into())
        .await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/creator/{uid}",
    tag = "posts",
    params(
        ("uid" = String, Path, description = "Creator profile id"),
        ("page" = Option<String>, Query, description = "1-based page number"),
        ("size" = Option<String>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Posts by the creator", body = PagedPostsDto),
        (status = 400, description = "Invalid paging or key")
    )
)]
pub(crate) async fn list_by_creator(
    State(state): State<AppState>,
    Path(uid): Path<String>,
    Query(query): Query<PageQueryDto>,
) -> AppResult<Json<PagedPostsDto>> {
    let result = state.post_service.get_all_by_uid(&uid, query.into()).await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/category/{cate}",
    tag = "posts",
    params(
        ("cate" = String, Path, description = "Category id"),
        ("page" = Option<String>, Query, description = "1-based page number"),
        ("size" = Option<String>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Posts in the category", body = PagedPostsDto),
        (status = 400, description = "Invalid paging or key")
    )
)]
pub(crate) async fn list_by_category(
    State(state): State<AppState>,
    Path(cate): Path<String>,
    Query(query): Query<PageQueryDto>,
) -> AppResult<Json<PagedPostsDto>> {
    let result = state
        .post_service
        .get_by_category(&cate, query.into())
        .await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/share/{share}",
    tag = "posts",
    params(
        ("share" = String, Path, description = "Shared post id"),
        ("page" = Option<String>, Query, description = "1-based page number"),
        ("size" = Option<String>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Posts sharing the given post", body = PagedPostsDto),
        (status = 400, description = "Invalid paging or key")
    )
)]
pub(crate) async fn list_shares(
    State(state): State<AppState>,
    Path(share): Path<String>,
    Query(query): Query<PageQueryDto>,
) -> AppResult<Json<PagedPostsDto>> {
    let result = state.post_service.get_share(&share, query.into()).await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/mine",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<String>, Query, description = "1-based page number"),
        ("size" = Option<String>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Own posts and posts of followed profiles", body = PagedPostsDto),
        (status = 400, description = "Invalid paging"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn list_mine(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Query(query): Query<PageQueryDto>,
) -> AppResult<Json<PagedPostsDto>> {
    let result = state
        .post_service
        .get_mine(&auth.profile_id, query.into())
        .await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    get,
    path = "/api/posts/search/{index}",
    tag = "posts",
    params(
        ("index" = String, Path, description = "Search index name"),
        ("q" = String, Query, description = "Query string")
    ),
    responses(
        (status = 200, description = "Search hits", body = SearchPostsDto),
        (status = 400, description = "Empty query"),
        (status = 500, description = "Search backend failure")
    )
)]
pub(crate) async fn search_posts(
    State(state): State<AppState>,
    Path(index): Path<String>,
    Query(query): Query<SearchQueryDto>,
) -> AppResult<Json<SearchPostsDto>> {
    let result = state.post_service.search(&index, &query.q).await?;
    Ok(Json(result.into()))
}

#[utoipa::path(
    post,
    path = "/api/posts",
    tag = "posts",
    security(("bearer_auth" = [])),
    request_body = PostBodyDto,
    responses(
        (status = 201, description = "Post created", body = WriteResultDto),
        (status = 200, description = "A post with this id already exists", body = WriteResultDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized")
    )
)]
pub(crate) async fn create_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Json(dto): Json<PostBodyDto>,
) -> AppResult<(StatusCode, Json<WriteResultDto>)> {
    dto.validate()?;
    let id = dto.id.clone();
    let created = state
        .post_service
        .create(dto.into_request(id, auth.profile_id))
        .await?;

    Ok((write_status(created), Json(WriteResultDto { changed: created })))
}

#[utoipa::path(
    put,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Post id")),
    request_body = PostBodyDto,
    responses(
        (status = 200, description = "Post replaced", body = WriteResultDto),
        (status = 400, description = "Validation error"),
        (status = 401, description = "Unauthorized or not the creator"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn update_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
    Json(dto): Json<PostBodyDto>,
) -> AppResult<Json<WriteResultDto>> {
    dto.validate()?;
    let updated = state
        .post_service
        .update(&auth.profile_id, dto.into_request(id, auth.profile_id.clone()))
        .await?;
    Ok(Json(WriteResultDto { changed: updated }))
}

#[utoipa::path(
    delete,
    path = "/api/posts/{id}",
    tag = "posts",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Post id")),
    responses(
        (status = 204, description = "Post deleted"),
        (status = 401, description = "Unauthorized or not the creator"),
        (status = 404, description = "Post not found")
    )
)]
pub(crate) async fn delete_post(
    State(state): State<AppState>,
    auth: AuthenticatedUser,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.post_service.delete(&auth.profile_id, &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
