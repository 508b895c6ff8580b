use tracing::{debug, info, instrument, warn};

use crate::application::pagination::{PageQuery, paginate};
use crate::data::post_repository::{NewPost, PostQuery, PostRepository};
use crate::data::search_index::SearchIndex;
use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged};
use crate::domain::post::{Post, PostRequest};
use crate::domain::search::SearchResult;
use crate::domain::validation::{require_field, require_id};

pub(crate) struct PostService<R: PostRepository, S: SearchIndex<Post>> {
    repo: R,
    search: S,
    page_size: u32,
}

impl<R: PostRepository, S: SearchIndex<Post>> PostService<R, S> {
    pub(crate) fn new(repo: R, search: S, page_size: u32) -> Self {
        Self {
            repo,
            search,
            page_size,
        }
    }

    /// Every post, newest first, with the server-side page size.
    pub(crate) async fn get_all_posts(&self, page: Option<i64>) -> Result<Paged<Post>, DomainError> {
        let request = PageQuery::new(page, None).with_size(self.page_size)?;
        self.list(PostQuery::All, request).await
    }

    pub(crate) async fn get_detail(&self, id: &str) -> Result<Post, DomainError> {
        let id = require_id("post", id)?;
        self.repo
            .get_post(&id)
            .await?
            .ok_or(DomainError::NotFound(format!("post id: {id}")))
    }

    pub(crate) async fn get_by_mention(
        &self,
        mention: &str,
        query: PageQuery,
    ) -> Result<Paged<Post>, DomainError> {
        self.list_keyed("mention", mention, query, PostQuery::Mention)
            .await
    }

    pub(crate) async fn get_all_by_uid(
        &self,
        creator_id: &str,
        query: PageQuery,
    ) -> Result<Paged<Post>, DomainError> {
        self.list_keyed("creator", creator_id, query, PostQuery::Creator)
            .await
    }

    pub(crate) async fn get_by_category(
        &self,
        category_id: &str,
        query: PageQuery,
    ) -> Result<Paged<Post>, DomainError> {
        self.list_keyed("category", category_id, query, PostQuery::Category)
            .await
    }

    /// The profile's feed: its own posts and those of profiles it follows.
    pub(crate) async fn get_mine(
        &self,
        profile_id: &str,
        query: PageQuery,
    ) -> Result<Paged<Post>, DomainError> {
        self.list_keyed("profile", profile_id, query, PostQuery::Feed)
            .await
    }

    pub(crate) async fn get_share(
        &self,
        share_id: &str,
        query: PageQuery,
    ) -> Result<Paged<Post>, DomainError> {
        self.list_keyed("share", share_id, query, PostQuery::Share)
            .await
    }

    #[instrument(skip(self, req), fields(post_id = %req.id))]
    pub(crate) async fn create(&self, req: PostRequest) -> Result<bool, DomainError> {
        let req = req.validate()?;
        let created = self.repo.create_post(into_new_post(req)).await?;
        info!(created, "post create handled");
        Ok(created)
    }

    /// Same body rules as [`Self::create`]; the post must already exist and
    /// belong to `actor_id`.
    #[instrument(skip(self, req), fields(post_id = %req.id))]
    pub(crate) async fn update(&self, actor_id: &str, req: PostRequest) -> Result<bool, DomainError> {
        let req = req.validate()?;
        let Some(existing) = self.repo.get_post(&req.id).await? else {
            return Err(DomainError::NotFound(format!("post id: {}", req.id)));
        };
        ensure_owner(&existing, actor_id)?;
        let updated = self.repo.update_post(into_new_post(req)).await?;
        info!(updated, "post update handled");
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub(crate) async fn delete(&self, actor_id: &str, id: &str) -> Result<bool, DomainError> {
        let id = require_id("post", id)?;
        let Some(existing) = self.repo.get_post(&id).await? else {
            return Err(DomainError::DeleteFailed(format!("post id: {id}")));
        };
        ensure_owner(&existing, actor_id)?;
        let deleted = self.repo.delete_post(&id).await?;
        info!(deleted, "post delete handled");
        Ok(deleted)
    }

    pub(crate) async fn search(
        &self,
        index: &str,
        query: &str,
    ) -> Result<SearchResult<Post>, DomainError> {
        let query = require_field("query", query)?;
        self.search.search(index, &query).await
    }

    async fn list_keyed(
        &self,
        entity: &'static str,
        key: &str,
        query: PageQuery,
        shape: fn(String) -> PostQuery,
    ) -> Result<Paged<Post>, DomainError> {
        let request = query.sized()?;
        let key = require_id(entity, key)?;
        self.list(shape(key), request).await
    }

    async fn list(&self, query: PostQuery, request: PageRequest) -> Result<Paged<Post>, DomainError> {
        debug!(?query, page = request.page, size = request.size, "listing posts");
        paginate(
            request,
            self.repo.end_page(&query, request.size),
            |request| self.repo.list_posts(&query, request),
        )
        .await
    }
}

fn ensure_owner(post: &Post, actor_id: &str) -> Result<(), DomainError> {
    if actor_id.trim().is_empty() || post.creator_id != actor_id.trim() {
        warn!(post_id = %post.id, %actor_id, "actor tried to change another profile's post");
        return Err(DomainError::Unauthorized);
    }
    Ok(())
}

fn into_new_post(req: PostRequest) -> NewPost {
    NewPost {
        id: req.id,
        creator_id: req.creator_id,
        content: req.content,
        photo_url: req.photo_url,
        category: req.category,
        mention: req.mention,
        share_id: req.share_id,
    }
}
