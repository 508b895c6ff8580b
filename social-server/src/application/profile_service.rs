use tracing::{info, instrument, warn};

use crate::application::pagination::{PageQuery, paginate};
use crate::data::profile_repository::ProfileRepository;
use crate::data::search_index::SearchIndex;
use crate::data::token_verifier::TokenVerifier;
use crate::domain::error::DomainError;
use crate::domain::identity::Identity;
use crate::domain::pagination::Paged;
use crate::domain::profile::{Profile, ProfileRequest};
use crate::domain::search::SearchResult;
use crate::domain::validation::{require_field, require_id};

/// Profile use-cases.
///
/// Follow state is never written as two lists: `follow`/`unfollow` each
/// issue a single edge mutation, and the repository guarantees that edge
/// appears on both profiles at once. Concurrent follow/unfollow on the same
/// pair are serialized by the repository, not here.
pub(crate) struct ProfileService<R, A, S>
where
    R: ProfileRepository,
    A: TokenVerifier,
    S: SearchIndex<Profile>,
{
    repo: R,
    auth: A,
    search: S,
    page_size: u32,
}

impl<R, A, S> ProfileService<R, A, S>
where
    R: ProfileRepository,
    A: TokenVerifier,
    S: SearchIndex<Profile>,
{
    pub(crate) fn new(repo: R, auth: A, search: S, page_size: u32) -> Self {
        Self {
            repo,
            auth,
            search,
            page_size,
        }
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Profile, DomainError> {
        let id = require_id("profile", id)?;
        self.repo
            .get_profile(&id)
            .await?
            .ok_or(DomainError::NotFound(format!("profile id: {id}")))
    }

    pub(crate) async fn get_all(&self) -> Result<Vec<Profile>, DomainError> {
        self.repo.list_profiles().await
    }

    /// The caller's own profile, resolved from the token.
    pub(crate) async fn get_mine(&self, token: &str) -> Result<Profile, DomainError> {
        let identity = self.auth.verify(token).await?;
        self.get(&identity.profile_id).await
    }

    #[instrument(skip(self, req), fields(profile_id = %req.id))]
    pub(crate) async fn create(&self, req: ProfileRequest) -> Result<bool, DomainError> {
        let req = req.validate()?;
        if self.repo.get_profile(&req.id).await?.is_some() {
            return Err(DomainError::AlreadyExists(format!("profile id: {}", req.id)));
        }
        let created = self.repo.create_profile(req).await?;
        info!(created, "profile create handled");
        Ok(created)
    }

    #[instrument(skip(self, req), fields(profile_id = %req.id))]
    pub(crate) async fn update(&self, req: ProfileRequest) -> Result<bool, DomainError> {
        let req = req.validate()?;
        if self.repo.get_profile(&req.id).await?.is_none() {
            return Err(DomainError::NotFound(format!("profile id: {}", req.id)));
        }
        let updated = self.repo.update_profile(req).await?;
        info!(updated, "profile update handled");
        Ok(updated)
    }

    /// `true` when a new follow edge was created, `false` if it already existed.
    #[instrument(skip(self, token))]
    pub(crate) async fn follow(
        &self,
        token: &str,
        profile_id: &str,
        other_profile_id: &str,
    ) -> Result<bool, DomainError> {
        let (profile_id, other_profile_id) =
            self.authorize_edge(token, profile_id, other_profile_id).await?;

        let added = self.repo.add_edge(&profile_id, &other_profile_id).await?;
        info!(added, "follow handled");
        Ok(added)
    }

    /// `true` when a follow edge was removed, `false` if there was none.
    #[instrument(skip(self, token))]
    pub(crate) async fn unfollow(
        &self,
        token: &str,
        profile_id: &str,
        other_profile_id: &str,
    ) -> Result<bool, DomainError> {
        let (profile_id, other_profile_id) =
            self.authorize_edge(token, profile_id, other_profile_id).await?;

        let removed = self
            .repo
            .remove_edge(&profile_id, &other_profile_id)
            .await?;
        info!(removed, "unfollow handled");
        Ok(removed)
    }

    pub(crate) async fn get_all_auth_profiles(
        &self,
        token: &str,
        page: Option<i64>,
    ) -> Result<Paged<Profile>, DomainError> {
        let request = PageQuery::new(page, None).with_size(self.page_size)?;
        self.auth.verify(token).await?;
        paginate(
            request,
            self.repo.end_page(request.size),
            |request| self.repo.list_profiles_page(request),
        )
        .await
    }

    pub(crate) async fn search(
        &self,
        index: &str,
        query: &str,
    ) -> Result<SearchResult<Profile>, DomainError> {
        let query = require_field("query", query)?;
        self.search.search(index, &query).await
    }

    /// Checks shared by follow and unfollow: the actor may only change its
    /// own edges, never towards itself, and both ends must exist.
    async fn authorize_edge(
        &self,
        token: &str,
        profile_id: &str,
        other_profile_id: &str,
    ) -> Result<(String, String), DomainError> {
        let profile_id = require_id("profile", profile_id)?;
        let other_profile_id = require_id("profile", other_profile_id)?;

        let Identity {
            profile_id: actor_id,
            user_name,
        } = self.auth.verify(token).await?;
        if actor_id != profile_id {
            warn!(%actor_id, %user_name, %profile_id, "actor tried to change another profile's follows");
            return Err(DomainError::Unauthorized);
        }
        if profile_id == other_profile_id {
            return Err(DomainError::SelfFollow);
        }

        for id in [&profile_id, &other_profile_id] {
            if self.repo.get_profile(id).await?.is_none() {
                return Err(DomainError::NotFound(format!("profile id: {id}")));
            }
        }
        Ok((profile_id, other_profile_id))
    }
}
