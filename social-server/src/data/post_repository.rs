use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged};
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct NewPost {
    pub(crate) id: String,
    pub(crate) creator_id: String,
    pub(crate) content: String,
    pub(crate) photo_url: Vec<String>,
    pub(crate) category: Vec<String>,
    pub(crate) mention: Vec<String>,
    pub(crate) share_id: Option<String>,
}

/// Shape of a post listing. `end_page` and `list_posts` must be called with
/// the same query for the page bound to mean anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum PostQuery {
    All,
    Mention(String),
    Creator(String),
    Category(String),
    /// Posts by the profile itself or by anyone it follows.
    Feed(String),
    Share(String),
}

impl PostQuery {
    pub(crate) fn matches(&self, post: &Post, following: &[String]) -> bool {
        match self {
            PostQuery::All => true,
            PostQuery::Mention(mention) => post.mention.iter().any(|m| m == mention),
            PostQuery::Creator(creator) => &post.creator_id == creator,
            PostQuery::Category(category) => post.category.iter().any(|c| c == category),
            PostQuery::Feed(profile_id) => {
                &post.creator_id == profile_id || following.contains(&post.creator_id)
            }
            PostQuery::Share(share_id) => post.share_id.as_deref() == Some(share_id.as_str()),
        }
    }
}

#[async_trait]
pub(crate) trait PostRepository: Send + Sync {
    async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError>;
    /// `false` when a post with the same id already exists.
    async fn create_post(&self, input: NewPost) -> Result<bool, DomainError>;
    /// Replaces the body of an existing post; creator and timestamps stay.
    async fn update_post(&self, input: NewPost) -> Result<bool, DomainError>;
    async fn delete_post(&self, id: &str) -> Result<bool, DomainError>;
    async fn end_page(&self, query: &PostQuery, size: u32) -> Result<u64, DomainError>;
    async fn list_posts(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<Paged<Post>, DomainError>;
}
