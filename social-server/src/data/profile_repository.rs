use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged};
use crate::domain::profile::{Profile, ProfileRequest};

/// Profile storage. Follow relationships live in a single edge set owned by
/// the repository: `add_edge` and `remove_edge` each change both sides of
/// the relationship in one atomic step, so a reader never sees `following`
/// without the matching `followers` entry.
#[async_trait]
pub(crate) trait ProfileRepository: Send + Sync {
    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, DomainError>;
    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError>;
    async fn create_profile(&self, input: ProfileRequest) -> Result<bool, DomainError>;
    async fn update_profile(&self, input: ProfileRequest) -> Result<bool, DomainError>;
    async fn end_page(&self, size: u32) -> Result<u64, DomainError>;
    async fn list_profiles_page(&self, page: PageRequest) -> Result<Paged<Profile>, DomainError>;

    /// `true` when the edge was inserted, `false` when it already existed.
    async fn add_edge(&self, follower_id: &str, followee_id: &str) -> Result<bool, DomainError>;
    /// `true` when an edge was removed.
    async fn remove_edge(&self, follower_id: &str, followee_id: &str)
    -> Result<bool, DomainError>;
}
