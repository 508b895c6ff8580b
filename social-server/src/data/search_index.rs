use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::search::SearchResult;

/// Free-text lookup over an external index holding documents of type `T`.
#[async_trait]
pub(crate) trait SearchIndex<T>: Send + Sync {
    async fn search(&self, index: &str, query: &str) -> Result<SearchResult<T>, DomainError>;
}
