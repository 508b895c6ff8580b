use async_trait::async_trait;

use crate::domain::error::DomainError;
use crate::domain::identity::Identity;

#[async_trait]
pub(crate) trait TokenVerifier: Send + Sync {
    /// Fails with [`DomainError::Unauthorized`] for any token it cannot trust.
    async fn verify(&self, token: &str) -> Result<Identity, DomainError>;
}
