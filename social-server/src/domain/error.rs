use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum DomainError {
    #[error("page is required and must be an integer")]
    InvalidPage,

    #[error("page must be >= 1")]
    PageBelowMinimum,

    #[error("page {page} is beyond the last page ({end_page})")]
    PageOutOfRange { page: u64, end_page: u64 },

    #[error("size is required and must be > 0")]
    InvalidSize,

    #[error("{0} id is required")]
    MissingId(&'static str),

    #[error("field '{0}' is required")]
    MissingField(&'static str),

    #[error("post content must not be empty")]
    InvalidContent,

    #[error("post photo url is missing or not a url")]
    InvalidPhotoReference,

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("resource already exists: {0}")]
    AlreadyExists(String),

    #[error("delete failed, no such resource: {0}")]
    DeleteFailed(String),

    #[error("profile cannot follow itself")]
    SelfFollow,

    #[error("unauthorized")]
    Unauthorized,

    #[error("unexpected domain error: {0}")]
    Unexpected(String),
}

impl DomainError {
    /// Stable machine-readable code, safe to expose to API clients.
    pub(crate) fn code(&self) -> &'static str {
        match self {
            DomainError::InvalidPage => "invalid_page",
            DomainError::PageBelowMinimum => "page_below_minimum",
            DomainError::PageOutOfRange { .. } => "page_out_of_range",
            DomainError::InvalidSize => "invalid_size",
            DomainError::MissingId(_) => "missing_id",
            DomainError::MissingField(_) => "missing_field",
            DomainError::InvalidContent => "invalid_content",
            DomainError::InvalidPhotoReference => "invalid_photo_reference",
            DomainError::NotFound(_) => "entity_not_found",
            DomainError::AlreadyExists(_) => "entity_already_exists",
            DomainError::DeleteFailed(_) => "delete_failed",
            DomainError::SelfFollow => "self_follow",
            DomainError::Unauthorized => "unauthorized",
            DomainError::Unexpected(_) => "unexpected",
        }
    }

    pub(crate) fn is_bad_input(&self) -> bool {
        matches!(
            self,
            DomainError::InvalidPage
                | DomainError::PageBelowMinimum
                | DomainError::PageOutOfRange { .. }
                | DomainError::InvalidSize
                | DomainError::MissingId(_)
                | DomainError::MissingField(_)
                | DomainError::InvalidContent
                | DomainError::InvalidPhotoReference
                | DomainError::SelfFollow
        )
    }
}
