pub(crate) mod error;
pub(crate) mod identity;
pub(crate) mod pagination;
pub(crate) mod post;
pub(crate) mod profile;
pub(crate) mod search;
pub(crate) mod validation;
