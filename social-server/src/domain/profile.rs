use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::post::normalize_tags;
use super::validation::{require_field, require_id};

/// A profile as read back from storage. `followers` and `following` are
/// projections of the follow edge set, never written through this type.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct Profile {
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

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub(crate) struct ProfileRequest {
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
}

impl ProfileRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        let id = require_id("profile", &self.id)?;
        let user_name = require_field("user_name", &self.user_name)?;
        let email = require_field("email", &self.email)?.to_lowercase();

        Ok(Self {
            id,
            user_name,
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email,
            bio: self.bio,
            photo_url: self.photo_url.trim().to_string(),
            phone: self.phone.trim().to_string(),
            gender: self.gender.trim().to_string(),
            category: normalize_tags(self.category),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::ProfileRequest;
    use crate::domain::error::DomainError;

    fn request() -> ProfileRequest {
        ProfileRequest {
            id: "alice".to_string(),
            user_name: "alice".to_string(),
            email: "Alice@Example.com".to_string(),
            ..ProfileRequest::default()
        }
    }

    #[test]
    fn blank_id_is_missing_id() {
        let req = ProfileRequest {
            id: " ".to_string(),
            ..request()
        };
        assert!(matches!(req.validate(), Err(DomainError::MissingId("profile"))));
    }

    #[test]
    fn blank_user_name_is_missing_field() {
        let req = ProfileRequest {
            user_name: "".to_string(),
            ..request()
        };
        assert!(matches!(req.validate(), Err(DomainError::MissingField("user_name"))));
    }

    #[test]
    fn email_is_lowercased_and_categories_deduplicated() {
        let req = ProfileRequest {
            category: vec!["art".to_string(), " art ".to_string()],
            ..request()
        };
        let req = req.validate().expect("must validate");
        assert_eq!(req.email, "alice@example.com");
        assert_eq!(req.category, vec!["art"]);
    }
}
