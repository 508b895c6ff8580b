use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::error::DomainError;
use super::validation::{require_id, validate_content, validate_photo_urls};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct Post {
    pub(crate) id: String,
    pub(crate) creator_id: String,
    pub(crate) content: String,
    pub(crate) photo_url: Vec<String>,
    pub(crate) category: Vec<String>,
    pub(crate) mention: Vec<String>,
    pub(crate) share_id: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

/// Body of a post write. Create and update share one contract: the whole
/// post is replaced, so both demand content and a cover photo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct PostRequest {
    pub(crate) id: String,
    pub(crate) creator_id: String,
    pub(crate) content: String,
    pub(crate) photo_url: Vec<String>,
    pub(crate) category: Vec<String>,
    pub(crate) mention: Vec<String>,
    pub(crate) share_id: Option<String>,
}

impl PostRequest {
    pub(crate) fn validate(self) -> Result<Self, DomainError> {
        validate_content(&self.content)?;
        validate_photo_urls(&self.photo_url)?;
        let id = require_id("post", &self.id)?;

        Ok(Self {
            id,
            creator_id: self.creator_id.trim().to_string(),
            content: self.content,
            photo_url: self.photo_url.into_iter().map(|url| url.trim().to_string()).collect(),
            category: normalize_tags(self.category),
            mention: normalize_tags(self.mention),
            share_id: self
                .share_id
                .map(|share| share.trim().to_string())
                .filter(|share| !share.is_empty()),
        })
    }
}

/// Trims tags, drops blanks and duplicates, keeps first-seen order.
pub(crate) fn normalize_tags(tags: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if !tag.is_empty() && !out.iter().any(|seen| seen == tag) {
            out.push(tag.to_string());
        }
    }
    out
}
