//! In-process storage backed by one `RwLock`.
//!
//! Profiles, posts and follow edges share a single lock, so every repository
//! call observes one consistent snapshot and each edge mutation is atomic.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::post::Post;
use crate::domain::profile::Profile;

pub(crate) mod post_repository;
pub(crate) mod profile_repository;

#[derive(Debug, Default)]
pub(crate) struct MemoryState {
    /// Insertion order; graph fields are left empty and filled on read.
    pub(crate) profiles: Vec<Profile>,
    /// Insertion order, oldest first.
    pub(crate) posts: Vec<Post>,
    /// `(follower_id, followee_id)` in the order the edges were created.
    pub(crate) edges: Vec<(String, String)>,
}

impl MemoryState {
    pub(crate) fn following_of(&self, profile_id: &str) -> Vec<String> {
        self.edges
            .iter()
            .filter(|(follower, _)| follower == profile_id)
            .map(|(_, followee)| followee.clone())
            .collect()
    }

    pub(crate) fn followers_of(&self, profile_id: &str) -> Vec<String> {
        self.edges
            .iter()
            .filter(|(_, followee)| followee == profile_id)
            .map(|(follower, _)| follower.clone())
            .collect()
    }

    pub(crate) fn with_edges(&self, profile: &Profile) -> Profile {
        Profile {
            followers: self.followers_of(&profile.id),
            following: self.following_of(&profile.id),
            ..profile.clone()
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct MemoryStore {
    state: Arc<RwLock<MemoryState>>,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn state(&self) -> &RwLock<MemoryState> {
        &self.state
    }
}
