use async_trait::async_trait;

use super::MemoryStore;
use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged, end_page_for};
use crate::domain::profile::{Profile, ProfileRequest};

#[derive(Debug, Clone)]
pub(crate) struct MemoryProfileRepository {
    store: MemoryStore,
}

impl MemoryProfileRepository {
    pub(crate) fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

#[async_trait]
impl ProfileRepository for MemoryProfileRepository {
    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, DomainError> {
        let state = self.store.state().read().await;
        Ok(state
            .profiles
            .iter()
            .find(|profile| profile.id == id)
            .map(|profile| state.with_edges(profile)))
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let state = self.store.state().read().await;
        Ok(state
            .profiles
            .iter()
            .map(|profile| state.with_edges(profile))
            .collect())
    }

    async fn create_profile(&self, input: ProfileRequest) -> Result<bool, DomainError> {
        let mut state = self.store.state().write().await;
        if state.profiles.iter().any(|profile| profile.id == input.id) {
            return Ok(false);
        }
        state.profiles.push(stored(input));
        Ok(true)
    }

    async fn update_profile(&self, input: ProfileRequest) -> Result<bool, DomainError> {
        let mut state = self.store.state().write().await;
        let Some(slot) = state.profiles.iter_mut().find(|profile| profile.id == input.id) else {
            return Ok(false);
        };
        *slot = stored(input);
        Ok(true)
    }

    async fn end_page(&self, size: u32) -> Result<u64, DomainError> {
        let state = self.store.state().read().await;
        Ok(end_page_for(state.profiles.len() as u64, size))
    }

    async fn list_profiles_page(&self, page: PageRequest) -> Result<Paged<Profile>, DomainError> {
        let state = self.store.state().read().await;
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = state
            .profiles
            .iter()
            .skip(offset)
            .take(page.size as usize)
            .map(|profile| state.with_edges(profile))
            .collect();

        Ok(Paged {
            items,
            end_page: end_page_for(state.profiles.len() as u64, page.size),
        })
    }

    async fn add_edge(&self, follower_id: &str, followee_id: &str) -> Result<bool, DomainError> {
        let mut state = self.store.state().write().await;
        for id in [follower_id, followee_id] {
            if !state.profiles.iter().any(|profile| profile.id == id) {
                return Err(DomainError::NotFound(format!("profile id: {id}")));
            }
        }
        if state
            .edges
            .iter()
            .any(|(follower, followee)| follower == follower_id && followee == followee_id)
        {
            return Ok(false);
        }
        state
            .edges
            .push((follower_id.to_string(), followee_id.to_string()));
        Ok(true)
    }

    async fn remove_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<bool, DomainError> {
        let mut state = self.store.state().write().await;
        let before = state.edges.len();
        state
            .edges
            .retain(|(follower, followee)| !(follower == follower_id && followee == followee_id));
        Ok(state.edges.len() < before)
    }
}

fn stored(req: ProfileRequest) -> Profile {
    Profile {
        id: req.id,
        user_name: req.user_name,
        first_name: req.first_name,
        last_name: req.last_name,
        email: req.email,
        bio: req.bio,
        photo_url: req.photo_url,
        phone: req.phone,
        gender: req.gender,
        category: req.category,
        followers: Vec::new(),
        following: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryProfileRepository;
    use crate::data::profile_repository::ProfileRepository;
    use crate::data::repositories::memory::MemoryStore;
    use crate::domain::error::DomainError;
    use crate::domain::pagination::PageRequest;
    use crate::domain::profile::ProfileRequest;

    async fn repo_with(ids: &[&str]) -> MemoryProfileRepository {
        let repo = MemoryProfileRepository::new(MemoryStore::new());
        for id in ids {
            let created = repo
                .create_profile(ProfileRequest {
                    id: id.to_string(),
                    user_name: id.to_string(),
                    email: format!("{id}@example.com"),
                    ..ProfileRequest::default()
                })
                .await
                .expect("create must succeed");
            assert!(created);
        }
        repo
    }

    #[tokio::test]
    async fn add_edge_updates_both_sides() {
        let repo = repo_with(&["a", "b"]).await;

        assert!(repo.add_edge("a", "b").await.expect("add must succeed"));

        let a = repo.get_profile("a").await.expect("get").expect("a exists");
        let b = repo.get_profile("b").await.expect("get").expect("b exists");
        assert_eq!(a.following, vec!["b"]);
        assert!(a.followers.is_empty());
        assert_eq!(b.followers, vec!["a"]);
        assert!(b.following.is_empty());
    }

    #[tokio::test]
    async fn duplicate_edge_is_not_inserted_twice() {
        let repo = repo_with(&["a", "b"]).await;

        assert!(repo.add_edge("a", "b").await.expect("first add"));
        assert!(!repo.add_edge("a", "b").await.expect("second add"));

        let b = repo.get_profile("b").await.expect("get").expect("b exists");
        assert_eq!(b.followers, vec!["a"]);
    }

    #[tokio::test]
    async fn edge_to_unknown_profile_is_rejected_without_side_effects() {
        let repo = repo_with(&["a"]).await;

        let err = repo.add_edge("a", "ghost").await.expect_err("must fail");
        assert!(matches!(err, DomainError::NotFound(_)));

        let a = repo.get_profile("a").await.expect("get").expect("a exists");
        assert!(a.following.is_empty());
    }

    #[tokio::test]
    async fn remove_edge_reports_whether_anything_changed() {
        let repo = repo_with(&["a", "b"]).await;
        repo.add_edge("a", "b").await.expect("add");

        assert!(repo.remove_edge("a", "b").await.expect("remove"));
        assert!(!repo.remove_edge("a", "b").await.expect("second remove"));

        let b = repo.get_profile("b").await.expect("get").expect("b exists");
        assert!(b.followers.is_empty());
    }

    #[tokio::test]
    async fn create_refuses_duplicate_ids() {
        let repo = repo_with(&["a"]).await;
        let created = repo
            .create_profile(ProfileRequest {
                id: "a".to_string(),
                ..ProfileRequest::default()
            })
            .await
            .expect("create call must succeed");
        assert!(!created);
    }

    #[tokio::test]
    async fn update_replaces_fields_and_keeps_edges() {
        let repo = repo_with(&["a", "b"]).await;
        repo.add_edge("b", "a").await.expect("add");

        let updated = repo
            .update_profile(ProfileRequest {
                id: "a".to_string(),
                user_name: "renamed".to_string(),
                email: "a@example.com".to_string(),
                ..ProfileRequest::default()
            })
            .await
            .expect("update call must succeed");
        assert!(updated);

        let a = repo.get_profile("a").await.expect("get").expect("a exists");
        assert_eq!(a.user_name, "renamed");
        assert_eq!(a.followers, vec!["b"]);

        let missing = repo
            .update_profile(ProfileRequest {
                id: "ghost".to_string(),
                ..ProfileRequest::default()
            })
            .await
            .expect("update call must succeed");
        assert!(!missing);
    }

    #[tokio::test]
    async fn pages_follow_insertion_order() {
        let repo = repo_with(&["a", "b", "c"]).await;

        assert_eq!(repo.end_page(2).await.expect("end page"), 2);
        let page = repo
            .list_profiles_page(PageRequest { page: 2, size: 2 })
            .await
            .expect("list");
        let ids: Vec<_> = page.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["c"]);
        assert_eq!(page.end_page, 2);
    }
}
