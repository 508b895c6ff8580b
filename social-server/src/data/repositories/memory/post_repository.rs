use async_trait::async_trait;
use chrono::Utc;

use super::{MemoryState, MemoryStore};
use crate::data::post_repository::{NewPost, PostQuery, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged, end_page_for};
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct MemoryPostRepository {
    store: MemoryStore,
}

impl MemoryPostRepository {
    pub(crate) fn new(store: MemoryStore) -> Self {
        Self { store }
    }
}

/// Matching posts, newest first.
fn select<'a>(state: &'a MemoryState, query: &PostQuery) -> Vec<&'a Post> {
    let following = match query {
        PostQuery::Feed(profile_id) => state.following_of(profile_id),
        _ => Vec::new(),
    };
    state
        .posts
        .iter()
        .rev()
        .filter(|post| query.matches(post, &following))
        .collect()
}

#[async_trait]
impl PostRepository for MemoryPostRepository {
    async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let state = self.store.state().read().await;
        Ok(state.posts.iter().find(|post| post.id == id).cloned())
    }

    async fn create_post(&self, input: NewPost) -> Result<bool, DomainError> {
        let mut state = self.store.state().write().await;
        if state.posts.iter().any(|post| post.id == input.id) {
            return Ok(false);
        }
        state.posts.push(Post {
            id: input.id,
            creator_id: input.creator_id,
            content: input.content,
            photo_url: input.photo_url,
            category: input.category,
            mention: input.mention,
            share_id: input.share_id,
            created_at: Utc::now(),
        });
        Ok(true)
    }

    async fn update_post(&self, input: NewPost) -> Result<bool, DomainError> {
        let mut state = self.store.state().write().await;
        let Some(stored) = state.posts.iter_mut().find(|post| post.id == input.id) else {
            return Ok(false);
        };
        stored.content = input.content;
        stored.photo_url = input.photo_url;
        stored.category = input.category;
        stored.mention = input.mention;
        stored.share_id = input.share_id;
        Ok(true)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, DomainError> {
        let mut state = self.store.state().write().await;
        let before = state.posts.len();
        state.posts.retain(|post| post.id != id);
        Ok(state.posts.len() < before)
    }

    async fn end_page(&self, query: &PostQuery, size: u32) -> Result<u64, DomainError> {
        let state = self.store.state().read().await;
        Ok(end_page_for(select(&state, query).len() as u64, size))
    }

    async fn list_posts(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<Paged<Post>, DomainError> {
        let state = self.store.state().read().await;
        let matching = select(&state, query);
        let end_page = end_page_for(matching.len() as u64, page.size);
        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let items = matching
            .into_iter()
            .skip(offset)
            .take(page.size as usize)
            .cloned()
            .collect();

        Ok(Paged { items, end_page })
    }
}

#[cfg(test)]
mod tests {
    use super::MemoryPostRepository;
    use crate::data::post_repository::{NewPost, PostQuery, PostRepository};
    use crate::data::profile_repository::ProfileRepository;
    use crate::data::repositories::memory::MemoryStore;
    use crate::data::repositories::memory::profile_repository::MemoryProfileRepository;
    use crate::domain::pagination::PageRequest;
    use crate::domain::profile::ProfileRequest;

    fn new_post(id: &str, creator_id: &str) -> NewPost {
        NewPost {
            id: id.to_string(),
            creator_id: creator_id.to_string(),
            content: format!("content of {id}"),
            photo_url: vec![format!("http://img/{id}.png")],
            category: vec!["travel".to_string()],
            mention: vec![],
            share_id: None,
        }
    }

    fn ids(posts: &[crate::domain::post::Post]) -> Vec<&str> {
        posts.iter().map(|post| post.id.as_str()).collect()
    }

    #[tokio::test]
    async fn listing_is_newest_first_and_paged() {
        let repo = MemoryPostRepository::new(MemoryStore::new());
        for id in ["p1", "p2", "p3"] {
            assert!(repo.create_post(new_post(id, "alice")).await.expect("create"));
        }

        let first = repo
            .list_posts(&PostQuery::All, PageRequest { page: 1, size: 2 })
            .await
            .expect("list");
        assert_eq!(ids(&first.items), vec!["p3", "p2"]);
        assert_eq!(first.end_page, 2);

        let second = repo
            .list_posts(&PostQuery::All, PageRequest { page: 2, size: 2 })
            .await
            .expect("list");
        assert_eq!(ids(&second.items), vec!["p1"]);
    }

    #[tokio::test]
    async fn feed_contains_own_and_followed_posts() {
        let store = MemoryStore::new();
        let profiles = MemoryProfileRepository::new(store.clone());
        for id in ["alice", "bob", "carol"] {
            profiles
                .create_profile(ProfileRequest {
                    id: id.to_string(),
                    user_name: id.to_string(),
                    email: format!("{id}@example.com"),
                    ..ProfileRequest::default()
                })
                .await
                .expect("create profile");
        }
        profiles.add_edge("alice", "bob").await.expect("follow");

        let posts = MemoryPostRepository::new(store);
        posts.create_post(new_post("a1", "alice")).await.expect("create");
        posts.create_post(new_post("b1", "bob")).await.expect("create");
        posts.create_post(new_post("c1", "carol")).await.expect("create");

        let feed = posts
            .list_posts(&PostQuery::Feed("alice".to_string()), PageRequest { page: 1, size: 10 })
            .await
            .expect("feed");
        assert_eq!(ids(&feed.items), vec!["b1", "a1"]);
    }

    #[tokio::test]
    async fn share_query_matches_share_reference() {
        let repo = MemoryPostRepository::new(MemoryStore::new());
        repo.create_post(new_post("orig", "alice")).await.expect("create");
        let mut share = new_post("s1", "bob");
        share.share_id = Some("orig".to_string());
        repo.create_post(share).await.expect("create");

        let shared = repo
            .list_posts(&PostQuery::Share("orig".to_string()), PageRequest { page: 1, size: 5 })
            .await
            .expect("list");
        assert_eq!(ids(&shared.items), vec!["s1"]);
        assert_eq!(
            repo.end_page(&PostQuery::Share("missing".to_string()), 5)
                .await
                .expect("end page"),
            0
        );
    }

    #[tokio::test]
    async fn update_keeps_creator_and_delete_reports_absence() {
        let repo = MemoryPostRepository::new(MemoryStore::new());
        repo.create_post(new_post("p1", "alice")).await.expect("create");

        let mut patch = new_post("p1", "mallory");
        patch.content = "edited".to_string();
        assert!(repo.update_post(patch).await.expect("update"));

        let stored = repo.get_post("p1").await.expect("get").expect("exists");
        assert_eq!(stored.content, "edited");
        assert_eq!(stored.creator_id, "alice");

        assert!(repo.delete_post("p1").await.expect("delete"));
        assert!(!repo.delete_post("p1").await.expect("second delete"));
    }
}
