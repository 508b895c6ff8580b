use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use crate::data::search_index::SearchIndex;
use crate::domain::error::DomainError;
use crate::domain::post::Post;
use crate::domain::profile::Profile;
use crate::domain::search::{SearchMetadata, SearchResult};

#[derive(Debug, Error)]
pub(crate) enum SearchError {
    #[error("search client build failed")]
    Build(#[source] reqwest::Error),

    #[error("search request failed")]
    Request(#[source] reqwest::Error),

    #[error("search backend answered {status}")]
    Status { status: reqwest::StatusCode },

    #[error("search response could not be decoded")]
    Decode(#[source] reqwest::Error),
}

impl From<SearchError> for DomainError {
    fn from(err: SearchError) -> Self {
        DomainError::Unexpected(err.to_string())
    }
}

/// Client for an Elasticsearch-compatible `_search` endpoint.
#[derive(Debug, Clone)]
pub(crate) struct ElasticsearchClient {
    base_url: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct SearchResponseDto<T> {
    #[serde(default)]
    took: u64,
    hits: HitsDto<T>,
}

#[derive(Debug, Deserialize)]
struct HitsDto<T> {
    total: Option<TotalDto>,
    hits: Vec<HitDto<T>>,
}

#[derive(Debug, Deserialize)]
struct TotalDto {
    value: u64,
}

#[derive(Debug, Deserialize)]
struct HitDto<T> {
    #[serde(rename = "_source")]
    source: T,
}

impl<T> From<SearchResponseDto<T>> for SearchResult<T> {
    fn from(value: SearchResponseDto<T>) -> Self {
        let results: Vec<T> = value.hits.hits.into_iter().map(|hit| hit.source).collect();
        let total = value
            .hits
            .total
            .map(|total| total.value)
            .unwrap_or(results.len() as u64);
        Self {
            results,
            metadata: SearchMetadata {
                total,
                took_ms: value.took,
            },
        }
    }
}

impl ElasticsearchClient {
    pub(crate) fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, SearchError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(2))
            .timeout(timeout)
            .build()
            .map_err(SearchError::Build)?;

        Ok(Self {
            base_url: base_url.into(),
            client,
        })
    }

    fn endpoint(&self, index: &str) -> String {
        format!(
            "{}/{}/_search",
            self.base_url.trim_end_matches('/'),
            index.trim_matches('/')
        )
    }

    async fn query<T: DeserializeOwned>(
        &self,
        index: &str,
        query: &str,
    ) -> Result<SearchResult<T>, SearchError> {
        let url = self.endpoint(index);
        let body = json!({ "query": { "query_string": { "query": query } } });

        let response = self
            .client
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(SearchError::Request)?;
        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::Status { status });
        }

        let dto = response
            .json::<SearchResponseDto<T>>()
            .await
            .map_err(SearchError::Decode)?;
        Ok(dto.into())
    }
}

/// Post as stored in the index. Documents are camelCase and may omit fields.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct PostDocument {
    id: String,
    creator_id: String,
    content: String,
    photo_url: Vec<String>,
    category: Vec<String>,
    mention: Vec<String>,
    share_id: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl From<PostDocument> for Post {
    fn from(doc: PostDocument) -> Self {
        Self {
            id: doc.id,
            creator_id: doc.creator_id,
            content: doc.content,
            photo_url: doc.photo_url,
            category: doc.category,
            mention: doc.mention,
            share_id: doc.share_id,
            created_at: doc.created_at.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct ProfileDocument {
    id: String,
    user_name: String,
    first_name: String,
    last_name: String,
    email: String,
    bio: String,
    photo_url: String,
    phone: String,
    gender: String,
    category: Vec<String>,
    followers: Vec<String>,
    following: Vec<String>,
}

impl From<ProfileDocument> for Profile {
    fn from(doc: ProfileDocument) -> Self {
        Self {
            id: doc.id,
            user_name: doc.user_name,
            first_name: doc.first_name,
            last_name: doc.last_name,
            email: doc.email,
            bio: doc.bio,
            photo_url: doc.photo_url,
            phone: doc.phone,
            gender: doc.gender,
            category: doc.category,
            followers: doc.followers,
            following: doc.following,
        }
    }
}

impl ElasticsearchClient {
    async fn search_as<D, T>(&self, index: &str, query: &str) -> Result<SearchResult<T>, DomainError>
    where
        D: DeserializeOwned,
        T: From<D>,
    {
        debug!(index, query, "search delegated");
        let found = self.query::<D>(index, query).await.map_err(|err| {
            warn!(index, error = %err, "search backend failed");
            DomainError::from(err)
        })?;

        Ok(SearchResult {
            results: found.results.into_iter().map(T::from).collect(),
            metadata: found.metadata,
        })
    }
}

#[async_trait]
impl SearchIndex<Post> for ElasticsearchClient {
    async fn search(&self, index: &str, query: &str) -> Result<SearchResult<Post>, DomainError> {
        self.search_as::<PostDocument, Post>(index, query).await
    }
}

#[async_trait]
impl SearchIndex<Profile> for ElasticsearchClient {
    async fn search(&self, index: &str, query: &str) -> Result<SearchResult<Profile>, DomainError> {
        self.search_as::<ProfileDocument, Profile>(index, query).await
    }
}
