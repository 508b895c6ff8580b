use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::data::post_repository::{NewPost, PostQuery, PostRepository};
use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged, end_page_for};
use crate::domain::post::Post;

#[derive(Debug, Clone)]
pub(crate) struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct PostRow {
    id: String,
    creator_id: String,
    content: String,
    photo_url: Vec<String>,
    category: Vec<String>,
    mention: Vec<String>,
    share_id: Option<String>,
    created_at: DateTime<Utc>,
}

const POST_COLUMNS: &str =
    "id, creator_id, content, photo_url, category, mention, share_id, created_at";

/// WHERE clause for a listing and the single value bound to `$1`, if any.
fn filter(query: &PostQuery) -> (&'static str, Option<&str>) {
    match query {
        PostQuery::All => ("TRUE", None),
        PostQuery::Mention(mention) => ("mention @> ARRAY[$1]::TEXT[]", Some(mention.as_str())),
        PostQuery::Creator(creator) => ("creator_id = $1", Some(creator.as_str())),
        PostQuery::Category(category) => ("category @> ARRAY[$1]::TEXT[]", Some(category.as_str())),
        PostQuery::Feed(profile_id) => (
            "(creator_id = $1 OR creator_id IN \
             (SELECT followee_id FROM follows WHERE follower_id = $1))",
            Some(profile_id.as_str()),
        ),
        PostQuery::Share(share_id) => ("share_id = $1", Some(share_id.as_str())),
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn get_post(&self, id: &str) -> Result<Option<Post>, DomainError> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        let row = sqlx::query_as::<_, PostRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(row.map(Post::from))
    }

    async fn create_post(&self, input: NewPost) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (id, creator_id, content, photo_url, category, mention, share_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&input.id)
        .bind(&input.creator_id)
        .bind(&input.content)
        .bind(&input.photo_url)
        .bind(&input.category)
        .bind(&input.mention)
        .bind(&input.share_id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_post(&self, input: NewPost) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE posts
            SET content = $2,
                photo_url = $3,
                category = $4,
                mention = $5,
                share_id = $6
            WHERE id = $1
            "#,
        )
        .bind(&input.id)
        .bind(&input.content)
        .bind(&input.photo_url)
        .bind(&input.category)
        .bind(&input.mention)
        .bind(&input.share_id)
        .execute(&self.pool)
        .await
        .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_post(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn end_page(&self, query: &PostQuery, size: u32) -> Result<u64, DomainError> {
        let (clause, key) = filter(query);
        let sql = format!("SELECT COUNT(*) FROM posts WHERE {clause}");
        let mut count = sqlx::query_scalar::<_, i64>(&sql);
        if let Some(key) = key {
            count = count.bind(key);
        }
        let total = count
            .fetch_one(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        Ok(end_page_for(total.max(0) as u64, size))
    }

    async fn list_posts(
        &self,
        query: &PostQuery,
        page: PageRequest,
    ) -> Result<Paged<Post>, DomainError> {
        let (clause, key) = filter(query);
        let first = if key.is_some() { 2 } else { 1 };
        let sql = format!(
            "SELECT {POST_COLUMNS} FROM posts WHERE {clause} \
             ORDER BY created_at DESC, id DESC LIMIT ${} OFFSET ${}",
            first,
            first + 1
        );
        let limit = i64::from(page.size);
        let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);

        let mut select = sqlx::query_as::<_, PostRow>(&sql);
        if let Some(key) = key {
            select = select.bind(key);
        }
        let rows = select
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
            .map_err(map_post_db_error)?;

        // Counted after the fetch; both reads are best-effort under concurrent writes.
        let end_page = self.end_page(query, page.size).await?;

        Ok(Paged {
            items: rows.into_iter().map(Post::from).collect(),
            end_page,
        })
    }
}

impl From<PostRow> for Post {
    fn from(row: PostRow) -> Self {
        Self {
            id: row.id,
            creator_id: row.creator_id,
            content: row.content,
            photo_url: row.photo_url,
            category: row.category,
            mention: row.mention,
            share_id: row.share_id,
            created_at: row.created_at,
        }
    }
}

fn map_post_db_error(err: sqlx::Error) -> DomainError {
    DomainError::Unexpected(err.to_string())
}
