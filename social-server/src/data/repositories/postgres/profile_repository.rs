use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{FromRow, PgPool};

use crate::data::profile_repository::ProfileRepository;
use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged, end_page_for};
use crate::domain::profile::{Profile, ProfileRequest};

#[derive(Debug, Clone)]
pub(crate) struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub(crate) fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Fills `followers`/`following` from the edge set with one query.
    async fn attach_edges(&self, rows: Vec<ProfileRow>) -> Result<Vec<Profile>, DomainError> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<String> = rows.iter().map(|row| row.id.clone()).collect();
        let edges = sqlx::query_as::<_, EdgeRow>(
            r#"
            SELECT follower_id, followee_id
            FROM follows
            WHERE follower_id = ANY($1) OR followee_id = ANY($1)
            ORDER BY created_at, follower_id, followee_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        let mut followers: HashMap<&str, Vec<String>> = HashMap::new();
        let mut following: HashMap<&str, Vec<String>> = HashMap::new();
        for edge in &edges {
            followers
                .entry(edge.followee_id.as_str())
                .or_default()
                .push(edge.follower_id.clone());
            following
                .entry(edge.follower_id.as_str())
                .or_default()
                .push(edge.followee_id.clone());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let followers = followers.remove(row.id.as_str()).unwrap_or_default();
                let following = following.remove(row.id.as_str()).unwrap_or_default();
                row.into_profile(followers, following)
            })
            .collect())
    }
}

#[derive(FromRow)]
struct ProfileRow {
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
}

impl ProfileRow {
    fn into_profile(self, followers: Vec<String>, following: Vec<String>) -> Profile {
        Profile {
            id: self.id,
            user_name: self.user_name,
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            bio: self.bio,
            photo_url: self.photo_url,
            phone: self.phone,
            gender: self.gender,
            category: self.category,
            followers,
            following,
        }
    }
}

#[derive(FromRow)]
struct EdgeRow {
    follower_id: String,
    followee_id: String,
}

const PROFILE_COLUMNS: &str =
    "id, user_name, first_name, last_name, email, bio, photo_url, phone, gender, category";

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn get_profile(&self, id: &str) -> Result<Option<Profile>, DomainError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");
        let row = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        let Some(row) = row else {
            return Ok(None);
        };
        Ok(self.attach_edges(vec![row]).await?.into_iter().next())
    }

    async fn list_profiles(&self) -> Result<Vec<Profile>, DomainError> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at, id");
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        self.attach_edges(rows).await
    }

    async fn create_profile(&self, input: ProfileRequest) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO profiles
                (id, user_name, first_name, last_name, email, bio, photo_url, phone, gender, category)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO NOTHING
            "#,
        )
        .bind(&input.id)
        .bind(&input.user_name)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.bio)
        .bind(&input.photo_url)
        .bind(&input.phone)
        .bind(&input.gender)
        .bind(&input.category)
        .execute(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn update_profile(&self, input: ProfileRequest) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE profiles
            SET user_name = $2,
                first_name = $3,
                last_name = $4,
                email = $5,
                bio = $6,
                photo_url = $7,
                phone = $8,
                gender = $9,
                category = $10
            WHERE id = $1
            "#,
        )
        .bind(&input.id)
        .bind(&input.user_name)
        .bind(&input.first_name)
        .bind(&input.last_name)
        .bind(&input.email)
        .bind(&input.bio)
        .bind(&input.photo_url)
        .bind(&input.phone)
        .bind(&input.gender)
        .bind(&input.category)
        .execute(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn end_page(&self, size: u32) -> Result<u64, DomainError> {
        let total = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM profiles")
            .fetch_one(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        Ok(end_page_for(total.max(0) as u64, size))
    }

    async fn list_profiles_page(&self, page: PageRequest) -> Result<Paged<Profile>, DomainError> {
        let sql = format!(
            "SELECT {PROFILE_COLUMNS} FROM profiles ORDER BY created_at, id LIMIT $1 OFFSET $2"
        );
        let rows = sqlx::query_as::<_, ProfileRow>(&sql)
            .bind(i64::from(page.size))
            .bind(i64::try_from(page.offset()).unwrap_or(i64::MAX))
            .fetch_all(&self.pool)
            .await
            .map_err(map_profile_db_error)?;

        let items = self.attach_edges(rows).await?;
        let end_page = self.end_page(page.size).await?;

        Ok(Paged { items, end_page })
    }

    async fn add_edge(&self, follower_id: &str, followee_id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, followee_id)
            VALUES ($1, $2)
            ON CONFLICT (follower_id, followee_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn remove_edge(
        &self,
        follower_id: &str,
        followee_id: &str,
    ) -> Result<bool, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM follows
            WHERE follower_id = $1 AND followee_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(followee_id)
        .execute(&self.pool)
        .await
        .map_err(map_profile_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

fn map_profile_db_error(err: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &err
        && db_err.code().as_deref() == Some("23503")
    {
        return DomainError::NotFound("profile".to_string());
    }
    DomainError::Unexpected(err.to_string())
}
