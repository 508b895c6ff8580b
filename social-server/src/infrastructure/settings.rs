use anyhow::{Context, Result, anyhow};

#[derive(Debug, Clone)]
pub struct Settings {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub http_addr: String,
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub search_url: String,
    pub search_timeout_secs: u64,
    pub posts_page_size: u32,
    pub profiles_page_size: u32,
    pub http_request_body_limit_bytes: usize,
    pub http_concurrency_limit: usize,
    pub http_request_timeout_secs: u64,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        let database_url = get_required("DATABASE_URL").context("DATABASE_URL is required")?;
        let jwt_secret = get_required("JWT_SECRET").context("JWT_SECRET is required")?;

        if jwt_secret.chars().count() < 32 {
            return Err(anyhow!("JWT_SECRET must be at least 32 characters"));
        }

        let http_addr = std::env::var("HTTP_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
        let cors_origins = parse_cors_origins(
            std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:8000,http://127.0.0.1:8000".to_string()),
        );
        let log_level = std::env::var("LOG_LEVEL")
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or_else(|_| "info".to_string());
        let search_url =
            std::env::var("SEARCH_URL").unwrap_or_else(|_| "http://127.0.0.1:9200".to_string());

        Ok(Self {
            database_url,
            database_max_connections: parse_positive_env("DATABASE_MAX_CONNECTIONS", 10)?,
            jwt_secret,
            http_addr,
            cors_origins,
            log_level,
            search_url,
            search_timeout_secs: parse_positive_env("SEARCH_TIMEOUT_SECS", 5)?,
            posts_page_size: parse_positive_env("POSTS_PAGE_SIZE", 10)?,
            profiles_page_size: parse_positive_env("PROFILES_PAGE_SIZE", 10)?,
            http_request_body_limit_bytes: parse_positive_env(
                "HTTP_REQUEST_BODY_LIMIT_BYTES",
                1024 * 1024,
            )?,
            http_concurrency_limit: parse_positive_env("HTTP_CONCURRENCY_LIMIT", 256)?,
            http_request_timeout_secs: parse_positive_env("HTTP_REQUEST_TIMEOUT_SECS", 10)?,
        })
    }
}

fn get_required(key: &str) -> Result<String> {
    let value = std::env::var(key)?;
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(anyhow!("{key} must not be empty"));
    }
    Ok(value)
}

fn parse_cors_origins(raw: String) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_positive_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default + ToString,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw = std::env::var(key).unwrap_or_else(|_| default.to_string());
    parse_positive(key, &raw)
}

fn parse_positive<T>(key: &str, raw: &str) -> Result<T>
where
    T: std::str::FromStr + PartialEq + Default,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = raw
        .trim()
        .parse::<T>()
        .with_context(|| format!("Failed to parse {key}, expecting positive integer"))?;

    if value == T::default() {
        return Err(anyhow!("{key} must be > 0"));
    }
    Ok(value)
}
