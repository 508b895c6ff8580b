use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub(crate) struct SearchResult<T> {
    pub(crate) results: Vec<T>,
    pub(crate) metadata: SearchMetadata,
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub(crate) struct SearchMetadata {
    pub(crate) total: u64,
    pub(crate) took_ms: u64,
}
