use serde::Serialize;

/// A validated page request: `page` is 1-based, `size` is > 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct PageRequest {
    pub(crate) page: u64,
    pub(crate) size: u32,
}

impl PageRequest {
    pub(crate) fn offset(&self) -> u64 {
        self.page.saturating_sub(1).saturating_mul(u64::from(self.size))
    }
}

#[derive(Debug, Clone, Serialize)]
pub(crate) struct Paged<T> {
    pub(crate) items: Vec<T>,
    pub(crate) end_page: u64,
}

/// Number of pages needed to hold `total` items; zero items means zero pages.
pub(crate) fn end_page_for(total: u64, size: u32) -> u64 {
    if size == 0 {
        return 0;
    }
    total.div_ceil(u64::from(size))
}
