//! Page admission shared by every listing.
//!
//! Format rules (size, then page) run before storage is touched; the
//! `end_page` round-trip happens only once the request is well formed, and
//! the data fetch only once the page is known to exist.

use std::future::Future;

use crate::domain::error::DomainError;
use crate::domain::pagination::{PageRequest, Paged};
use crate::domain::validation::{ensure_page_in_range, validate_page, validate_size};

/// Paging input as the caller sent it. `None` covers both an absent value
/// and one that was not a number.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct PageQuery {
    pub(crate) page: Option<i64>,
    pub(crate) size: Option<i64>,
}

impl PageQuery {
    pub(crate) fn new(page: Option<i64>, size: Option<i64>) -> Self {
        Self { page, size }
    }

    /// Listings where the caller picks the size: size is checked first.
    pub(crate) fn sized(self) -> Result<PageRequest, DomainError> {
        let size = validate_size(self.size)?;
        let page = validate_page(self.page)?;
        Ok(PageRequest { page, size })
    }

    /// Listings with a server-side page size; any caller size is ignored.
    pub(crate) fn with_size(self, size: u32) -> Result<PageRequest, DomainError> {
        let page = validate_page(self.page)?;
        Ok(PageRequest { page, size })
    }
}

pub(crate) async fn paginate<T, E, F, Fut>(
    request: PageRequest,
    end_page: E,
    fetch: F,
) -> Result<Paged<T>, DomainError>
where
    E: Future<Output = Result<u64, DomainError>>,
    F: FnOnce(PageRequest) -> Fut,
    Fut: Future<Output = Result<Paged<T>, DomainError>>,
{
    let end_page = end_page.await?;
    ensure_page_in_range(request.page, end_page)?;
    fetch(request).await
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::{PageQuery, paginate};
    use crate::domain::error::DomainError;
    use crate::domain::pagination::{PageRequest, Paged};

    #[test]
    fn size_is_checked_before_page() {
        let err = PageQuery::new(Some(0), Some(0))
            .sized()
            .expect_err("size 0 must fail first");
        assert!(matches!(err, DomainError::InvalidSize));
    }

    #[test]
    fn page_below_minimum_regardless_of_size_value() {
        for page in [0, -1, i64::MIN] {
            let err = PageQuery::new(Some(page), Some(10))
                .sized()
                .expect_err("must fail");
            assert!(matches!(err, DomainError::PageBelowMinimum));

            let err = PageQuery::new(Some(page), None)
                .with_size(10)
                .expect_err("must fail");
            assert!(matches!(err, DomainError::PageBelowMinimum));
        }
    }

    #[test]
    fn fixed_size_listing_ignores_caller_size() {
        let request = PageQuery::new(Some(2), Some(-5))
            .with_size(10)
            .expect("must be valid");
        assert_eq!(request, PageRequest { page: 2, size: 10 });
    }

    #[tokio::test]
    async fn out_of_range_page_never_reaches_fetch() {
        let fetched = AtomicBool::new(false);
        let fetched_flag = &fetched;
        let err = paginate(
            PageRequest { page: 5, size: 10 },
            async { Ok::<u64, DomainError>(3) },
            |_| async move {
                fetched_flag.store(true, Ordering::SeqCst);
                Ok::<_, DomainError>(Paged::<u32> {
                    items: vec![],
                    end_page: 3,
                })
            },
        )
        .await
        .expect_err("page 5 of 3 must fail");

        assert!(matches!(err, DomainError::PageOutOfRange { page: 5, end_page: 3 }));
        assert!(!fetched.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn admitted_page_is_returned_unchanged() {
        let paged = paginate(
            PageRequest { page: 2, size: 1 },
            async { Ok::<u64, DomainError>(2) },
            |request| async move {
                Ok::<_, DomainError>(Paged {
                    items: vec![request.page],
                    end_page: 2,
                })
            },
        )
        .await
        .expect("page 2 of 2 must pass");

        assert_eq!(paged.items, vec![2]);
        assert_eq!(paged.end_page, 2);
    }
}
