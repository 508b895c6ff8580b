pub(crate) mod posts;
pub(crate) mod profiles;

use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::pagination::PageQuery;
use crate::domain::validation::parse_number;

/// Paging as it arrives on the query string. Values are kept raw so that a
/// non-numeric page is reported as an invalid page, not a 422 from serde.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub(crate) struct PageQueryDto {
    pub(crate) page: Option<String>,
    pub(crate) size: Option<String>,
}

impl From<PageQueryDto> for PageQuery {
    fn from(dto: PageQueryDto) -> Self {
        PageQuery::new(
            parse_number(dto.page.as_deref()),
            parse_number(dto.size.as_deref()),
        )
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub(crate) struct SearchQueryDto {
    #[serde(default)]
    pub(crate) q: String,
}

/// Outcome of a write that may legitimately change nothing.
#[derive(Debug, Serialize, ToSchema)]
pub(crate) struct WriteResultDto {
    pub(crate) changed: bool,
}

/// 201 when a create wrote a row, 200 when an identical id was already there.
pub(crate) fn write_status(created: bool) -> StatusCode {
    if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    }
}

#[derive(Debug, Clone, Copy, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SearchMetadataDto {
    pub(crate) total: u64,
    pub(crate) took_ms: u64,
}

impl From<crate::domain::search::SearchMetadata> for SearchMetadataDto {
    fn from(value: crate::domain::search::SearchMetadata) -> Self {
        Self {
            total: value.total,
            took_ms: value.took_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::{PageQueryDto, write_status};
    use crate::application::pagination::PageQuery;

    #[test]
    fn lost_create_race_answers_ok_instead_of_created() {
        assert_eq!(write_status(true), StatusCode::CREATED);
        assert_eq!(write_status(false), StatusCode::OK);
    }

    #[test]
    fn raw_paging_is_parsed_and_garbage_becomes_absent() {
        let query = PageQuery::from(PageQueryDto {
            page: Some(" 2 ".to_string()),
            size: Some("ten".to_string()),
        });
        assert_eq!(query.page, Some(2));
        assert_eq!(query.size, None);

        let empty = PageQuery::from(PageQueryDto::default());
        assert_eq!(empty.page, None);
        assert_eq!(empty.size, None);
    }
}
