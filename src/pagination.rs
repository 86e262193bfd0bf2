use hyper::HeaderMap;
use serde::Serialize;

use crate::cursor;
use crate::models::{
    CursorMetadata, OffsetMetadata, PaginationMetadata, PaginationRequest, PaginationResponse,
};
use crate::sort::SortSpec;

/// `ceil(total / take)`, never below 1.
#[must_use]
pub fn page_count(total: u64, take: u64) -> u64 {
    if take == 0 {
        return 1;
    }
    total.div_ceil(take).max(1)
}

/// Compute the response metadata for one page.
///
/// A page holding fewer than `take` rows is the final page: its `nextCursor`
/// is `null` whatever `next_cursor` says.
#[must_use]
pub fn build_metadata(
    pagination: &PaginationRequest,
    take: u64,
    data_length: usize,
    total: u64,
    next_cursor: Option<String>,
) -> PaginationMetadata {
    let returned = u64::try_from(data_length).unwrap_or(u64::MAX);
    let next_cursor = if returned < take { None } else { next_cursor };

    match pagination {
        PaginationRequest::Offset { page, offset } => PaginationMetadata::Offset(OffsetMetadata {
            page: *page,
            pages: page_count(total, take),
            total,
            offset: *offset,
            next_cursor,
        }),
        PaginationRequest::Cursor { .. } => PaginationMetadata::Cursor(CursorMetadata {
            total,
            total_pages: page_count(total, take),
            limit: take,
            next_cursor,
        }),
    }
}

/// Wrap one page of rows in the `{ data, metadata }` envelope.
///
/// The next cursor is taken from the last row of `data`, projected onto the
/// keys of `sort`.
pub fn paginate<T: Serialize>(
    data: Vec<T>,
    pagination: &PaginationRequest,
    sort: &SortSpec,
    take: u64,
    total: u64,
) -> PaginationResponse<T> {
    let next_cursor = cursor::serialize(data.last(), sort.keys());
    let metadata = build_metadata(pagination, take, data.len(), total, next_cursor);
    PaginationResponse { data, metadata }
}

/// Sanitize resource name by removing control characters for HTTP headers
fn sanitize_resource_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_ascii() && !c.is_ascii_control())
        .collect()
}

/// Build the `Content-Range` header for an offset page.
///
/// # Arguments
///
/// * `offset` - Index of the first returned row.
/// * `returned` - Number of rows in the page.
/// * `total_count` - The total number of rows available.
/// * `resource_name` - The name of the resource being paginated.
///
/// An empty page is written as `<resource> */<total>`.
#[must_use]
pub fn calculate_content_range(
    offset: u64,
    returned: usize,
    total_count: u64,
    resource_name: &str,
) -> HeaderMap {
    let safe_name = sanitize_resource_name(resource_name);
    let returned = u64::try_from(returned).unwrap_or(u64::MAX);

    let content_range = if returned == 0 {
        format!("{safe_name} */{total_count}")
    } else {
        let last = offset.saturating_add(returned - 1);
        format!("{safe_name} {offset}-{last}/{total_count}")
    };

    let mut headers = HeaderMap::new();
    if let Ok(value) = content_range.parse() {
        headers.insert("Content-Range", value);
    }
    headers
}
