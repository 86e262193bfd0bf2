use crate::config::PaginationConfig;
use crate::cursor::{self, CursorFilter};
use crate::errors::ApiError;
use crate::models::{PaginationMode, PaginationQuery, PaginationRequest};
use crate::sort::{SortSpec, parse_sort};

/// A list request after validation: what to fetch and how to resume.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPagination {
    request: PaginationRequest,
    take: u64,
    sort: SortSpec,
    filter: CursorFilter,
}

impl ResolvedPagination {
    #[must_use]
    pub fn request(&self) -> &PaginationRequest {
        &self.request
    }

    /// Page size
    #[must_use]
    pub fn take(&self) -> u64 {
        self.take
    }

    #[must_use]
    pub fn sort(&self) -> &SortSpec {
        &self.sort
    }

    /// Decoded resume point; empty on the first page and in offset mode.
    #[must_use]
    pub fn filter(&self) -> &CursorFilter {
        &self.filter
    }

    /// Rows to skip, offset mode only.
    #[must_use]
    pub fn offset(&self) -> Option<u64> {
        match self.request {
            PaginationRequest::Offset { offset, .. } => Some(offset),
            PaginationRequest::Cursor { .. } => None,
        }
    }
}

impl PaginationQuery {
    /// Validate the query parameters against `config`.
    ///
    /// `sortable` lists the column names the client may sort by.
    ///
    /// # Errors
    ///
    /// Returns `400 Bad Request` for `page=0`, `limit=0` or a cursor that does
    /// not decode against the resolved sort.
    pub fn resolve(
        &self,
        config: &PaginationConfig,
        sortable: &[&str],
    ) -> Result<ResolvedPagination, ApiError> {
        let take = match self.limit {
            Some(0) => return Err(ApiError::bad_request("limit must be a positive integer")),
            Some(limit) => limit.min(config.max_limit()),
            None => config.default_limit(),
        };
        if self.page == Some(0) {
            return Err(ApiError::bad_request("page must be 1 or greater"));
        }

        let sort = parse_sort(self.sort.as_deref(), self.order.as_deref(), sortable, config);

        let mode = if self.cursor.is_some() {
            PaginationMode::Cursor
        } else if self.page.is_some() || self.offset.is_some() {
            PaginationMode::Offset
        } else {
            config.default_mode()
        };

        let (request, filter) = match mode {
            PaginationMode::Offset => {
                let (page, offset) = match (self.page, self.offset) {
                    (Some(page), Some(offset)) => (page, offset),
                    (Some(page), None) => (page, (page - 1).saturating_mul(take)),
                    (None, Some(offset)) => (offset / take + 1, offset),
                    (None, None) => (1, 0),
                };
                (PaginationRequest::offset(page, offset), CursorFilter::default())
            }
            PaginationMode::Cursor => {
                let token = self
                    .cursor
                    .as_deref()
                    .map(str::trim)
                    .filter(|token| !token.is_empty());
                let filter = cursor::deserialize(token, &sort).inspect_err(|err| {
                    tracing::debug!(error = %err, "Rejected pagination cursor");
                })?;
                (PaginationRequest::cursor(token.map(str::to_string)), filter)
            }
        };

        Ok(ResolvedPagination {
            request,
            take,
            sort,
            filter,
        })
    }
}
