use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};
use utoipa::{IntoParams, ToSchema};

/// Query parameters for paginated list endpoints.
///
/// # Offset pagination
/// Use `page` (1-based) and/or `offset` together with `limit`, for example:
/// `?page=2&limit=20` or `?offset=40&limit=20`.
///
/// # Cursor pagination
/// Send `cursor` on every request. Leave it empty (`?cursor=`) on the first
/// page and pass back the `nextCursor` value from the previous response
/// afterwards. Cursors are opaque.
///
/// # Sorting
/// `sort` accepts a comma list (`age:desc,id`) or a JSON array
/// (`["age","DESC"]`). `order` sets the direction for columns that name none.
#[serde_as]
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number for offset pagination (1-based).
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(example = 1)]
    pub page: Option<u64>,
    /// Maximum number of rows to return. `take` is accepted as an alias.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default, alias = "take")]
    #[param(example = 20)]
    pub limit: Option<u64>,
    /// Number of rows to skip for offset pagination.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    #[param(example = 0)]
    pub offset: Option<u64>,
    /// Opaque cursor from the previous response's `metadata.nextCursor`.
    #[serde(default)]
    pub cursor: Option<String>,
    /// Sort columns, e.g. `age:desc,id` or `["age","DESC"]`.
    #[serde(default)]
    #[param(example = "age:desc,id")]
    pub sort: Option<String>,
    /// Default sort direction (ASC or DESC).
    #[serde(default)]
    #[param(example = "ASC")]
    pub order: Option<String>,
}

/// Which kind of pagination a request uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum PaginationMode {
    Offset,
    Cursor,
}

/// A resolved pagination request. Exactly one variant per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum PaginationRequest {
    Offset {
        /// 1-based page number
        page: u64,
        offset: u64,
    },
    Cursor {
        /// `None` on the first page
        #[serde(rename = "nextCursor")]
        next_cursor: Option<String>,
    },
}

impl PaginationRequest {
    #[must_use]
    pub fn offset(page: u64, offset: u64) -> Self {
        Self::Offset { page, offset }
    }

    #[must_use]
    pub fn cursor(next_cursor: Option<String>) -> Self {
        Self::Cursor { next_cursor }
    }

    #[must_use]
    pub fn mode(&self) -> PaginationMode {
        match self {
            Self::Offset { .. } => PaginationMode::Offset,
            Self::Cursor { .. } => PaginationMode::Cursor,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OffsetMetadata {
    pub page: u64,
    pub pages: u64,
    pub total: u64,
    pub offset: u64,
    /// `null` once there are no further rows
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CursorMetadata {
    pub total: u64,
    pub total_pages: u64,
    pub limit: u64,
    /// `null` once there are no further rows
    pub next_cursor: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum PaginationMetadata {
    Offset(OffsetMetadata),
    Cursor(CursorMetadata),
}

impl PaginationMetadata {
    #[must_use]
    pub fn next_cursor(&self) -> Option<&str> {
        match self {
            Self::Offset(meta) => meta.next_cursor.as_deref(),
            Self::Cursor(meta) => meta.next_cursor.as_deref(),
        }
    }
}

/// `{ "data": [...], "metadata": {...} }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationResponse<T> {
    pub data: Vec<T>,
    pub metadata: PaginationMetadata,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_wire_format() {
        let offset = PaginationRequest::offset(2, 20);
        assert_eq!(
            serde_json::to_value(&offset).unwrap(),
            json!({"type": "OFFSET", "page": 2, "offset": 20})
        );

        let cursor = PaginationRequest::cursor(None);
        assert_eq!(
            serde_json::to_value(&cursor).unwrap(),
            json!({"type": "CURSOR", "nextCursor": null})
        );
    }

    #[test]
    fn test_request_rejects_unknown_type() {
        let parsed = serde_json::from_value::<PaginationRequest>(json!({"type": "KEYSET"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_metadata_untagged_round_trip() {
        let cursor = PaginationMetadata::Cursor(CursorMetadata {
            total: 42,
            total_pages: 3,
            limit: 20,
            next_cursor: Some("abc".into()),
        });
        let value = serde_json::to_value(&cursor).unwrap();
        assert_eq!(
            value,
            json!({"total": 42, "totalPages": 3, "limit": 20, "nextCursor": "abc"})
        );
        let back: PaginationMetadata = serde_json::from_value(value).unwrap();
        assert_eq!(back, cursor);
    }

    #[test]
    fn test_offset_metadata_keeps_null_cursor() {
        let meta = PaginationMetadata::Offset(OffsetMetadata {
            page: 1,
            pages: 1,
            total: 0,
            offset: 0,
            next_cursor: None,
        });
        let value = serde_json::to_value(&meta).unwrap();
        assert!(value.get("nextCursor").is_some_and(serde_json::Value::is_null));
    }
}
