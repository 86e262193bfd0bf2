//! # crudcursor
//!
//! Offset and cursor pagination for list endpoints built with Axum and Sea-ORM.
//!
//! Every list response has the same envelope:
//!
//! ```json
//! { "data": [ ... ], "metadata": { "total": 42, "totalPages": 3, "limit": 20, "nextCursor": "eyJpZCI6MjB9" } }
//! ```
//!
//! Cursor pagination resumes strictly after the last row of the previous
//! page, using the active sort keys as a composite key. The cursor is an
//! opaque token; `nextCursor` is `null` when there are no further rows.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use crudcursor::{CursorResource, PaginationConfig, PaginationMode, router};
//!
//! pub struct People;
//!
//! impl CursorResource for People {
//!     type EntityType = person::Entity;
//!     type ColumnType = person::Column;
//!     type ListModel = person::Model;
//!
//!     const RESOURCE_NAME_PLURAL: &'static str = "people";
//!
//!     fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)> {
//!         vec![("id", person::Column::Id), ("age", person::Column::Age)]
//!     }
//!
//!     fn pagination_config() -> PaginationConfig {
//!         PaginationConfig::builder().default_mode(PaginationMode::Cursor).build()
//!     }
//! }
//!
//! let app = axum::Router::new().nest("/people", router::<People>(&db));
//! // GET /people?cursor=&limit=10&sort=age:desc
//! ```
//!
//! The building blocks are usable without Sea-ORM as well:
//!
//! ```rust
//! use crudcursor::{SortDirection, SortSpec, cursor};
//! use serde_json::json;
//!
//! let sort = SortSpec::new()
//!     .with("age", SortDirection::Desc)
//!     .with("id", SortDirection::Asc);
//! let token = cursor::serialize(Some(&json!({"age": 30, "id": 5})), sort.keys()).unwrap();
//! let after = cursor::deserialize(Some(&token), &sort).unwrap();
//!
//! assert!(after.matches(&json!({"age": 29, "id": 1})));
//! assert!(after.matches(&json!({"age": 30, "id": 6})));
//! assert!(!after.matches(&json!({"age": 30, "id": 5})));
//! ```

pub mod config;
pub mod cursor;
pub mod errors;
pub mod keyset;
pub mod models;
pub mod pagination;
pub mod query;
pub mod routes;
pub mod sort;
pub mod traits;

pub use config::{PaginationConfig, PaginationConfigBuilder};
pub use cursor::{CursorBound, CursorDecodeError, CursorFilter};
pub use errors::ApiError;
pub use keyset::keyset_condition;
pub use models::{
    CursorMetadata, OffsetMetadata, PaginationMetadata, PaginationMode, PaginationQuery,
    PaginationRequest, PaginationResponse,
};
pub use pagination::{build_metadata, calculate_content_range, page_count, paginate};
pub use query::ResolvedPagination;
pub use routes::{get_many, router};
pub use sort::{SortDirection, SortSpec, parse_sort};
pub use traits::CursorResource;
