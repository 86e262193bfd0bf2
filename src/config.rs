//! Per-resource pagination settings.
//!
//! A [`PaginationConfig`] is built once with [`PaginationConfig::builder`] and
//! handed to the code that needs it; nothing reads pagination settings from
//! global state.
//!
//! ```rust
//! use crudcursor::{PaginationConfig, PaginationMode, SortDirection};
//!
//! let config = PaginationConfig::builder()
//!     .default_limit(50)
//!     .max_limit(200)
//!     .default_mode(PaginationMode::Cursor)
//!     .pagination_keys(["created_at", "id"])
//!     .default_direction(SortDirection::Desc)
//!     .build();
//!
//! assert_eq!(config.default_limit(), 50);
//! ```

use crate::models::PaginationMode;
use crate::sort::SortDirection;

pub const DEFAULT_LIMIT: u64 = 20;
pub const DEFAULT_MAX_LIMIT: u64 = 100;
pub const DEFAULT_PAGINATION_KEY: &str = "id";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    default_limit: u64,
    max_limit: u64,
    default_mode: PaginationMode,
    pagination_keys: Vec<String>,
    default_direction: SortDirection,
    content_range: bool,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_limit: DEFAULT_LIMIT,
            max_limit: DEFAULT_MAX_LIMIT,
            default_mode: PaginationMode::Offset,
            pagination_keys: vec![DEFAULT_PAGINATION_KEY.to_string()],
            default_direction: SortDirection::Asc,
            content_range: true,
        }
    }
}

impl PaginationConfig {
    #[must_use]
    pub fn builder() -> PaginationConfigBuilder {
        PaginationConfigBuilder::default()
    }

    /// Page size when the request names none.
    #[must_use]
    pub fn default_limit(&self) -> u64 {
        self.default_limit
    }

    /// Larger requested page sizes are clamped to this.
    #[must_use]
    pub fn max_limit(&self) -> u64 {
        self.max_limit
    }

    /// Mode used when the request carries neither `cursor` nor `page`/`offset`.
    #[must_use]
    pub fn default_mode(&self) -> PaginationMode {
        self.default_mode
    }

    /// Columns appended to every sort so each row has a unique position.
    #[must_use]
    pub fn pagination_keys(&self) -> &[String] {
        &self.pagination_keys
    }

    #[must_use]
    pub fn default_direction(&self) -> SortDirection {
        self.default_direction
    }

    /// Whether offset responses carry a `Content-Range` header.
    #[must_use]
    pub fn content_range(&self) -> bool {
        self.content_range
    }
}

#[derive(Debug, Clone, Default)]
pub struct PaginationConfigBuilder {
    config: PaginationConfig,
}

impl PaginationConfigBuilder {
    #[must_use]
    pub fn default_limit(mut self, limit: u64) -> Self {
        self.config.default_limit = limit;
        self
    }

    #[must_use]
    pub fn max_limit(mut self, limit: u64) -> Self {
        self.config.max_limit = limit;
        self
    }

    #[must_use]
    pub fn default_mode(mut self, mode: PaginationMode) -> Self {
        self.config.default_mode = mode;
        self
    }

    /// Replace the tie-break keys. An empty list keeps the current keys.
    #[must_use]
    pub fn pagination_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let keys: Vec<String> = keys.into_iter().map(Into::into).collect();
        if !keys.is_empty() {
            self.config.pagination_keys = keys;
        }
        self
    }

    #[must_use]
    pub fn default_direction(mut self, direction: SortDirection) -> Self {
        self.config.default_direction = direction;
        self
    }

    #[must_use]
    pub fn content_range(mut self, enabled: bool) -> Self {
        self.config.content_range = enabled;
        self
    }

    /// Finish the config. Limits are normalized so that
    /// `1 <= default_limit <= max_limit`.
    #[must_use]
    pub fn build(self) -> PaginationConfig {
        let mut config = self.config;
        config.max_limit = config.max_limit.max(1);
        config.default_limit = config.default_limit.clamp(1, config.max_limit);
        config
    }
}
