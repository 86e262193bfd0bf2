use sea_orm::sea_query::Order;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::PaginationConfig;

/// Direction of one sort key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc` in any case.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            _ => None,
        }
    }
}

impl From<SortDirection> for Order {
    fn from(direction: SortDirection) -> Self {
        match direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        }
    }
}

/// Ordered column → direction mapping. Insertion order is the tie-break order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SortSpec {
    entries: Vec<(String, SortDirection)>,
}

impl SortSpec {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`SortSpec::push`].
    #[must_use]
    pub fn with(mut self, column: impl Into<String>, direction: SortDirection) -> Self {
        self.push(column, direction);
        self
    }

    /// Append a column. A column already present keeps its first direction.
    pub fn push(&mut self, column: impl Into<String>, direction: SortDirection) -> &mut Self {
        let column = column.into();
        if !self.contains(&column) {
            self.entries.push((column, direction));
        }
        self
    }

    #[must_use]
    pub fn contains(&self, column: &str) -> bool {
        self.entries.iter().any(|(name, _)| name == column)
    }

    #[must_use]
    pub fn direction_of(&self, column: &str) -> Option<SortDirection> {
        self.entries
            .iter()
            .find(|(name, _)| name == column)
            .map(|&(_, direction)| direction)
    }

    /// Column names in tie-break order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SortDirection)> {
        self.entries
            .iter()
            .map(|(name, direction)| (name.as_str(), *direction))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Split the `sort` parameter into `(column, explicit direction)` pairs.
///
/// Accepts a JSON array (`["age","DESC","id","ASC"]`) or a comma list
/// (`age:desc,id`). Unparseable JSON yields no columns.
fn split_sort_param(sort: &str) -> Vec<(String, Option<SortDirection>)> {
    let sort = sort.trim();
    if sort.starts_with('[') {
        let Ok(parts) = serde_json::from_str::<Vec<String>>(sort) else {
            tracing::debug!(sort = %sort, "Ignoring malformed JSON sort parameter");
            return Vec::new();
        };
        return parts
            .chunks(2)
            .map(|pair| {
                let direction = pair.get(1).and_then(|d| SortDirection::parse(d));
                (pair[0].trim().to_string(), direction)
            })
            .collect();
    }

    sort.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| match part.split_once(':') {
            Some((column, direction)) => {
                (column.trim().to_string(), SortDirection::parse(direction))
            }
            None => (part.to_string(), None),
        })
        .collect()
}

/// Build the [`SortSpec`] for a list request.
///
/// Requested columns outside `sortable` are dropped. The configured
/// pagination keys are appended as tie-breakers so that every row has a
/// unique position, which cursor pagination relies on.
#[must_use]
pub fn parse_sort(
    sort: Option<&str>,
    order: Option<&str>,
    sortable: &[&str],
    config: &PaginationConfig,
) -> SortSpec {
    let default_direction = order
        .and_then(SortDirection::parse)
        .unwrap_or(config.default_direction());

    let mut spec = SortSpec::new();
    for (column, direction) in sort.map(split_sort_param).unwrap_or_default() {
        let is_key = config.pagination_keys().iter().any(|key| *key == column);
        if !is_key && !sortable.contains(&column.as_str()) {
            tracing::debug!(column = %column, "Dropping non-sortable column from sort");
            continue;
        }
        spec.push(column, direction.unwrap_or(default_direction));
    }

    let tie_break = spec
        .entries
        .last()
        .map_or(default_direction, |&(_, direction)| direction);
    for key in config.pagination_keys() {
        spec.push(key.clone(), tie_break);
    }

    spec
}

#[cfg(test)]
mod tests {
    use super::*;

    const SORTABLE: &[&str] = &["id", "name", "age"];

    #[test]
    fn test_default_sort_is_pagination_key() {
        let spec = parse_sort(None, None, SORTABLE, &PaginationConfig::default());
        assert_eq!(spec.iter().collect::<Vec<_>>(), vec![("id", SortDirection::Asc)]);
    }

    #[test]
    fn test_comma_list_with_directions() {
        let spec = parse_sort(
            Some("age:desc,id:asc"),
            None,
            SORTABLE,
            &PaginationConfig::default(),
        );
        assert_eq!(
            spec.iter().collect::<Vec<_>>(),
            vec![("age", SortDirection::Desc), ("id", SortDirection::Asc)]
        );
    }

    #[test]
    fn test_react_admin_json_format() {
        let spec = parse_sort(
            Some(r#"["name","DESC"]"#),
            None,
            SORTABLE,
            &PaginationConfig::default(),
        );
        // id inherits the last requested direction
        assert_eq!(
            spec.iter().collect::<Vec<_>>(),
            vec![("name", SortDirection::Desc), ("id", SortDirection::Desc)]
        );
    }

    #[test]
    fn test_order_param_sets_default_direction() {
        let spec = parse_sort(
            Some("name"),
            Some("desc"),
            SORTABLE,
            &PaginationConfig::default(),
        );
        assert_eq!(spec.direction_of("name"), Some(SortDirection::Desc));
    }

    #[test]
    fn test_unknown_columns_are_dropped() {
        let spec = parse_sort(
            Some("password,age"),
            None,
            SORTABLE,
            &PaginationConfig::default(),
        );
        assert!(!spec.contains("password"));
        assert_eq!(spec.keys().collect::<Vec<_>>(), vec!["age", "id"]);
    }

    #[test]
    fn test_malformed_json_falls_back_to_keys() {
        let spec = parse_sort(Some("[\"age\""), None, SORTABLE, &PaginationConfig::default());
        assert_eq!(spec.keys().collect::<Vec<_>>(), vec!["id"]);
    }

    #[test]
    fn test_duplicate_columns_keep_first_direction() {
        let spec = SortSpec::new()
            .with("age", SortDirection::Desc)
            .with("age", SortDirection::Asc);
        assert_eq!(spec.len(), 1);
        assert_eq!(spec.direction_of("age"), Some(SortDirection::Desc));
    }

    #[test]
    fn test_direction_parse_is_case_insensitive() {
        assert_eq!(SortDirection::parse("Desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse(" asc "), Some(SortDirection::Asc));
        assert_eq!(SortDirection::parse("sideways"), None);
    }
}
