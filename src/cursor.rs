//! # Cursor tokens
//!
//! A cursor is the projection of the last row of a page onto the active sort
//! keys, encoded as URL-safe base64 (no padding) of a JSON object:
//!
//! ```text
//! {"age":30,"id":5}  ->  eyJhZ2UiOjMwLCJpZCI6NX0
//! ```
//!
//! Clients must treat the token as opaque. Decoding it against the same
//! [`SortSpec`] yields a [`CursorFilter`] that selects the rows strictly after
//! the projected row in sort order:
//!
//! ```text
//! age DESC, id ASC  ->  age < 30 OR (age = 30 AND id > 5)
//! ```
//!
//! `null` sort values order before every other value under `ASC` (and after
//! them under `DESC`), matching `SQLite` and `MySQL`.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::cmp::Ordering;
use std::fmt;

use crate::sort::{SortDirection, SortSpec};

/// Raised when a cursor token cannot be turned back into a resume point.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CursorDecodeError {
    /// Not valid URL-safe base64
    Encoding,
    /// Decoded bytes are not a JSON object of scalar values
    Payload,
    /// A sort key has no value in the cursor
    MissingKey(String),
    /// The cursor holds a key that is not part of the sort
    UnexpectedKey(String),
}

impl fmt::Display for CursorDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Encoding => write!(f, "Invalid cursor: not a valid token"),
            Self::Payload => write!(f, "Invalid cursor: malformed payload"),
            Self::MissingKey(key) => write!(f, "Invalid cursor: missing sort key '{key}'"),
            Self::UnexpectedKey(key) => {
                write!(f, "Invalid cursor: '{key}' is not part of the current sort")
            }
        }
    }
}

impl std::error::Error for CursorDecodeError {}

/// Encode the resume point after `last_row`.
///
/// `last_row` is projected onto exactly `sort_keys`. A key holding `null` is
/// projected as `null`; a key the row does not serialize at all has no resume
/// point. Returns `None`, meaning "no further results", when there is no row,
/// the row is not a non-empty JSON object, a sort key is absent from it, or
/// there are no sort keys. The same inputs always produce the same token.
pub fn serialize<T, I, S>(last_row: Option<&T>, sort_keys: I) -> Option<String>
where
    T: Serialize + ?Sized,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let Value::Object(fields) = serde_json::to_value(last_row?).ok()? else {
        return None;
    };
    if fields.is_empty() {
        return None;
    }

    let projection = sort_keys
        .into_iter()
        .map(|key| {
            let key = key.as_ref();
            fields.get(key).map(|value| (key.to_string(), value.clone()))
        })
        .collect::<Option<Map<String, Value>>>()?;
    if projection.is_empty() {
        return None;
    }

    let json = serde_json::to_vec(&Value::Object(projection)).ok()?;
    Some(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a token into the filter fragment "strictly after this row".
///
/// An absent or empty token is the first page and yields an empty filter.
///
/// # Errors
///
/// Returns [`CursorDecodeError`] when the token is not one `serialize` could
/// have produced for `sort`.
pub fn deserialize(token: Option<&str>, sort: &SortSpec) -> Result<CursorFilter, CursorDecodeError> {
    let Some(token) = token.map(str::trim).filter(|t| !t.is_empty()) else {
        return Ok(CursorFilter::default());
    };

    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| CursorDecodeError::Encoding)?;
    let Ok(Value::Object(mut fields)) = serde_json::from_slice::<Value>(&bytes) else {
        return Err(CursorDecodeError::Payload);
    };

    if let Some(extra) = fields.keys().find(|key| !sort.contains(key)) {
        return Err(CursorDecodeError::UnexpectedKey(extra.clone()));
    }

    let mut bounds = Vec::with_capacity(sort.len());
    for (column, direction) in sort.iter() {
        let value = fields
            .remove(column)
            .ok_or_else(|| CursorDecodeError::MissingKey(column.to_string()))?;
        if value.is_array() || value.is_object() {
            return Err(CursorDecodeError::Payload);
        }
        bounds.push(CursorBound {
            column: column.to_string(),
            direction,
            value,
        });
    }

    Ok(CursorFilter { bounds })
}

/// One sort key of a resume point.
#[derive(Debug, Clone, PartialEq)]
pub struct CursorBound {
    pub column: String,
    pub direction: SortDirection,
    /// Scalar JSON value of the last row's column
    pub value: Value,
}

/// Lexicographic "strictly after" filter over the sort keys.
///
/// The first bound is the primary key of the comparison; later bounds only
/// break ties. An empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CursorFilter {
    bounds: Vec<CursorBound>,
}

impl CursorFilter {
    #[must_use]
    pub fn bounds(&self) -> &[CursorBound] {
        &self.bounds
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Evaluate the filter against a row serialized as a JSON object.
    ///
    /// A row missing a bound column, or holding a value of a different type,
    /// does not match.
    #[must_use]
    pub fn matches(&self, row: &Value) -> bool {
        if self.bounds.is_empty() {
            return true;
        }

        for bound in &self.bounds {
            let Some(actual) = row.get(&bound.column) else {
                return false;
            };
            match compare_values(actual, &bound.value) {
                Some(Ordering::Equal) => {}
                Some(ordering) => {
                    return match bound.direction {
                        SortDirection::Asc => ordering == Ordering::Greater,
                        SortDirection::Desc => ordering == Ordering::Less,
                    };
                }
                None => return false,
            }
        }

        // Equal on every key: this is the cursor row itself
        false
    }
}

/// Total order over scalar JSON values of the same kind, `null` first.
pub(crate) fn compare_values(left: &Value, right: &Value) -> Option<Ordering> {
    match (left, right) {
        (Value::Null, Value::Null) => Some(Ordering::Equal),
        (Value::Null, _) => Some(Ordering::Less),
        (_, Value::Null) => Some(Ordering::Greater),
        (Value::Bool(l), Value::Bool(r)) => Some(l.cmp(r)),
        (Value::Number(l), Value::Number(r)) => compare_numbers(l, r),
        (Value::String(l), Value::String(r)) => Some(l.cmp(r)),
        _ => None,
    }
}

fn compare_numbers(left: &Number, right: &Number) -> Option<Ordering> {
    if let (Some(l), Some(r)) = (left.as_i64(), right.as_i64()) {
        return Some(l.cmp(&r));
    }
    if let (Some(l), Some(r)) = (left.as_u64(), right.as_u64()) {
        return Some(l.cmp(&r));
    }
    left.as_f64()?.partial_cmp(&right.as_f64()?)
}
