use sea_orm::{ColumnTrait, Condition, sea_query::Expr};
use serde_json::Value;

use crate::cursor::{CursorBound, CursorDecodeError, CursorFilter};
use crate::sort::SortDirection;

/// Find a column by its API name.
pub(crate) fn column_named<C>(name: &str, columns: &[(&str, C)]) -> Option<C>
where
    C: ColumnTrait + Copy,
{
    columns
        .iter()
        .find(|&&(col_name, _)| col_name == name)
        .map(|&(_, col)| col)
}

/// Translate a [`CursorFilter`] into a `WHERE` condition on `columns`.
///
/// For bounds `k1..kn` this builds
/// `k1 op v1 OR (k1 = v1 AND k2 op v2) OR ...` where `op` is `>` for `ASC`
/// and `<` for `DESC`. An empty filter yields an unconstrained condition.
///
/// # Errors
///
/// Returns [`CursorDecodeError::UnexpectedKey`] when a bound names a column
/// that is not in `columns`, and [`CursorDecodeError::Payload`] for
/// non-scalar values.
pub fn keyset_condition<C>(
    filter: &CursorFilter,
    columns: &[(&str, C)],
) -> Result<Condition, CursorDecodeError>
where
    C: ColumnTrait + Copy,
{
    if filter.is_empty() {
        return Ok(Condition::all());
    }

    let resolved = filter
        .bounds()
        .iter()
        .map(|bound| {
            column_named(&bound.column, columns)
                .map(|column| (column, bound))
                .ok_or_else(|| CursorDecodeError::UnexpectedKey(bound.column.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut condition = Condition::any();
    for (i, &(column, bound)) in resolved.iter().enumerate() {
        let mut branch = Condition::all();
        for &(tied_column, tied) in &resolved[..i] {
            branch = branch.add(equal_to(tied_column, &tied.value)?);
        }
        condition = condition.add(branch.add(strictly_after(column, bound)?));
    }

    Ok(condition)
}

fn scalar(value: &Value) -> Result<Option<sea_orm::Value>, CursorDecodeError> {
    match value {
        Value::Null => Ok(None),
        Value::Bool(b) => Ok(Some((*b).into())),
        Value::Number(n) => n
            .as_i64()
            .map(sea_orm::Value::from)
            .or_else(|| n.as_u64().map(sea_orm::Value::from))
            .or_else(|| n.as_f64().map(sea_orm::Value::from))
            .map(Some)
            .ok_or(CursorDecodeError::Payload),
        Value::String(s) => Ok(Some(s.clone().into())),
        Value::Array(_) | Value::Object(_) => Err(CursorDecodeError::Payload),
    }
}

fn equal_to<C: ColumnTrait>(column: C, value: &Value) -> Result<Condition, CursorDecodeError> {
    Ok(match scalar(value)? {
        Some(v) => Condition::all().add(column.eq(v)),
        None => Condition::all().add(column.is_null()),
    })
}

// Nulls sort first under ASC and last under DESC.
fn strictly_after<C: ColumnTrait>(
    column: C,
    bound: &CursorBound,
) -> Result<Condition, CursorDecodeError> {
    let value = scalar(&bound.value)?;
    Ok(match (bound.direction, value) {
        (SortDirection::Asc, Some(v)) => Condition::all().add(column.gt(v)),
        (SortDirection::Asc, None) => Condition::all().add(column.is_not_null()),
        (SortDirection::Desc, Some(v)) => Condition::any()
            .add(column.lt(v))
            .add(column.is_null()),
        (SortDirection::Desc, None) => Condition::all().add(Expr::cust("1 = 0")),
    })
}
