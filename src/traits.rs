use async_trait::async_trait;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect,
};
use serde::Serialize;

use crate::config::PaginationConfig;
use crate::errors::ApiError;
use crate::keyset::{column_named, keyset_condition};
use crate::models::PaginationResponse;
use crate::pagination::paginate;
use crate::query::ResolvedPagination;

/// A Sea-ORM entity exposed as a paginated list.
///
/// The cursor is projected from the serialized `ListModel`, so every column
/// that can appear in a sort (including the configured pagination keys) must
/// be listed in [`CursorResource::sortable_columns`] and serialized under
/// the same name by `ListModel`.
#[async_trait]
pub trait CursorResource: Sized + Send + Sync + 'static
where
    Self::EntityType: EntityTrait + Sync,
    <Self::EntityType as EntityTrait>::Model: Sync,
{
    type EntityType: EntityTrait + Sync;
    type ColumnType: ColumnTrait + Copy + std::fmt::Debug + Send + Sync + 'static;
    type ListModel: From<<Self::EntityType as EntityTrait>::Model>
        + Serialize
        + Send
        + Sync
        + 'static;

    const RESOURCE_NAME_PLURAL: &'static str;

    /// API names and columns the client may sort by.
    fn sortable_columns() -> Vec<(&'static str, Self::ColumnType)>;

    #[must_use]
    fn pagination_config() -> PaginationConfig {
        PaginationConfig::default()
    }

    /// Number of rows in the whole collection.
    ///
    /// # Errors
    ///
    /// Propagates the database error.
    async fn total_count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        PaginatorTrait::count(Self::EntityType::find(), db).await
    }

    /// Fetch one page and wrap it in the response envelope.
    ///
    /// `total` counts the whole collection, not just the rows after the cursor.
    ///
    /// # Errors
    ///
    /// `400` when the cursor names a column this resource cannot sort by,
    /// `500` on database errors or a sort key missing from
    /// [`CursorResource::sortable_columns`].
    async fn get_page(
        db: &DatabaseConnection,
        pagination: &ResolvedPagination,
    ) -> Result<PaginationResponse<Self::ListModel>, ApiError> {
        let columns = Self::sortable_columns();
        let keyset = keyset_condition(pagination.filter(), &columns)?;

        let mut query = Self::EntityType::find().filter(keyset);
        for (name, direction) in pagination.sort().iter() {
            let Some(column) = column_named(name, &columns) else {
                return Err(ApiError::internal(
                    "Failed to build page",
                    Some(format!(
                        "sort key '{name}' is not a sortable column of {}",
                        Self::RESOURCE_NAME_PLURAL
                    )),
                ));
            };
            query = query.order_by(column, direction.into());
        }
        if let Some(offset) = pagination.offset() {
            query = query.offset(offset);
        }

        let models = query.limit(pagination.take()).all(db).await?;
        let total = Self::total_count(db).await?;

        tracing::debug!(
            resource = Self::RESOURCE_NAME_PLURAL,
            returned = models.len(),
            total,
            "Fetched page"
        );

        let data: Vec<Self::ListModel> = models.into_iter().map(Self::ListModel::from).collect();
        Ok(paginate(
            data,
            pagination.request(),
            pagination.sort(),
            pagination.take(),
            total,
        ))
    }
}
