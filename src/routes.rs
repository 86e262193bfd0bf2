use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use hyper::HeaderMap;
use sea_orm::DatabaseConnection;

use crate::errors::ApiError;
use crate::models::{PaginationMetadata, PaginationQuery, PaginationResponse};
use crate::pagination::calculate_content_range;
use crate::traits::CursorResource;

/// `GET /` for a [`CursorResource`].
///
/// # Errors
///
/// `400` for invalid pagination parameters or cursors, `500` on database
/// failures.
pub async fn get_many<T>(
    Query(params): Query<PaginationQuery>,
    State(db): State<DatabaseConnection>,
) -> Result<(HeaderMap, Json<PaginationResponse<T::ListModel>>), ApiError>
where
    T: CursorResource,
{
    let config = T::pagination_config();
    let sortable: Vec<&str> = T::sortable_columns().iter().map(|&(name, _)| name).collect();
    let pagination = params.resolve(&config, &sortable)?;

    let response = T::get_page(&db, &pagination).await?;

    let headers = match &response.metadata {
        PaginationMetadata::Offset(meta) if config.content_range() => calculate_content_range(
            meta.offset,
            response.data.len(),
            meta.total,
            T::RESOURCE_NAME_PLURAL,
        ),
        _ => HeaderMap::new(),
    };

    Ok((headers, Json(response)))
}

/// Router serving [`get_many`] at `/`, ready to be nested under the
/// resource's path.
pub fn router<T>(db: &DatabaseConnection) -> Router
where
    T: CursorResource,
{
    Router::new()
        .route("/", get(get_many::<T>))
        .with_state(db.clone())
}
