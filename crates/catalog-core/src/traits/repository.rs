//! Generic record-store trait for catalog resources.

use async_trait::async_trait;
use serde::Serialize;

use crate::result::AppResult;
use crate::types::pagination::{PageRequest, PageResponse};

/// CRUD operations shared by the catalog resources.
///
/// Resource-specific queries (filters, joins, ownership checks) live on the
/// concrete repository structs.
#[async_trait]
pub trait Repository: Send + Sync + 'static {
    /// Row type returned by the store.
    type Entity: Serialize + Send + Sync + 'static;
    /// Primary key type.
    type Id: Copy + Send + Sync + 'static;
    /// Input accepted by [`Repository::create`].
    type Create: Send + Sync;
    /// Partial update accepted by [`Repository::update`].
    type Update: Send + Sync;

    /// Find a record by its primary key.
    async fn find_by_id(&self, id: Self::Id) -> AppResult<Option<Self::Entity>>;

    /// List records, newest first.
    async fn find_all(&self, page: &PageRequest) -> AppResult<PageResponse<Self::Entity>>;

    /// Insert a record and return it.
    async fn create(&self, input: &Self::Create) -> AppResult<Self::Entity>;

    /// Apply a partial update. Returns `None` when the record does not exist.
    async fn update(&self, id: Self::Id, patch: &Self::Update)
    -> AppResult<Option<Self::Entity>>;

    /// Delete a record. Returns `true` if a row was removed.
    async fn delete(&self, id: Self::Id) -> AppResult<bool>;
}
