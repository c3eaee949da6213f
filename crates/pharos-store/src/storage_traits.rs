//! Storage trait definitions consumed, not implemented, by `pharos-register`.
//!
//! - `MetadataStore`: a single-table key/value store addressed by `(pk, sk)`,
//!   holding `User`/`Project`/`Dataset` table items.
//! - `RegisterPageStore`: paginated storage for one dataset's register,
//!   addressed by `(project_id, dataset_id, page_key)`.
//!
//! Both traits are async and backend-agnostic. In-memory fakes are provided
//! for testing via the `fakes` module; no real backend is implemented here —
//! per the core spec, storage is an external collaborator.

use async_trait::async_trait;
use pharos_register::{Register, TableItem};

use crate::error::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Single-table key/value store for `User`/`Project`/`Dataset` metadata,
/// addressed by partition key `pk` and sort key `sk`.
#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Fetch an item by its partition/sort key. `None` if absent.
    async fn get_item(&self, pk: &str, sk: &str) -> StoreResult<Option<TableItem>>;

    /// Insert or overwrite an item.
    async fn put_item(&self, item: TableItem) -> StoreResult<()>;

    /// Delete an item. No-op if absent.
    async fn delete_item(&self, pk: &str, sk: &str) -> StoreResult<()>;
}

/// Paginated storage for one dataset's register, keyed by an opaque
/// `page_key` (e.g. a shard index or cursor token).
#[async_trait]
pub trait RegisterPageStore: Send + Sync {
    /// Fetch one page of a dataset's register. `None` if the page doesn't exist.
    async fn get_page(
        &self,
        project_id: &str,
        dataset_id: &str,
        page_key: &str,
    ) -> StoreResult<Option<Register>>;

    /// Insert or overwrite one page of a dataset's register.
    async fn put_page(
        &self,
        project_id: &str,
        dataset_id: &str,
        page_key: &str,
        register: Register,
    ) -> StoreResult<()>;

    /// List the page keys stored for a dataset, in storage order.
    async fn list_pages(&self, project_id: &str, dataset_id: &str) -> StoreResult<Vec<String>>;
}
