//! In-memory fakes for the storage traits (testing only).
//!
//! No real backend (DynamoDB, SurrealDB, etc.) is implemented in this
//! crate — per the core spec, storage is an external collaborator.

use std::collections::HashMap;

use async_trait::async_trait;
use pharos_register::{Register, TableItem};
use tokio::sync::Mutex;
use tracing::debug;

use crate::storage_traits::{MetadataStore, RegisterPageStore, StoreResult};

/// In-memory [`MetadataStore`] backed by a `HashMap<(pk, sk), TableItem>`.
#[derive(Debug, Default)]
pub struct InMemoryMetadataStore {
    items: Mutex<HashMap<(String, String), TableItem>>,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn get_item(&self, pk: &str, sk: &str) -> StoreResult<Option<TableItem>> {
        debug!(pk, sk, "getting item");
        let items = self.items.lock().await;
        Ok(items.get(&(pk.to_string(), sk.to_string())).cloned())
    }

    async fn put_item(&self, item: TableItem) -> StoreResult<()> {
        debug!(pk = %item.pk, sk = %item.sk, "putting item");
        let mut items = self.items.lock().await;
        items.insert((item.pk.clone(), item.sk.clone()), item);
        Ok(())
    }

    async fn delete_item(&self, pk: &str, sk: &str) -> StoreResult<()> {
        debug!(pk, sk, "deleting item");
        let mut items = self.items.lock().await;
        items.remove(&(pk.to_string(), sk.to_string()));
        Ok(())
    }
}

/// In-memory [`RegisterPageStore`] backed by a
/// `HashMap<(project_id, dataset_id, page_key), Register>`.
#[derive(Debug, Default)]
pub struct InMemoryRegisterPageStore {
    pages: Mutex<HashMap<(String, String, String), Register>>,
}

impl InMemoryRegisterPageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RegisterPageStore for InMemoryRegisterPageStore {
    async fn get_page(
        &self,
        project_id: &str,
        dataset_id: &str,
        page_key: &str,
    ) -> StoreResult<Option<Register>> {
        debug!(project_id, dataset_id, page_key, "getting register page");
        let pages = self.pages.lock().await;
        Ok(pages
            .get(&(
                project_id.to_string(),
                dataset_id.to_string(),
                page_key.to_string(),
            ))
            .cloned())
    }

    async fn put_page(
        &self,
        project_id: &str,
        dataset_id: &str,
        page_key: &str,
        register: Register,
    ) -> StoreResult<()> {
        debug!(project_id, dataset_id, page_key, "putting register page");
        let mut pages = self.pages.lock().await;
        pages.insert(
            (
                project_id.to_string(),
                dataset_id.to_string(),
                page_key.to_string(),
            ),
            register,
        );
        Ok(())
    }

    async fn list_pages(&self, project_id: &str, dataset_id: &str) -> StoreResult<Vec<String>> {
        debug!(project_id, dataset_id, "listing register pages");
        let pages = self.pages.lock().await;
        let mut keys: Vec<String> = pages
            .keys()
            .filter(|(pid, did, _)| pid == project_id && did == dataset_id)
            .map(|(_, _, page_key)| page_key.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}

