//! Exercises the in-memory fakes against the `MetadataStore` and
//! `RegisterPageStore` trait contracts: put/get/delete round-trip.

use pharos_register::{Record, Register, TableItem};
use pharos_store::{InMemoryMetadataStore, InMemoryRegisterPageStore, MetadataStore, RegisterPageStore};
use serde_json::json;

#[tokio::test]
async fn metadata_store_round_trips_an_item() {
    let store = InMemoryMetadataStore::new();

    let mut attributes = serde_json::Map::new();
    attributes.insert("name".to_string(), json!("Field Team Alpha"));
    let item = TableItem {
        pk: "proj-1".to_string(),
        sk: "_meta".to_string(),
        attributes,
    };

    assert!(store.get_item("proj-1", "_meta").await.unwrap().is_none());

    store.put_item(item.clone()).await.unwrap();
    let fetched = store.get_item("proj-1", "_meta").await.unwrap();
    assert_eq!(fetched, Some(item));

    store.delete_item("proj-1", "_meta").await.unwrap();
    assert!(store.get_item("proj-1", "_meta").await.unwrap().is_none());
}

#[tokio::test]
async fn metadata_store_distinguishes_sort_keys_under_one_partition() {
    let store = InMemoryMetadataStore::new();

    let meta = TableItem {
        pk: "proj-1".to_string(),
        sk: "_meta".to_string(),
        attributes: serde_json::Map::new(),
    };
    let dataset = TableItem {
        pk: "proj-1".to_string(),
        sk: "dataset-1".to_string(),
        attributes: serde_json::Map::new(),
    };

    store.put_item(meta).await.unwrap();
    store.put_item(dataset).await.unwrap();

    assert!(store.get_item("proj-1", "_meta").await.unwrap().is_some());
    assert!(store.get_item("proj-1", "dataset-1").await.unwrap().is_some());
}

#[tokio::test]
async fn register_page_store_round_trips_and_lists_pages() {
    let store = InMemoryRegisterPageStore::new();

    let mut register = Register::new();
    register.insert("rec-1", Record::default());

    assert!(store
        .get_page("proj-1", "dataset-1", "page-0")
        .await
        .unwrap()
        .is_none());

    store
        .put_page("proj-1", "dataset-1", "page-0", register.clone())
        .await
        .unwrap();
    store
        .put_page("proj-1", "dataset-1", "page-1", Register::new())
        .await
        .unwrap();

    let fetched = store
        .get_page("proj-1", "dataset-1", "page-0")
        .await
        .unwrap();
    assert_eq!(fetched, Some(register));

    let pages = store.list_pages("proj-1", "dataset-1").await.unwrap();
    assert_eq!(pages, vec!["page-0".to_string(), "page-1".to_string()]);

    let other_dataset_pages = store.list_pages("proj-1", "dataset-2").await.unwrap();
    assert!(other_dataset_pages.is_empty());
}
