mod common;

use std::sync::Arc;

use common::{may_payloads, payload};
use kakeibo_core::{
    core::AppStore,
    domain::{Category, ExpenseCategory, Month, TransactionId},
    errors::StorageError,
    storage::{JsonFileStorage, TransactionStorage},
};
use tempfile::TempDir;

#[tokio::test]
async fn missing_file_reads_as_empty_collection() {
    let temp = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(temp.path().join("absent.json"));
    assert!(storage.fetch_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn records_survive_a_new_handle() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("data").join("transactions.json");

    let storage = JsonFileStorage::new(&path);
    let mut ids = Vec::new();
    for payload in may_payloads() {
        ids.push(storage.create(payload).await.unwrap().id().clone());
    }
    storage
        .update(&ids[2], payload("2024-05-02", ExpenseCategory::DailyGoods, 450))
        .await
        .unwrap();
    storage.delete(&ids[0]).await.unwrap();

    let reopened = JsonFileStorage::new(&path);
    let records = reopened.fetch_all().await.unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id(), &ids[1]);
    assert_eq!(records[1].category(), Category::Expense(ExpenseCategory::DailyGoods));
    assert_eq!(records[1].amount(), 450);
    assert!(!path.with_extension("json.tmp").exists());
}

#[tokio::test]
async fn update_of_unknown_id_is_not_found() {
    let temp = TempDir::new().unwrap();
    let storage = JsonFileStorage::new(temp.path().join("transactions.json"));
    let err = storage
        .update(
            &TransactionId::new("missing"),
            payload("2024-05-02", ExpenseCategory::Food, 1),
        )
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::NotFound(_)));
}

#[tokio::test]
async fn corrupt_record_fails_load_and_store_stays_empty() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("transactions.json");
    std::fs::write(
        &path,
        r#"[{"id":"x","date":"2024-05-01","type":"income","category":"食費","amount":10,"content":"oops"}]"#,
    )
    .unwrap();

    let store = AppStore::with_month(
        Arc::new(JsonFileStorage::new(&path)),
        Month::new(2024, 5).unwrap(),
    );
    assert!(store.load().await.is_err());
    assert!(store.is_empty());
}
