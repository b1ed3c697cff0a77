use std::sync::Arc;

use chrono::NaiveDate;
use kakeibo_core::{
    core::AppStore,
    domain::{ExpenseCategory, Month, TransactionKind, TransactionPayload},
    init,
    storage::MemoryStorage,
};

#[tokio::test]
async fn store_smoke() {
    init();

    let store = AppStore::with_month(
        Arc::new(MemoryStorage::new()),
        Month::new(2025, 1).unwrap(),
    );
    store.load().await.unwrap();

    let payload = TransactionPayload::new(
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        TransactionKind::Expense,
        ExpenseCategory::Food,
        42,
        "New Year's groceries",
    )
    .unwrap();
    let created = store.create(payload).await.unwrap();

    let report = store.report();
    assert_eq!(report.totals.expense(), 42);
    assert_eq!(report.totals.balance(), -42);
    assert!(store.transaction(created.id()).is_some());
}
