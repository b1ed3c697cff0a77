#![allow(dead_code)]

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::NaiveDate;
use kakeibo_core::{
    domain::{
        Category, ExpenseCategory, IncomeCategory, Transaction, TransactionId, TransactionPayload,
    },
    errors::StorageError,
    storage::{MemoryStorage, TransactionStorage},
};
use tokio::sync::Notify;

pub fn date(raw: &str) -> NaiveDate {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").expect("valid test date")
}

pub fn payload(day: &str, category: impl Into<Category>, amount: u64) -> TransactionPayload {
    let category = category.into();
    TransactionPayload::new(date(day), category.kind(), category, amount, "entry")
        .expect("valid test payload")
}

/// Salary on the 1st, food on the 1st and 2nd of May 2024.
pub fn may_payloads() -> Vec<TransactionPayload> {
    vec![
        payload("2024-05-01", IncomeCategory::Salary, 300_000),
        payload("2024-05-01", ExpenseCategory::Food, 5_000),
        payload("2024-05-02", ExpenseCategory::Food, 3_000),
    ]
}

pub fn backend_down() -> StorageError {
    StorageError::Io(io::Error::new(io::ErrorKind::Other, "backend unavailable"))
}

/// Memory backend with switchable failures and a call journal.
#[derive(Default)]
pub struct FlakyStorage {
    inner: MemoryStorage,
    pub fail_fetch: AtomicBool,
    pub fail_create: AtomicBool,
    pub fail_update: AtomicBool,
    fail_delete_of: Mutex<Option<TransactionId>>,
    calls: Mutex<Vec<String>>,
}

impl FlakyStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_delete_of(&self, id: &TransactionId) {
        *self.fail_delete_of.lock().expect("lock") = Some(id.clone());
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("lock").clone()
    }

    pub fn stored_len(&self) -> usize {
        self.inner.len()
    }

    fn log(&self, call: String) {
        self.calls.lock().expect("lock").push(call);
    }
}

#[async_trait]
impl TransactionStorage for FlakyStorage {
    async fn fetch_all(&self) -> Result<Vec<Transaction>, StorageError> {
        self.log("fetch_all".into());
        if self.fail_fetch.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        self.inner.fetch_all().await
    }

    async fn create(&self, payload: TransactionPayload) -> Result<Transaction, StorageError> {
        self.log("create".into());
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        self.inner.create(payload).await
    }

    async fn update(
        &self,
        id: &TransactionId,
        payload: TransactionPayload,
    ) -> Result<(), StorageError> {
        self.log(format!("update {id}"));
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(backend_down());
        }
        self.inner.update(id, payload).await
    }

    async fn delete(&self, id: &TransactionId) -> Result<(), StorageError> {
        self.log(format!("delete {id}"));
        let fails = self.fail_delete_of.lock().expect("lock").as_ref() == Some(id);
        if fails {
            return Err(backend_down());
        }
        self.inner.delete(id).await
    }
}

/// Backend whose `fetch_all` blocks until released.
#[derive(Default)]
pub struct GatedStorage {
    pub started: Notify,
    pub release: Notify,
}

#[async_trait]
impl TransactionStorage for GatedStorage {
    async fn fetch_all(&self) -> Result<Vec<Transaction>, StorageError> {
        self.started.notify_one();
        self.release.notified().await;
        Ok(Vec::new())
    }

    async fn create(&self, _payload: TransactionPayload) -> Result<Transaction, StorageError> {
        Err(backend_down())
    }

    async fn update(
        &self,
        _id: &TransactionId,
        _payload: TransactionPayload,
    ) -> Result<(), StorageError> {
        Err(backend_down())
    }

    async fn delete(&self, _id: &TransactionId) -> Result<(), StorageError> {
        Err(backend_down())
    }
}
