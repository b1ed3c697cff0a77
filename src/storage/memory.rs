use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::domain::{Transaction, TransactionId, TransactionPayload};
use crate::errors::StorageError;

use super::{Result, TransactionStorage};

/// Process-local backend, mainly for tests and demos.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    records: Mutex<Vec<Transaction>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the backend with already-persisted records.
    pub fn with_records(records: Vec<Transaction>) -> Self {
        Self {
            records: Mutex::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.records().len()
    }

    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    fn records(&self) -> MutexGuard<'_, Vec<Transaction>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl TransactionStorage for MemoryStorage {
    async fn fetch_all(&self) -> Result<Vec<Transaction>> {
        Ok(self.records().clone())
    }

    async fn create(&self, payload: TransactionPayload) -> Result<Transaction> {
        payload.check()?;
        let transaction = Transaction::from_payload(TransactionId::generate(), payload);
        self.records().push(transaction.clone());
        Ok(transaction)
    }

    async fn update(&self, id: &TransactionId, payload: TransactionPayload) -> Result<()> {
        payload.check()?;
        let mut records = self.records();
        let record = records
            .iter_mut()
            .find(|txn| txn.id() == id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;
        record.apply(payload);
        Ok(())
    }

    async fn delete(&self, id: &TransactionId) -> Result<()> {
        self.records().retain(|txn| txn.id() != id);
        Ok(())
    }
}
