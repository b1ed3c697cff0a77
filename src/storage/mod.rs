//! Persistence seam for transaction records.

pub mod json_backend;
pub mod memory;

use async_trait::async_trait;

use crate::domain::{Transaction, TransactionId, TransactionPayload};
use crate::errors::StorageError;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Async CRUD over a document collection of transactions.
///
/// Backends assign ids on `create`; ids are never changed afterwards.
#[async_trait]
pub trait TransactionStorage: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Transaction>>;
    async fn create(&self, payload: TransactionPayload) -> Result<Transaction>;
    async fn update(&self, id: &TransactionId, payload: TransactionPayload) -> Result<()>;
    /// Deleting an id that does not exist succeeds.
    async fn delete(&self, id: &TransactionId) -> Result<()>;
}

pub use json_backend::JsonFileStorage;
pub use memory::MemoryStorage;
