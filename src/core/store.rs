//! Application state: the canonical transaction collection and month selection.

use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use crate::core::services::{MonthlyReport, SelectionService, SummaryService};
use crate::domain::{Month, Transaction, TransactionId, TransactionPayload};
use crate::errors::StoreError;
use crate::storage::TransactionStorage;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug)]
struct StoreState {
    transactions: Vec<Transaction>,
    month: Month,
    loading: bool,
}

/// Single writer of the in-memory collection.
///
/// Mutations go to storage first and touch local state only once storage
/// reports success. Every derived view is recomputed on request. Operations
/// are not mutually exclusive: two overlapping calls resolve as last write wins.
pub struct AppStore {
    storage: Arc<dyn TransactionStorage>,
    state: RwLock<StoreState>,
}

impl AppStore {
    /// Creates a store viewing the current calendar month.
    pub fn new(storage: Arc<dyn TransactionStorage>) -> Self {
        Self::with_month(storage, Month::current())
    }

    pub fn with_month(storage: Arc<dyn TransactionStorage>, month: Month) -> Self {
        Self {
            storage,
            state: RwLock::new(StoreState {
                transactions: Vec::new(),
                month,
                // Nothing has been fetched yet.
                loading: true,
            }),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn is_loading(&self) -> bool {
        self.read().loading
    }

    pub fn selected_month(&self) -> Month {
        self.read().month
    }

    pub fn select_month(&self, month: Month) {
        self.write().month = month;
    }

    /// Moves the selection by `months` and returns the new month.
    pub fn shift_month(&self, months: i32) -> Month {
        let mut state = self.write();
        state.month = state.month.shift(months);
        state.month
    }

    /// Snapshot of the full collection.
    pub fn transactions(&self) -> Vec<Transaction> {
        self.read().transactions.clone()
    }

    pub fn len(&self) -> usize {
        self.read().transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().transactions.is_empty()
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<Transaction> {
        self.read()
            .transactions
            .iter()
            .find(|txn| txn.id() == id)
            .cloned()
    }

    pub fn monthly_transactions(&self) -> Vec<Transaction> {
        let state = self.read();
        SelectionService::transactions_in_month(&state.transactions, state.month)
    }

    pub fn daily_transactions(&self, day: NaiveDate) -> Vec<Transaction> {
        SelectionService::transactions_on_day(&self.monthly_transactions(), day)
    }

    /// Aggregates for the selected month.
    pub fn report(&self) -> MonthlyReport {
        let state = self.read();
        SummaryService::monthly_report(&state.transactions, state.month)
    }

    /// Replaces the collection with the backend's contents.
    ///
    /// On failure the collection is left empty and the error is returned.
    pub async fn load(&self) -> StoreResult<usize> {
        self.write().loading = true;
        let fetched = self.storage.fetch_all().await;
        let mut state = self.write();
        state.loading = false;
        match fetched {
            Ok(transactions) => {
                info!(count = transactions.len(), "loaded transactions");
                state.transactions = transactions;
                Ok(state.transactions.len())
            }
            Err(err) => {
                error!(error = %err, "failed to load transactions");
                state.transactions.clear();
                Err(err.into())
            }
        }
    }

    /// Persists `payload` and appends the stored record.
    ///
    /// A payload breaking the record invariants is refused before storage is called.
    pub async fn create(&self, payload: TransactionPayload) -> StoreResult<Transaction> {
        payload.check()?;
        match self.storage.create(payload).await {
            Ok(transaction) => {
                debug!(id = %transaction.id(), "created transaction");
                self.write().transactions.push(transaction.clone());
                Ok(transaction)
            }
            Err(err) => {
                error!(error = %err, "failed to create transaction");
                Err(err.into())
            }
        }
    }

    /// Replaces the record `id` with `payload` once storage accepts the edit.
    pub async fn update(&self, payload: TransactionPayload, id: &TransactionId) -> StoreResult<()> {
        payload.check()?;
        if let Err(err) = self.storage.update(id, payload.clone()).await {
            error!(%id, error = %err, "failed to update transaction");
            return Err(err.into());
        }
        let mut state = self.write();
        match state.transactions.iter_mut().find(|txn| txn.id() == id) {
            Some(record) => {
                record.apply(payload);
                debug!(%id, "updated transaction");
            }
            None => warn!(%id, "updated transaction is not in the local collection"),
        }
        Ok(())
    }

    pub async fn delete_one(&self, id: &TransactionId) -> StoreResult<usize> {
        self.delete(std::slice::from_ref(id)).await
    }

    /// Deletes `ids` one at a time, each call awaited before the next is issued.
    ///
    /// Stops at the first storage failure; ids deleted before it are still
    /// removed locally. Returns how many local records were removed.
    pub async fn delete(&self, ids: &[TransactionId]) -> StoreResult<usize> {
        let mut deleted: HashSet<&TransactionId> = HashSet::with_capacity(ids.len());
        let mut failure = None;
        for id in ids {
            match self.storage.delete(id).await {
                Ok(()) => {
                    deleted.insert(id);
                }
                Err(err) => {
                    error!(%id, error = %err, "failed to delete transaction");
                    failure = Some(err);
                    break;
                }
            }
        }

        let removed = {
            let mut state = self.write();
            let before = state.transactions.len();
            state.transactions.retain(|txn| !deleted.contains(txn.id()));
            before - state.transactions.len()
        };
        debug!(requested = ids.len(), removed, "deleted transactions");

        match failure {
            None => Ok(removed),
            Some(source) => Err(StoreError::PartialDelete {
                deleted: deleted.len(),
                requested: ids.len(),
                source,
            }),
        }
    }
}
