use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::Mutex;

use crate::domain::{Transaction, TransactionId, TransactionPayload};
use crate::errors::StorageError;

use super::{Result, TransactionStorage};

const TMP_SUFFIX: &str = "tmp";

/// Stores the whole collection as a single JSON array on disk.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    // Serialises read-modify-write cycles issued through this handle.
    write_lock: Mutex<()>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read(&self) -> Result<Vec<Transaction>> {
        match fs::read_to_string(&self.path).await {
            Ok(data) if data.trim().is_empty() => Ok(Vec::new()),
            Ok(data) => Ok(serde_json::from_str(&data)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn write(&self, records: &[Transaction]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(records)?;
        let tmp = tmp_path(&self.path);
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }
}

#[async_trait]
impl TransactionStorage for JsonFileStorage {
    async fn fetch_all(&self) -> Result<Vec<Transaction>> {
        self.read().await
    }

    async fn create(&self, payload: TransactionPayload) -> Result<Transaction> {
        payload.check()?;
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        let transaction = Transaction::from_payload(TransactionId::generate(), payload);
        records.push(transaction.clone());
        self.write(&records).await?;
        Ok(transaction)
    }

    async fn update(&self, id: &TransactionId, payload: TransactionPayload) -> Result<()> {
        payload.check()?;
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        let record = records
            .iter_mut()
            .find(|txn| txn.id() == id)
            .ok_or_else(|| StorageError::NotFound(id.clone()))?;
        record.apply(payload);
        self.write(&records).await
    }

    async fn delete(&self, id: &TransactionId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut records = self.read().await?;
        let before = records.len();
        records.retain(|txn| txn.id() != id);
        if records.len() == before {
            return Ok(());
        }
        self.write(&records).await
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}
