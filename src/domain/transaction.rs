use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::common::{Displayable, TransactionId};

/// Longest description accepted for a record, counted in characters.
pub const MAX_CONTENT_CHARS: usize = 50;
/// Smallest amount a record may carry, in whole currency units.
pub const MIN_AMOUNT: u64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            TransactionKind::Income => "income",
            TransactionKind::Expense => "expense",
        };
        f.pad(label)
    }
}

impl FromStr for TransactionKind {
    type Err = RecordError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "income" => Ok(TransactionKind::Income),
            "expense" => Ok(TransactionKind::Expense),
            other => Err(RecordError::UnknownKind(other.to_string())),
        }
    }
}

/// Invariant violations detected while building a record.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RecordError {
    #[error("amount must be at least 1, got {0}")]
    AmountTooSmall(u64),
    #[error("content must be 1 to 50 characters, got {0}")]
    ContentLength(usize),
    #[error("category `{category}` does not belong to {kind} records")]
    CategoryMismatch {
        kind: TransactionKind,
        category: Category,
    },
    #[error("unknown transaction type `{0}`")]
    UnknownKind(String),
}

/// A record prior to persistence: everything except the storage-assigned id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPayload")]
pub struct TransactionPayload {
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: Category,
    amount: u64,
    content: String,
}

impl TransactionPayload {
    /// Builds a payload, rejecting any combination that breaks the record invariants.
    pub fn new(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<Category>,
        amount: u64,
        content: impl Into<String>,
    ) -> Result<Self, RecordError> {
        let payload = Self {
            date,
            kind,
            category: category.into(),
            amount,
            content: content.into(),
        };
        payload.check()?;
        Ok(payload)
    }

    /// Re-checks the record invariants; backends call this before writing.
    pub fn check(&self) -> Result<(), RecordError> {
        if self.amount < MIN_AMOUNT {
            return Err(RecordError::AmountTooSmall(self.amount));
        }
        let chars = self.content.chars().count();
        if chars == 0 || chars > MAX_CONTENT_CHARS {
            return Err(RecordError::ContentLength(chars));
        }
        if self.category.kind() != self.kind {
            return Err(RecordError::CategoryMismatch {
                kind: self.kind,
                category: self.category,
            });
        }
        Ok(())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// Builds a payload without checking it, to exercise the guards further down.
    #[cfg(test)]
    pub(crate) fn unchecked(
        date: NaiveDate,
        kind: TransactionKind,
        category: impl Into<Category>,
        amount: u64,
        content: impl Into<String>,
    ) -> Self {
        Self {
            date,
            kind,
            category: category.into(),
            amount,
            content: content.into(),
        }
    }
}

#[derive(Deserialize)]
struct RawPayload {
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: Category,
    amount: u64,
    content: String,
}

impl TryFrom<RawPayload> for TransactionPayload {
    type Error = RecordError;

    fn try_from(raw: RawPayload) -> Result<Self, Self::Error> {
        TransactionPayload::new(raw.date, raw.kind, raw.category, raw.amount, raw.content)
    }
}

/// A persisted income or expense record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawTransaction")]
pub struct Transaction {
    id: TransactionId,
    date: NaiveDate,
    #[serde(rename = "type")]
    kind: TransactionKind,
    category: Category,
    amount: u64,
    content: String,
}

impl Transaction {
    pub fn from_payload(id: TransactionId, payload: TransactionPayload) -> Self {
        Self {
            id,
            date: payload.date,
            kind: payload.kind,
            category: payload.category,
            amount: payload.amount,
            content: payload.content,
        }
    }

    /// Replaces every editable field with the values in `payload`; the id is kept.
    pub fn apply(&mut self, payload: TransactionPayload) {
        self.date = payload.date;
        self.kind = payload.kind;
        self.category = payload.category;
        self.amount = payload.amount;
        self.content = payload.content;
    }

    pub fn payload(&self) -> TransactionPayload {
        TransactionPayload {
            date: self.date,
            kind: self.kind,
            category: self.category,
            amount: self.amount,
            content: self.content.clone(),
        }
    }

    pub fn id(&self) -> &TransactionId {
        &self.id
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn amount(&self) -> u64 {
        self.amount
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// ISO `YYYY-MM-DD` rendering of the record date.
    pub fn date_key(&self) -> String {
        self.date.format("%Y-%m-%d").to_string()
    }
}

#[derive(Deserialize)]
struct RawTransaction {
    id: TransactionId,
    #[serde(flatten)]
    payload: RawPayload,
}

impl TryFrom<RawTransaction> for Transaction {
    type Error = RecordError;

    fn try_from(raw: RawTransaction) -> Result<Self, Self::Error> {
        let payload = TransactionPayload::try_from(raw.payload)?;
        Ok(Transaction::from_payload(raw.id, payload))
    }
}

impl Displayable for Transaction {
    fn display_label(&self) -> String {
        format!(
            "{} [{}] {} {} {}",
            self.date_key(),
            self.kind,
            self.category,
            self.amount,
            self.content
        )
    }
}
