//! Validation of user-entered transaction forms.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::transaction::{MAX_CONTENT_CHARS, MIN_AMOUNT};
use crate::domain::{Category, TransactionKind, TransactionPayload};

/// Raw form input, before any invariant has been checked.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: String,
    #[serde(rename = "type")]
    pub kind: TransactionKind,
    #[serde(default)]
    pub category: Option<String>,
    pub amount: i64,
    pub content: String,
}

impl TransactionDraft {
    /// An empty expense form for `date`, as shown when the form opens.
    pub fn blank(date: NaiveDate) -> Self {
        Self {
            date: date.format("%Y-%m-%d").to_string(),
            kind: TransactionKind::Expense,
            category: None,
            amount: 0,
            content: String::new(),
        }
    }

    /// Switches the form's type tab; a category belonging to the other type is cleared.
    pub fn switch_kind(&mut self, kind: TransactionKind) {
        self.kind = kind;
        let keeps_category = self
            .category
            .as_deref()
            .and_then(|raw| raw.parse::<Category>().ok())
            .is_some_and(|category| category.kind() == kind);
        if !keeps_category {
            self.category = None;
        }
    }
}

impl From<&TransactionPayload> for TransactionDraft {
    fn from(payload: &TransactionPayload) -> Self {
        Self {
            date: payload.date().format("%Y-%m-%d").to_string(),
            kind: payload.kind(),
            category: Some(payload.category().label().to_string()),
            amount: i64::try_from(payload.amount()).unwrap_or(i64::MAX),
            content: payload.content().to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Date,
    Amount,
    Content,
    Category,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Field::Date => "date",
            Field::Amount => "amount",
            Field::Content => "content",
            Field::Category => "category",
        };
        f.write_str(label)
    }
}

/// Human-readable messages keyed by the offending form field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, thiserror::Error)]
#[error("{}", render(.0))]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, message)| (*field, message.as_str()))
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.entry(field).or_insert_with(|| message.into());
    }
}

fn render(errors: &BTreeMap<Field, String>) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("{field}: {message}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Gatekeeper between raw form input and the record collection.
pub struct TransactionService;

impl TransactionService {
    /// Checks every field and returns either a well-formed payload or all field errors.
    pub fn validate(draft: &TransactionDraft) -> Result<TransactionPayload, FieldErrors> {
        let mut errors = FieldErrors::default();

        let date = if draft.date.trim().is_empty() {
            errors.insert(Field::Date, "date is required");
            None
        } else {
            NaiveDate::parse_from_str(draft.date.trim(), "%Y-%m-%d")
                .map_err(|_| errors.insert(Field::Date, "date must be formatted as YYYY-MM-DD"))
                .ok()
        };

        let amount = match u64::try_from(draft.amount) {
            Ok(amount) if amount >= MIN_AMOUNT => Some(amount),
            _ => {
                errors.insert(Field::Amount, "amount must be at least 1");
                None
            }
        };

        let content_chars = draft.content.chars().count();
        if content_chars == 0 {
            errors.insert(Field::Content, "content is required");
        } else if content_chars > MAX_CONTENT_CHARS {
            errors.insert(Field::Content, "content must be 50 characters or fewer");
        }

        let category = match draft.category.as_deref().map(str::trim) {
            None | Some("") => {
                errors.insert(Field::Category, "category is required");
                None
            }
            Some(raw) => match raw.parse::<Category>() {
                Ok(category) if category.kind() == draft.kind => Some(category),
                Ok(category) => {
                    errors.insert(
                        Field::Category,
                        format!("category {category} is not available for {} records", draft.kind),
                    );
                    None
                }
                Err(err) => {
                    errors.insert(Field::Category, err.to_string());
                    None
                }
            },
        };

        match (date, amount, category) {
            (Some(date), Some(amount), Some(category)) if errors.is_empty() => {
                TransactionPayload::new(date, draft.kind, category, amount, draft.content.clone())
                    .map_err(|err| {
                        let mut errors = FieldErrors::default();
                        errors.insert(Field::Category, err.to_string());
                        errors
                    })
            }
            _ => Err(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ExpenseCategory;

    fn draft() -> TransactionDraft {
        TransactionDraft {
            date: "2024-05-01".into(),
            kind: TransactionKind::Expense,
            category: Some("食費".into()),
            amount: 5_000,
            content: "groceries".into(),
        }
    }

    #[test]
    fn valid_draft_becomes_payload() {
        let payload = TransactionService::validate(&draft()).unwrap();
        assert_eq!(payload.category(), Category::Expense(ExpenseCategory::Food));
        assert_eq!(payload.amount(), 5_000);
    }

    #[test]
    fn zero_amount_is_rejected() {
        let mut input = draft();
        input.amount = 0;
        let errors = TransactionService::validate(&input).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(Field::Amount));
    }

    #[test]
    fn every_failing_field_is_reported() {
        let input = TransactionDraft {
            date: String::new(),
            kind: TransactionKind::Income,
            category: None,
            amount: -3,
            content: "x".repeat(51),
        };
        let errors = TransactionService::validate(&input).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert_eq!(errors.get(Field::Date), Some("date is required"));
        assert!(errors.to_string().contains("amount: amount must be at least 1"));
    }

    #[test]
    fn category_from_other_type_is_rejected() {
        let mut input = draft();
        input.kind = TransactionKind::Income;
        let errors = TransactionService::validate(&input).unwrap_err();
        assert!(errors.contains(Field::Category));
    }

    #[test]
    fn malformed_date_is_rejected() {
        let mut input = draft();
        input.date = "2024/05/01".into();
        assert!(TransactionService::validate(&input)
            .unwrap_err()
            .contains(Field::Date));
    }

    #[test]
    fn switching_kind_clears_foreign_category() {
        let mut input = draft();
        input.switch_kind(TransactionKind::Expense);
        assert_eq!(input.category.as_deref(), Some("食費"));
        input.switch_kind(TransactionKind::Income);
        assert_eq!(input.category, None);
    }

    #[test]
    fn editing_form_is_prefilled_from_record() {
        let payload = TransactionService::validate(&draft()).unwrap();
        let prefilled = TransactionDraft::from(&payload);
        assert_eq!(prefilled.category.as_deref(), Some("食費"));
        assert_eq!(TransactionService::validate(&prefilled).unwrap(), payload);
    }

    #[test]
    fn blank_form_fails_validation() {
        let blank = TransactionDraft::blank(NaiveDate::from_ymd_opt(2024, 5, 1).unwrap());
        let errors = TransactionService::validate(&blank).unwrap_err();
        assert!(errors.contains(Field::Amount));
        assert!(errors.contains(Field::Category));
        assert!(errors.contains(Field::Content));
        assert!(!errors.contains(Field::Date));
    }
}
