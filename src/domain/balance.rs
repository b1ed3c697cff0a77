//! Income/expense aggregates produced by the summary service.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::transaction::{Transaction, TransactionKind};

/// `{income, expense, balance}` with `balance == income - expense` at all times.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Balance {
    income: i64,
    expense: i64,
    balance: i64,
}

impl Balance {
    pub fn from_parts(income: i64, expense: i64) -> Self {
        Self {
            income,
            expense,
            balance: income - expense,
        }
    }

    pub fn income(&self) -> i64 {
        self.income
    }

    pub fn expense(&self) -> i64 {
        self.expense
    }

    pub fn balance(&self) -> i64 {
        self.balance
    }

    /// Folds one record into the aggregate.
    pub fn record(&mut self, transaction: &Transaction) {
        let amount = i64::try_from(transaction.amount()).unwrap_or(i64::MAX);
        match transaction.kind() {
            TransactionKind::Income => self.income = self.income.saturating_add(amount),
            TransactionKind::Expense => self.expense = self.expense.saturating_add(amount),
        }
        self.balance = self.income - self.expense;
    }
}

/// Per-day aggregates, sparse: only dates with at least one record appear.
pub type DailyBalances = BTreeMap<NaiveDate, Balance>;

/// Summed amounts per category for a single transaction type.
pub type CategoryTotals = BTreeMap<Category, i64>;
