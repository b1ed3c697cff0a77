use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::{Balance, CategoryTotals, DailyBalances, Month, Transaction, TransactionKind};

use super::SelectionService;

/// Folds transaction collections into income/expense aggregates.
pub struct SummaryService;

impl SummaryService {
    /// Income, expense and balance over every record in `transactions`.
    pub fn month_totals<'a, I>(transactions: I) -> Balance
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .fold(Balance::default(), |mut totals, txn| {
                totals.record(txn);
                totals
            })
    }

    /// One aggregate per distinct date present in `transactions`.
    pub fn daily_balances<'a, I>(transactions: I) -> DailyBalances
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut daily = DailyBalances::new();
        for txn in transactions {
            daily.entry(txn.date()).or_default().record(txn);
        }
        daily
    }

    /// Summed amounts per category, restricted to records of `kind`.
    pub fn category_totals<'a, I>(transactions: I, kind: TransactionKind) -> CategoryTotals
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut totals = CategoryTotals::new();
        for txn in transactions.into_iter().filter(|txn| txn.kind() == kind) {
            debug_assert_eq!(
                txn.category().kind(),
                txn.kind(),
                "transaction {} carries a category of the wrong type",
                txn.id()
            );
            let amount = i64::try_from(txn.amount()).unwrap_or(i64::MAX);
            let slot = totals.entry(txn.category()).or_insert(0);
            *slot = slot.saturating_add(amount);
        }
        totals
    }

    /// Everything the calendar, charts, table and summary header need for `month`.
    pub fn monthly_report(all: &[Transaction], month: Month) -> MonthlyReport {
        let transactions = SelectionService::transactions_in_month(all, month);
        MonthlyReport {
            month,
            totals: Self::month_totals(&transactions),
            daily: Self::daily_balances(&transactions),
            income_by_category: Self::category_totals(&transactions, TransactionKind::Income),
            expense_by_category: Self::category_totals(&transactions, TransactionKind::Expense),
            transactions,
        }
    }
}

/// Read model for a single month, recomputed from the canonical collection.
#[derive(Debug, Clone, Serialize)]
pub struct MonthlyReport {
    pub month: Month,
    pub transactions: Vec<Transaction>,
    pub totals: Balance,
    pub daily: DailyBalances,
    pub income_by_category: CategoryTotals,
    pub expense_by_category: CategoryTotals,
}

impl MonthlyReport {
    pub fn category_totals(&self, kind: TransactionKind) -> &CategoryTotals {
        match kind {
            TransactionKind::Income => &self.income_by_category,
            TransactionKind::Expense => &self.expense_by_category,
        }
    }

    /// Days with activity in ascending date order, as fed to the calendar and bar chart.
    pub fn calendar_entries(&self) -> impl Iterator<Item = (NaiveDate, Balance)> + '_ {
        self.daily.iter().map(|(date, balance)| (*date, *balance))
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }
}
