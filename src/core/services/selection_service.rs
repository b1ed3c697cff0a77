//! Month and day views over the transaction collection.

use chrono::NaiveDate;

use crate::domain::{Month, Transaction};

pub struct SelectionService;

impl SelectionService {
    /// Records whose date falls in `month`, in input order.
    pub fn transactions_in_month(all: &[Transaction], month: Month) -> Vec<Transaction> {
        all.iter()
            .filter(|txn| month.contains(txn.date()))
            .cloned()
            .collect()
    }

    /// Records dated exactly `day`, in input order.
    pub fn transactions_on_day(transactions: &[Transaction], day: NaiveDate) -> Vec<Transaction> {
        transactions
            .iter()
            .filter(|txn| txn.date() == day)
            .cloned()
            .collect()
    }

    /// Newest first; records sharing a date keep their relative order.
    pub fn sorted_by_date_desc(transactions: &[Transaction]) -> Vec<Transaction> {
        let mut sorted = transactions.to_vec();
        sorted.sort_by(|a, b| b.date().cmp(&a.date()));
        sorted
    }

    /// Zero-based page of `rows_per_page` rows; out-of-range pages are empty.
    pub fn page(transactions: &[Transaction], page: usize, rows_per_page: usize) -> &[Transaction] {
        if rows_per_page == 0 {
            return &[];
        }
        let start = page.saturating_mul(rows_per_page).min(transactions.len());
        let end = start.saturating_add(rows_per_page).min(transactions.len());
        &transactions[start..end]
    }

    pub fn page_count(len: usize, rows_per_page: usize) -> usize {
        if rows_per_page == 0 {
            0
        } else {
            len.div_ceil(rows_per_page)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseCategory, TransactionId, TransactionKind, TransactionPayload};

    fn txn(id: &str, y: i32, m: u32, d: u32) -> Transaction {
        let payload = TransactionPayload::new(
            NaiveDate::from_ymd_opt(y, m, d).unwrap(),
            TransactionKind::Expense,
            ExpenseCategory::Transport,
            220,
            "train",
        )
        .unwrap();
        Transaction::from_payload(TransactionId::new(id), payload)
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions.iter().map(|txn| txn.id().as_str()).collect()
    }

    fn sample() -> Vec<Transaction> {
        vec![
            txn("a", 2024, 4, 30),
            txn("b", 2024, 5, 2),
            txn("c", 2024, 5, 1),
            txn("d", 2024, 5, 2),
            txn("e", 2025, 5, 2),
        ]
    }

    #[test]
    fn month_filter_is_stable_and_exact() {
        let may = SelectionService::transactions_in_month(&sample(), Month::new(2024, 5).unwrap());
        assert_eq!(ids(&may), vec!["b", "c", "d"]);
        let empty =
            SelectionService::transactions_in_month(&sample(), Month::new(2023, 1).unwrap());
        assert!(empty.is_empty());
    }

    #[test]
    fn day_filter_composes_with_month_filter() {
        let all = sample();
        let day = NaiveDate::from_ymd_opt(2024, 5, 2).unwrap();
        let monthly = SelectionService::transactions_in_month(&all, Month::of(day));
        let via_month = SelectionService::transactions_on_day(&monthly, day);
        let direct = SelectionService::transactions_on_day(&all, day);
        assert_eq!(via_month, direct);
        assert_eq!(ids(&direct), vec!["b", "d"]);
    }

    #[test]
    fn sorted_by_date_desc_is_stable() {
        let sorted = SelectionService::sorted_by_date_desc(&sample());
        assert_eq!(ids(&sorted), vec!["e", "b", "d", "c", "a"]);
    }

    #[test]
    fn page_clamps_to_collection() {
        let all = sample();
        assert_eq!(ids(SelectionService::page(&all, 0, 2)), vec!["a", "b"]);
        assert_eq!(ids(SelectionService::page(&all, 2, 2)), vec!["e"]);
        assert!(SelectionService::page(&all, 3, 2).is_empty());
        assert!(SelectionService::page(&all, 0, 0).is_empty());
        assert_eq!(SelectionService::page_count(all.len(), 2), 3);
    }
}
