//! Closed category sets for income and expense records.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::transaction::TransactionKind;

/// Categories available to income records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum IncomeCategory {
    #[serde(rename = "給与")]
    Salary,
    #[serde(rename = "副収入")]
    SideIncome,
    #[serde(rename = "お小遣い")]
    Allowance,
}

impl IncomeCategory {
    pub const ALL: [IncomeCategory; 3] = [
        IncomeCategory::Salary,
        IncomeCategory::SideIncome,
        IncomeCategory::Allowance,
    ];

    pub fn label(self) -> &'static str {
        match self {
            IncomeCategory::Salary => "給与",
            IncomeCategory::SideIncome => "副収入",
            IncomeCategory::Allowance => "お小遣い",
        }
    }
}

/// Categories available to expense records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ExpenseCategory {
    #[serde(rename = "食費")]
    Food,
    #[serde(rename = "日用品")]
    DailyGoods,
    #[serde(rename = "住居費")]
    Housing,
    #[serde(rename = "交際費")]
    Socializing,
    #[serde(rename = "娯楽")]
    Entertainment,
    #[serde(rename = "交通費")]
    Transport,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 6] = [
        ExpenseCategory::Food,
        ExpenseCategory::DailyGoods,
        ExpenseCategory::Housing,
        ExpenseCategory::Socializing,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Transport,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseCategory::Food => "食費",
            ExpenseCategory::DailyGoods => "日用品",
            ExpenseCategory::Housing => "住居費",
            ExpenseCategory::Socializing => "交際費",
            ExpenseCategory::Entertainment => "娯楽",
            ExpenseCategory::Transport => "交通費",
        }
    }
}

/// Any category label; the variant determines which transaction type owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Category {
    Income(IncomeCategory),
    Expense(ExpenseCategory),
}

impl Category {
    /// The transaction type this category belongs to.
    pub fn kind(self) -> TransactionKind {
        match self {
            Category::Income(_) => TransactionKind::Income,
            Category::Expense(_) => TransactionKind::Expense,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Income(category) => category.label(),
            Category::Expense(category) => category.label(),
        }
    }

    /// Lists the categories selectable for `kind`, in display order.
    pub fn for_kind(kind: TransactionKind) -> Vec<Category> {
        match kind {
            TransactionKind::Income => IncomeCategory::ALL
                .into_iter()
                .map(Category::Income)
                .collect(),
            TransactionKind::Expense => ExpenseCategory::ALL
                .into_iter()
                .map(Category::Expense)
                .collect(),
        }
    }
}

impl From<IncomeCategory> for Category {
    fn from(category: IncomeCategory) -> Self {
        Category::Income(category)
    }
}

impl From<ExpenseCategory> for Category {
    fn from(category: ExpenseCategory) -> Self {
        Category::Expense(category)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category `{0}`")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let raw = raw.trim();
        IncomeCategory::ALL
            .into_iter()
            .map(Category::Income)
            .chain(ExpenseCategory::ALL.into_iter().map(Category::Expense))
            .find(|category| category.label() == raw)
            .ok_or_else(|| UnknownCategory(raw.to_string()))
    }
}
