pub mod balance;
pub mod category;
pub mod common;
pub mod month;
pub mod transaction;

pub use balance::{Balance, CategoryTotals, DailyBalances};
pub use category::{Category, ExpenseCategory, IncomeCategory};
pub use common::{Displayable, TransactionId};
pub use month::Month;
pub use transaction::{RecordError, Transaction, TransactionKind, TransactionPayload};
