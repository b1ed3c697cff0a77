pub mod selection_service;
pub mod summary_service;
pub mod transaction_service;

pub use selection_service::SelectionService;
pub use summary_service::{MonthlyReport, SummaryService};
pub use transaction_service::{Field, FieldErrors, TransactionDraft, TransactionService};
