#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod expense_processor;
pub mod model;

pub use error::SettlementError;
pub use expense_processor::ExpenseProcessor;
pub use model::{
    BalanceRecord, ExpenseRecord, Payment, PersonBalance, SettleRequest, SettleResponse,
    SettlementReport, TransactionRecord,
};
