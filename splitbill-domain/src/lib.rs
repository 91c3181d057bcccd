#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::{LedgerError, ReferenceRole};
pub use model::{Balance, Expense, Money, Roster, Settlement, Transaction};
pub use services::{
    BalanceAccumulator, SettlementCalculator, SettlementContext, compute_balances, settle_expenses,
};
