pub mod balance_calculator;
pub mod settlement_calculator;

pub use balance_calculator::{BalanceAccumulator, compute_balances};
pub use settlement_calculator::{SettlementCalculator, SettlementContext, settle_expenses};
