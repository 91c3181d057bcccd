use serde::{Deserialize, Serialize};
use splitbill_domain::{Balance, Money, Settlement, Transaction};

/// One expense as it arrives over the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRecord {
    #[serde(default)]
    pub description: String,
    pub amount: f64,
    pub paid_by: String,
    pub participants: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleRequest {
    pub people: Vec<String>,
    pub expenses: Vec<ExpenseRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceRecord {
    pub person: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub from: String,
    pub to: String,
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettleResponse {
    pub balances: Vec<BalanceRecord>,
    pub transactions: Vec<TransactionRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonBalance {
    pub person: String,
    pub amount: Money,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Payment {
    pub from: String,
    pub to: String,
    pub amount: Money,
}

/// Owned result of one settlement run, detached from the request it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct SettlementReport {
    pub balances: Vec<PersonBalance>,
    pub transactions: Vec<Payment>,
}

impl From<&Balance<'_>> for PersonBalance {
    fn from(balance: &Balance<'_>) -> Self {
        Self {
            person: balance.person.to_owned(),
            amount: balance.amount,
        }
    }
}

impl From<&Transaction<'_>> for Payment {
    fn from(transaction: &Transaction<'_>) -> Self {
        Self {
            from: transaction.from.to_owned(),
            to: transaction.to.to_owned(),
            amount: transaction.amount,
        }
    }
}

impl From<&Settlement<'_>> for SettlementReport {
    fn from(settlement: &Settlement<'_>) -> Self {
        Self {
            balances: settlement.balances.iter().map(PersonBalance::from).collect(),
            transactions: settlement.transactions.iter().map(Payment::from).collect(),
        }
    }
}

impl From<&PersonBalance> for BalanceRecord {
    fn from(balance: &PersonBalance) -> Self {
        Self {
            person: balance.person.clone(),
            amount: balance.amount.to_f64(),
        }
    }
}

impl From<&Payment> for TransactionRecord {
    fn from(payment: &Payment) -> Self {
        Self {
            from: payment.from.clone(),
            to: payment.to.clone(),
            amount: payment.amount.to_f64(),
        }
    }
}

impl From<&SettlementReport> for SettleResponse {
    fn from(report: &SettlementReport) -> Self {
        Self {
            balances: report.balances.iter().map(BalanceRecord::from).collect(),
            transactions: report.transactions.iter().map(TransactionRecord::from).collect(),
        }
    }
}
