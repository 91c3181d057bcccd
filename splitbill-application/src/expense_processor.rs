use crate::{
    error::SettlementError,
    model::{
        BalanceRecord, ExpenseRecord, Payment, SettleRequest, SettlementReport, TransactionRecord,
    },
};
use splitbill_domain::{
    Balance, Expense, Money, Roster, SettlementCalculator, SettlementContext, compute_balances,
    settle_expenses,
};

/// Turns wire requests into settlements.
///
/// Holds no state between calls; one processor can serve any number of
/// concurrent requests.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExpenseProcessor {
    context: SettlementContext,
}

impl ExpenseProcessor {
    pub fn new(context: SettlementContext) -> Self {
        Self { context }
    }

    pub fn parse_request(&self, content: &str) -> Result<SettleRequest, SettlementError> {
        Ok(serde_json::from_str(content)?)
    }

    /// Net balance per person, in the order people were listed.
    pub fn compute_balances(
        &self,
        request: &SettleRequest,
    ) -> Result<Vec<BalanceRecord>, SettlementError> {
        let (roster, expenses) = Self::validate(request).inspect_err(Self::log_rejection)?;
        let balances = compute_balances(&roster, &expenses)
            .map_err(SettlementError::from)
            .inspect_err(Self::log_rejection)?;

        Ok(balances
            .iter()
            .map(|balance| BalanceRecord {
                person: balance.person.to_owned(),
                amount: balance.amount.to_f64(),
            })
            .collect())
    }

    /// Transfers settling `balances`. Only non-finite amounts and magnitudes
    /// outside [`Money::MAX`] are rejected.
    pub fn settle(
        &self,
        balances: &[BalanceRecord],
    ) -> Result<Vec<TransactionRecord>, SettlementError> {
        let balances = balances
            .iter()
            .map(Self::to_balance)
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(Self::log_rejection)?;

        let transactions = SettlementCalculator::new(self.context).settle(&balances);
        Ok(transactions
            .iter()
            .map(|transaction| TransactionRecord::from(&Payment::from(transaction)))
            .collect())
    }

    /// Balances and settling transfers for a whole request.
    pub fn process(&self, request: &SettleRequest) -> Result<SettlementReport, SettlementError> {
        let (roster, expenses) = Self::validate(request).inspect_err(Self::log_rejection)?;
        let settlement = settle_expenses(&roster, &expenses, self.context)
            .map_err(SettlementError::from)
            .inspect_err(Self::log_rejection)?;

        tracing::info!(
            member_count = roster.len(),
            expense_count = expenses.len(),
            transaction_count = settlement.transactions.len(),
            "Settlement computed"
        );
        Ok(SettlementReport::from(&settlement))
    }

    fn validate(
        request: &SettleRequest,
    ) -> Result<(Roster<'_>, Vec<Expense<'_>>), SettlementError> {
        let roster = Roster::try_new(request.people.iter().map(String::as_str))?;

        let expenses = request
            .expenses
            .iter()
            .enumerate()
            .map(|(index, record)| Self::to_expense(index, record))
            .collect::<Result<Vec<_>, _>>()?;

        Ok((roster, expenses))
    }

    fn to_balance(record: &BalanceRecord) -> Result<Balance<'_>, SettlementError> {
        let amount = match Money::try_from_f64(record.amount) {
            Some(amount) => amount,
            None if record.amount.is_finite() => {
                return Err(SettlementError::BalanceOutOfRange {
                    person: record.person.clone(),
                    amount: format!("{:?}", record.amount),
                });
            }
            None => {
                return Err(SettlementError::InvalidBalance {
                    person: record.person.clone(),
                });
            }
        };
        Ok(Balance {
            person: record.person.as_str(),
            amount,
        })
    }

    fn to_expense(index: usize, record: &ExpenseRecord) -> Result<Expense<'_>, SettlementError> {
        let amount = match Money::try_from_f64(record.amount) {
            Some(amount) => amount,
            None if record.amount.is_finite() => {
                return Err(SettlementError::AmountOutOfRange {
                    index,
                    description: record.description.clone(),
                    amount: format!("{:?}", record.amount),
                });
            }
            None => return Err(SettlementError::InvalidAmount { index }),
        };
        Ok(Expense {
            description: record.description.as_str(),
            amount,
            paid_by: record.paid_by.as_str(),
            participants: record.participants.iter().map(String::as_str).collect(),
        })
    }

    fn log_rejection(err: &SettlementError) {
        tracing::warn!(kind = err.kind(), error = %err, "Settlement request rejected");
    }
}
