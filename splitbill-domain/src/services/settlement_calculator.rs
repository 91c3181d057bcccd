use crate::{
    error::LedgerError,
    model::{Balance, Expense, Money, Roster, Settlement, Transaction},
    services::balance_calculator::compute_balances,
};

/// Tolerance applied when deciding whether a balance is settled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementContext {
    /// Amounts at or below this are treated as zero. One cent by default;
    /// negative values behave like zero.
    pub epsilon: Money,
}

impl SettlementContext {
    pub fn with_epsilon(epsilon: Money) -> Self {
        Self { epsilon }
    }

    pub fn cent_default() -> Self {
        Self {
            epsilon: Money::new(1, 2),
        }
    }
}

impl Default for SettlementContext {
    fn default() -> Self {
        Self::cent_default()
    }
}

/// Greedy debt settlement: the largest remaining creditor is always matched
/// against the largest remaining debtor.
#[derive(Clone, Copy, Debug, Default)]
pub struct SettlementCalculator {
    context: SettlementContext,
}

impl SettlementCalculator {
    pub fn new(context: SettlementContext) -> Self {
        Self { context }
    }

    /// Converts net balances into transfers that bring every balance to zero.
    ///
    /// Balances need not sum to exactly zero; anything within epsilon is
    /// left alone. Transactions come out in matching order, largest first.
    pub fn settle<'a>(&self, balances: &[Balance<'a>]) -> Vec<Transaction<'a>> {
        let epsilon = self.context.epsilon.max(Money::ZERO);

        let mut creditors: Vec<Balance<'a>> = balances
            .iter()
            .copied()
            .filter(|balance| balance.amount.is_positive())
            .collect();
        let mut debtors: Vec<Balance<'a>> = balances
            .iter()
            .copied()
            .filter(|balance| balance.amount.is_negative())
            .collect();

        // Stable sorts: ties keep their input order.
        creditors.sort_by(|a, b| b.amount.cmp(&a.amount));
        debtors.sort_by(|a, b| a.amount.cmp(&b.amount));

        let mut transactions = Vec::with_capacity(creditors.len() + debtors.len());
        let mut creditor_idx = 0;
        let mut debtor_idx = 0;

        while creditor_idx < creditors.len() && debtor_idx < debtors.len() {
            let creditor = &mut creditors[creditor_idx];
            let debtor = &mut debtors[debtor_idx];

            // Bounded by both sides, so neither update below can leave the range.
            let amount = creditor.amount.min(-debtor.amount);
            if amount > epsilon {
                transactions.push(Transaction {
                    from: debtor.person,
                    to: creditor.person,
                    amount,
                });
                creditor.amount -= amount;
                debtor.amount += amount;
            }

            // Inclusive bounds: `amount <= epsilon` implies one side is done.
            if creditor.amount <= epsilon {
                creditor_idx += 1;
            }
            if debtor.amount >= -epsilon {
                debtor_idx += 1;
            }
        }

        tracing::debug!(
            creditor_count = creditors.len(),
            debtor_count = debtors.len(),
            transaction_count = transactions.len(),
            epsilon = %epsilon,
            "Debts settled"
        );
        transactions
    }
}

/// Computes balances and the transfers settling them in one pass.
pub fn settle_expenses<'a>(
    roster: &Roster<'a>,
    expenses: &[Expense<'a>],
    context: SettlementContext,
) -> Result<Settlement<'a>, LedgerError<'a>> {
    let balances = compute_balances(roster, expenses)?;
    let transactions = SettlementCalculator::new(context).settle(&balances);
    Ok(Settlement {
        balances,
        transactions,
    })
}
