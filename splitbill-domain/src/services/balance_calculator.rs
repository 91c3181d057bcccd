use crate::{
    error::LedgerError,
    model::{Balance, Expense, Money, Roster},
};
use fxhash::{FxBuildHasher, FxHashMap};
use indexmap::IndexMap;

/// Running per-person totals, kept in roster order.
pub struct BalanceAccumulator<'a> {
    balances: IndexMap<&'a str, Money, FxBuildHasher>,
}

impl<'a> BalanceAccumulator<'a> {
    pub fn new(roster: &Roster<'a>) -> Self {
        let mut balances = IndexMap::with_capacity_and_hasher(roster.len(), FxBuildHasher::default());
        for member in roster.iter() {
            balances.insert(member, Money::ZERO);
        }
        Self { balances }
    }

    /// Credits the payer and debits every listed participant by an equal share.
    ///
    /// The expense is checked in full, including the range of every resulting
    /// balance, before any balance changes, so a rejected expense leaves the
    /// accumulator untouched.
    pub fn apply(&mut self, index: usize, expense: &Expense<'a>) -> Result<(), LedgerError<'a>> {
        let share = self.validate(index, expense)?;
        let out_of_range = || LedgerError::AmountOutOfRange {
            index,
            description: expense.description,
        };

        // Net per person first so a payer who also participates is not
        // rejected for an intermediate value.
        let mut deltas: FxHashMap<&'a str, Money> = FxHashMap::default();
        deltas.insert(expense.paid_by, expense.amount);
        for &participant in &expense.participants {
            let delta = deltas.entry(participant).or_insert(Money::ZERO);
            *delta = delta.checked_sub(share).ok_or_else(out_of_range)?;
        }

        let mut updated = Vec::with_capacity(deltas.len());
        for (person, delta) in deltas {
            let Some(&current) = self.balances.get(person) else {
                continue;
            };
            updated.push((person, current.checked_add(delta).ok_or_else(out_of_range)?));
        }

        for (person, balance) in updated {
            if let Some(slot) = self.balances.get_mut(person) {
                *slot = balance;
            }
        }
        Ok(())
    }

    fn validate(&self, index: usize, expense: &Expense<'a>) -> Result<Money, LedgerError<'a>> {
        let description = expense.description;
        if !expense.amount.is_positive() {
            return Err(LedgerError::NonPositiveAmount {
                index,
                description,
                amount: expense.amount,
            });
        }
        let Some(share) = expense.amount.split(expense.participants.len()) else {
            return Err(LedgerError::NoParticipants { index, description });
        };
        if !self.balances.contains_key(expense.paid_by) {
            return Err(LedgerError::UnknownPayer {
                name: expense.paid_by,
                index,
                description,
            });
        }
        if let Some(&name) = expense
            .participants
            .iter()
            .find(|name| !self.balances.contains_key(**name))
        {
            return Err(LedgerError::UnknownParticipant {
                name,
                index,
                description,
            });
        }
        Ok(share)
    }

    pub fn into_balances(self) -> Vec<Balance<'a>> {
        self.balances
            .into_iter()
            .map(|(person, amount)| Balance { person, amount })
            .collect()
    }
}

/// Reduces `expenses` to one net balance per roster member, in roster order.
///
/// Fails on the first invalid expense; no balances are returned in that case.
pub fn compute_balances<'a>(
    roster: &Roster<'a>,
    expenses: &[Expense<'a>],
) -> Result<Vec<Balance<'a>>, LedgerError<'a>> {
    let mut accumulator = BalanceAccumulator::new(roster);
    for (index, expense) in expenses.iter().enumerate() {
        accumulator.apply(index, expense)?;
    }

    tracing::debug!(
        member_count = roster.len(),
        expense_count = expenses.len(),
        "Balances computed"
    );
    Ok(accumulator.into_balances())
}
