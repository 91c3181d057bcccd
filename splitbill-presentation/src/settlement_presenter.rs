use crate::text_table::{Alignment, TextTableBuilder};
use splitbill_application::{Payment, PersonBalance, SettlementReport};
use splitbill_domain::Money;
use std::{borrow::Cow, fmt::Write};

const DISPLAY_DECIMALS: u32 = 2;
const SETTLED_MESSAGE: &str = "Everyone is settled up.";

pub struct SettlementPresenter;

pub struct SettlementView {
    pub balance_table: String,
    pub transfer_list: Option<String>,
}

impl SettlementView {
    pub fn to_text(&self) -> String {
        let mut text = String::with_capacity(self.balance_table.len() + 64);
        text.push_str("Balances\n");
        text.push_str(&self.balance_table);
        text.push_str("\nSettlement plan\n");
        match &self.transfer_list {
            Some(list) => text.push_str(list),
            None => {
                text.push_str(SETTLED_MESSAGE);
                text.push('\n');
            }
        }
        text
    }
}

impl SettlementPresenter {
    pub fn render(report: &SettlementReport) -> SettlementView {
        let balance_table = Self::build_balance_table(&report.balances);
        let transfer_list = if report.transactions.is_empty() {
            None
        } else {
            Some(Self::build_transfer_list(&report.transactions))
        };

        SettlementView {
            balance_table,
            transfer_list,
        }
    }

    pub fn build_balance_table(balances: &[PersonBalance]) -> String {
        TextTableBuilder::new()
            .alignments(&[Alignment::Left, Alignment::Right])
            .headers(&[Cow::Borrowed("Person"), Cow::Borrowed("Balance")])
            .rows(balances.iter().map(|balance| {
                [
                    Cow::Borrowed(balance.person.as_str()),
                    Cow::Owned(format_signed(balance.amount)),
                ]
            }))
            .build()
    }

    pub fn build_transfer_list(payments: &[Payment]) -> String {
        let mut list = String::new();
        for payment in payments {
            let _ = writeln!(
                list,
                "{} -> {}: {}",
                payment.from,
                payment.to,
                format_amount(payment.amount)
            );
        }
        list
    }
}

/// Rounds for display only; `-0.00` collapses to `0.00`.
fn format_amount(amount: Money) -> String {
    let rounded = amount.round_dp(DISPLAY_DECIMALS);
    let rounded = if rounded.is_zero() { Money::ZERO } else { rounded };
    format!("{:.2}", rounded.as_decimal())
}

fn format_signed(amount: Money) -> String {
    let formatted = format_amount(amount);
    if formatted.starts_with('-') {
        formatted
    } else {
        format!("+{formatted}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn sample_report() -> SettlementReport {
        SettlementReport {
            balances: vec![
                PersonBalance {
                    person: "Alice".into(),
                    amount: Money::from_i64(20),
                },
                PersonBalance {
                    person: "Bob".into(),
                    amount: Money::from_i64(-10),
                },
                PersonBalance {
                    person: "Carol".into(),
                    amount: Money::from_i64(-10),
                },
            ],
            transactions: vec![
                Payment {
                    from: "Bob".into(),
                    to: "Alice".into(),
                    amount: Money::from_i64(10),
                },
                Payment {
                    from: "Carol".into(),
                    to: "Alice".into(),
                    amount: Money::from_i64(10),
                },
            ],
        }
    }

    #[rstest]
    #[case::whole(Money::from_i64(5), "+5.00")]
    #[case::negative(Money::new(-1250, 2), "-12.50")]
    #[case::thirds(Money::from_i64(10).split(3).expect("three parts"), "+3.33")]
    #[case::rounds_to_cents(Money::new(2675, 3), "+2.68")]
    #[case::negative_dust(Money::new(-1, 3), "+0.00")]
    fn signed_amounts(#[case] amount: Money, #[case] expected: &str) {
        assert_eq!(format_signed(amount), expected);
    }

    #[test]
    fn render_lists_every_transfer() {
        let view = SettlementPresenter::render(&sample_report());

        assert_eq!(
            view.transfer_list.as_deref(),
            Some("Bob -> Alice: 10.00\nCarol -> Alice: 10.00\n")
        );
        assert!(view.balance_table.contains("Alice    +20.00"));
        assert!(view.balance_table.contains("Carol    -10.00"));
    }

    #[test]
    fn settled_group_has_no_transfer_list() {
        let report = SettlementReport {
            balances: vec![PersonBalance {
                person: "Alice".into(),
                amount: Money::ZERO,
            }],
            transactions: vec![],
        };

        let view = SettlementPresenter::render(&report);

        assert!(view.transfer_list.is_none());
        assert!(view.to_text().ends_with("Settlement plan\nEveryone is settled up.\n"));
    }
}
