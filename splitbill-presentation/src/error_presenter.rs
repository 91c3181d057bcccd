use splitbill_application::SettlementError;

/// One-line, human readable rendering of a rejected request.
pub fn format_settlement_error(error: &SettlementError) -> String {
    format!("[{}] {error}", error.kind())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use splitbill_domain::ReferenceRole;

    #[rstest]
    #[case::empty_roster(SettlementError::EmptyRoster, "[empty_roster] The list of people is empty")]
    #[case::unknown_payer(
        SettlementError::UnknownMember {
            role: ReferenceRole::Payer,
            name: "Zoe".into(),
            index: 0,
            description: "taxi".into(),
        },
        "[unknown_payer] Payer Zoe is not in the list of people (expense 0, \"taxi\")"
    )]
    #[case::invalid_amount(
        SettlementError::InvalidAmount { index: 3 },
        "[invalid_amount] Expense 3 has an amount that is not a usable number"
    )]
    fn prefixes_kind(#[case] error: SettlementError, #[case] expected: &str) {
        assert_eq!(format_settlement_error(&error), expected);
    }
}
