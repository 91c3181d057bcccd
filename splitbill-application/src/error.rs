use splitbill_domain::{LedgerError, ReferenceRole};
use thiserror::Error;

/// Rejection of a settlement request, owned so it can outlive the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettlementError {
    #[error("Malformed request: {0}")]
    MalformedRequest(String),
    #[error("Expense {index} has an amount that is not a usable number")]
    InvalidAmount { index: usize },
    #[error("Expense {index} ({description:?}) has amount {amount}, outside the supported range")]
    AmountOutOfRange {
        index: usize,
        description: String,
        amount: String,
    },
    #[error("Balance of {person} is not a usable number")]
    InvalidBalance { person: String },
    #[error("Balance of {person} is {amount}, outside the supported range")]
    BalanceOutOfRange { person: String, amount: String },
    #[error("The list of people is empty")]
    EmptyRoster,
    #[error("{name} appears more than once in the list of people")]
    DuplicateMember { name: String },
    #[error("Person at position {index} has a blank name")]
    BlankMember { index: usize },
    #[error("Expense {index} ({description:?}) must have a positive amount, got {amount}")]
    NonPositiveAmount {
        index: usize,
        description: String,
        amount: String,
    },
    #[error("Expense {index} ({description:?}) has no participants")]
    NoParticipants { index: usize, description: String },
    #[error("{} {name} is not in the list of people (expense {index}, {description:?})", role_label(.role))]
    UnknownMember {
        role: ReferenceRole,
        name: String,
        index: usize,
        description: String,
    },
    #[error("Expense {index} ({description:?}) pushes a balance outside the supported range")]
    LedgerOverflow { index: usize, description: String },
}

fn role_label(role: &ReferenceRole) -> &'static str {
    match role {
        ReferenceRole::Payer => "Payer",
        ReferenceRole::Participant => "Participant",
    }
}

impl SettlementError {
    /// Stable machine-readable code, suitable for API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            SettlementError::MalformedRequest(_) => "malformed_request",
            SettlementError::InvalidAmount { .. } => "invalid_amount",
            SettlementError::AmountOutOfRange { .. } | SettlementError::LedgerOverflow { .. } => {
                "amount_out_of_range"
            }
            SettlementError::InvalidBalance { .. } => "invalid_balance",
            SettlementError::BalanceOutOfRange { .. } => "balance_out_of_range",
            SettlementError::EmptyRoster => "empty_roster",
            SettlementError::DuplicateMember { .. } => "duplicate_member",
            SettlementError::BlankMember { .. } => "blank_member",
            SettlementError::NonPositiveAmount { .. } => "non_positive_amount",
            SettlementError::NoParticipants { .. } => "no_participants",
            SettlementError::UnknownMember {
                role: ReferenceRole::Payer,
                ..
            } => "unknown_payer",
            SettlementError::UnknownMember {
                role: ReferenceRole::Participant,
                ..
            } => "unknown_participant",
        }
    }
}

impl From<LedgerError<'_>> for SettlementError {
    fn from(err: LedgerError<'_>) -> Self {
        match err {
            LedgerError::EmptyRoster => SettlementError::EmptyRoster,
            LedgerError::DuplicateMember { name } => SettlementError::DuplicateMember {
                name: name.to_owned(),
            },
            LedgerError::BlankMember { index } => SettlementError::BlankMember { index },
            LedgerError::NonPositiveAmount {
                index,
                description,
                amount,
            } => SettlementError::NonPositiveAmount {
                index,
                description: description.to_owned(),
                amount: amount.to_string(),
            },
            LedgerError::NoParticipants { index, description } => {
                SettlementError::NoParticipants {
                    index,
                    description: description.to_owned(),
                }
            }
            LedgerError::UnknownPayer {
                name,
                index,
                description,
            } => SettlementError::UnknownMember {
                role: ReferenceRole::Payer,
                name: name.to_owned(),
                index,
                description: description.to_owned(),
            },
            LedgerError::UnknownParticipant {
                name,
                index,
                description,
            } => SettlementError::UnknownMember {
                role: ReferenceRole::Participant,
                name: name.to_owned(),
                index,
                description: description.to_owned(),
            },
            LedgerError::AmountOutOfRange { index, description } => {
                SettlementError::LedgerOverflow {
                    index,
                    description: description.to_owned(),
                }
            }
        }
    }
}

impl From<serde_json::Error> for SettlementError {
    fn from(err: serde_json::Error) -> Self {
        SettlementError::MalformedRequest(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use splitbill_domain::Money;

    #[rstest]
    #[case::payer(
        LedgerError::UnknownPayer { name: "Zoe", index: 2, description: "taxi" },
        "unknown_payer",
        "Payer Zoe is not in the list of people (expense 2, \"taxi\")"
    )]
    #[case::participant(
        LedgerError::UnknownParticipant { name: "Z", index: 0, description: "lunch" },
        "unknown_participant",
        "Participant Z is not in the list of people (expense 0, \"lunch\")"
    )]
    #[case::non_positive(
        LedgerError::NonPositiveAmount { index: 1, description: "gift", amount: Money::from_i64(-3) },
        "non_positive_amount",
        "Expense 1 (\"gift\") must have a positive amount, got -3"
    )]
    #[case::empty_roster(LedgerError::EmptyRoster, "empty_roster", "The list of people is empty")]
    #[case::overflow(
        LedgerError::AmountOutOfRange { index: 1, description: "yacht" },
        "amount_out_of_range",
        "Expense 1 (\"yacht\") pushes a balance outside the supported range"
    )]
    fn ledger_errors_keep_kind_and_message(
        #[case] source: LedgerError<'static>,
        #[case] expected_kind: &str,
        #[case] expected_message: &str,
    ) {
        assert_eq!(source.kind(), expected_kind);
        let err = SettlementError::from(source);
        assert_eq!(err.kind(), expected_kind);
        assert_eq!(err.to_string(), expected_message);
    }
}
