use std::fmt;

use thiserror::Error;

use crate::model::Money;

/// Which side of an expense named someone outside the roster.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReferenceRole {
    Payer,
    Participant,
}

impl fmt::Display for ReferenceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceRole::Payer => f.write_str("payer"),
            ReferenceRole::Participant => f.write_str("participant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError<'a> {
    #[error("The list of people is empty")]
    EmptyRoster,
    #[error("{name} appears more than once in the list of people")]
    DuplicateMember { name: &'a str },
    #[error("Person at position {index} has a blank name")]
    BlankMember { index: usize },
    #[error("Expense {index} ({description:?}) must have a positive amount, got {amount}")]
    NonPositiveAmount {
        index: usize,
        description: &'a str,
        amount: Money,
    },
    #[error("Expense {index} ({description:?}) has no participants")]
    NoParticipants { index: usize, description: &'a str },
    #[error("Payer {name} is not in the list of people (expense {index}, {description:?})")]
    UnknownPayer {
        name: &'a str,
        index: usize,
        description: &'a str,
    },
    #[error("Participant {name} is not in the list of people (expense {index}, {description:?})")]
    UnknownParticipant {
        name: &'a str,
        index: usize,
        description: &'a str,
    },
    #[error("Expense {index} ({description:?}) pushes a balance outside the supported range")]
    AmountOutOfRange { index: usize, description: &'a str },
}

impl LedgerError<'_> {
    /// Stable machine-readable code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            LedgerError::EmptyRoster => "empty_roster",
            LedgerError::DuplicateMember { .. } => "duplicate_member",
            LedgerError::BlankMember { .. } => "blank_member",
            LedgerError::NonPositiveAmount { .. } => "non_positive_amount",
            LedgerError::NoParticipants { .. } => "no_participants",
            LedgerError::UnknownPayer { .. } => "unknown_payer",
            LedgerError::UnknownParticipant { .. } => "unknown_participant",
            LedgerError::AmountOutOfRange { .. } => "amount_out_of_range",
        }
    }

    pub fn reference_role(&self) -> Option<ReferenceRole> {
        match self {
            LedgerError::UnknownPayer { .. } => Some(ReferenceRole::Payer),
            LedgerError::UnknownParticipant { .. } => Some(ReferenceRole::Participant),
            _ => None,
        }
    }
}
