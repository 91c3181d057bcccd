use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use fxhash::FxHashSet;
use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};

use crate::error::LedgerError;

/// Exact decimal amount of money.
///
/// Shares are divided without rounding, so the only precision loss is the
/// 28-digit limit of [`Decimal`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);
    /// Largest magnitude a balance can hold, about 7.9e28.
    pub const MAX: Self = Self(Decimal::MAX);

    /// `units` scaled down by `10^scale`, e.g. `Money::new(1234, 2)` is 12.34.
    pub fn new(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    /// Returns `None` for NaN, infinities and magnitudes the decimal cannot
    /// hold: above [`Money::MAX`], or nonzero but below `1e-28`.
    pub fn try_from_f64(value: f64) -> Option<Self> {
        if !value.is_finite() {
            return None;
        }
        let decimal = Decimal::from_f64(value)?;
        if decimal.is_zero() && value != 0.0 {
            return None;
        }
        Some(Self(decimal))
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0.to_f64().unwrap_or_default()
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    pub fn is_negative(self) -> bool {
        self.0 < Decimal::ZERO
    }

    pub fn checked_add(self, rhs: Self) -> Option<Self> {
        self.0.checked_add(rhs.0).map(Self)
    }

    pub fn checked_sub(self, rhs: Self) -> Option<Self> {
        self.0.checked_sub(rhs.0).map(Self)
    }

    pub fn round_dp(self, dp: u32) -> Self {
        Self(self.0.round_dp(dp))
    }

    /// Equal share of this amount among `parts` people. `None` when `parts` is zero.
    pub fn split(self, parts: usize) -> Option<Self> {
        if parts == 0 {
            return None;
        }
        Some(Self(self.0 / Decimal::from(parts)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

/// The people an expense list may refer to, in the order they were given.
#[derive(Clone, Debug)]
pub struct Roster<'a> {
    members: Vec<&'a str>,
    lookup: FxHashSet<&'a str>,
}

impl<'a> Roster<'a> {
    pub fn try_new<I>(members: I) -> Result<Self, LedgerError<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let members: Vec<&'a str> = members.into_iter().collect();
        if members.is_empty() {
            return Err(LedgerError::EmptyRoster);
        }

        let mut lookup = FxHashSet::default();
        lookup.reserve(members.len());
        for (index, &name) in members.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(LedgerError::BlankMember { index });
            }
            if !lookup.insert(name) {
                return Err(LedgerError::DuplicateMember { name });
            }
        }

        Ok(Self { members, lookup })
    }

    pub fn members(&self) -> &[&'a str] {
        &self.members
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.members.iter().copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lookup.contains(name)
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

}

/// One shared cost: `paid_by` fronted `amount`, split evenly over `participants`.
///
/// A name listed twice in `participants` carries two shares.
#[derive(Clone, Debug, PartialEq)]
pub struct Expense<'a> {
    pub description: &'a str,
    pub amount: Money,
    pub paid_by: &'a str,
    pub participants: Vec<&'a str>,
}

/// Net position of one person: positive is owed money, negative owes money.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Balance<'a> {
    pub person: &'a str,
    pub amount: Money,
}

/// `from` pays `to` the given positive amount.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transaction<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: Money,
}

#[derive(Debug, PartialEq)]
pub struct Settlement<'a> {
    pub balances: Vec<Balance<'a>>,
    pub transactions: Vec<Transaction<'a>>,
}
