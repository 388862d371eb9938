//! Fixed-point monetary amounts.
//!
//! Records are stored with floating euros; every sum in the statistics core is
//! accumulated in integer cents so totals do not depend on summation order.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};

/// An amount of euro cents
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Cents(i64);

impl Cents {
    pub const ZERO: Cents = Cents(0);

    /// Largest magnitude accepted for a single stored record (one billion euros)
    pub const MAX_RECORD: Cents = Cents(100_000_000_000);

    /// Largest combined magnitude of one fetched record set. Any total or
    /// difference of totals drawn from such a set fits in an `i64`.
    pub const MAX_TOTAL: Cents = Cents(i64::MAX / 4);

    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Convert a floating euro amount, rounding half away from zero
    pub fn from_euros(euros: f64) -> Self {
        Self((euros * 100.0).round() as i64)
    }

    /// Like `from_euros`, but `None` for non-finite values or amounts beyond
    /// [`Cents::MAX_RECORD`]
    pub fn try_from_euros(euros: f64) -> Option<Self> {
        let cents = (euros * 100.0).round();
        if !cents.is_finite() || cents.abs() > Self::MAX_RECORD.0 as f64 {
            return None;
        }
        Some(Self(cents as i64))
    }

    pub fn checked_add(self, rhs: Cents) -> Option<Cents> {
        self.0.checked_add(rhs.0).map(Cents)
    }

    pub fn abs(self) -> Cents {
        Cents(self.0.saturating_abs())
    }

    pub fn to_euros(self) -> f64 {
        self.0 as f64 / 100.0
    }

    pub fn as_i64(self) -> i64 {
        self.0
    }

    pub fn is_zero(self) -> bool {
        self.0 == 0
    }
}

impl Add for Cents {
    type Output = Cents;

    fn add(self, rhs: Cents) -> Cents {
        Cents(self.0 + rhs.0)
    }
}

impl AddAssign for Cents {
    fn add_assign(&mut self, rhs: Cents) {
        self.0 += rhs.0;
    }
}

impl Sub for Cents {
    type Output = Cents;

    fn sub(self, rhs: Cents) -> Cents {
        Cents(self.0 - rhs.0)
    }
}

impl Sum for Cents {
    fn sum<I: Iterator<Item = Cents>>(iter: I) -> Cents {
        iter.fold(Cents::ZERO, Add::add)
    }
}

impl<'a> Sum<&'a Cents> for Cents {
    fn sum<I: Iterator<Item = &'a Cents>>(iter: I) -> Cents {
        iter.copied().sum()
    }
}

impl fmt::Display for Cents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}
