//! Indian rupee amounts.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// An amount in Indian rupees.
///
/// The backend sends amounts as JSON numbers. `Display` renders them the way
/// the dashboard shows money: a `₹` prefix, Indian digit grouping
/// (lakh/crore: `1,23,45,678`), at most two decimals, and no trailing zeros.
///
/// ```
/// use rust_decimal::Decimal;
/// use wecare_core::Rupees;
///
/// assert_eq!(Rupees::new(Decimal::new(1234567, 0)).to_string(), "₹12,34,567");
/// assert_eq!(Rupees::new(Decimal::new(2505, 1)).to_string(), "₹250.5");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rupees(Decimal);

impl Rupees {
    pub const ZERO: Self = Self(Decimal::ZERO);

    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Average per item, rounded to whole rupees; zero when `count` is zero.
    #[must_use]
    pub fn average_over(self, count: u64) -> Self {
        if count == 0 {
            return Self::ZERO;
        }
        Self(
            (self.0 / Decimal::from(count))
                .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero),
        )
    }
}

impl From<Decimal> for Rupees {
    fn from(amount: Decimal) -> Self {
        Self(amount)
    }
}

impl core::ops::Mul<Decimal> for Rupees {
    type Output = Self;

    fn mul(self, rhs: Decimal) -> Self {
        Self(self.0 * rhs)
    }
}

/// Group an ASCII digit string the Indian way: last three, then pairs.
fn group_en_in(digits: &str) -> String {
    let len = digits.len();
    if len <= 3 {
        return digits.to_owned();
    }
    let (head, tail) = digits.split_at(len - 3);
    let mut out = String::with_capacity(len + len / 2);
    let offset = head.len() % 2;
    for (i, c) in head.chars().enumerate() {
        if i > 0 && (i + 2 - offset) % 2 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out.push(',');
    out.push_str(tail);
    out
}

impl fmt::Display for Rupees {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self
            .0
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .normalize();
        let text = rounded.abs().to_string();
        let (int_part, frac_part) = text.split_once('.').unwrap_or((&text, ""));

        if rounded.is_sign_negative() && !rounded.is_zero() {
            f.write_str("-")?;
        }
        write!(f, "₹{}", group_en_in(int_part))?;
        if !frac_part.is_empty() {
            write!(f, ".{frac_part}")?;
        }
        Ok(())
    }
}
