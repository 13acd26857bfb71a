use std::{
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
    str::FromStr,
};

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};

use crate::EngineError;

/// Signed money amount represented as **integer cents**.
///
/// Use this type for **all** monetary values in the engine (expense amounts,
/// owed shares, balances, settlements) to avoid floating-point drift. Display
/// formatting to two decimals only happens at the boundary.
///
/// # Examples
///
/// ```rust
/// use engine::Money;
///
/// let amount = Money::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// ```
///
/// Parsing from user input (accepts `.` or `,` as decimal separator; rejects >
/// 2 decimals):
///
/// ```rust
/// use engine::Money;
///
/// assert_eq!("10".parse::<Money>().unwrap().cents(), 1000);
/// assert_eq!("10,5".parse::<Money>().unwrap().cents(), 1050);
/// assert!("12.345".parse::<Money>().is_err());
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct Money(i64);

/// Width of the band around zero treated as "settled" (one cent).
pub const TOLERANCE: Money = Money(1);

impl Money {
    pub const ZERO: Money = Money(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is 0.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the amount is > 0.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Returns `true` if the amount is < 0.
    #[must_use]
    pub const fn is_negative(self) -> bool {
        self.0 < 0
    }

    /// Absolute value of the amount, saturating at `i64::MAX` cents.
    #[must_use]
    pub const fn abs(self) -> Money {
        Money(self.0.saturating_abs())
    }

    /// Returns `true` when the amount lies inside the ±0.01 tolerance band.
    #[must_use]
    pub const fn is_negligible(self) -> bool {
        self.0.abs() <= TOLERANCE.0
    }

    /// Checked addition (returns `None` on overflow).
    #[must_use]
    pub fn checked_add(self, rhs: Money) -> Option<Money> {
        self.0.checked_add(rhs.0).map(Money)
    }

    /// Checked subtraction (returns `None` on overflow).
    #[must_use]
    pub fn checked_sub(self, rhs: Money) -> Option<Money> {
        self.0.checked_sub(rhs.0).map(Money)
    }

    /// Addition for running totals: overflow is an [`EngineError::InvalidAmount`].
    pub fn try_add(self, rhs: Money) -> Result<Money, EngineError> {
        self.checked_add(rhs)
            .ok_or_else(|| EngineError::InvalidAmount(format!("amount too large: {self} + {rhs}")))
    }

    /// Subtraction for running totals: overflow is an [`EngineError::InvalidAmount`].
    pub fn try_sub(self, rhs: Money) -> Result<Money, EngineError> {
        self.checked_sub(rhs)
            .ok_or_else(|| EngineError::InvalidAmount(format!("amount too large: {self} - {rhs}")))
    }

    /// Sums `amounts`, failing on overflow.
    pub fn try_sum<I>(amounts: I) -> Result<Money, EngineError>
    where
        I: IntoIterator<Item = Money>,
    {
        amounts.into_iter().try_fold(Money::ZERO, Money::try_add)
    }

    /// Exact value as a two-decimal [`Decimal`].
    #[must_use]
    pub fn to_decimal(self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    /// Converts a decimal amount into cents, rejecting sub-cent precision.
    ///
    /// ```rust
    /// use engine::Money;
    /// use rust_decimal::Decimal;
    ///
    /// assert_eq!(Money::try_from_decimal(Decimal::new(3333, 2)).unwrap().cents(), 3333);
    /// assert!(Money::try_from_decimal(Decimal::new(33333, 3)).is_err());
    /// ```
    pub fn try_from_decimal(value: Decimal) -> Result<Money, EngineError> {
        let scaled = value
            .checked_mul(Decimal::ONE_HUNDRED)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))?;
        if !scaled.fract().is_zero() {
            return Err(EngineError::InvalidAmount(format!(
                "too many decimals: {value}"
            )));
        }
        scaled
            .to_i64()
            .map(Money)
            .ok_or_else(|| EngineError::InvalidAmount("amount too large".to_string()))
    }

    /// Converts a decimal amount into cents, rounding half away from zero.
    ///
    /// Meant for figures coming from outside the engine (e.g. float noise in
    /// external reports); engine-internal amounts are always exact.
    pub fn from_decimal_rounded(value: Decimal) -> Result<Money, EngineError> {
        let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        Money::try_from_decimal(rounded)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}

impl From<i64> for Money {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

impl From<Money> for i64 {
    fn from(value: Money) -> Self {
        value.0
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, rhs: Money) -> Self::Output {
        Money(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Money) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Money) -> Self::Output {
        Money(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Money) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Money;

    fn neg(self) -> Self::Output {
        Money(-self.0)
    }
}

/// Saturates at the `i64` bounds instead of overflowing; use
/// [`Money::try_sum`] where an overflow must be reported.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, |acc, m| Money(acc.0.saturating_add(m.0)))
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl FromStr for Money {
    type Err = EngineError;

    /// Parses a decimal string into cents.
    ///
    /// Accepts `.` or `,` as decimal separator and an optional leading `+`/`-`.
    ///
    /// Validation rules:
    /// - max 2 fractional digits (rejects `12.345`)
    /// - rejects empty/invalid strings
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let empty = || EngineError::InvalidAmount("empty amount".to_string());
        let invalid = || EngineError::InvalidAmount("invalid amount".to_string());
        let overflow = || EngineError::InvalidAmount("amount too large".to_string());

        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(empty());
        }

        let (negative, rest) = if let Some(stripped) = trimmed.strip_prefix('-') {
            (true, stripped)
        } else if let Some(stripped) = trimmed.strip_prefix('+') {
            (false, stripped)
        } else {
            (false, trimmed)
        };

        let rest = rest.trim();
        if rest.is_empty() {
            return Err(empty());
        }

        let rest = rest.replace(',', ".");
        let mut parts = rest.split('.');
        let units_str = parts.next().ok_or_else(invalid)?;
        let cents_str = parts.next();

        if parts.next().is_some() {
            return Err(invalid());
        }

        if units_str.is_empty() || !units_str.chars().all(|c| c.is_ascii_digit()) {
            return Err(invalid());
        }

        let units: i64 = units_str.parse().map_err(|_| invalid())?;

        let cents: i64 = match cents_str {
            None | Some("") => 0,
            Some(frac) => {
                if !frac.chars().all(|c| c.is_ascii_digit()) {
                    return Err(invalid());
                }
                match frac.len() {
                    1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
                    2 => frac.parse::<i64>().map_err(|_| invalid())?,
                    _ => return Err(EngineError::InvalidAmount("too many decimals".to_string())),
                }
            }
        };

        let total = units
            .checked_mul(100)
            .and_then(|v| v.checked_add(cents))
            .ok_or_else(overflow)?;

        let signed = if negative {
            total.checked_neg().ok_or_else(overflow)?
        } else {
            total
        };

        Ok(Money(signed))
    }
}
