//! Money type for representing menu prices.
//!
//! Uses cents-based integer representation to avoid floating-point
//! precision issues that plague monetary calculations. Amounts are
//! currency-agnostic with two fractional digits and never go below zero.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, Mul};

/// Number of fractional digits kept by [`Money`].
pub const DECIMAL_PLACES: u32 = 2;

const CENTS_PER_UNIT: i64 = 10_i64.pow(DECIMAL_PLACES);

/// A non-negative monetary amount.
///
/// Stored in the smallest unit (cents). Negative inputs clamp to zero.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(from = "i64", into = "i64")]
pub struct Money {
    amount_cents: i64,
}

impl Money {
    /// Zero.
    pub const ZERO: Money = Money { amount_cents: 0 };

    /// Create a Money value from cents. Negative amounts clamp to zero.
    pub fn from_cents(amount_cents: i64) -> Self {
        Self {
            amount_cents: amount_cents.max(0),
        }
    }

    /// Amount in cents.
    pub fn cents(&self) -> i64 {
        self.amount_cents
    }

    /// Check if this is zero.
    pub fn is_zero(&self) -> bool {
        self.amount_cents == 0
    }

    /// Parse a price string using either `.` or `,` as decimal separator.
    ///
    /// Anything unparseable yields zero.
    ///
    /// ```
    /// use turbo_menu::Money;
    /// assert_eq!(Money::parse("29,90").cents(), 2990);
    /// assert_eq!(Money::parse("5.5").cents(), 550);
    /// assert_eq!(Money::parse("abc").cents(), 0);
    /// ```
    pub fn parse(raw: &str) -> Self {
        parse_cents(raw.trim()).map(Self::from_cents).unwrap_or_default()
    }

    /// Convert a decimal number. Non-finite values yield zero.
    pub fn from_decimal(amount: f64) -> Self {
        if !amount.is_finite() || amount <= 0.0 {
            return Self::ZERO;
        }
        let cents = (amount * CENTS_PER_UNIT as f64).round();
        if cents >= i64::MAX as f64 {
            return Self::from_cents(i64::MAX);
        }
        Self::from_cents(cents as i64)
    }

    /// Convert a loosely typed catalog value (number or string).
    ///
    /// Missing, null or malformed values yield zero.
    pub fn from_value(value: &serde_json::Value) -> Self {
        match value {
            // serde_json prints the shortest round-trip form, so numbers
            // and strings go through the same exact decimal parse.
            serde_json::Value::Number(n) => match parse_cents(&n.to_string()) {
                Some(cents) => Self::from_cents(cents),
                None => n.as_f64().map(Self::from_decimal).unwrap_or_default(),
            },
            serde_json::Value::String(s) => Self::parse(s),
            _ => Self::ZERO,
        }
    }

    /// Add another Money value, saturating at the maximum.
    pub fn add(&self, other: &Money) -> Money {
        Money::from_cents(self.amount_cents.saturating_add(other.amount_cents))
    }

    /// Multiply by an integer factor. Negative factors yield zero.
    pub fn multiply(&self, factor: i64) -> Money {
        Money::from_cents(self.amount_cents.saturating_mul(factor.max(0)))
    }

    /// Format as a display string without symbol (e.g., "34.90").
    pub fn display_amount(&self) -> String {
        format!(
            "{}.{:0width$}",
            self.amount_cents / CENTS_PER_UNIT,
            self.amount_cents % CENTS_PER_UNIT,
            width = DECIMAL_PLACES as usize
        )
    }
}

/// Exact decimal parse into cents, rounding half-up past the second digit.
fn parse_cents(raw: &str) -> Option<i64> {
    let raw = raw.strip_prefix('+').unwrap_or(raw);
    if raw.starts_with('-') {
        return Some(0);
    }

    let normalized = raw.replace(',', ".");
    let (whole, frac) = match normalized.split_once('.') {
        Some((w, f)) => (w, f),
        None => (normalized.as_str(), ""),
    };

    if whole.is_empty() && frac.is_empty() {
        return None;
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut cents: i64 = 0;
    for digit in whole.bytes() {
        cents = cents
            .checked_mul(10)?
            .checked_add(i64::from(digit - b'0'))?;
    }
    cents = cents.checked_mul(CENTS_PER_UNIT)?;

    let mut digits = frac.bytes().map(|b| i64::from(b - b'0'));
    let mut scale = CENTS_PER_UNIT / 10;
    while scale > 0 {
        cents = cents.checked_add(digits.next().unwrap_or(0) * scale)?;
        scale /= 10;
    }
    if digits.next().is_some_and(|d| d >= 5) {
        cents = cents.checked_add(1)?;
    }

    Some(cents)
}

impl From<i64> for Money {
    fn from(cents: i64) -> Self {
        Money::from_cents(cents)
    }
}

impl From<Money> for i64 {
    fn from(money: Money) -> Self {
        money.amount_cents
    }
}

impl Add for Money {
    type Output = Money;

    fn add(self, other: Money) -> Money {
        Money::add(&self, &other)
    }
}

impl Mul<i64> for Money {
    type Output = Money;

    fn mul(self, factor: i64) -> Money {
        self.multiply(factor)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Money {
        iter.fold(Money::ZERO, |acc, m| acc + m)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_amount())
    }
}
