//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  (24.99 + 3.00 + 1.50) * 2 in floating point can land on               │
//! │  58.980000000000004, which then needs a display-time fixup.            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    Catalog decimals must be whole cents and are converted ONCE.        │
//! │    Everything after that is exact integer arithmetic, so a total      │
//! │    is already exact to two places and never needs rounding.           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use crust_core::money::Money;
//! use rust_decimal::Decimal;
//! use std::str::FromStr;
//!
//! let base = Money::from_decimal(Decimal::from_str("24.99").unwrap()).unwrap();
//! assert_eq!(base.cents(), 2499);
//!
//! let total = (base + Money::from_cents(300)) * 2;
//! assert_eq!(total.to_string(), "$55.98");
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

/// Currency precision used for every amount the engine produces.
pub const DECIMAL_PLACES: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Design Decisions
/// - **i64 (signed)**: price deltas may be negative (e.g. a smaller size)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serde**: serialised as integer cents
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use crust_core::money::Money;
    ///
    /// let price = Money::from_cents(2499); // Represents $24.99
    /// assert_eq!(price.cents(), 2499);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Converts a decimal currency amount to Money.
    ///
    /// Returns `None` if the amount has a fraction of a cent (see
    /// [`Money::is_whole_cents`]) or does not fit in i64 cents. Nothing is
    /// rounded: a sub-cent price would make `unit × quantity` depend on where
    /// the rounding happened.
    ///
    /// ## Example
    /// ```rust
    /// use crust_core::money::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let m = Money::from_decimal(Decimal::from_str("24.990").unwrap()).unwrap();
    /// assert_eq!(m.cents(), 2499);
    /// assert_eq!(Money::from_decimal(Decimal::from_str("1.005").unwrap()), None);
    /// ```
    pub fn from_decimal(amount: Decimal) -> Option<Self> {
        if !Money::is_whole_cents(amount) {
            return None;
        }
        amount
            .normalize()
            .checked_mul(Decimal::ONE_HUNDRED)
            .and_then(|cents| cents.to_i64())
            .map(Money)
    }

    /// True if `amount` has at most two significant decimal places.
    pub fn is_whole_cents(amount: Decimal) -> bool {
        amount.normalize().scale() <= DECIMAL_PLACES
    }

    /// Returns the amount as a two-place decimal.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, DECIMAL_PLACES)
    }

    /// Returns the value in cents (smallest currency unit).
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (dollars) portion.
    #[inline]
    pub const fn dollars(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (cents) portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns this amount, or zero if it is negative.
    #[inline]
    pub fn non_negative(self) -> Self {
        self.max(Money::zero())
    }

    /// Multiplies money by a quantity, returning `None` on overflow.
    ///
    /// ## Example
    /// ```rust
    /// use crust_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2949); // $29.49
    /// assert_eq!(unit_price.checked_mul_quantity(2), Some(Money::from_cents(5898)));
    /// assert_eq!(Money::from_cents(i64::MAX).checked_mul_quantity(2), None);
    /// ```
    #[inline]
    pub fn checked_mul_quantity(&self, qty: i64) -> Option<Self> {
        self.0.checked_mul(qty).map(Money)
    }

    /// Adds two amounts, returning `None` on overflow.
    #[inline]
    pub fn checked_add(&self, other: Money) -> Option<Self> {
        self.0.checked_add(other.0).map(Money)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// Locale-aware formatting belongs to the session config
/// (`SessionConfig::format_currency`).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}${}.{:02}",
            sign,
            self.dollars().abs(),
            self.cents_part()
        )
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Multiplication by i64 (quantities, excess topping counts).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_from_cents() {
        let money = Money::from_cents(2499);
        assert_eq!(money.cents(), 2499);
        assert_eq!(money.dollars(), 24);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_from_decimal_whole_cents() {
        assert_eq!(Money::from_decimal(dec("24.99")).unwrap().cents(), 2499);
        assert_eq!(Money::from_decimal(dec("2.5")).unwrap().cents(), 250);
        assert_eq!(Money::from_decimal(dec("3")).unwrap().cents(), 300);
        assert_eq!(Money::from_decimal(dec("1.500")).unwrap().cents(), 150);
        assert_eq!(Money::from_decimal(dec("-2.25")).unwrap().cents(), -225);
    }

    #[test]
    fn test_from_decimal_rejects_fractions_of_a_cent() {
        assert_eq!(Money::from_decimal(dec("1.005")), None);
        assert_eq!(Money::from_decimal(dec("-0.001")), None);
        assert!(!Money::is_whole_cents(dec("19.999")));
        assert!(Money::is_whole_cents(dec("19.990")));
    }

    #[test]
    fn test_from_decimal_out_of_range() {
        assert_eq!(Money::from_decimal(Decimal::MAX), None);
    }

    #[test]
    fn test_to_decimal() {
        assert_eq!(Money::from_cents(5898).to_decimal(), dec("58.98"));
        assert_eq!(Money::from_cents(800).to_decimal().to_string(), "8.00");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(5898)), "$58.98");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-200)), "-$2.00");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_cents(1000);
        let b = Money::from_cents(500);

        assert_eq!((a + b).cents(), 1500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 3).cents(), 3000);

        let summed: Money = [a, b, b].into_iter().sum();
        assert_eq!(summed.cents(), 2000);
    }

    #[test]
    fn test_non_negative() {
        assert_eq!(Money::from_cents(-150).non_negative(), Money::zero());
        assert_eq!(Money::from_cents(150).non_negative().cents(), 150);
    }

    #[test]
    fn test_checked_operations() {
        assert_eq!(
            Money::from_cents(299).checked_mul_quantity(3),
            Some(Money::from_cents(897))
        );
        assert_eq!(Money::from_cents(i64::MAX).checked_add(Money::from_cents(1)), None);
    }

    #[test]
    fn test_serializes_as_cents() {
        let json = serde_json::to_string(&Money::from_cents(2499)).unwrap();
        assert_eq!(json, "2499");
    }
}
