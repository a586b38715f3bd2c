//! # Money Module
//!
//! Provides the `Money` type for prices, unit costs and revenue figures.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  Summing appointment prices as floats:                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌                                  │
//! │                                                                         │
//! │  Averaging revenue of 3 completed jobs:                                 │
//! │    $100.00 / 3 = $33.333...  → which cent do we report?                 │
//! │                                                                         │
//! │  OUR SOLUTION: Integer minor units                                      │
//! │    10000 cents / 3 = 3333 cents (remainder rounded explicitly)          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Workshop prices are quoted in whole currency units (a service costs
//! 50 000), while parts can carry cents (a filter at 35 000.50). Both are
//! stored as cents.
//!
//! ## Usage
//! ```rust
//! use taller_core::money::Money;
//!
//! let oil_change = Money::from_major(50_000);
//! let brake_job = Money::from_major(150_000);
//!
//! let total: Money = [oil_change, brake_job].into_iter().sum();
//! assert_eq!(total.major(), 200_000);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the smallest currency unit (cents).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Service.price ──► Appointment.price (snapshot at booking)              │
/// │                          │                                              │
/// │                          └──► Reports: revenue by service / month,      │
/// │                               total and mean revenue                    │
/// │                                                                         │
/// │  InventoryItem.unit_price ──► Stock valuation in the inventory view     │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ```rust
    /// use taller_core::money::Money;
    ///
    /// let price = Money::from_cents(3_500_050); // 35 000.50
    /// assert_eq!(price.cents(), 3_500_050);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// Saturates at the `i64` cent range instead of overflowing.
    ///
    /// ```rust
    /// use taller_core::money::Money;
    ///
    /// let price = Money::from_major(50_000);
    /// assert_eq!(price.cents(), 5_000_000);
    /// ```
    #[inline]
    pub const fn from_major(major: i64) -> Self {
        Money(major.saturating_mul(100))
    }

    /// Creates a Money value from major and minor units.
    ///
    /// For negative amounts only the major unit should be negative:
    /// `from_major_minor(-5, 50)` is -5.50. Saturates like [`Money::from_major`].
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major.saturating_mul(100).saturating_sub(minor))
        } else {
            Money(major.saturating_mul(100).saturating_add(minor))
        }
    }

    /// Returns the value in cents.
    #[inline]
    pub const fn cents(&self) -> i64 {
        self.0
    }

    /// Returns the whole-unit portion (truncated toward zero).
    #[inline]
    pub const fn major(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the cents portion (always 0-99).
    #[inline]
    pub const fn cents_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Mean of `count` amounts whose sum is `self`.
    ///
    /// Returns zero when `count` is zero instead of dividing by it, so a
    /// report over no completed appointments shows 0 rather than failing.
    /// The division rounds half away from zero to the nearest cent.
    ///
    /// ```rust
    /// use taller_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(1000).mean_over(3).cents(), 333);
    /// assert_eq!(Money::from_cents(1001).mean_over(2).cents(), 501);
    /// assert_eq!(Money::from_major(120_000).mean_over(0), Money::zero());
    /// ```
    pub fn mean_over(&self, count: usize) -> Money {
        if count == 0 {
            return Money::zero();
        }
        let count = count as i128;
        let total = self.0 as i128;
        let half = count / 2;
        let rounded = if total >= 0 {
            (total + half) / count
        } else {
            (total - half) / count
        };
        Money(rounded as i64)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Debug-oriented rendering. The console formats amounts for display with
/// the configured currency symbol and separators.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.major().abs(), self.cents_part())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

// Arithmetic saturates: report totals clamp at the i64 cent range.

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_major() {
        let money = Money::from_major(50_000);
        assert_eq!(money.cents(), 5_000_000);
        assert_eq!(money.major(), 50_000);
        assert_eq!(money.cents_part(), 0);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX - 10);
        assert_eq!((big + Money::from_cents(100)).cents(), i64::MAX);

        let mut total = big;
        total += big;
        assert_eq!(total.cents(), i64::MAX);

        let sum: Money = vec![big, big, big].into_iter().sum();
        assert_eq!(sum.cents(), i64::MAX);

        assert_eq!((Money::from_cents(i64::MIN + 1) - big).cents(), i64::MIN);
        assert_eq!(Money::from_major(i64::MAX).cents(), i64::MAX);
        assert_eq!(Money::from_major_minor(i64::MIN / 10, 50).cents(), i64::MIN);
    }

    #[test]
    fn test_from_major_minor() {
        assert_eq!(Money::from_major_minor(10, 99).cents(), 1099);
        assert_eq!(Money::from_major_minor(-5, 50).cents(), -550);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(1099)), "$10.99");
        assert_eq!(format!("{}", Money::from_major(50_000)), "$50000.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_major(50_000);
        let b = Money::from_major(120_000);

        assert_eq!((a + b).major(), 170_000);
        assert_eq!((b - a).major(), 70_000);

        let total: Money = vec![a, b, a].into_iter().sum();
        assert_eq!(total.major(), 220_000);

        let empty: Money = Vec::<Money>::new().iter().sum();
        assert!(empty.is_zero());
    }

    #[test]
    fn test_mean_over_zero_count_is_zero() {
        assert_eq!(Money::zero().mean_over(0), Money::zero());
        assert_eq!(Money::from_major(80_000).mean_over(0), Money::zero());
    }

    #[test]
    fn test_mean_over_rounds_half_up() {
        assert_eq!(Money::from_cents(5).mean_over(2).cents(), 3);
        assert_eq!(Money::from_cents(4).mean_over(3).cents(), 1);
        assert_eq!(Money::from_cents(-5).mean_over(2).cents(), -3);
        assert_eq!(
            Money::from_major(170_000).mean_over(2),
            Money::from_major(85_000)
        );
    }

    #[test]
    fn test_serializes_as_plain_cents() {
        let json = serde_json::to_string(&Money::from_major(70_000)).unwrap();
        assert_eq!(json, "7000000");
    }
}
