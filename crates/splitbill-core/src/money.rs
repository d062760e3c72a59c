//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In floating point:                                                     │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  In a bill splitter this bites twice:                                   │
//! │    £20.00 / 3 = £6.666...  → three shares never re-add to £20.00       │
//! │    "fully assigned" checks against 0.0 become flaky                    │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Pence                                            │
//! │    2000 pence / 3 = [667, 667, 666]                                    │
//! │    The remainder is distributed explicitly, shares sum EXACTLY         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use splitbill_core::money::Money;
//!
//! // Create from pence (preferred)
//! let price = Money::from_pence(1099); // £10.99
//!
//! // Arithmetic operations
//! let total = price + Money::from_pence(500); // £15.99
//!
//! // Splitting never loses a penny
//! let shares = Money::from_pence(2000).split_evenly(3);
//! assert_eq!(shares.iter().copied().sum::<Money>(), Money::from_pence(2000));
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (pence for GBP).
///
/// ## Design Decisions
/// - **i64 (signed)**: Allows negative intermediate values (discrepancies)
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Derives**: Full serde support for JSON serialization
///
/// Every monetary value in the system flows through this type: item costs,
/// service charges, receipt totals, per-participant balances, and settlement
/// payments. Only a UI converts to a localized string for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from pence (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// let price = Money::from_pence(1099); // Represents £10.99
    /// assert_eq!(price.pence(), 1099);
    /// ```
    #[inline]
    pub const fn from_pence(pence: i64) -> Self {
        Money(pence)
    }

    /// Creates a Money value from major and minor units (pounds and pence).
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// let price = Money::from_major_minor(10, 99); // £10.99
    /// assert_eq!(price.pence(), 1099);
    ///
    /// let negative = Money::from_major_minor(-5, 50); // -£5.50
    /// assert_eq!(negative.pence(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the major unit should be negative.
    /// `from_major_minor(-5, 50)` = -£5.50, not -£4.50
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        // Handle sign: if major is negative, minor should subtract
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Returns the value in pence (smallest currency unit).
    #[inline]
    pub const fn pence(&self) -> i64 {
        self.0
    }

    /// Returns the major unit (pounds) portion.
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the minor unit (pence) portion (always 0-99).
    #[inline]
    pub const fn pence_part(&self) -> i64 {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Splits the amount into `count` near-equal shares that sum exactly to
    /// the original amount.
    ///
    /// ## Remainder Handling
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  £20.00 split three ways                                            │
    /// │                                                                     │
    /// │  2000 / 3 = 666 remainder 2                                        │
    /// │                                                                     │
    /// │  share[0] = 667   ← earlier shares absorb the remainder            │
    /// │  share[1] = 667                                                    │
    /// │  share[2] = 666                                                    │
    /// │                                                                     │
    /// │  667 + 667 + 666 = 2000  → no penny is ever lost                  │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// Shares differ by at most one penny. `count == 0` yields no shares.
    ///
    /// ## Example
    /// ```rust
    /// use splitbill_core::money::Money;
    ///
    /// let shares = Money::from_pence(2000).split_evenly(3);
    /// assert_eq!(shares, vec![
    ///     Money::from_pence(667),
    ///     Money::from_pence(667),
    ///     Money::from_pence(666),
    /// ]);
    /// ```
    pub fn split_evenly(&self, count: usize) -> Vec<Money> {
        if count == 0 {
            return Vec::new();
        }

        let count = count as i64;
        // Euclidean division keeps the remainder non-negative even for
        // negative amounts, so the "+1p" shares stay well defined.
        let base = self.0.div_euclid(count);
        let remainder = self.0.rem_euclid(count);

        (0..count)
            .map(|i| {
                if i < remainder {
                    Money(base + 1)
                } else {
                    Money(base)
                }
            })
            .collect()
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for debugging and logs. Use frontend formatting for actual UI
/// display to handle localization properly.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}£{}.{:02}",
            sign,
            self.pounds().abs(),
            self.pence_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation of owned Money values.
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

/// Summation of borrowed Money values.
impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + *m)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
