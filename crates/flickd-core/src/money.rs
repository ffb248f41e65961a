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
//! │    89.99 * 3 = 269.96999999999997  ❌ WRONG!                            │
//! │                                                                         │
//! │  OUR SOLUTION: Integer Cents                                            │
//! │    8999 cents * 3 = 26997 cents  ✅                                      │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use flickd_core::money::Money;
//!
//! let price = Money::from_cents(8999); // $89.99
//! let line = price * 3;                // $269.97
//! assert_eq!(line.cents(), 26997);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::TaxRate;

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in the smallest currency unit (cents for USD).
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  Product.price ──► CartLine.unit_price ──► CartLine.line_total          │
/// │                                                                         │
/// │  Cart.total_price ──► Order.subtotal ──► tax / shipping ──► Order.total │
/// │                                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from cents (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use flickd_core::money::Money;
    ///
    /// let price = Money::from_cents(1099); // Represents $10.99
    /// assert_eq!(price.cents(), 1099);
    /// ```
    #[inline]
    pub const fn from_cents(cents: i64) -> Self {
        Money(cents)
    }

    /// Creates a Money value from major and minor units (dollars and cents).
    ///
    /// ## Example
    /// ```rust
    /// use flickd_core::money::Money;
    ///
    /// assert_eq!(Money::from_major_minor(9, 99).cents(), 999);
    /// ```
    #[inline]
    pub const fn from_major_minor(major: i64, minor: i64) -> Self {
        if major < 0 {
            Money(major * 100 - minor)
        } else {
            Money(major * 100 + minor)
        }
    }

    /// Parses a decimal dollar amount such as `"9.99"`, `"100"` or `"0.5"`.
    ///
    /// At most two fractional digits are accepted; anything else is a
    /// format error rather than a silent rounding.
    ///
    /// ## Example
    /// ```rust
    /// use flickd_core::money::Money;
    ///
    /// assert_eq!(Money::parse("9.99").unwrap().cents(), 999);
    /// assert_eq!(Money::parse("100").unwrap().cents(), 10000);
    /// assert!(Money::parse("1.234").is_err());
    /// ```
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: &str| ValidationError::InvalidFormat {
            field: "amount".to_string(),
            reason: reason.to_string(),
        };

        let input = input.trim().trim_start_matches('$');
        let (negative, digits) = match input.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, input),
        };

        let (major_str, minor_str) = digits.split_once('.').unwrap_or((digits, ""));
        if major_str.is_empty() && minor_str.is_empty() {
            return Err(invalid("must be a number"));
        }
        if minor_str.len() > 2 {
            return Err(invalid("at most two decimal places"));
        }
        if !major_str.chars().chain(minor_str.chars()).all(|c| c.is_ascii_digit()) {
            return Err(invalid("must be a number"));
        }

        let major: i64 = if major_str.is_empty() {
            0
        } else {
            major_str.parse().map_err(|_| invalid("amount too large"))?
        };
        let minor: i64 = match minor_str.len() {
            0 => 0,
            1 => minor_str.parse::<i64>().map_err(|_| invalid("must be a number"))? * 10,
            _ => minor_str.parse().map_err(|_| invalid("must be a number"))?,
        };

        let cents = major
            .checked_mul(100)
            .and_then(|c| c.checked_add(minor))
            .ok_or_else(|| invalid("amount too large"))?;

        Ok(Money(if negative { -cents } else { cents }))
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Calculates tax at the given rate, rounding half up to the cent.
    ///
    /// ## Implementation
    /// Integer math: `(amount * bps + 5000) / 10000`.
    /// The +5000 provides rounding (5000/10000 = 0.5).
    ///
    /// ## Example
    /// ```rust
    /// use flickd_core::money::Money;
    /// use flickd_core::types::TaxRate;
    ///
    /// let subtotal = Money::from_cents(12000); // $120.00
    /// let tax = subtotal.calculate_tax(TaxRate::from_bps(800)); // 8%
    /// assert_eq!(tax.cents(), 960); // $9.60
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        // i128 so large carts cannot overflow the intermediate product
        let tax_cents = (self.0 as i128 * rate.bps() as i128 + 5000) / 10000;
        Money::from_cents(tax_cents as i64)
    }

    /// Multiplies money by a quantity, saturating at the `i64` bounds.
    ///
    /// ## Example
    /// ```rust
    /// use flickd_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(2000); // $20.00
    /// assert_eq!(unit_price.multiply_quantity(2).cents(), 4000);
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(qty))
    }

    /// Percentage of `self` saved relative to a higher `original` price,
    /// rounded down. Returns `None` when there is no saving.
    ///
    /// ## Example
    /// ```rust
    /// use flickd_core::money::Money;
    ///
    /// let sale = Money::from_cents(6000);
    /// let original = Money::from_cents(8000);
    /// assert_eq!(sale.percent_off(original), Some(25));
    /// ```
    pub fn percent_off(&self, original: Money) -> Option<u32> {
        if original.0 <= 0 || self.0 >= original.0 {
            return None;
        }
        let saved = (original.0 - self.0) as i128 * 100 / original.0 as i128;
        Some(saved as u32)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================
//
// Arithmetic saturates instead of overflowing. Totals are derived from
// caller-supplied quantities and must never panic.

/// Display shows dollars with two decimals, e.g. `$89.99`.
///
/// Use the storefront config's currency formatting for UI strings.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(f, "{}${}.{:02}", sign, self.dollars().abs(), self.cents_part())
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

/// Multiplication by quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
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
    fn test_from_cents() {
        let money = Money::from_cents(8999);
        assert_eq!(money.cents(), 8999);
        assert_eq!(money.dollars(), 89);
        assert_eq!(money.cents_part(), 99);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_cents(8999)), "$89.99");
        assert_eq!(format!("{}", Money::from_cents(500)), "$5.00");
        assert_eq!(format!("{}", Money::from_cents(-550)), "-$5.50");
        assert_eq!(format!("{}", Money::from_cents(0)), "$0.00");
    }

    #[test]
    fn test_parse() {
        assert_eq!(Money::parse("9.99").unwrap().cents(), 999);
        assert_eq!(Money::parse("$100").unwrap().cents(), 10000);
        assert_eq!(Money::parse("0.5").unwrap().cents(), 50);
        assert_eq!(Money::parse(".25").unwrap().cents(), 25);
        assert_eq!(Money::parse("-5.50").unwrap().cents(), -550);

        assert!(Money::parse("").is_err());
        assert!(Money::parse("abc").is_err());
        assert!(Money::parse("1.234").is_err());
        assert!(Money::parse("1.2.3").is_err());
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_cents(2000);
        let b = Money::from_cents(1500);

        assert_eq!((a + b).cents(), 3500);
        assert_eq!((a - b).cents(), 500);
        assert_eq!((a * 2).cents(), 4000);

        let total: Money = [a * 2, b].iter().sum();
        assert_eq!(total.cents(), 5500);
    }

    #[test]
    fn test_arithmetic_saturates() {
        let big = Money::from_cents(i64::MAX / 100);

        assert_eq!(big.multiply_quantity(1000).cents(), i64::MAX);
        assert_eq!((big * -1000).cents(), i64::MIN);
        assert_eq!((Money::from_cents(i64::MAX) + Money::from_cents(1)).cents(), i64::MAX);

        let total: Money = [Money::from_cents(i64::MAX), Money::from_cents(999)].iter().sum();
        assert_eq!(total.cents(), i64::MAX);

        // Tax on a saturated amount stays in range
        let tax = Money::from_cents(i64::MAX).calculate_tax(TaxRate::from_bps(800));
        assert!(tax.is_positive());
    }

    #[test]
    fn test_tax_at_eight_percent() {
        let rate = TaxRate::from_bps(800);
        assert_eq!(Money::from_cents(12000).calculate_tax(rate).cents(), 960);
        assert_eq!(Money::from_cents(8000).calculate_tax(rate).cents(), 640);
        // $89.99 × 8% = $7.1992 → $7.20
        assert_eq!(Money::from_cents(8999).calculate_tax(rate).cents(), 720);
    }

    #[test]
    fn test_tax_rounds_half_up() {
        // $0.0625 × 8% = 0.5 cents → 1 cent
        let tax = Money::from_cents(625).calculate_tax(TaxRate::from_bps(8));
        assert_eq!(tax.cents(), 1);
    }

    #[test]
    fn test_percent_off() {
        let sale = Money::from_cents(5999);
        assert_eq!(sale.percent_off(Money::from_cents(7999)), Some(25));
        assert_eq!(sale.percent_off(Money::from_cents(5999)), None);
        assert_eq!(sale.percent_off(Money::zero()), None);
    }
}
