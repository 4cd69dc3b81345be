//! Exact decimal money arithmetic
//!
//! All monetary values are `rust_decimal::Decimal` under the hood. Addition,
//! subtraction and multiplication are exact; division truncates toward zero at
//! a fixed scale. Rounding to cents only happens when a value is formatted.

use crate::error::{PricingError, Result};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fractional digits kept by `div` (digits beyond this are truncated)
pub const DIVISION_SCALE: u32 = 10;

/// Fractional digits shown when formatting
pub const DISPLAY_SCALE: u32 = 2;

/// An exact monetary amount
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Money = Money(Decimal::ZERO);

    pub fn new(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Underlying decimal value at full internal precision
    pub fn amount(&self) -> Decimal {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Fail with `InvalidInput` if the amount is below zero
    pub fn ensure_non_negative(self, what: &str) -> Result<Self> {
        if self.is_negative() {
            return Err(PricingError::invalid(format!(
                "{} must not be negative (got {})",
                what, self.0
            )));
        }
        Ok(self)
    }

    /// Value rounded to cents, midpoint away from zero
    pub fn rounded(&self) -> Decimal {
        self.0
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Plain two-decimal rendering, e.g. `1234.50`
    pub fn to_fixed(&self) -> String {
        format!("{:.2}", self.rounded())
    }

    /// Two-decimal rendering with thousands separators, e.g. `1,234.50`
    pub fn to_display(&self) -> String {
        let fixed = self.to_fixed();
        let (sign, unsigned) = match fixed.strip_prefix('-') {
            Some(rest) => ("-", rest),
            None => ("", fixed.as_str()),
        };
        let (whole, fraction) = unsigned.split_once('.').unwrap_or((unsigned, "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, digit) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(digit);
        }

        format!("{}{}.{}", sign, grouped, fraction)
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl From<u32> for Money {
    fn from(amount: u32) -> Self {
        Money(Decimal::from(amount))
    }
}

impl FromStr for Money {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| PricingError::invalid(format!("'{}' is not a decimal amount: {}", s, e)))
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_fixed())
    }
}

/// Exact sum
pub fn add(a: Money, b: Money) -> Result<Money> {
    a.0.checked_add(b.0)
        .map(Money)
        .ok_or_else(|| overflow("addition", a, b.0))
}

/// Exact difference
pub fn sub(a: Money, b: Money) -> Result<Money> {
    a.0.checked_sub(b.0)
        .map(Money)
        .ok_or_else(|| overflow("subtraction", a, b.0))
}

/// Exact product of an amount and a factor (hours, rates, multipliers)
pub fn mul(a: Money, factor: Decimal) -> Result<Money> {
    a.0.checked_mul(factor)
        .map(Money)
        .ok_or_else(|| overflow("multiplication", a, factor))
}

/// Quotient truncated toward zero at `scale` fractional digits
pub fn div(a: Money, divisor: Decimal, scale: u32) -> Result<Money> {
    if divisor.is_zero() {
        return Err(PricingError::invalid(format!("cannot divide {} by zero", a.0)));
    }
    let quotient = a.0
        .checked_div(divisor)
        .ok_or_else(|| overflow("division", a, divisor))?;
    Ok(Money(quotient.round_dp_with_strategy(scale, RoundingStrategy::ToZero)))
}

fn overflow(operation: &str, a: Money, b: Decimal) -> PricingError {
    PricingError::PrecisionPolicyViolation(format!(
        "{} of {} and {} exceeds decimal range",
        operation, a.0, b
    ))
}
