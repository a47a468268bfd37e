//! # Decimal Arithmetic Core
//!
//! Exact base-10 arithmetic primitives for every money and voltage-drop
//! figure in the engine. Binary floating point silently accumulates rounding
//! error across repeated add/subtract chains, which breaks reconciliation
//! between interactively displayed totals and exported-document totals, so
//! all such computations route through this module instead.
//!
//! ## Contract
//!
//! - Operands are accepted as decimal strings, floats, integers, or exact
//!   [`Decimal`] values via [`DecimalValue`].
//! - Each primitive performs its whole computation at full `Decimal`
//!   precision and applies a single currency rounding step (2 decimal
//!   places, midpoint away from zero) to the final result. [`add`] and
//!   [`multiply`] are variadic for exactly this reason: a chain expressed
//!   as one call rounds once.
//! - Division by zero and malformed numeric input fail fast with
//!   [`CalcError::DivisionByZero`] / [`CalcError::InvalidNumber`] rather
//!   than returning a sentinel. A silently wrong cost or voltage-drop
//!   figure is a safety and financial risk.
//!
//! ## Example
//!
//! ```rust
//! use cable_core::decimal;
//!
//! let total = decimal::add(["1199.99", "849.50", "62.25"]).unwrap();
//! assert_eq!(total.to_string(), "2111.74");
//!
//! let unit_total = decimal::multiply([
//!     decimal::DecimalValue::from("12.35"),
//!     decimal::DecimalValue::from(50.0),
//! ]).unwrap();
//! assert_eq!(unit_total.to_string(), "617.50");
//! ```

use std::str::FromStr;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::errors::{CalcError, CalcResult};

/// Number of decimal places for money and reported engineering figures
pub const MONEY_DP: u32 = 2;

/// Rounding used for currency figures
const STRATEGY: RoundingStrategy = RoundingStrategy::MidpointAwayFromZero;

/// An operand for the arithmetic primitives.
///
/// Calling layers hand the engine money figures in whatever form they hold
/// them: decimal strings from form fields or imports, floats from legacy
/// records, or exact [`Decimal`] values from earlier computations.
#[derive(Debug, Clone, PartialEq)]
pub enum DecimalValue {
    /// A decimal string, e.g. `"1234.56"`
    Text(String),
    /// A binary float; rejected if NaN or infinite
    Number(f64),
    /// An already-exact decimal
    Exact(Decimal),
}

impl DecimalValue {
    /// Convert to an exact decimal, failing fast on malformed input.
    pub fn to_decimal(&self) -> CalcResult<Decimal> {
        match self {
            DecimalValue::Text(s) => {
                Decimal::from_str(s.trim()).map_err(|_| CalcError::invalid_number(s.clone()))
            }
            DecimalValue::Number(v) => {
                if !v.is_finite() {
                    return Err(CalcError::invalid_number(v.to_string()));
                }
                Decimal::from_f64(*v).ok_or_else(|| CalcError::invalid_number(v.to_string()))
            }
            DecimalValue::Exact(d) => Ok(*d),
        }
    }
}

impl From<&str> for DecimalValue {
    fn from(s: &str) -> Self {
        DecimalValue::Text(s.to_string())
    }
}

impl From<String> for DecimalValue {
    fn from(s: String) -> Self {
        DecimalValue::Text(s)
    }
}

impl From<f64> for DecimalValue {
    fn from(v: f64) -> Self {
        DecimalValue::Number(v)
    }
}

impl From<i64> for DecimalValue {
    fn from(v: i64) -> Self {
        DecimalValue::Exact(Decimal::from(v))
    }
}

impl From<u32> for DecimalValue {
    fn from(v: u32) -> Self {
        DecimalValue::Exact(Decimal::from(v))
    }
}

impl From<Decimal> for DecimalValue {
    fn from(d: Decimal) -> Self {
        DecimalValue::Exact(d)
    }
}

/// Parse a decimal string.
///
/// Convenience wrapper for callers that hold text figures.
pub fn parse(value: &str) -> CalcResult<Decimal> {
    DecimalValue::from(value).to_decimal()
}

/// Convert a binary float to an exact decimal, rejecting NaN/infinity.
pub fn from_f64(value: f64) -> CalcResult<Decimal> {
    DecimalValue::from(value).to_decimal()
}

/// Round a value to the standard currency precision.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, STRATEGY)
}

/// Round a value to an arbitrary number of decimal places.
pub fn round(value: impl Into<DecimalValue>, dp: u32) -> CalcResult<Decimal> {
    Ok(value.into().to_decimal()?.round_dp_with_strategy(dp, STRATEGY))
}

/// Sum a sequence of values, rounding the final result to currency precision.
///
/// The running sum is kept at full precision; rounding happens once.
pub fn add<I>(values: I) -> CalcResult<Decimal>
where
    I: IntoIterator,
    I::Item: Into<DecimalValue>,
{
    let mut sum = Decimal::ZERO;
    for value in values {
        let d = value.into().to_decimal()?;
        sum = sum
            .checked_add(d)
            .ok_or_else(|| CalcError::calculation_failed("add", "numeric overflow"))?;
    }
    Ok(round_money(sum))
}

/// Subtract `b` from `a`, rounded to currency precision.
pub fn subtract(a: impl Into<DecimalValue>, b: impl Into<DecimalValue>) -> CalcResult<Decimal> {
    let a = a.into().to_decimal()?;
    let b = b.into().to_decimal()?;
    let diff = a
        .checked_sub(b)
        .ok_or_else(|| CalcError::calculation_failed("subtract", "numeric overflow"))?;
    Ok(round_money(diff))
}

/// Multiply a sequence of values, rounding the final result to currency
/// precision.
///
/// Like [`add`], the intermediate product is unrounded, so a unit-cost chain
/// (`cost/m × length × parallel count`) expressed as one call rounds once.
pub fn multiply<I>(values: I) -> CalcResult<Decimal>
where
    I: IntoIterator,
    I::Item: Into<DecimalValue>,
{
    let mut product = Decimal::ONE;
    for value in values {
        let d = value.into().to_decimal()?;
        product = product
            .checked_mul(d)
            .ok_or_else(|| CalcError::calculation_failed("multiply", "numeric overflow"))?;
    }
    Ok(round_money(product))
}

/// Divide `a` by `b`, rounded to currency precision.
///
/// Fails with [`CalcError::DivisionByZero`] when `b` is zero.
pub fn divide(a: impl Into<DecimalValue>, b: impl Into<DecimalValue>) -> CalcResult<Decimal> {
    let a = a.into().to_decimal()?;
    let b = b.into().to_decimal()?;
    if b.is_zero() {
        return Err(CalcError::division_by_zero("divide"));
    }
    let quotient = a
        .checked_div(b)
        .ok_or_else(|| CalcError::calculation_failed("divide", "numeric overflow"))?;
    Ok(round_money(quotient))
}

/// Compute `part` as a percentage of `whole`, rounded to currency precision.
///
/// Fails with [`CalcError::DivisionByZero`] when `whole` is zero.
pub fn percentage(
    part: impl Into<DecimalValue>,
    whole: impl Into<DecimalValue>,
) -> CalcResult<Decimal> {
    let part = part.into().to_decimal()?;
    let whole = whole.into().to_decimal()?;
    if whole.is_zero() {
        return Err(CalcError::division_by_zero("percentage"));
    }
    let ratio = part
        .checked_div(whole)
        .ok_or_else(|| CalcError::calculation_failed("percentage", "numeric overflow"))?;
    let pct = ratio
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(|| CalcError::calculation_failed("percentage", "numeric overflow"))?;
    Ok(round_money(pct))
}

/// Variance of an actual figure against its original: `actual - original`.
///
/// Positive variance means the actual figure exceeds the original.
pub fn variance(
    original: impl Into<DecimalValue>,
    actual: impl Into<DecimalValue>,
) -> CalcResult<Decimal> {
    subtract(actual, original)
}
