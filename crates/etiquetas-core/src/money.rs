//! # Money Module
//!
//! Turns the price typed into the form into the three amounts printed on
//! a label.
//!
//! ## Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Price Pipeline                                   │
//! │                                                                         │
//! │   "$1.234,50"                                                           │
//! │        │  normalize_price: strip $, pick decimal marker, drop grouping  │
//! │        ▼                                                                │
//! │     1234.5 ──────┬──► ÷ divisor(tax_rate) ──► price_excl_tax           │
//! │                  │                                                      │
//! │                  └──► ÷ quantity (unit set) ──► price_per_unit          │
//! │        │                                                                │
//! │        ▼  format_amount                                                 │
//! │   "1.234,50"   "1.020,25"   "1.234,50"                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Decimal Marker
//! Argentine prices are written `1.234,50`, but `1234.50` is common too.
//! A comma always marks decimals. Without a comma, a final `.` followed by
//! one or two digits marks decimals; any other `.` is thousands grouping,
//! so `"1.500"` is fifteen hundred.
//!
//! Amounts stay `f64` end to end. Labels display two decimals and nothing is
//! summed, so rounding happens once, at formatting time.

use crate::error::{CoreError, CoreResult};
use crate::types::{FormattedPrices, PriceBreakdown, PriceInput};
use crate::validation::validate_quantity;

// =============================================================================
// Normalization
// =============================================================================

/// Parses a price as typed into the form.
///
/// ## Example
/// ```rust
/// use etiquetas_core::money::normalize_price;
///
/// assert_eq!(normalize_price("$1.234,50").unwrap(), 1234.5);
/// assert_eq!(normalize_price(" 1234.50 ").unwrap(), 1234.5);
/// assert_eq!(normalize_price("1.500").unwrap(), 1500.0);
/// assert!(normalize_price("$").is_err());
/// ```
pub fn normalize_price(raw: &str) -> CoreResult<f64> {
    let cleaned = raw.trim().replace('$', "");
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        return Err(CoreError::invalid_price(raw, "empty"));
    }

    if !cleaned
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-' | '+'))
    {
        return Err(CoreError::invalid_price(raw, "not a number"));
    }

    let canonical = if cleaned.contains(',') {
        collapse_commas(&cleaned.replace('.', "")).replace(',', ".")
    } else {
        match decimal_dot(cleaned) {
            Some(idx) => format!("{}.{}", cleaned[..idx].replace('.', ""), &cleaned[idx + 1..]),
            None => cleaned.replace('.', ""),
        }
    };

    let value: f64 = canonical
        .parse()
        .map_err(|_| CoreError::invalid_price(raw, "not a number"))?;

    if !value.is_finite() {
        return Err(CoreError::invalid_price(raw, "not finite"));
    }
    if value < 0.0 {
        return Err(CoreError::invalid_price(raw, "negative"));
    }

    // -0.0 would otherwise survive as a valid negative zero
    Ok(value.abs())
}

/// Index of the last `.` when it is followed by one or two trailing digits.
fn decimal_dot(s: &str) -> Option<usize> {
    let idx = s.rfind('.')?;
    let tail = &s[idx + 1..];
    let is_fraction = (1..=2).contains(&tail.len()) && tail.chars().all(|c| c.is_ascii_digit());
    is_fraction.then_some(idx)
}

/// `"12,,50"` → `"12,50"`.
fn collapse_commas(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_comma = false;
    for c in s.chars() {
        if c == ',' && prev_comma {
            continue;
        }
        prev_comma = c == ',';
        out.push(c);
    }
    out
}

// =============================================================================
// Computation
// =============================================================================

/// Backs the pre-tax price out of a tax-inclusive price.
#[inline]
pub fn exclude_tax(final_price: f64, divisor: f64) -> f64 {
    final_price / divisor
}

/// Computes the numeric amounts for a label.
///
/// The per-unit price exists only when a unit is selected, and then the
/// quantity must be present and at least 0.1. Every derived amount must be
/// finite, so a huge price cannot overflow into `inf`.
pub fn compute(input: &PriceInput) -> CoreResult<PriceBreakdown> {
    let final_price = normalize_price(&input.raw_price)?;
    let price_excl_tax = finite(&input.raw_price, exclude_tax(final_price, input.tax_rate.divisor()))?;

    let price_per_unit = if input.unit.needs_quantity() {
        let quantity = input.quantity.unwrap_or(0.0);
        validate_quantity(quantity)?;
        Some(finite(&input.raw_price, final_price / quantity)?)
    } else {
        None
    };

    Ok(PriceBreakdown {
        final_price,
        price_excl_tax,
        price_per_unit,
    })
}

fn finite(raw: &str, amount: f64) -> CoreResult<f64> {
    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(CoreError::invalid_price(raw, "amount out of range"))
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Formats an amount as `12.345,60`: two decimals, `.` grouping, `,` decimal.
///
/// Independent of the host locale.
///
/// ## Example
/// ```rust
/// use etiquetas_core::money::format_amount;
///
/// assert_eq!(format_amount(1234.5), "1.234,50");
/// assert_eq!(format_amount(0.0), "0,00");
/// ```
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(digit);
    }

    let is_zero = int_part.chars().chain(frac_part.chars()).all(|c| c == '0');
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };

    format!("{}{},{}", sign, grouped, frac_part)
}

/// Computes and formats all label prices.
pub fn format_prices(input: &PriceInput) -> CoreResult<FormattedPrices> {
    let breakdown = compute(input)?;

    Ok(FormattedPrices {
        final_price: format_amount(breakdown.final_price),
        price_excl_tax: format_amount(breakdown.price_excl_tax),
        price_per_unit: breakdown.price_per_unit.map(format_amount),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
