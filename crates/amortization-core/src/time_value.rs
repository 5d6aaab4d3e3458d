use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::AmortizationError;
use crate::types::{Money, Percent, Rate};
use crate::CoreResult;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT: Decimal = dec!(100);

/// Convert a quoted annual percentage into a nominal monthly rate.
/// 5.0 (%) becomes 5 / 12 / 100.
pub fn monthly_rate(annual_rate_pct: Percent) -> Rate {
    annual_rate_pct / MONTHS_PER_YEAR / PERCENT
}

/// Level payment that retires `principal` over `periods` at `rate` per period.
///
/// Uses the annuity formula `P * r / (1 - (1 + r)^-n)`, which is the
/// `r(1+r)^n / ((1+r)^n - 1)` form with the growth factor divided through so
/// large factors cannot overflow the multiplication. A zero rate is the
/// straight-line case `P / n`.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> CoreResult<Money> {
    if periods == 0 {
        return Err(AmortizationError::InvalidParameter {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }

    let n = Decimal::from(periods);
    if rate.is_zero() {
        return Ok(principal / n);
    }

    let first_interest = principal * rate;
    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or(AmortizationError::NonAmortizing {
            payment: first_interest,
            first_interest,
        })?;

    let discount = Decimal::ONE - Decimal::ONE / factor;
    if discount.is_zero() {
        // (1 + r)^n rounded to 1: the rate is below decimal resolution.
        return Ok(principal / n);
    }

    Ok(first_interest / discount)
}

/// Present value of `periods` level payments discounted at `rate`.
pub fn present_value(payment: Money, rate: Rate, periods: u32) -> CoreResult<Money> {
    let n = Decimal::from(periods);
    if rate.is_zero() {
        return Ok(payment * n);
    }

    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or(AmortizationError::InvalidParameter {
            field: "periods".into(),
            reason: "Discount factor exceeds decimal range".into(),
        })?;

    Ok(payment * (Decimal::ONE - Decimal::ONE / factor) / rate)
}
