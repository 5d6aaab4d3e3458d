//! Standard vs. accelerated comparison and chart-ready balance series.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::schedule::{self, AmortizationResult, LoanParameters, PaymentRow};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::CoreResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Interest totals under both policies and what the extra payment saves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub monthly_payment: Money,
    pub extra_payment: Money,
    pub total_interest_standard: Money,
    pub total_interest_accelerated: Money,
    /// standard - accelerated
    pub interest_savings: Money,
    pub total_paid_standard: Money,
    pub total_paid_accelerated: Money,
    pub months_standard: u32,
    pub months_accelerated: u32,
    pub months_saved: u32,
}

impl ComparisonResult {
    pub fn from_result(result: &AmortizationResult, extra_payment: Money) -> Self {
        let months_standard = result.standard.len() as u32;
        let months_accelerated = result.accelerated.len() as u32;
        Self {
            monthly_payment: result.monthly_payment,
            extra_payment,
            total_interest_standard: result.total_interest_standard,
            total_interest_accelerated: result.total_interest_accelerated,
            interest_savings: result.total_interest_standard - result.total_interest_accelerated,
            total_paid_standard: total_paid(&result.standard),
            total_paid_accelerated: total_paid(&result.accelerated),
            months_standard,
            months_accelerated,
            months_saved: months_standard.saturating_sub(months_accelerated),
        }
    }
}

/// Both schedules together with their comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanComparison {
    pub comparison: ComparisonResult,
    pub standard_schedule: Vec<PaymentRow>,
    pub accelerated_schedule: Vec<PaymentRow>,
}

/// One point on a balance-over-time chart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalancePoint {
    pub month: u32,
    pub balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run both schedules and wrap them with the interest comparison.
pub fn compare_schedules(
    params: &LoanParameters,
) -> CoreResult<ComputationOutput<LoanComparison>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let result = schedule::compute_schedules(params)?;

    if params.extra_payment.is_zero() {
        warnings.push("Extra payment is zero; accelerated schedule mirrors the standard one.".into());
    }
    let nominal = params.nominal_months()?;
    if result.standard.len() as u32 != nominal {
        warnings.push(format!(
            "Standard schedule ran {} months against a nominal term of {} months.",
            result.standard.len(),
            nominal
        ));
    }

    let comparison = ComparisonResult::from_result(&result, params.extra_payment);
    let output = LoanComparison {
        comparison,
        standard_schedule: result.standard,
        accelerated_schedule: result.accelerated,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "principal": params.principal.to_string(),
        "term_years": params.term_years,
        "annual_rate_pct": params.annual_rate_pct.to_string(),
        "extra_payment": params.extra_payment.to_string(),
        "monthly_rate": result.monthly_rate.to_string(),
        "compounding": "monthly, nominal annual rate / 12",
        "accelerated_base_payment": "final standard payment",
        "settlement_tolerance_share_of_principal": schedule::SETTLEMENT_TOLERANCE.to_string(),
        "min_principal_share": schedule::MIN_PRINCIPAL_SHARE.to_string(),
    });

    Ok(with_metadata(
        "Level-payment amortization with constant extra principal",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// `(month, balance)` pairs for plotting a schedule.
pub fn balance_series(rows: &[PaymentRow]) -> Vec<BalancePoint> {
    rows.iter()
        .map(|r| BalancePoint {
            month: r.month,
            balance: r.balance,
        })
        .collect()
}

fn total_paid(rows: &[PaymentRow]) -> Money {
    rows.iter().map(|r| r.payment).sum::<Decimal>()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
