//! Month-by-month loan amortization under two payment policies.
//!
//! The standard schedule pays the level annuity payment until the balance is
//! retired. The accelerated schedule adds a constant extra principal payment
//! every month on top of the payment the standard pass finished with. Both
//! passes are balance-driven: they stop when the balance reaches exactly
//! zero, not after a fixed number of months.

use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::AmortizationError;
use crate::time_value;
use crate::types::{Money, Percent, Rate};
use crate::CoreResult;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Share of the principal below which a would-be remaining balance is
/// treated as an overshoot and settled in the current row, so 28-digit
/// rounding dust never produces an extra row. Scales with the loan, so a
/// principal of 100000 settles leftovers under 0.0000001.
pub const SETTLEMENT_TOLERANCE: Decimal = dec!(0.000000000001);

/// Smallest share of the level payment that must reduce principal in the
/// first month. Below it the principal portion carries too few significant
/// digits next to the interest, and the balance stalls or drifts over the
/// life of the loan.
pub const MIN_PRINCIPAL_SHARE: Decimal = dec!(0.000000000001);

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Loan terms supplied by the borrower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Amount borrowed
    pub principal: Money,
    /// Nominal term in years
    pub term_years: u32,
    /// Annual interest rate as a percentage (5.0 = 5%)
    pub annual_rate_pct: Percent,
    /// Extra principal paid every month in the accelerated schedule
    #[serde(default)]
    pub extra_payment: Money,
    /// Date of the first payment, used to label rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

impl LoanParameters {
    pub fn new(principal: Money, term_years: u32, annual_rate_pct: Percent) -> Self {
        Self {
            principal,
            term_years,
            annual_rate_pct,
            extra_payment: Decimal::ZERO,
            start_date: None,
        }
    }

    pub fn with_extra_payment(mut self, extra_payment: Money) -> Self {
        self.extra_payment = extra_payment;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    /// Nominal number of monthly periods (`term_years * 12`).
    pub fn nominal_months(&self) -> CoreResult<u32> {
        self.term_years
            .checked_mul(MONTHS_PER_YEAR)
            .ok_or_else(|| AmortizationError::InvalidParameter {
                field: "term_years".into(),
                reason: "Term is too long to express in months".into(),
            })
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month in an amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRow {
    /// Month number (1-indexed)
    pub month: u32,
    /// Calendar date of the payment, when a start date was given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    /// Total paid this month
    pub payment: Money,
    /// Portion of the payment that reduced the balance
    pub principal: Money,
    /// Portion of the payment charged as interest
    pub interest: Money,
    /// Balance before the payment
    pub beginning_balance: Money,
    /// Balance remaining after the payment
    pub balance: Money,
}

/// Both schedules and their interest totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationResult {
    /// Level payment from the annuity formula
    pub monthly_payment: Money,
    /// Payment the standard pass finished with; the accelerated pass starts from it
    pub carried_payment: Money,
    pub monthly_rate: Rate,
    pub standard: Vec<PaymentRow>,
    pub accelerated: Vec<PaymentRow>,
    pub total_interest_standard: Money,
    pub total_interest_accelerated: Money,
}

/// Rows and running totals produced by one pass over the loan.
#[derive(Debug)]
struct Pass {
    rows: Vec<PaymentRow>,
    total_interest: Money,
    /// Payment value in effect when the pass ended. The standard pass
    /// recomputes it on its final row, and that value seeds the accelerated
    /// pass.
    final_payment: Money,
}

/// Values shared by both passes.
struct LoanTerms {
    principal: Money,
    rate: Rate,
    level_payment: Money,
    settle_below: Money,
    start_date: Option<NaiveDate>,
}

impl LoanTerms {
    fn non_amortizing(&self) -> AmortizationError {
        AmortizationError::NonAmortizing {
            payment: self.level_payment,
            first_interest: self.principal * self.rate,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the standard and accelerated amortization schedules for a loan.
///
/// Fails before generating any row when a parameter is out of range or
/// when the level payment cannot cover the first month's interest.
pub fn compute_schedules(params: &LoanParameters) -> CoreResult<AmortizationResult> {
    validate_parameters(params)?;

    let periods = params.nominal_months()?;
    let rate = time_value::monthly_rate(params.annual_rate_pct);
    let monthly_payment = time_value::level_payment(params.principal, rate, periods)?;

    ensure_amortizes(params.principal, rate, monthly_payment)?;

    let terms = LoanTerms {
        principal: params.principal,
        rate,
        level_payment: monthly_payment,
        settle_below: params.principal * SETTLEMENT_TOLERANCE,
        start_date: params.start_date,
    };

    let standard = run_standard_pass(&terms)?;
    debug!(
        %monthly_payment,
        months = standard.rows.len(),
        total_interest = %standard.total_interest,
        "standard schedule computed"
    );

    let carried_payment = standard.final_payment;
    if carried_payment + params.extra_payment <= params.principal * rate {
        return Err(terms.non_amortizing());
    }

    let accelerated = run_accelerated_pass(&terms, carried_payment, params.extra_payment)?;
    debug!(
        %carried_payment,
        extra_payment = %params.extra_payment,
        months = accelerated.rows.len(),
        total_interest = %accelerated.total_interest,
        "accelerated schedule computed"
    );

    Ok(AmortizationResult {
        monthly_payment,
        carried_payment,
        monthly_rate: rate,
        standard: standard.rows,
        accelerated: accelerated.rows,
        total_interest_standard: standard.total_interest,
        total_interest_accelerated: accelerated.total_interest,
    })
}

/// Level monthly payment for the loan, without generating schedules.
pub fn monthly_payment(params: &LoanParameters) -> CoreResult<Money> {
    validate_parameters(params)?;
    let periods = params.nominal_months()?;
    let rate = time_value::monthly_rate(params.annual_rate_pct);
    let payment = time_value::level_payment(params.principal, rate, periods)?;
    ensure_amortizes(params.principal, rate, payment)?;
    Ok(payment)
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_parameters(params: &LoanParameters) -> CoreResult<()> {
    if params.principal <= Decimal::ZERO {
        return Err(AmortizationError::InvalidParameter {
            field: "principal".into(),
            reason: "Loan principal must be positive".into(),
        });
    }
    if params.term_years == 0 {
        return Err(AmortizationError::InvalidParameter {
            field: "term_years".into(),
            reason: "Loan term must be at least one year".into(),
        });
    }
    if params.annual_rate_pct < Decimal::ZERO {
        return Err(AmortizationError::InvalidParameter {
            field: "annual_rate_pct".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    if params.extra_payment < Decimal::ZERO {
        return Err(AmortizationError::InvalidParameter {
            field: "extra_payment".into(),
            reason: "Extra payment cannot be negative".into(),
        });
    }
    Ok(())
}

/// The balance only falls if the payment beats the interest on the full
/// principal; interest shrinks with the balance, so one check suffices.
/// The first principal portion must also move a 28-digit balance and keep
/// at least `MIN_PRINCIPAL_SHARE` of the payment, or later rows stall.
fn ensure_amortizes(principal: Money, rate: Rate, payment: Money) -> CoreResult<()> {
    let first_interest = principal * rate;
    let first_reduction = payment - first_interest;
    if first_reduction <= Decimal::ZERO
        || principal - first_reduction >= principal
        || first_reduction < payment * MIN_PRINCIPAL_SHARE
    {
        return Err(AmortizationError::NonAmortizing {
            payment,
            first_interest,
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Schedule generation
// ---------------------------------------------------------------------------

fn run_standard_pass(terms: &LoanTerms) -> CoreResult<Pass> {
    let mut rows = Vec::new();
    let mut balance = terms.principal;
    let mut payment = terms.level_payment;
    let mut total_interest = Decimal::ZERO;
    let mut month: u32 = 1;

    while balance > Decimal::ZERO {
        let interest = balance * terms.rate;
        let mut principal_portion = payment - interest;

        // Final payment
        if balance - principal_portion < terms.settle_below {
            principal_portion = balance;
            payment = principal_portion + interest;
        }

        let remaining = balance - principal_portion;
        if remaining >= balance {
            return Err(terms.non_amortizing());
        }

        rows.push(PaymentRow {
            month,
            payment_date: payment_date(terms.start_date, month),
            payment,
            principal: principal_portion,
            interest,
            beginning_balance: balance,
            balance: remaining,
        });

        balance = remaining;
        total_interest += interest;
        month += 1;
    }

    Ok(Pass {
        rows,
        total_interest,
        final_payment: payment,
    })
}

fn run_accelerated_pass(
    terms: &LoanTerms,
    carried_payment: Money,
    extra_payment: Money,
) -> CoreResult<Pass> {
    let mut rows = Vec::new();
    let mut balance = terms.principal;
    let mut payment = carried_payment;
    let mut total_interest = Decimal::ZERO;
    let mut month: u32 = 1;

    while balance > Decimal::ZERO {
        let interest = balance * terms.rate;
        let mut principal_portion = payment - interest;
        let mut extra = extra_payment;

        // Final payment: no extra needed once the scheduled principal clears the loan
        if balance - (principal_portion + extra) < terms.settle_below {
            principal_portion = balance;
            extra = Decimal::ZERO;
            payment = principal_portion + interest;
        }

        let reduction = principal_portion + extra;
        let remaining = balance - reduction;
        if remaining >= balance {
            return Err(terms.non_amortizing());
        }

        rows.push(PaymentRow {
            month,
            payment_date: payment_date(terms.start_date, month),
            payment: payment + extra,
            principal: reduction,
            interest,
            beginning_balance: balance,
            balance: remaining,
        });

        balance = remaining;
        total_interest += interest;
        month += 1;
    }

    Ok(Pass {
        rows,
        total_interest,
        final_payment: payment,
    })
}

fn payment_date(start_date: Option<NaiveDate>, month: u32) -> Option<NaiveDate> {
    start_date.and_then(|d| d.checked_add_months(Months::new(month - 1)))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
