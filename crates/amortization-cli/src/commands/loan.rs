use chrono::NaiveDate;
use clap::Args;
use rust_decimal::Decimal;
use serde_json::{json, Value};
use tracing::debug;

use amortization_core::amortization::{self, LoanParameters};
use amortization_core::time_value;

use crate::input;

/// Loan terms, from flags or a JSON/YAML document
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Amount borrowed
    #[arg(long, alias = "amount")]
    pub principal: Option<Decimal>,

    /// Loan term in years
    #[arg(long, alias = "term")]
    pub term_years: Option<u32>,

    /// Annual interest rate in percent (5.0 = 5%)
    #[arg(long, alias = "rate")]
    pub annual_rate_pct: Option<Decimal>,

    /// Extra principal paid every month
    #[arg(long, alias = "extra")]
    pub extra_payment: Option<Decimal>,

    /// Date of the first payment (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,
}

/// Run both schedules and return the full comparison envelope.
pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(args)?;
    let output = amortization::compare_schedules(&params)?;
    Ok(serde_json::to_value(output)?)
}

/// Comparison totals only, without the month-by-month rows.
pub fn run_compare(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(args)?;
    let output = amortization::compare_schedules(&params)?;
    let mut value = serde_json::to_value(output)?;
    let comparison = value["result"]["comparison"].take();
    value["result"] = comparison;
    Ok(value)
}

/// Month-by-month balances of both schedules, side by side for charting.
pub fn run_balances(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(args)?;
    let result = amortization::compute_schedules(&params)?;

    let standard = amortization::balance_series(&result.standard);
    let accelerated = amortization::balance_series(&result.accelerated);

    let results: Vec<Value> = standard
        .iter()
        .enumerate()
        .map(|(i, point)| {
            json!({
                "month": point.month,
                "standard_balance": point.balance,
                "accelerated_balance": accelerated.get(i).map(|p| p.balance),
            })
        })
        .collect();

    Ok(json!({ "results": results }))
}

/// Level monthly payment for the loan.
pub fn run_payment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = resolve_parameters(args)?;
    let payment = amortization::monthly_payment(&params)?;

    Ok(json!({
        "result": {
            "monthly_payment": payment,
            "monthly_rate": time_value::monthly_rate(params.annual_rate_pct),
            "periods": params.nominal_months()?,
        }
    }))
}

/// Input precedence: `--input` file, then flags when `--principal` is
/// given, then JSON piped on stdin.
fn resolve_parameters(args: LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let params = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if args.principal.is_some() {
        parameters_from_flags(args)?
    } else if let Some(params) = input::stdin::read_piped()? {
        params
    } else {
        return Err("--principal, --term-years and --annual-rate-pct are required (or provide --input)".into());
    };

    debug!(?params, "loan parameters resolved");
    Ok(params)
}

fn parameters_from_flags(args: LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    Ok(LoanParameters {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        term_years: args
            .term_years
            .ok_or("--term-years is required (or provide --input)")?,
        annual_rate_pct: args
            .annual_rate_pct
            .ok_or("--annual-rate-pct is required (or provide --input)")?,
        extra_payment: args.extra_payment.unwrap_or(Decimal::ZERO),
        start_date: args.start_date,
    })
}
