use napi::Result as NapiResult;
use napi_derive::napi;

use amortization_core::amortization::{self, LoanParameters};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_parameters(input_json: &str) -> NapiResult<LoanParameters> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_schedules(input_json: String) -> NapiResult<String> {
    let params = parse_parameters(&input_json)?;
    let output = amortization::compute_schedules(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_loan(input_json: String) -> NapiResult<String> {
    let params = parse_parameters(&input_json)?;
    let output = amortization::compare_schedules(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn monthly_payment(input_json: String) -> NapiResult<String> {
    let params = parse_parameters(&input_json)?;
    let payment = amortization::monthly_payment(&params).map_err(to_napi_error)?;
    serde_json::to_string(&payment).map_err(to_napi_error)
}
