use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AmortizationError {
    #[error("Invalid parameter: {field} — {reason}")]
    InvalidParameter { field: String, reason: String },

    #[error("Loan does not amortize: monthly payment {payment} leaves no resolvable principal reduction against first-month interest {first_interest}")]
    NonAmortizing {
        payment: Decimal,
        first_interest: Decimal,
    },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for AmortizationError {
    fn from(e: serde_json::Error) -> Self {
        AmortizationError::SerializationError(e.to_string())
    }
}
