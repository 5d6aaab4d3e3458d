pub mod comparison;
pub mod schedule;

pub use comparison::{balance_series, compare_schedules, BalancePoint, ComparisonResult, LoanComparison};
pub use schedule::{compute_schedules, monthly_payment, AmortizationResult, LoanParameters, PaymentRow};
