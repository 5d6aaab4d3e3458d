use amortization_core::amortization::{self, LoanParameters, PaymentRow};
use amortization_core::AmortizationError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_loans() -> Vec<LoanParameters> {
    vec![
        LoanParameters::new(dec!(100000), 30, dec!(5.0)),
        LoanParameters::new(dec!(100000), 30, dec!(5.0)).with_extra_payment(dec!(200)),
        LoanParameters::new(dec!(350000), 15, dec!(6.875)).with_extra_payment(dec!(1000)),
        LoanParameters::new(dec!(18500), 5, dec!(9.9)).with_extra_payment(dec!(25)),
        LoanParameters::new(dec!(2500), 1, dec!(0.25)),
        LoanParameters::new(dec!(48000), 4, Decimal::ZERO).with_extra_payment(dec!(333)),
        LoanParameters::new(dec!(1000), 2, dec!(24)).with_extra_payment(dec!(5000)),
    ]
}

fn assert_close(a: Decimal, b: Decimal, tol: Decimal, what: &str) {
    assert!(
        (a - b).abs() <= tol,
        "{what}: expected {b}, got {a} (tol {tol})"
    );
}

fn principal_sum(rows: &[PaymentRow]) -> Decimal {
    rows.iter().map(|r| r.principal).sum()
}

// ===========================================================================
// Schedule invariants
// ===========================================================================

#[test]
fn test_schedules_terminate_at_zero_balance() {
    for params in sample_loans() {
        let result = amortization::compute_schedules(&params).unwrap();
        for rows in [&result.standard, &result.accelerated] {
            assert!(!rows.is_empty());
            assert_eq!(rows.last().unwrap().balance, Decimal::ZERO);
            assert!(rows.iter().all(|r| r.balance >= Decimal::ZERO));
        }
    }
}

#[test]
fn test_principal_portions_sum_to_loan_amount() {
    for params in sample_loans() {
        let result = amortization::compute_schedules(&params).unwrap();
        let tol = params.principal * dec!(0.000001);
        assert_close(
            principal_sum(&result.standard),
            params.principal,
            tol,
            "standard principal sum",
        );
        assert_close(
            principal_sum(&result.accelerated),
            params.principal,
            tol,
            "accelerated principal sum",
        );
    }
}

#[test]
fn test_payment_splits_into_principal_and_interest() {
    for params in sample_loans() {
        let result = amortization::compute_schedules(&params).unwrap();
        for row in result.standard.iter().chain(result.accelerated.iter()) {
            assert_close(
                row.payment,
                row.principal + row.interest,
                dec!(0.0000001),
                "payment split",
            );
        }
    }
}

#[test]
fn test_months_contiguous_and_balance_decreasing() {
    for params in sample_loans() {
        let result = amortization::compute_schedules(&params).unwrap();
        for rows in [&result.standard, &result.accelerated] {
            for (i, row) in rows.iter().enumerate() {
                assert_eq!(row.month, i as u32 + 1);
            }
            for pair in rows.windows(2) {
                assert!(pair[1].balance < pair[0].balance);
                assert_eq!(pair[1].beginning_balance, pair[0].balance);
            }
        }
    }
}

// ===========================================================================
// Standard vs. accelerated
// ===========================================================================

#[test]
fn test_extra_payment_shortens_and_saves() {
    for params in sample_loans() {
        if params.extra_payment.is_zero() {
            continue;
        }
        let result = amortization::compute_schedules(&params).unwrap();
        assert!(result.accelerated.len() <= result.standard.len());
        assert!(result.total_interest_accelerated <= result.total_interest_standard);
    }
}

#[test]
fn test_zero_extra_mirrors_standard() {
    let params = LoanParameters::new(dec!(100000), 30, dec!(5.0));
    let result = amortization::compute_schedules(&params).unwrap();

    assert_eq!(result.standard.len(), result.accelerated.len());
    for (s, a) in result.standard.iter().zip(result.accelerated.iter()) {
        assert_eq!(s.month, a.month);
        assert_close(a.payment, s.payment, dec!(0.000001), "payment");
        assert_close(a.principal, s.principal, dec!(0.000001), "principal");
        assert_close(a.interest, s.interest, dec!(0.000001), "interest");
        assert_close(a.balance, s.balance, dec!(0.000001), "balance");
    }
}

#[test]
fn test_reference_mortgage() {
    let params = LoanParameters::new(dec!(100000), 30, dec!(5.0));
    let result = amortization::compute_schedules(&params).unwrap();

    assert_eq!(result.standard.len(), 360);
    assert_close(result.standard[0].interest, dec!(416.67), dec!(0.005), "first interest");
    assert_close(result.monthly_payment, dec!(536.82), dec!(0.005), "monthly payment");
    // 360 * 536.82 - 100000
    assert_close(result.total_interest_standard, dec!(93255.78), dec!(1), "total interest");
}

#[test]
fn test_reference_mortgage_with_extra() {
    let params = LoanParameters::new(dec!(100000), 30, dec!(5.0)).with_extra_payment(dec!(200));
    let result = amortization::compute_schedules(&params).unwrap();

    assert!(result.accelerated.len() < 360);
    assert!(result.total_interest_accelerated < result.total_interest_standard);
}

#[test]
fn test_zero_rate_payment_is_straight_line() {
    let params = LoanParameters::new(dec!(100000), 30, Decimal::ZERO);
    let result = amortization::compute_schedules(&params).unwrap();

    assert_eq!(result.monthly_payment, dec!(100000) / dec!(360));
    assert_eq!(result.total_interest_standard, Decimal::ZERO);
    assert_eq!(result.total_interest_accelerated, Decimal::ZERO);
    assert_eq!(result.standard.len(), 360);
}

#[test]
fn test_extra_payment_larger_than_loan() {
    // Extra dwarfs the balance: one scheduled payment clears it.
    let params = LoanParameters::new(dec!(1000), 2, dec!(24)).with_extra_payment(dec!(5000));
    let result = amortization::compute_schedules(&params).unwrap();

    assert_eq!(result.accelerated.len(), 1);
    let only = &result.accelerated[0];
    assert_eq!(only.principal, dec!(1000));
    assert_eq!(only.interest, dec!(20));
    assert_eq!(only.payment, dec!(1020));
}

// ===========================================================================
// Failures
// ===========================================================================

#[test]
fn test_non_amortizing_loan_fails_fast() {
    let params = LoanParameters::new(dec!(100000), 1000, dec!(50));
    let err = amortization::compute_schedules(&params).unwrap_err();
    assert!(
        matches!(err, AmortizationError::NonAmortizing { .. }),
        "Expected NonAmortizing, got {err:?}"
    );
}

#[test]
fn test_century_terms_beyond_decimal_precision_fail_fast() {
    for years in [1000, 1100, 1200, 1250, 1300, 1340] {
        let params = LoanParameters::new(dec!(100000), years, dec!(5)).with_extra_payment(dec!(100));
        let err = amortization::compute_schedules(&params).unwrap_err();
        match err {
            AmortizationError::NonAmortizing { payment, .. } => {
                // Level payment, never a leftover from a drifting schedule
                assert!(payment > dec!(416), "{years}y reported payment {payment}");
            }
            other => panic!("{years}y: expected NonAmortizing, got {other:?}"),
        }
        assert!(amortization::monthly_payment(&params).is_err());
    }
}

#[test]
fn test_invalid_parameters_report_field() {
    let cases = [
        (LoanParameters::new(dec!(0), 30, dec!(5)), "principal"),
        (LoanParameters::new(dec!(1000), 0, dec!(5)), "term_years"),
        (LoanParameters::new(dec!(1000), 30, dec!(-1)), "annual_rate_pct"),
        (
            LoanParameters::new(dec!(1000), 30, dec!(5)).with_extra_payment(dec!(-1)),
            "extra_payment",
        ),
    ];
    for (params, expected) in cases {
        match amortization::compute_schedules(&params) {
            Err(AmortizationError::InvalidParameter { field, .. }) => assert_eq!(field, expected),
            other => panic!("Expected InvalidParameter for {expected}, got {other:?}"),
        }
    }
}

#[test]
fn test_comparison_envelope_serializes() {
    let params = LoanParameters::new(dec!(100000), 30, dec!(5.0)).with_extra_payment(dec!(200));
    let out = amortization::compare_schedules(&params).unwrap();
    let json = serde_json::to_value(&out).unwrap();

    assert!(json["result"]["comparison"]["interest_savings"].is_string());
    assert_eq!(
        json["result"]["standard_schedule"].as_array().unwrap().len(),
        360
    );
}
