use chrono::{Duration, NaiveDate};
use finboard_core::loans::amortization::compute_amortization;
use finboard_core::loans::book::LoanBook;
use finboard_core::loans::deadline::{
    classify_deadline, days_until_from, is_upcoming, payoff_date_from, DeadlineStatus,
};
use finboard_core::loans::loan::LoanInput;
use finboard_core::loans::report::{summarize_book, LoanQuoteInput};
use finboard_core::{Currency, FinboardError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ===========================================================================
// Amortization identity
// ===========================================================================

#[test]
fn test_zero_rate_divides_principal_evenly() {
    let result = compute_amortization(dec!(12000), dec!(0), 1).unwrap();
    assert_eq!(result.monthly_payment, dec!(1000));
    assert_eq!(result.total_interest, dec!(0));
}

#[test]
fn test_known_fixed_rate_case() {
    // Annuity formula: 20,000 × r(1+r)^120 / ((1+r)^120 − 1), r = 0.055/12
    let result = compute_amortization(dec!(20000), dec!(5.5), 10).unwrap();
    assert!((result.monthly_payment - dec!(217.05)).abs() < dec!(0.01));
    assert!((result.total_interest - dec!(6046.31)).abs() < dec!(0.5));
}

#[test]
fn test_total_interest_strictly_increases_with_rate() {
    let mut previous: Option<Decimal> = None;
    for tenths in 0..=150 {
        let rate = Decimal::new(tenths, 1);
        let interest = compute_amortization(dec!(25000), rate, 7)
            .unwrap()
            .total_interest;
        if let Some(prev) = previous {
            assert!(interest > prev, "interest at {rate}% did not exceed {prev}");
        }
        previous = Some(interest);
    }
}

#[test]
fn test_payment_scales_with_principal() {
    let base = compute_amortization(dec!(10000), dec!(6.25), 15).unwrap();
    for k in [dec!(0.5), dec!(3), dec!(12.75), dec!(1000)] {
        let scaled = compute_amortization(dec!(10000) * k, dec!(6.25), 15).unwrap();
        let expected = base.monthly_payment * k;
        assert!(
            (scaled.monthly_payment - expected).abs() < dec!(0.0000001),
            "k = {k}: {} vs {expected}",
            scaled.monthly_payment
        );
    }
}

#[test]
fn test_positive_rate_never_reports_negative_interest() {
    for years in [1u32, 5, 15, 30, 40] {
        for rate in [dec!(0.01), dec!(0.5), dec!(3), dec!(24)] {
            let result = compute_amortization(dec!(1), rate, years).unwrap();
            assert!(result.total_interest >= Decimal::ZERO);
        }
    }
}

#[test]
fn test_invalid_inputs_are_distinguishable() {
    let cases = [
        (dec!(0), dec!(5), 10, "principal"),
        (dec!(1000), dec!(-1), 10, "interest_rate"),
        (dec!(1000), dec!(5), 0, "term_years"),
    ];
    for (principal, rate, years, expected_field) in cases {
        match compute_amortization(principal, rate, years) {
            Err(FinboardError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid {expected_field}, got {other:?}"),
        }
    }
}

// ===========================================================================
// Deadlines
// ===========================================================================

#[test]
fn test_deadline_boundary_thirty_days() {
    let today = date(2026, 10, 19);
    let in_30 = today + Duration::days(30);
    let in_31 = today + Duration::days(31);

    assert_eq!(days_until_from(in_30, today), 30);
    assert!(is_upcoming(days_until_from(in_30, today)));
    assert!(!is_upcoming(days_until_from(in_31, today)));
    assert!(!is_upcoming(days_until_from(today, today)));
}

#[test]
fn test_overdue_loan_raises_no_alert() {
    let today = date(2026, 10, 19);
    let days = days_until_from(date(2026, 10, 1), today);
    assert_eq!(days, -18);
    assert_eq!(classify_deadline(days), DeadlineStatus::Overdue);
    assert!(!is_upcoming(days));
}

#[test]
fn test_leap_day_payoff_date_is_pinned() {
    assert_eq!(payoff_date_from(date(2024, 2, 29), 1).unwrap(), date(2025, 2, 28));
}

// ===========================================================================
// Loan book end to end
// ===========================================================================

#[test]
fn test_loan_book_lifecycle() {
    let today = date(2026, 10, 19);
    let mut book = LoanBook::with_sample_loans().unwrap();
    let id = book
        .add(
            LoanInput {
                name: "Laptop".into(),
                principal: dec!(2400),
                interest_rate: dec!(0),
                term_years: 2,
            },
            today,
        )
        .unwrap()
        .id
        .clone();

    assert_eq!(book.len(), 3);
    assert_eq!(book.get(&id).unwrap().deadline, date(2028, 10, 19));
    assert_eq!(book.get(&id).unwrap().monthly_payment, Some(dec!(100)));

    let removed = book.remove(&id).unwrap();
    assert_eq!(removed.name, "Laptop");
    assert_eq!(book.len(), 2);

    let summary = summarize_book(&book, today, &Some(Currency::GBP), &None).unwrap();
    assert!(summary.result.alerts.is_empty());
    assert_eq!(summary.result.loans.len(), 2);
    assert!(summary.result.loans.iter().all(|r| r.display.is_some()));
}

#[test]
fn test_quote_input_from_json() {
    let json = r#"{
        "principal": "20000",
        "annual_rate_percent": "5.5",
        "term_years": 10,
        "start_date": "2024-02-29",
        "display_currency": "INR"
    }"#;
    let input: LoanQuoteInput = serde_json::from_str(json).unwrap();
    let result = finboard_core::loans::report::quote_loan(&input).unwrap();
    assert_eq!(result.result.payoff_date, date(2034, 2, 28));
    assert_eq!(result.result.display.unwrap().currency, Currency::INR);
}
