use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loans::amortization::{compute_amortization, monthly_rate, number_of_payments};
use crate::loans::deadline::{add_months, today};
use crate::types::*;
use crate::FinboardResult;

/// Input for a month-by-month amortization schedule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    /// Origination date; the first payment falls one month later. Defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// A single monthly payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulePeriod {
    pub period: u32,
    pub payment_date: NaiveDate,
    pub opening_balance: Money,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub periods: Vec<SchedulePeriod>,
    pub total_interest: Money,
    pub total_principal: Money,
    pub total_paid: Money,
    pub payoff_date: NaiveDate,
}

/// Build the payment-by-payment schedule for a fixed-rate loan.
pub fn build_amortization_schedule(
    input: &ScheduleInput,
) -> FinboardResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let amortization =
        compute_amortization(input.principal, input.annual_rate_percent, input.term_years)?;
    let rate = monthly_rate(input.annual_rate_percent);
    let periods_count = number_of_payments(input.term_years)?;
    let start_date = input.start_date.unwrap_or_else(today);

    let mut periods = Vec::with_capacity(periods_count as usize);
    let mut balance = input.principal;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;
    let mut payoff_date = start_date;

    for period in 1..=periods_count {
        let opening = balance;
        let interest = opening * rate;

        // Final payment clears whatever rounding has left on the balance
        let (payment, principal_repaid) = if period == periods_count {
            (opening + interest, opening)
        } else {
            (
                amortization.monthly_payment,
                amortization.monthly_payment - interest,
            )
        };

        balance = opening - principal_repaid;
        total_interest += interest;
        total_principal += principal_repaid;
        payoff_date = add_months(start_date, period)?;

        periods.push(SchedulePeriod {
            period,
            payment_date: payoff_date,
            opening_balance: opening,
            payment,
            interest,
            principal: principal_repaid,
            closing_balance: balance,
        });
    }

    if let Some(last) = periods.last() {
        let drift = (last.payment - amortization.monthly_payment).abs();
        if drift >= dec!(0.01) {
            warnings.push(format!(
                "Final payment differs from the regular payment by {drift} after rounding"
            ));
        }
    }
    if total_interest > input.principal {
        warnings.push("Total interest exceeds the amount borrowed".into());
    }

    let output = AmortizationSchedule {
        monthly_payment: amortization.monthly_payment,
        periods,
        total_interest,
        total_principal,
        total_paid: total_interest + total_principal,
        payoff_date,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Amortization Schedule (annuity method)",
        &serde_json::json!({
            "principal": input.principal.to_string(),
            "annual_rate_percent": input.annual_rate_percent.to_string(),
            "term_years": input.term_years,
            "start_date": start_date,
        }),
        warnings,
        elapsed,
        output,
    ))
}
