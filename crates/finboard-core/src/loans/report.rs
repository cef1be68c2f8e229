use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::currency::rates::ExchangeRateTable;
use crate::error::FinboardError;
use crate::loans::amortization::{compute_amortization, number_of_payments, Amortization};
use crate::loans::book::LoanBook;
use crate::loans::deadline::{classify_deadline, payoff_date_from, today, DeadlineStatus};
use crate::loans::loan::Loan;
use crate::types::*;
use crate::FinboardResult;

/// Loan figures expressed in a display currency.
///
/// All three amounts are converted with the same rate in one step, so a
/// converted figure is never combined with an unconverted one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedLoanAmounts {
    pub currency: Currency,
    pub exchange_rate: Rate,
    pub principal: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
}

pub fn convert_loan_amounts(
    rates: &ExchangeRateTable,
    principal: Money,
    amortization: &Amortization,
    to: &Currency,
) -> FinboardResult<ConvertedLoanAmounts> {
    Ok(ConvertedLoanAmounts {
        currency: to.clone(),
        exchange_rate: rates.rate_for(to)?,
        principal: rates.convert(principal, to)?,
        monthly_payment: rates.convert(amortization.monthly_payment, to)?,
        total_interest: rates.convert(amortization.total_interest, to)?,
    })
}

/// Resolve the optional display currency against an optional rate table.
fn display_target(
    display_currency: &Option<Currency>,
    exchange_rates: &Option<ExchangeRateTable>,
) -> FinboardResult<Option<(ExchangeRateTable, Currency)>> {
    let Some(currency) = display_currency else {
        return Ok(None);
    };
    let table = exchange_rates.clone().unwrap_or_default();
    table.validate()?;
    table.rate_for(currency)?;
    Ok(Some((table, currency.clone())))
}

fn reference_of(exchange_rates: &Option<ExchangeRateTable>) -> Currency {
    exchange_rates
        .as_ref()
        .map(|table| table.reference.clone())
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Loan quote
// ---------------------------------------------------------------------------

/// Input for pricing a prospective loan
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuoteInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    /// Origination date; defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rates: Option<ExchangeRateTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanQuote {
    pub reference_currency: Currency,
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    pub number_of_payments: u32,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub total_paid: Money,
    pub payoff_date: NaiveDate,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<ConvertedLoanAmounts>,
}

/// Price a loan: monthly payment, lifetime interest and payoff date.
pub fn quote_loan(input: &LoanQuoteInput) -> FinboardResult<ComputationOutput<LoanQuote>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let amortization =
        compute_amortization(input.principal, input.annual_rate_percent, input.term_years)?;
    let start_date = input.start_date.unwrap_or_else(today);
    let payoff_date = payoff_date_from(start_date, input.term_years)?;
    let target = display_target(&input.display_currency, &input.exchange_rates)?;

    if input.annual_rate_percent.is_zero() {
        warnings.push("Interest-free loan: payment is principal divided evenly over the term".into());
    }
    if amortization.total_interest > input.principal {
        warnings.push("Total interest exceeds the amount borrowed".into());
    }

    let reference_currency = reference_of(&input.exchange_rates);
    let display = target
        .map(|(table, currency)| {
            convert_loan_amounts(&table, input.principal, &amortization, &currency)
        })
        .transpose()?;

    let output = LoanQuote {
        reference_currency,
        principal: input.principal,
        annual_rate_percent: input.annual_rate_percent,
        term_years: input.term_years,
        number_of_payments: number_of_payments(input.term_years)?,
        monthly_payment: amortization.monthly_payment,
        total_interest: amortization.total_interest,
        total_paid: amortization.total_paid(input.principal),
        payoff_date,
        display,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Loan Amortization (annuity formula, monthly compounding)",
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

// ---------------------------------------------------------------------------
// Loan book summary
// ---------------------------------------------------------------------------

/// Input for summarising a set of loans
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanBookSummaryInput {
    pub loans: Vec<Loan>,
    /// Evaluation date for deadlines; defaults to today.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub as_of: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_currency: Option<Currency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exchange_rates: Option<ExchangeRateTable>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanSummaryRow {
    pub id: String,
    pub name: String,
    pub principal: Money,
    pub interest_rate: Percent,
    pub term_years: u32,
    pub deadline: NaiveDate,
    pub monthly_payment: Money,
    pub total_interest: Money,
    pub days_until_deadline: i64,
    pub status: DeadlineStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<ConvertedLoanAmounts>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeadlineAlert {
    pub loan_id: String,
    pub loan_name: String,
    pub deadline: NaiveDate,
    pub days_until: i64,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanBookSummary {
    pub as_of: NaiveDate,
    pub reference_currency: Currency,
    pub loan_count: usize,
    pub total_principal: Money,
    pub total_monthly_payment: Money,
    pub total_interest: Money,
    pub loans: Vec<LoanSummaryRow>,
    pub alerts: Vec<DeadlineAlert>,
}

/// Summarise loans supplied as data (JSON callers).
pub fn summarize_loan_book(
    input: &LoanBookSummaryInput,
) -> FinboardResult<ComputationOutput<LoanBookSummary>> {
    let book = LoanBook::from_loans(input.loans.iter().cloned())?;
    summarize_book(
        &book,
        input.as_of.unwrap_or_else(today),
        &input.display_currency,
        &input.exchange_rates,
    )
}

/// Summarise a loan book as of a date: per-loan figures, deadline status,
/// and an alert for every loan whose deadline is upcoming.
pub fn summarize_book(
    book: &LoanBook,
    as_of: NaiveDate,
    display_currency: &Option<Currency>,
    exchange_rates: &Option<ExchangeRateTable>,
) -> FinboardResult<ComputationOutput<LoanBookSummary>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if book.is_empty() {
        return Err(FinboardError::InvalidInput {
            field: "loans".into(),
            reason: "At least one loan is required for a summary".into(),
        });
    }

    let target = display_target(display_currency, exchange_rates)?;
    let reference_currency = reference_of(exchange_rates);

    let mut rows = Vec::with_capacity(book.len());
    let mut alerts = Vec::new();
    let mut total_principal = Decimal::ZERO;
    let mut total_monthly_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;

    for loan in book.list() {
        let amortization = loan.amortization()?;
        let days = loan.days_until_deadline(as_of);
        let status = classify_deadline(days);

        match status {
            DeadlineStatus::Upcoming => alerts.push(DeadlineAlert {
                loan_id: loan.id.clone(),
                loan_name: loan.name.clone(),
                deadline: loan.deadline,
                days_until: days,
                message: format!("Payment for {} is due in {} days.", loan.name, days),
            }),
            DeadlineStatus::Overdue => warnings.push(format!(
                "{} passed its deadline {} days ago; overdue loans raise no alert",
                loan.name, -days
            )),
            DeadlineStatus::DueToday => warnings.push(format!(
                "{} is due today; loans due today raise no alert",
                loan.name
            )),
            DeadlineStatus::OnTrack => {}
        }

        let display = target
            .as_ref()
            .map(|(table, currency)| {
                convert_loan_amounts(table, loan.principal, &amortization, currency)
            })
            .transpose()?;

        total_principal = add_to_total(total_principal, loan.principal, "principal")?;
        total_monthly_payment =
            add_to_total(total_monthly_payment, amortization.monthly_payment, "monthly payment")?;
        total_interest = add_to_total(total_interest, amortization.total_interest, "interest")?;

        rows.push(LoanSummaryRow {
            id: loan.id.clone(),
            name: loan.name.clone(),
            principal: loan.principal,
            interest_rate: loan.interest_rate,
            term_years: loan.term_years,
            deadline: loan.deadline,
            monthly_payment: amortization.monthly_payment,
            total_interest: amortization.total_interest,
            days_until_deadline: days,
            status,
            display,
        });
    }

    debug!(
        "summarised {} loans as of {as_of}: {} alerts",
        rows.len(),
        alerts.len()
    );

    let output = LoanBookSummary {
        as_of,
        reference_currency,
        loan_count: rows.len(),
        total_principal,
        total_monthly_payment,
        total_interest,
        loans: rows,
        alerts,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Loan Book Summary with 30-day Deadline Alerts",
        &serde_json::json!({
            "as_of": as_of,
            "loan_count": book.len(),
            "display_currency": display_currency,
        }),
        warnings,
        elapsed,
        output,
    ))
}

fn add_to_total(total: Money, amount: Money, what: &str) -> FinboardResult<Money> {
    total.checked_add(amount).ok_or_else(|| {
        FinboardError::FinancialImpossibility(format!(
            "Total {what} across the loan book exceeds the representable range"
        ))
    })
}
