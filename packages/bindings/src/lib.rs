use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use finboard_core::loans::{amortization, deadline, report, schedule};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

#[derive(Deserialize)]
struct AmortizationRequest {
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
}

#[derive(Serialize)]
struct DaysUntilResponse {
    days_until: i64,
    is_upcoming: bool,
}

// ---------------------------------------------------------------------------
// Amortization engine
// ---------------------------------------------------------------------------

/// `{ principal, annual_rate_percent, term_years }` → `{ monthly_payment, total_interest }`
#[napi]
pub fn compute_amortization(input_json: String) -> NapiResult<String> {
    let input: AmortizationRequest = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        amortization::compute_amortization(input.principal, input.annual_rate_percent, input.term_years)
            .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn quote_loan(input_json: String) -> NapiResult<String> {
    let input: report::LoanQuoteInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::quote_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn amortization_schedule(input_json: String) -> NapiResult<String> {
    let input: schedule::ScheduleInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = schedule::build_amortization_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Deadlines
// ---------------------------------------------------------------------------

/// Days from today to an ISO `YYYY-MM-DD` deadline, negative once passed.
#[napi]
pub fn days_until(deadline_date: String) -> NapiResult<String> {
    let date = deadline_date
        .parse::<chrono::NaiveDate>()
        .map_err(to_napi_error)?;
    let days = deadline::days_until(date);
    let output = DaysUntilResponse {
        days_until: days,
        is_upcoming: deadline::is_upcoming(days),
    };
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn assess_deadline(input_json: String) -> NapiResult<String> {
    let input: deadline::DeadlineInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = deadline::assess_deadline(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Loan book
// ---------------------------------------------------------------------------

#[napi]
pub fn summarize_loan_book(input_json: String) -> NapiResult<String> {
    let input: report::LoanBookSummaryInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = report::summarize_loan_book(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
