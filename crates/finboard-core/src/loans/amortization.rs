use log::{debug, warn};
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::FinboardError;
use crate::types::{Money, Percent, Rate};
use crate::FinboardResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Fixed monthly payment and lifetime interest of a fixed-rate loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amortization {
    pub monthly_payment: Money,
    pub total_interest: Money,
}

impl Amortization {
    /// Everything the borrower pays over the life of the loan.
    pub fn total_paid(&self, principal: Money) -> Money {
        principal + self.total_interest
    }
}

/// Reject terms the annuity formula cannot price.
pub fn validate_loan_terms(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> FinboardResult<()> {
    if principal <= Decimal::ZERO {
        return Err(FinboardError::InvalidInput {
            field: "principal".into(),
            reason: "Principal must be positive".into(),
        });
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(FinboardError::InvalidInput {
            field: "interest_rate".into(),
            reason: "Annual interest rate cannot be negative".into(),
        });
    }
    if term_years == 0 {
        return Err(FinboardError::InvalidInput {
            field: "term_years".into(),
            reason: "Term must be at least 1 year".into(),
        });
    }
    Ok(())
}

/// Annual percentage rate (5.5 = 5.5%) to a monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

pub fn number_of_payments(term_years: u32) -> FinboardResult<u32> {
    term_years
        .checked_mul(MONTHS_PER_YEAR)
        .ok_or_else(|| FinboardError::InvalidInput {
            field: "term_years".into(),
            reason: format!("Term of {term_years} years is too long to schedule monthly"),
        })
}

/// Payment per unit of principal: r(1+r)^n / ((1+r)^n - 1).
///
/// Returns `None` when the loan is interest-free, either because the rate is
/// zero or because it is too small for (1+r)^n to differ from 1.
pub(crate) fn annuity_factor(rate: Rate, periods: u32) -> FinboardResult<Option<Decimal>> {
    if rate.is_zero() {
        return Ok(None);
    }

    let growth = (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| {
            FinboardError::FinancialImpossibility(format!(
                "Compound growth at {rate} per month over {periods} months exceeds decimal range"
            ))
        })?;

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        warn!("monthly rate {rate} is too small to compound over {periods} months; pricing as interest-free");
        return Ok(None);
    }

    rate.checked_mul(growth)
        .and_then(|numerator| numerator.checked_div(denominator))
        .map(Some)
        .ok_or_else(|| {
            FinboardError::FinancialImpossibility(format!(
                "Annuity factor at {rate} per month over {periods} months exceeds decimal range"
            ))
        })
}

/// Fixed monthly payment and total interest for a fixed-rate, fixed-term loan.
///
/// Amounts are in the reference unit; any display conversion is applied by
/// the caller to the result, never to the inputs of this formula.
pub fn compute_amortization(
    principal: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> FinboardResult<Amortization> {
    validate_loan_terms(principal, annual_rate_percent, term_years)?;

    let rate = monthly_rate(annual_rate_percent);
    let periods = number_of_payments(term_years)?;
    let n = Decimal::from(periods);

    let monthly_payment = match annuity_factor(rate, periods)? {
        None => principal / n,
        Some(factor) => principal.checked_mul(factor).ok_or_else(|| {
            FinboardError::FinancialImpossibility(format!(
                "Monthly payment on {principal} exceeds decimal range"
            ))
        })?,
    };

    let total_paid = monthly_payment.checked_mul(n).ok_or_else(|| {
        FinboardError::FinancialImpossibility("Total repayment exceeds decimal range".into())
    })?;
    // Rounding in the last digit must not report negative interest.
    let total_interest = (total_paid - principal).max(Decimal::ZERO);

    debug!(
        "amortized {principal} at {annual_rate_percent}% over {periods} months: payment {monthly_payment}, interest {total_interest}"
    );

    Ok(Amortization {
        monthly_payment,
        total_interest,
    })
}
