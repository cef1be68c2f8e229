use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::loans::amortization::{compute_amortization, validate_loan_terms, Amortization};
use crate::loans::deadline::{classify_deadline, days_until_from, payoff_date_from, DeadlineStatus};
use crate::types::{Money, Percent};
use crate::FinboardResult;

/// Label given to loans entered without a name.
pub const DEFAULT_LOAN_NAME: &str = "New Custom Loan";

/// What a user types into the loan form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanInput {
    #[serde(default)]
    pub name: String,
    pub principal: Money,
    /// Nominal annual percentage rate (5.5 = 5.5%).
    pub interest_rate: Percent,
    pub term_years: u32,
}

/// A loan held in the loan book.
///
/// `monthly_payment` and `total_interest` are derived: the loan book
/// recomputes them from principal, rate and term whenever a loan enters it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Loan {
    #[serde(default)]
    pub id: String,
    pub name: String,
    pub principal: Money,
    pub interest_rate: Percent,
    pub term_years: u32,
    pub deadline: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_payment: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_interest: Option<Money>,
}

impl Loan {
    /// Create a loan from form input; the deadline is `originated_on` plus the term.
    pub fn originate(id: String, input: LoanInput, originated_on: NaiveDate) -> FinboardResult<Loan> {
        validate_loan_terms(input.principal, input.interest_rate, input.term_years)?;
        let deadline = payoff_date_from(originated_on, input.term_years)?;
        let name = match input.name.trim() {
            "" => DEFAULT_LOAN_NAME.to_string(),
            trimmed => trimmed.to_string(),
        };

        let mut loan = Loan {
            id,
            name,
            principal: input.principal,
            interest_rate: input.interest_rate,
            term_years: input.term_years,
            deadline,
            monthly_payment: None,
            total_interest: None,
        };
        loan.refresh_derived()?;
        Ok(loan)
    }

    pub fn amortization(&self) -> FinboardResult<Amortization> {
        compute_amortization(self.principal, self.interest_rate, self.term_years)
    }

    /// Recompute the derived payment figures from the loan's own terms.
    pub fn refresh_derived(&mut self) -> FinboardResult<Amortization> {
        let amortization = self.amortization()?;
        self.monthly_payment = Some(amortization.monthly_payment);
        self.total_interest = Some(amortization.total_interest);
        Ok(amortization)
    }

    pub fn days_until_deadline(&self, today: NaiveDate) -> i64 {
        days_until_from(self.deadline, today)
    }

    pub fn deadline_status(&self, today: NaiveDate) -> DeadlineStatus {
        classify_deadline(self.days_until_deadline(today))
    }
}
