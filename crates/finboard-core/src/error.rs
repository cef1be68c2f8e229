use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinboardError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Financial impossibility: {0}")]
    FinancialImpossibility(String),

    #[error("Date error: {0}")]
    DateError(String),

    #[error("Currency error: {0}")]
    CurrencyError(String),

    #[error("Loan not found: {0}")]
    LoanNotFound(String),
}
