use chrono::NaiveDate;
use log::debug;
use rust_decimal_macros::dec;
use std::collections::HashSet;

use crate::error::FinboardError;
use crate::loans::loan::{Loan, LoanInput};
use crate::FinboardResult;

/// In-memory loan repository owned by a single session.
///
/// Insertion order is display order. Ids are assigned by the book and never
/// reused, even after the loan holding one is removed. Ids carried in by
/// imported loans count as issued too.
#[derive(Debug, Clone, Default)]
pub struct LoanBook {
    loans: Vec<Loan>,
    issued: HashSet<String>,
    next_id: u64,
}

impl LoanBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// A book seeded with the dashboard's demonstration loans.
    pub fn with_sample_loans() -> FinboardResult<Self> {
        let mut book = Self::new();
        for loan in sample_loans()? {
            book.insert(loan)?;
        }
        Ok(book)
    }

    /// Import existing loans, keeping their order and deadlines.
    pub fn from_loans(loans: impl IntoIterator<Item = Loan>) -> FinboardResult<Self> {
        let mut book = Self::new();
        for loan in loans {
            book.insert(loan)?;
        }
        Ok(book)
    }

    /// Originate a loan from form input on `today` and append it.
    pub fn add(&mut self, input: LoanInput, today: NaiveDate) -> FinboardResult<&Loan> {
        let id = self.allocate_id();
        let loan = Loan::originate(id, input, today)?;
        debug!("added loan {} ({}) due {}", loan.id, loan.name, loan.deadline);
        Ok(self.push(loan))
    }

    /// Append an existing loan. Derived figures are recomputed; an empty id,
    /// or one this book has already issued, is replaced with a fresh one.
    pub fn insert(&mut self, mut loan: Loan) -> FinboardResult<&Loan> {
        loan.refresh_derived()?;
        if loan.id.trim().is_empty() || !self.issued.insert(loan.id.clone()) {
            loan.id = self.allocate_id();
        }
        debug!("imported loan {} ({}) due {}", loan.id, loan.name, loan.deadline);
        Ok(self.push(loan))
    }

    pub fn remove(&mut self, id: &str) -> FinboardResult<Loan> {
        let index = self
            .loans
            .iter()
            .position(|l| l.id == id)
            .ok_or_else(|| FinboardError::LoanNotFound(id.to_string()))?;
        Ok(self.loans.remove(index))
    }

    pub fn get(&self, id: &str) -> Option<&Loan> {
        self.loans.iter().find(|l| l.id == id)
    }

    pub fn list(&self) -> &[Loan] {
        &self.loans
    }

    pub fn len(&self) -> usize {
        self.loans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loans.is_empty()
    }

    fn push(&mut self, loan: Loan) -> &Loan {
        let index = self.loans.len();
        self.loans.push(loan);
        &self.loans[index]
    }

    fn allocate_id(&mut self) -> String {
        loop {
            self.next_id += 1;
            let candidate = self.next_id.to_string();
            if self.issued.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

fn sample_loans() -> FinboardResult<Vec<Loan>> {
    let date = |y: i32, m: u32, d: u32| {
        NaiveDate::from_ymd_opt(y, m, d)
            .ok_or_else(|| FinboardError::DateError(format!("{y}-{m}-{d} is not a date")))
    };
    Ok(vec![
        Loan {
            id: "1".into(),
            name: "Student Loan".into(),
            principal: dec!(20000),
            interest_rate: dec!(5.5),
            term_years: 10,
            deadline: date(2034, 7, 26)?,
            monthly_payment: None,
            total_interest: None,
        },
        Loan {
            id: "2".into(),
            name: "Car Loan".into(),
            principal: dec!(15000),
            interest_rate: dec!(4.2),
            term_years: 5,
            deadline: date(2029, 8, 15)?,
            monthly_payment: None,
            total_interest: None,
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn input(name: &str) -> LoanInput {
        LoanInput {
            name: name.into(),
            principal: dec!(5000),
            interest_rate: dec!(6),
            term_years: 3,
        }
    }

    #[test]
    fn test_sample_book() {
        let book = LoanBook::with_sample_loans().unwrap();
        let names: Vec<&str> = book.list().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["Student Loan", "Car Loan"]);
        assert!(book.list().iter().all(|l| l.monthly_payment.is_some()));
    }

    #[test]
    fn test_add_preserves_insertion_order() {
        let mut book = LoanBook::new();
        book.add(input("A"), date(2026, 1, 1)).unwrap();
        book.add(input("B"), date(2026, 1, 1)).unwrap();
        book.add(input("C"), date(2026, 1, 1)).unwrap();
        let names: Vec<&str> = book.list().iter().map(|l| l.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
        assert_eq!(book.list()[0].deadline, date(2029, 1, 1));
    }

    #[test]
    fn test_ids_not_reused_after_removal() {
        let mut book = LoanBook::new();
        let first = book.add(input("A"), date(2026, 1, 1)).unwrap().id.clone();
        let second = book.add(input("B"), date(2026, 1, 1)).unwrap().id.clone();
        book.remove(&second).unwrap();
        let third = book.add(input("C"), date(2026, 1, 1)).unwrap().id.clone();
        assert_ne!(third, second);
        assert_ne!(third, first);
        assert_eq!(book.len(), 2);
    }

    #[test]
    fn test_imported_ids_not_reused_after_removal() {
        let mut book = LoanBook::with_sample_loans().unwrap();
        book.remove("1").unwrap();
        let added = book.add(input("New"), date(2026, 1, 1)).unwrap().id.clone();
        assert_ne!(added, "1");
        assert_ne!(added, "2");

        // An import reusing the removed id gets a fresh one as well
        let mut returning = book.list()[0].clone();
        returning.id = "1".into();
        let reimported = book.insert(returning).unwrap().id.clone();
        assert_ne!(reimported, "1");
        assert_ne!(reimported, added);
        assert_eq!(book.len(), 3);
    }

    #[test]
    fn test_remove_unknown_id() {
        let mut book = LoanBook::new();
        assert!(matches!(
            book.remove("42"),
            Err(FinboardError::LoanNotFound(id)) if id == "42"
        ));
    }

    #[test]
    fn test_insert_recomputes_stale_figures() {
        let mut book = LoanBook::new();
        let loan = Loan {
            id: "7".into(),
            name: "Imported".into(),
            principal: dec!(12000),
            interest_rate: dec!(0),
            term_years: 1,
            deadline: date(2027, 1, 1),
            monthly_payment: Some(dec!(1)),
            total_interest: Some(dec!(999)),
        };
        let stored = book.insert(loan).unwrap();
        assert_eq!(stored.id, "7");
        assert_eq!(stored.monthly_payment, Some(dec!(1000)));
        assert_eq!(stored.total_interest, Some(dec!(0)));
    }

    #[test]
    fn test_insert_replaces_duplicate_and_empty_ids() {
        let mut book = LoanBook::with_sample_loans().unwrap();
        let mut dup = book.list()[0].clone();
        dup.name = "Duplicate".into();
        let dup_id = book.insert(dup).unwrap().id.clone();
        assert_ne!(dup_id, "1");

        let mut blank = book.list()[1].clone();
        blank.id = String::new();
        let blank_id = book.insert(blank).unwrap().id.clone();
        assert!(!blank_id.is_empty());
        assert_ne!(blank_id, dup_id);
    }

    #[test]
    fn test_insert_rejects_invalid_loan() {
        let mut book = LoanBook::new();
        let mut loan = LoanBook::with_sample_loans().unwrap().list()[0].clone();
        loan.term_years = 0;
        assert!(book.insert(loan).is_err());
        assert!(book.is_empty());
    }
}
