pub mod amortization;
pub mod book;
pub mod deadline;
pub mod loan;
pub mod report;
pub mod schedule;
