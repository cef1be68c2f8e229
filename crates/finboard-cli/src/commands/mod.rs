pub mod deadline;
pub mod loans;
