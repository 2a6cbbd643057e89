//! Request outcomes and the response contract they are judged against.
mod contract;
mod outcome;


pub use contract::ResponseContract;
pub use outcome::{ContractViolation, HttpStatus, OutcomeError, RequestOutcome};
