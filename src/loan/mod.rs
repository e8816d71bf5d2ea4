//! Loans given to and taken from other people.
//!
//! This module contains:
//! - The `Loan` record and the queries for the loans table
//! - The loans page and the endpoint that adds a loan, which also records
//!   loans given as an expense

mod core;
mod create_endpoint;
mod page;

pub use core::{Loan, create_loan_table, get_all_loans, insert_loan};
pub use create_endpoint::create_loan_endpoint;
pub use page::get_loans_page;
