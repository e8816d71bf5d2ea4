//! Transactions: money earned or spent.
//!
//! This module contains:
//! - The `Transaction` record and the queries for the transactions table
//! - The `Ledger`, the session's cached copy of that table
//! - The page for adding and listing transactions, and its form endpoint

mod core;
mod create_endpoint;
mod ledger;
mod transactions_page;

pub use core::{Transaction, create_transaction_table, get_all_transactions, insert_transaction};
pub use create_endpoint::create_transaction_endpoint;
pub use ledger::Ledger;
pub use transactions_page::get_transactions_page;
