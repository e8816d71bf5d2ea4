//! Budget allocations per spending category.
//!
//! This module contains:
//! - The queries for the budget table, where each category has at most one row
//! - The budget management page and the endpoint that saves its form

mod core;
mod page;
mod save_endpoint;

pub use core::{create_budget_table, get_budget, parse_budget_form, save_budget};
pub use page::get_budget_page;
pub use save_endpoint::save_budget_endpoint;
