//! Dashboard module
//!
//! Provides an overview page showing income, expenses and spending by category.

mod cards;
mod handlers;
mod tables;

pub use handlers::get_dashboard_page;
