//! The savings goal and progress towards it.

mod core;
mod page;
mod progress;
mod update_endpoint;

pub use core::{create_savings_goal_table, get_savings_goal, save_savings_goal};
pub use page::get_savings_page;
pub use progress::{SavingsProgress, calculate_savings_progress};
pub use update_endpoint::update_savings_goal_endpoint;
