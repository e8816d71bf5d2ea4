//! Recurring payments such as rent and subscriptions.
//!
//! The payments are never executed. Their amounts are set aside when
//! calculating progress towards the savings goal.

mod core;
mod create_endpoint;
mod page;

pub use core::{
    AutomatedPayment, create_automated_payment_table, get_all_automated_payments,
    insert_automated_payment, total_automated_payments,
};
pub use create_endpoint::create_automated_payment_endpoint;
pub use page::get_automated_payments_page;
