//! The page and API endpoint URIs.

/// The root route which redirects to the dashboard.
pub const ROOT: &str = "/";
/// The summary of income, expenses and spending by category.
pub const DASHBOARD_VIEW: &str = "/dashboard";
/// The page for adding and listing transactions.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// The page for setting monthly budgets per category.
pub const BUDGET_VIEW: &str = "/budget";
/// The page for setting a savings goal and tracking progress towards it.
pub const SAVINGS_VIEW: &str = "/savings";
/// The page for recording recurring payments.
pub const AUTOMATED_PAYMENTS_VIEW: &str = "/automated_payments";
/// The page for recording money lent or borrowed.
pub const LOANS_VIEW: &str = "/loans";
/// The page for downloading transactions as CSV.
pub const EXPORT_VIEW: &str = "/export";
/// The route for static files.
pub const STATIC: &str = "/static";

/// The route to create a transaction.
pub const TRANSACTIONS_API: &str = "/api/transactions";
/// The route to save the budget.
pub const BUDGET_API: &str = "/api/budget";
/// The route to set the savings goal.
pub const SAVINGS_GOAL_API: &str = "/api/savings_goal";
/// The route to create an automated payment.
pub const AUTOMATED_PAYMENTS_API: &str = "/api/automated_payments";
/// The route to create a loan.
pub const LOANS_API: &str = "/api/loans";
/// The route to download transactions as a CSV file.
pub const EXPORT_API: &str = "/api/export";
