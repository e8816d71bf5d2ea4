//! Summaries of the ledger for the dashboard, budget and savings pages.
//!
//! Every function here is a pure computation over a slice of transactions.
//! An empty slice gives all-zero results; callers check for an empty ledger
//! themselves before drawing charts.

use std::{
    collections::{BTreeMap, HashMap},
    fmt::Display,
};

use time::Date;

use crate::{
    domain::{Category, TransactionType},
    transaction::Transaction,
};

/// The total income and expenses over a set of transactions.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Totals {
    pub income: f64,
    pub expenses: f64,
    /// Income minus expenses.
    pub net: f64,
}

pub fn calculate_totals(transactions: &[Transaction]) -> Totals {
    let mut totals = Totals::default();

    for transaction in transactions {
        match transaction.transaction_type {
            TransactionType::Income => totals.income += transaction.amount.as_f64(),
            TransactionType::Expense => totals.expenses += transaction.amount.as_f64(),
        }
    }

    totals.net = totals.income - totals.expenses;
    totals
}

/// A calendar month, ordered chronologically and displayed as "YYYY-MM".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    year: i32,
    month: u8,
}

impl From<Date> for YearMonth {
    fn from(date: Date) -> Self {
        Self {
            year: date.year(),
            month: date.month().into(),
        }
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Income, expenses and net for one month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlySummary {
    pub month: YearMonth,
    pub income: f64,
    pub expense: f64,
    /// Income minus expense for the month.
    pub net: f64,
}

/// Roll transactions up by calendar month.
///
/// # Returns
/// One entry per month that has at least one transaction, oldest first. A
/// month with only income has an expense of zero and vice versa.
pub fn summarize_by_month(transactions: &[Transaction]) -> Vec<MonthlySummary> {
    let mut months: BTreeMap<YearMonth, (f64, f64)> = BTreeMap::new();

    for transaction in transactions {
        let (income, expense) = months.entry(transaction.date.into()).or_default();

        match transaction.transaction_type {
            TransactionType::Income => *income += transaction.amount.as_f64(),
            TransactionType::Expense => *expense += transaction.amount.as_f64(),
        }
    }

    months
        .into_iter()
        .map(|(month, (income, expense))| MonthlySummary {
            month,
            income,
            expense,
            net: income - expense,
        })
        .collect()
}

/// Total expenses per category.
///
/// # Returns
/// Only categories with at least one expense, in category order.
pub fn expenses_by_category(transactions: &[Transaction]) -> Vec<(Category, f64)> {
    let mut totals: BTreeMap<Category, f64> = BTreeMap::new();

    for transaction in transactions.iter().filter(|transaction| transaction.is_expense()) {
        *totals.entry(transaction.category).or_default() += transaction.amount.as_f64();
    }

    totals.into_iter().collect()
}

/// The budget for a category next to what was actually spent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BudgetComparison {
    pub category: Category,
    pub budget: f64,
    pub actual: f64,
    /// Budget minus actual. Negative when overspent.
    pub difference: f64,
}

impl BudgetComparison {
    pub fn is_overspending(&self) -> bool {
        self.actual > self.budget
    }
}

/// Compare the budget with actual expenses for every budget category.
///
/// Categories missing from `budget` count as a budget of zero.
///
/// # Returns
/// One entry per category in [Category::BUDGETED], in that order.
pub fn compare_budget(
    budget: &HashMap<Category, f64>,
    transactions: &[Transaction],
) -> Vec<BudgetComparison> {
    let actuals: HashMap<Category, f64> = expenses_by_category(transactions).into_iter().collect();

    Category::BUDGETED
        .iter()
        .map(|category| {
            let budget = budget.get(category).copied().unwrap_or(0.0);
            let actual = actuals.get(category).copied().unwrap_or(0.0);

            BudgetComparison {
                category: *category,
                budget,
                actual,
                difference: budget - actual,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use time::{Date, macros::date};

    use crate::{
        aggregation::{
            Totals, YearMonth, calculate_totals, compare_budget, expenses_by_category,
            summarize_by_month,
        },
        domain::{Amount, Category, TransactionType},
        transaction::Transaction,
    };

    fn transaction(
        date: Date,
        category: Category,
        amount: f64,
        transaction_type: TransactionType,
    ) -> Transaction {
        Transaction {
            date,
            category,
            amount: Amount::new(amount).unwrap(),
            description: String::new(),
            transaction_type,
            user: "default_user".to_owned(),
        }
    }

    fn expense(date: Date, category: Category, amount: f64) -> Transaction {
        transaction(date, category, amount, TransactionType::Expense)
    }

    fn income(date: Date, amount: f64) -> Transaction {
        transaction(date, Category::Salary, amount, TransactionType::Income)
    }

    fn sample_ledger() -> Vec<Transaction> {
        vec![
            income(date!(2025 - 01 - 31), 3000.0),
            expense(date!(2025 - 01 - 03), Category::FoodAndGroceries, 120.5),
            expense(date!(2025 - 01 - 15), Category::HousingRent, 1400.0),
            expense(date!(2025 - 02 - 02), Category::FoodAndGroceries, 80.0),
            expense(date!(2025 - 02 - 20), Category::Entertainment, 45.0),
            income(date!(2025 - 03 - 31), 3000.0),
        ]
    }

    #[test]
    fn empty_ledger_gives_zero_totals() {
        assert_eq!(calculate_totals(&[]), Totals::default());
        assert!(summarize_by_month(&[]).is_empty());
        assert!(expenses_by_category(&[]).is_empty());
    }

    #[test]
    fn net_is_income_minus_expenses() {
        let totals = calculate_totals(&sample_ledger());

        assert_eq!(totals.income, 6000.0);
        assert_eq!(totals.expenses, 1645.5);
        assert_eq!(totals.net, totals.income - totals.expenses);
    }

    #[test]
    fn months_appear_once_in_order() {
        let summaries = summarize_by_month(&sample_ledger());

        let months: Vec<_> = summaries.iter().map(|summary| summary.month.to_string()).collect();
        assert_eq!(months, ["2025-01", "2025-02", "2025-03"]);
    }

    #[test]
    fn monthly_net_is_income_minus_expense() {
        for summary in summarize_by_month(&sample_ledger()) {
            assert_eq!(summary.net, summary.income - summary.expense);
        }
    }

    #[test]
    fn month_without_a_type_defaults_to_zero() {
        let summaries = summarize_by_month(&sample_ledger());

        assert_eq!(summaries[1].income, 0.0);
        assert_eq!(summaries[1].expense, 125.0);
        assert_eq!(summaries[2].expense, 0.0);
        assert_eq!(summaries[2].net, 3000.0);
    }

    #[test]
    fn month_label_is_zero_padded() {
        assert_eq!(YearMonth::from(date!(2024 - 07 - 04)).to_string(), "2024-07");
    }

    #[test]
    fn category_breakdown_sums_to_total_expenses() {
        let ledger = sample_ledger();

        let breakdown = expenses_by_category(&ledger);
        let sum: f64 = breakdown.iter().map(|(_, amount)| amount).sum();

        assert_eq!(sum, calculate_totals(&ledger).expenses);
        assert_eq!(
            breakdown,
            vec![
                (Category::FoodAndGroceries, 200.5),
                (Category::HousingRent, 1400.0),
                (Category::Entertainment, 45.0),
            ]
        );
    }

    #[test]
    fn income_is_not_an_expense_category() {
        let breakdown = expenses_by_category(&[income(date!(2025 - 01 - 01), 10.0)]);

        assert!(breakdown.is_empty());
    }

    #[test]
    fn budget_difference_for_every_category() {
        let budget = HashMap::from([
            (Category::FoodAndGroceries, 150.0),
            (Category::Entertainment, 100.0),
        ]);

        let comparisons = compare_budget(&budget, &sample_ledger());

        assert_eq!(comparisons.len(), Category::BUDGETED.len());
        for comparison in &comparisons {
            assert_eq!(comparison.difference, comparison.budget - comparison.actual);
        }

        let utilities = comparisons
            .iter()
            .find(|comparison| comparison.category == Category::Utilities)
            .unwrap();
        assert_eq!((utilities.budget, utilities.actual), (0.0, 0.0));
    }

    #[test]
    fn overspending_when_actual_exceeds_budget() {
        let budget = HashMap::from([
            (Category::FoodAndGroceries, 150.0),
            (Category::Entertainment, 45.0),
        ]);

        let overspent: Vec<_> = compare_budget(&budget, &sample_ledger())
            .into_iter()
            .filter(|comparison| comparison.is_overspending())
            .map(|comparison| comparison.category)
            .collect();

        assert_eq!(
            overspent,
            vec![Category::FoodAndGroceries, Category::HousingRent]
        );
    }
}
