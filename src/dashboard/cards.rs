//! The headline figures at the top of the dashboard.

use maud::{Markup, html};

use crate::{aggregation::Totals, dashboard::tables::amount_color_class, html::format_currency};

/// Renders the Total Income, Total Expenses and Net Savings cards.
pub(super) fn metric_cards(totals: &Totals) -> Markup {
    html! {
        section id="metrics" class="w-full grid grid-cols-1 md:grid-cols-3 gap-4 mb-8" {
            (metric_card("Total Income", totals.income, "text-green-600 dark:text-green-400"))
            (metric_card("Total Expenses", totals.expenses, "text-red-600 dark:text-red-400"))
            (metric_card("Net Savings", totals.net, amount_color_class(totals.net)))
        }
    }
}

fn metric_card(label: &str, amount: f64, amount_style: &str) -> Markup {
    html! {
        div
            class="bg-white dark:bg-gray-800 border border-gray-200
                   dark:border-gray-700 rounded-lg p-4 shadow-md"
        {
            h4 class="text-sm font-medium text-gray-600 dark:text-gray-400 mb-1" {
                (label)
            }
            div class={"text-3xl font-bold " (amount_style)} data-metric=(label) {
                (format_currency(amount))
            }
        }
    }
}
