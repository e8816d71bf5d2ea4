//! Table views for dashboard data display.

use maud::{Markup, html};

use crate::{
    aggregation::MonthlySummary,
    html::{TABLE_CELL_STYLE, TABLE_ROW_STYLE, format_currency},
};

// Table cell styles for monthly summary
const TABLE_HEADER_CELL_STYLE: &str = "px-3 py-3 text-center min-w-[100px]";
const TABLE_HEADER_FIRST_CELL_STYLE: &str =
    "px-3 py-3 sticky left-0 bg-gray-100 dark:bg-gray-700 z-10 font-semibold";
const TABLE_STICKY_CELL_STYLE: &str = "px-3 py-4 font-medium text-gray-900 dark:text-white sticky left-0 bg-white dark:bg-gray-800 z-10";
const TABLE_DATA_CELL_STYLE: &str = "text-center whitespace-nowrap";
const TABLE_CELL_GREEN_STYLE: &str = "text-green-600 dark:text-green-400";
const TABLE_CELL_RED_STYLE: &str = "text-red-600 dark:text-red-400";

/// Gets the CSS class for coloring amounts (green for positive, red for negative).
pub(super) fn amount_color_class(amount: f64) -> &'static str {
    if amount >= 0.0 {
        TABLE_CELL_GREEN_STYLE
    } else {
        TABLE_CELL_RED_STYLE
    }
}

/// Renders a table showing income, expenses and net for each month.
///
/// Months are columns, oldest on the left. The table is scrolled to the most
/// recent month by default.
pub(super) fn monthly_summary_table(summaries: &[MonthlySummary]) -> Markup {
    if summaries.is_empty() {
        return html! {};
    }

    html! {
        div class="w-full mb-4" {
            h3 class="text-xl font-semibold mb-4" { "Monthly Summary" }

            div
                id="monthly-summary-table"
                class="overflow-x-auto rounded-lg shadow"
                dir="rtl"
            {
                table class="w-full text-sm text-left text-gray-500 dark:text-gray-400" dir="ltr" {
                    thead class="text-xs text-gray-900 uppercase bg-gray-100 dark:bg-gray-700 dark:text-gray-400" {
                        tr {
                            th scope="col" class=(TABLE_HEADER_FIRST_CELL_STYLE) {
                                "Month"
                            }
                            @for summary in summaries {
                                th scope="col" class={(TABLE_HEADER_CELL_STYLE) " font-semibold"} {
                                    (summary.month)
                                }
                            }
                        }
                    }
                    tbody {
                        tr class=(TABLE_ROW_STYLE) {
                            th scope="row" class=(TABLE_STICKY_CELL_STYLE) {
                                "Income"
                            }
                            @for summary in summaries {
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_GREEN_STYLE)} {
                                    (format_currency(summary.income))
                                }
                            }
                        }

                        tr class=(TABLE_ROW_STYLE) {
                            th scope="row" class=(TABLE_STICKY_CELL_STYLE) {
                                "Expense"
                            }
                            @for summary in summaries {
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " " (TABLE_CELL_RED_STYLE)} {
                                    (format_currency(summary.expense))
                                }
                            }
                        }

                        tr class=(TABLE_ROW_STYLE) {
                            th scope="row" class=(TABLE_STICKY_CELL_STYLE) {
                                "Net"
                            }
                            @for summary in summaries {
                                td class={(TABLE_CELL_STYLE) " " (TABLE_DATA_CELL_STYLE) " font-semibold " (amount_color_class(summary.net))} {
                                    (format_currency(summary.net))
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
