//! Chart generation and rendering.
//!
//! Charts are built with charming, serialized to ECharts options and
//! initialised by an inline script once the page has loaded:
//! - **Monthly Summary**: income, expense and net per month as grouped bars
//! - **Expense Breakdown**: share of expenses per category as a pie
//! - **Budget vs Actual**: budget and actual spending per category as grouped bars

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, Emphasis, EmphasisFocus, JsFunction,
        Tooltip, Trigger,
    },
    series::{Pie, bar::Bar},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    aggregation::{BudgetComparison, MonthlySummary},
    domain::Category,
    html::HeadElement,
};

/// The script tag that loads ECharts. Must come before [charts_script].
pub const ECHARTS_SCRIPT: &str = "/static/echarts.6.0.0.min.js";

/// A chart with its HTML container ID and ECharts configuration.
pub struct PageChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for charts.
///
/// # Returns
/// Maud markup containing a grid of chart container divs.
pub fn charts_view(charts: &[PageChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
///
/// # Returns
/// HeadElement containing the initialization JavaScript.
pub fn charts_script(charts: &[PageChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

/// The x-axis labels and the income, expense and net series for the monthly summary.
fn monthly_series(summaries: &[MonthlySummary]) -> (Vec<String>, [Vec<f64>; 3]) {
    let labels = summaries
        .iter()
        .map(|summary| summary.month.to_string())
        .collect();
    let income = summaries.iter().map(|summary| summary.income).collect();
    let expense = summaries.iter().map(|summary| summary.expense).collect();
    let net = summaries.iter().map(|summary| summary.net).collect();

    (labels, [income, expense, net])
}

pub fn monthly_summary_chart(summaries: &[MonthlySummary]) -> Chart {
    let (labels, [income, expense, net]) = monthly_series(summaries);

    Chart::new()
        .title(Title::new().text("Monthly Summary"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%"))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(currency_axis())
        .series(grouped_bar("Income", income))
        .series(grouped_bar("Expense", expense))
        .series(grouped_bar("Net", net))
}

/// The (amount, category) pairs for the expense pie.
fn pie_slices(expenses: &[(Category, f64)]) -> Vec<(f64, &'static str)> {
    expenses
        .iter()
        .map(|(category, amount)| (*amount, category.label()))
        .collect()
}

pub fn expense_breakdown_chart(expenses: &[(Category, f64)]) -> Chart {
    Chart::new()
        .title(Title::new().text("Expense Breakdown"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["35%", "65%"])
                .data(pie_slices(expenses)),
        )
}

/// The category labels and the budget and actual series for the budget chart.
fn budget_series(comparisons: &[BudgetComparison]) -> (Vec<String>, [Vec<f64>; 2]) {
    let labels = comparisons
        .iter()
        .map(|comparison| comparison.category.to_string())
        .collect();
    let budget = comparisons.iter().map(|comparison| comparison.budget).collect();
    let actual = comparisons.iter().map(|comparison| comparison.actual).collect();

    (labels, [budget, actual])
}

pub fn budget_comparison_chart(comparisons: &[BudgetComparison]) -> Chart {
    let (labels, [budget, actual]) = budget_series(comparisons);

    Chart::new()
        .title(Title::new().text("Budget vs Actual Spending"))
        .tooltip(currency_tooltip())
        .legend(Legend::new().top("1%"))
        .grid(default_grid())
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(currency_axis())
        .series(grouped_bar("Budget", budget))
        .series(grouped_bar("Actual", actual))
}

fn grouped_bar(name: &str, data: Vec<f64>) -> Bar {
    Bar::new()
        .name(name)
        .emphasis(Emphasis::new().focus(EmphasisFocus::Series))
        .data(data)
}

fn default_grid() -> Grid {
    Grid::new()
        .left("3%")
        .right("4%")
        .bottom("3%")
        .top(70)
        .contain_label(true)
}

fn currency_axis() -> Axis {
    Axis::new()
        .type_(AxisType::Value)
        .axis_label(AxisLabel::new().formatter(currency_formatter()))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}
