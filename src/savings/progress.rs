//! Progress towards the savings goal.

/// How much has been saved once automated payments are set aside, and how
/// far that is towards the goal.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SavingsProgress {
    /// Income minus expenses minus the automated payments. May be negative.
    pub adjusted_savings: f64,
    /// The fraction of the goal reached, between 0 and 1.
    pub progress: f64,
}

impl SavingsProgress {
    /// The progress as a percentage with one decimal place, e.g. "42.5%".
    pub fn percent(&self) -> String {
        format!("{:.1}%", self.progress * 100.0)
    }
}

/// Calculate the savings progress.
///
/// Every automated payment is counted once, whatever its frequency. A goal of
/// zero or less means there is nothing to make progress towards, so the
/// progress is zero.
pub fn calculate_savings_progress(
    income: f64,
    expenses: f64,
    automated_payments: f64,
    goal: f64,
) -> SavingsProgress {
    let adjusted_savings = income - expenses - automated_payments;

    let progress = if goal > 0.0 {
        (adjusted_savings / goal).clamp(0.0, 1.0)
    } else {
        0.0
    };

    SavingsProgress {
        adjusted_savings,
        progress,
    }
}
