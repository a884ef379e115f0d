//! Derived summary metrics with explicit zero-guards.

use shared::protocol::FinalStats;

use crate::render::format_seconds;
use crate::types::{SummaryRow, SummaryView};

/// Round to one decimal place. Display-only; stored stats stay untouched.
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Share of reps with good form. Zero reps counts as perfect form: an empty
/// session is not penalized.
pub fn form_accuracy_pct(reps: u32, good_reps: u32) -> f64 {
    if reps > 0 {
        round1(f64::from(good_reps) / f64::from(reps) * 100.0)
    } else {
        100.0
    }
}

pub fn pace_reps_per_min(reps: u32, elapsed_time: f64) -> f64 {
    if elapsed_time > 0.0 {
        round1(f64::from(reps) / (elapsed_time / 60.0))
    } else {
        0.0
    }
}

/// Share of the hold spent in good form. `elapsed_time >= good_form_time`
/// always holds, so a positive numerator implies a positive denominator.
pub fn form_consistency_pct(good_form_time: f64, elapsed_time: f64) -> f64 {
    if good_form_time > 0.0 {
        round1(good_form_time / elapsed_time * 100.0)
    } else {
        0.0
    }
}

pub fn summarize(stats: &FinalStats) -> SummaryView {
    match *stats {
        FinalStats::RepBased {
            reps,
            good_reps,
            elapsed_time,
        } => SummaryView::Stats(vec![
            SummaryRow::new("Total Reps", reps.to_string()),
            SummaryRow::new("Good Reps", good_reps.to_string()),
            SummaryRow::new("Workout Duration", format_seconds(elapsed_time)),
            SummaryRow::new(
                "Form Accuracy",
                format!("{:.1}%", form_accuracy_pct(reps, good_reps)),
            ),
            SummaryRow::new(
                "Pace (Reps/Min)",
                format!("{:.1}", pace_reps_per_min(reps, elapsed_time)),
            ),
        ]),
        FinalStats::HoldBased {
            good_form_time,
            elapsed_time,
        } => SummaryView::Stats(vec![
            SummaryRow::new("Total Hold Time", format_seconds(elapsed_time)),
            SummaryRow::new("Good Form Time", format_seconds(good_form_time)),
            SummaryRow::new(
                "Form Consistency",
                format!("{:.1}%", form_consistency_pct(good_form_time, elapsed_time)),
            ),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accuracy_treats_an_empty_session_as_perfect() {
        assert_eq!(form_accuracy_pct(0, 0), 100.0);
    }

    #[test]
    fn accuracy_rounds_to_one_decimal() {
        assert_eq!(form_accuracy_pct(10, 7), 70.0);
        assert_eq!(form_accuracy_pct(3, 1), 33.3);
    }

    #[test]
    fn pace_guards_zero_elapsed_time() {
        assert_eq!(pace_reps_per_min(12, 0.0), 0.0);
        assert_eq!(pace_reps_per_min(12, 120.0), 6.0);
    }

    #[test]
    fn consistency_guards_zero_good_form_time() {
        assert_eq!(form_consistency_pct(0.0, 60.0), 0.0);
        assert_eq!(form_consistency_pct(30.0, 60.0), 50.0);
    }

    #[test]
    fn rep_based_summary_rows() {
        let view = summarize(&FinalStats::RepBased {
            reps: 5,
            good_reps: 4,
            elapsed_time: 45.0,
        });

        assert_eq!(
            view,
            SummaryView::Stats(vec![
                SummaryRow::new("Total Reps", "5"),
                SummaryRow::new("Good Reps", "4"),
                SummaryRow::new("Workout Duration", "45s"),
                SummaryRow::new("Form Accuracy", "80.0%"),
                SummaryRow::new("Pace (Reps/Min)", "6.7"),
            ])
        );
    }

    #[test]
    fn hold_based_summary_rows() {
        let view = summarize(&FinalStats::HoldBased {
            good_form_time: 30.0,
            elapsed_time: 60.0,
        });

        assert_eq!(
            view,
            SummaryView::Stats(vec![
                SummaryRow::new("Total Hold Time", "60s"),
                SummaryRow::new("Good Form Time", "30s"),
                SummaryRow::new("Form Consistency", "50.0%"),
            ])
        );
    }
}
