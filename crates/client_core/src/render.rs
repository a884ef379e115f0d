//! Pure mapping from raw stats payloads to display fields.
//!
//! The exercise kind of the *session* decides the shape here; the payload is
//! never inspected to guess what it is.

use shared::{domain::ExerciseKind, protocol::StatsSnapshot};

use crate::types::{FeedbackItem, StatSlot, StatsFields};

/// Placeholder for stat cards the running exercise kind does not fill.
pub const STAT_PLACEHOLDER: &str = "—";

/// Stage label shown for hold-based sessions, which have no rep stages.
pub const HOLD_STAGE_LABEL: &str = "Holding";

/// Caption for the repurposed secondary card in hold-based sessions.
pub const GOOD_FORM_LABEL: &str = "Good Form";

/// Affirmation shown when the service reports no form complaints.
pub const GOOD_FORM_FEEDBACK: &str = "GOOD FORM";

pub fn stats_fields(kind: ExerciseKind, snapshot: &StatsSnapshot) -> StatsFields {
    match kind {
        ExerciseKind::HoldBased => StatsFields {
            reps: STAT_PLACEHOLDER.to_string(),
            good_reps: STAT_PLACEHOLDER.to_string(),
            stage: HOLD_STAGE_LABEL.to_string(),
            elapsed: format_seconds(snapshot.elapsed_time),
            extra: Some(StatSlot {
                label: GOOD_FORM_LABEL,
                value: format_seconds(snapshot.good_form_time.unwrap_or(0.0)),
            }),
        },
        ExerciseKind::RepBased => StatsFields {
            reps: snapshot.reps.unwrap_or(0).to_string(),
            good_reps: snapshot.good_reps.unwrap_or(0).to_string(),
            stage: snapshot
                .stage
                .clone()
                .unwrap_or_else(|| STAT_PLACEHOLDER.to_string()),
            elapsed: format_seconds(snapshot.elapsed_time),
            extra: None,
        },
    }
}

/// Empty feedback becomes a single affirmation; otherwise one warning per
/// entry, order preserved, no deduplication.
pub fn feedback_items(feedback: &[String]) -> Vec<FeedbackItem> {
    if feedback.is_empty() {
        vec![FeedbackItem::Good(GOOD_FORM_FEEDBACK.to_string())]
    } else {
        feedback
            .iter()
            .map(|entry| FeedbackItem::Warning(entry.clone()))
            .collect()
    }
}

pub(crate) fn format_seconds(seconds: f64) -> String {
    if seconds.fract() == 0.0 {
        format!("{seconds:.0}s")
    } else {
        format!("{seconds:.1}s")
    }
}
