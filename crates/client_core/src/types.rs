//! View-model types handed to the display surface.

/// Screens the display surface can show. Only one is visible at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Selection,
    Loading,
    Workout,
    Summary,
}

/// One step of the pre-session countdown overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    Tick(u32),
    Go,
    Clear,
}

/// Display-ready stat card values for the live workout screen. All fields are
/// already formatted; placeholders stand in for stats the running exercise
/// kind does not produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatsFields {
    pub reps: String,
    pub good_reps: String,
    pub stage: String,
    pub elapsed: String,
    /// Repurposed secondary card (hold-based sessions show accumulated
    /// good-form time here).
    pub extra: Option<StatSlot>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatSlot {
    pub label: &'static str,
    pub value: String,
}

/// A single feedback line under the live stats.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedbackItem {
    Good(String),
    Warning(String),
}

impl FeedbackItem {
    pub fn text(&self) -> &str {
        match self {
            Self::Good(text) | Self::Warning(text) => text,
        }
    }
}

/// Post-session summary, already reduced to labeled display rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummaryView {
    /// The service reported no final statistics for the session.
    NoData,
    Stats(Vec<SummaryRow>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub label: &'static str,
    pub value: String,
}

impl SummaryRow {
    pub fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}
