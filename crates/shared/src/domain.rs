use std::fmt;

use serde::{Deserialize, Serialize};

/// Identity of a catalog exercise. The analysis service keys every session
/// operation on this string id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExerciseId(pub String);

/// Id of the single hold-based exercise the analysis service offers.
pub const HOLD_BASED_EXERCISE_ID: &str = "plank";

impl ExerciseId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Stat semantics are keyed off the selected exercise identity, never off
    /// which fields the service happened to include in a payload.
    pub fn kind(&self) -> ExerciseKind {
        if self.0 == HOLD_BASED_EXERCISE_ID {
            ExerciseKind::HoldBased
        } else {
            ExerciseKind::RepBased
        }
    }
}

impl fmt::Display for ExerciseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExerciseId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExerciseKind {
    RepBased,
    HoldBased,
}

/// Immutable catalog entry, fetched once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub icon: String,
}

/// Where the session lifecycle currently stands. Idle is both the initial
/// state and the target of every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Counting,
    Active,
    Summary,
}
