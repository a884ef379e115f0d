use serde::{Deserialize, Serialize};

use crate::domain::{ExerciseId, ExerciseKind};

/// Body of `POST /start_exercise`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartExerciseRequest {
    pub exercise: ExerciseId,
}

/// Raw stats payload as the service sends it. Which stat fields are present
/// depends on the exercise the session is running, so everything kind-specific
/// is optional on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatsSnapshot {
    /// Echo of the running exercise id. Carried for logging only; the client
    /// decides stat semantics from its own selected exercise.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exercise: Option<ExerciseId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_reps: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stage: Option<String>,
    #[serde(default)]
    pub elapsed_time: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub good_form_time: Option<f64>,
    #[serde(default)]
    pub feedback: Vec<String>,
}

/// Body of the `POST /stop_exercise` response.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StopExerciseResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub final_stats: Option<StatsSnapshot>,
}

/// Body of the `GET /health` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_exercise: Option<ExerciseId>,
}

/// Final per-session statistics, shaped by the exercise kind the session ran.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FinalStats {
    RepBased {
        reps: u32,
        good_reps: u32,
        elapsed_time: f64,
    },
    HoldBased {
        good_form_time: f64,
        elapsed_time: f64,
    },
}

impl FinalStats {
    /// Interpret a raw payload using the session's exercise kind as the
    /// discriminant. Absent fields default to zero.
    pub fn from_snapshot(kind: ExerciseKind, raw: &StatsSnapshot) -> Self {
        match kind {
            ExerciseKind::HoldBased => Self::HoldBased {
                good_form_time: raw.good_form_time.unwrap_or(0.0),
                elapsed_time: raw.elapsed_time,
            },
            ExerciseKind::RepBased => Self::RepBased {
                reps: raw.reps.unwrap_or(0),
                good_reps: raw.good_reps.unwrap_or(0),
                elapsed_time: raw.elapsed_time,
            },
        }
    }

    pub fn elapsed_time(&self) -> f64 {
        match *self {
            Self::RepBased { elapsed_time, .. } | Self::HoldBased { elapsed_time, .. } => {
                elapsed_time
            }
        }
    }
}
