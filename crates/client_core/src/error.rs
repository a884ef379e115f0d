use shared::domain::ExerciseId;
use thiserror::Error;

/// Controller-facing failure taxonomy. Every variant leaves the session in a
/// well-defined phase by the time the caller sees it.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("exercise catalog unavailable: {0}")]
    Catalog(String),

    #[error("unknown exercise: {0}")]
    UnknownExercise(ExerciseId),

    #[error("session start rejected: {0}")]
    StartRejected(String),

    #[error("session stop failed: {0}")]
    StopFailed(String),
}
