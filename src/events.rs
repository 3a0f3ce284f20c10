//! Observability interface for the evaluation pipeline.
//!
//! The pure transforms (translation, spawn location, trace parsing) emit
//! nothing; the evaluator and batch analyzer report progress through an
//! injected [`EvalObserver`]. [`LogObserver`] forwards events to the `log`
//! facade; [`NullObserver`] discards them, which keeps tests quiet.

use std::path::PathBuf;

use crate::trace::Outcome;

/// Events emitted while evaluating levels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalEvent {
    /// Spawn marker written at (row, col)
    SpawnPlaced { row: usize, col: usize },

    /// No open cell found; map serialized without a marker
    SpawnMissing,

    /// Serialized map written to disk
    MapWritten { path: PathBuf },

    /// One attempt is starting (1-based)
    AttemptStarted { attempt: u32, max_attempts: u32 },

    /// The gateway could not run this attempt
    AttemptNotRun { attempt: u32, reason: String },

    /// An attempt ran and parsed to a non-completed outcome
    AttemptFailed { attempt: u32, outcome: Outcome },

    /// A level finished (1-based index within the batch)
    LevelFinished {
        index: usize,
        total: usize,
        completed: bool,
    },

    /// A level could not be evaluated at all (bad grid, write failure)
    LevelSkipped { index: usize, reason: String },
}

/// Sink for evaluation events
pub trait EvalObserver {
    /// Observe one event
    fn on_event(&self, event: &EvalEvent);
}

/// Observer that forwards events to the `log` facade
#[derive(Debug, Default)]
pub struct LogObserver;

impl EvalObserver for LogObserver {
    fn on_event(&self, event: &EvalEvent) {
        match event {
            EvalEvent::SpawnPlaced { row, col } => {
                log::info!("Spawn marker placed at ({}, {})", row, col);
            }
            EvalEvent::SpawnMissing => {
                log::warn!("No valid spawn position found; proceeding without marker");
            }
            EvalEvent::MapWritten { path } => {
                log::info!("Map written to {}", path.display());
            }
            EvalEvent::AttemptStarted {
                attempt,
                max_attempts,
            } => {
                log::info!("Attempt {}/{}", attempt, max_attempts);
            }
            EvalEvent::AttemptNotRun { attempt, reason } => {
                log::warn!("Attempt {} could not run: {}", attempt, reason);
            }
            EvalEvent::AttemptFailed { attempt, outcome } => {
                log::info!("Attempt {} finished without completion ({:?})", attempt, outcome);
            }
            EvalEvent::LevelFinished {
                index,
                total,
                completed,
            } => {
                if *completed {
                    log::info!("Level {}/{} completed", index, total);
                } else {
                    log::info!("Level {}/{} not completed", index, total);
                }
            }
            EvalEvent::LevelSkipped { index, reason } => {
                log::error!("Level {} skipped: {}", index, reason);
            }
        }
    }
}

/// Observer that discards all events
#[derive(Debug, Default)]
pub struct NullObserver;

impl EvalObserver for NullObserver {
    fn on_event(&self, _event: &EvalEvent) {}
}
