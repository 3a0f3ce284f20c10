//! Per-level evaluation: the translate → spawn → serialize → invoke → parse loop.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::events::{EvalEvent, EvalObserver};
use crate::gateway::SimulatorGateway;
use crate::level::{find_spawn, translate, write_map_file, Grid, GridError, WriteError};
use crate::trace::{parse_trace, Outcome};

/// Result of one attempt against the simulator.
///
/// An attempt either ran (and parsed to an [`Outcome`], completed or not) or
/// could not be executed at all. The two are kept distinct: a gateway failure
/// says nothing about the level itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AttemptResult {
    /// The simulator ran to exit code zero and its output was parsed
    Ran {
        /// Parsed terminal classification
        outcome: Outcome,
        /// Complete captured stdout that produced it
        raw_output: String,
    },

    /// The gateway could not run this attempt
    ExecutionFailed {
        /// Gateway error description
        reason: String,
    },
}

/// Verdict for one level after all attempts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LevelVerdict {
    /// Whether any attempt parsed to a completed outcome
    pub completed: bool,

    /// Every attempt made, in order (completion short-circuits, so this may
    /// be shorter than the configured maximum)
    pub attempts: Vec<AttemptResult>,
}

impl LevelVerdict {
    /// Outcome of the final attempt that actually ran, if any
    pub fn final_outcome(&self) -> Option<Outcome> {
        match self.attempts.last() {
            Some(AttemptResult::Ran { outcome, .. }) => Some(*outcome),
            _ => None,
        }
    }
}

/// Result type for level evaluation
pub type LevelResult<T> = Result<T, LevelError>;

/// Errors that abort one level's evaluation (never the whole batch)
#[derive(Debug)]
pub enum LevelError {
    /// Level cell did not parse into a rectangular grid
    Grid(GridError),

    /// Serialized map could not be written
    Write(WriteError),
}

impl std::fmt::Display for LevelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LevelError::Grid(err) => write!(f, "Level grid error: {}", err),
            LevelError::Write(err) => write!(f, "Level write error: {}", err),
        }
    }
}

impl std::error::Error for LevelError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LevelError::Grid(err) => Some(err),
            LevelError::Write(err) => Some(err),
        }
    }
}

impl From<GridError> for LevelError {
    fn from(err: GridError) -> Self {
        LevelError::Grid(err)
    }
}

impl From<WriteError> for LevelError {
    fn from(err: WriteError) -> Self {
        LevelError::Write(err)
    }
}

/// Orchestrates one level's attempts against an injected gateway.
pub struct CompletionEvaluator<'a> {
    map_path: PathBuf,
    max_attempts: u32,
    gateway: &'a dyn SimulatorGateway,
    observer: &'a dyn EvalObserver,
}

impl<'a> CompletionEvaluator<'a> {
    /// Create an evaluator from injected configuration, gateway and observer
    pub fn new(
        config: &Config,
        gateway: &'a dyn SimulatorGateway,
        observer: &'a dyn EvalObserver,
    ) -> Self {
        Self {
            map_path: config.simulator.map_path(),
            max_attempts: config.eval.max_attempts.max(1),
            gateway,
            observer,
        }
    }

    /// Evaluate one level from its raw dataset cell.
    ///
    /// Pipeline: strict parse → vocabulary translation → spawn placement →
    /// map serialization → attempt loop. A missing spawn cell is a warning
    /// (the map is written without a marker); a parse or write failure aborts
    /// this level only.
    pub fn evaluate(&self, cell: &str) -> LevelResult<LevelVerdict> {
        let grid = Grid::parse(cell)?;
        let grid = translate(&grid);

        let grid = match find_spawn(&grid) {
            Some(spawn) => {
                self.observer.on_event(&EvalEvent::SpawnPlaced {
                    row: spawn.row,
                    col: spawn.col,
                });
                grid.with_spawn_marker(spawn)
            }
            None => {
                self.observer.on_event(&EvalEvent::SpawnMissing);
                grid
            }
        };

        let map_path = write_map_file(&grid, &self.map_path)?;
        self.observer.on_event(&EvalEvent::MapWritten {
            path: map_path.clone(),
        });

        let mut attempts = Vec::new();
        for attempt in 1..=self.max_attempts {
            self.observer.on_event(&EvalEvent::AttemptStarted {
                attempt,
                max_attempts: self.max_attempts,
            });

            match self.gateway.invoke(&map_path) {
                Err(err) => {
                    let reason = err.to_string();
                    self.observer.on_event(&EvalEvent::AttemptNotRun {
                        attempt,
                        reason: reason.clone(),
                    });
                    attempts.push(AttemptResult::ExecutionFailed { reason });
                }
                Ok(raw_output) => {
                    let trace = parse_trace(&raw_output);
                    attempts.push(AttemptResult::Ran {
                        outcome: trace.outcome,
                        raw_output,
                    });

                    if trace.outcome == Outcome::Completed {
                        return Ok(LevelVerdict {
                            completed: true,
                            attempts,
                        });
                    }
                    self.observer.on_event(&EvalEvent::AttemptFailed {
                        attempt,
                        outcome: trace.outcome,
                    });
                }
            }
        }

        Ok(LevelVerdict {
            completed: false,
            attempts,
        })
    }
}
