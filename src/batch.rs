//! Batch analysis over a CSV dataset of generated levels.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::events::{EvalEvent, EvalObserver};
use crate::evaluator::CompletionEvaluator;
use crate::gateway::SimulatorGateway;
use crate::trace::Outcome;

/// Aggregated result of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Number of levels evaluated
    pub total: usize,

    /// Number of levels completed
    pub completed: usize,

    /// Levels whose final attempt parsed to neither marker. Counted as not
    /// completed for the percentage, but reported separately so ambiguous
    /// traces are never conflated with definite failures.
    pub unknown: usize,

    /// Per-level completion verdicts, in dataset order
    pub verdicts: Vec<bool>,

    /// When the batch finished
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
}

impl BatchReport {
    /// Completion percentage in 0-100, 0.0 for an empty batch
    pub fn completion_percentage(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.completed as f64 / self.total as f64 * 100.0
    }
}

/// Result type for batch analysis
pub type BatchResult<T> = Result<T, BatchError>;

/// Errors that abort the batch before any evaluation
#[derive(Debug)]
pub enum BatchError {
    /// Required level column absent from the dataset header
    MissingColumn(String),

    /// Dataset could not be opened or its header read
    Csv(csv::Error),
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::MissingColumn(column) => {
                write!(f, "Dataset is missing required column '{}'", column)
            }
            BatchError::Csv(err) => write!(f, "Dataset error: {}", err),
        }
    }
}

impl std::error::Error for BatchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BatchError::MissingColumn(_) => None,
            BatchError::Csv(err) => Some(err),
        }
    }
}

impl From<csv::Error> for BatchError {
    fn from(err: csv::Error) -> Self {
        BatchError::Csv(err)
    }
}

/// Runs the evaluator over every row of the dataset, strictly sequentially.
pub struct BatchAnalyzer<'a> {
    config: &'a Config,
    gateway: &'a dyn SimulatorGateway,
    observer: &'a dyn EvalObserver,
}

impl<'a> BatchAnalyzer<'a> {
    /// Create an analyzer from injected configuration, gateway and observer
    pub fn new(
        config: &'a Config,
        gateway: &'a dyn SimulatorGateway,
        observer: &'a dyn EvalObserver,
    ) -> Self {
        Self {
            config,
            gateway,
            observer,
        }
    }

    /// Analyze the configured CSV dataset.
    ///
    /// A missing level column is a configuration error reported before any
    /// evaluation begins. After that, per-level failures (bad cells, write
    /// errors, unreadable records) count as not completed and never abort the
    /// batch. Each level runs to its final attempt before the next begins; all
    /// levels share one map file destination, so evaluation must stay
    /// sequential.
    pub fn analyze(&self) -> BatchResult<BatchReport> {
        let mut reader = csv::Reader::from_path(&self.config.dataset.path)?;

        let column = &self.config.dataset.level_column;
        let col_index = reader
            .headers()?
            .iter()
            .position(|h| h == column.as_str())
            .ok_or_else(|| BatchError::MissingColumn(column.clone()))?;

        let cells: Vec<Option<String>> = reader
            .records()
            .map(|record| {
                record
                    .ok()
                    .and_then(|r| r.get(col_index).map(str::to_string))
            })
            .collect();

        Ok(self.evaluate_cells(&cells))
    }

    fn evaluate_cells(&self, cells: &[Option<String>]) -> BatchReport {
        let evaluator = CompletionEvaluator::new(self.config, self.gateway, self.observer);
        let total = cells.len();

        let mut verdicts = Vec::with_capacity(total);
        let mut completed = 0;
        let mut unknown = 0;

        for (index, cell) in cells.iter().enumerate() {
            let index = index + 1;

            let verdict = match cell {
                None => {
                    self.observer.on_event(&EvalEvent::LevelSkipped {
                        index,
                        reason: "unreadable dataset record".to_string(),
                    });
                    false
                }
                Some(cell) => match evaluator.evaluate(cell) {
                    Ok(verdict) => {
                        if !verdict.completed && verdict.final_outcome() == Some(Outcome::Unknown)
                        {
                            unknown += 1;
                        }
                        verdict.completed
                    }
                    Err(err) => {
                        self.observer.on_event(&EvalEvent::LevelSkipped {
                            index,
                            reason: err.to_string(),
                        });
                        false
                    }
                },
            };

            if verdict {
                completed += 1;
            }
            self.observer.on_event(&EvalEvent::LevelFinished {
                index,
                total,
                completed: verdict,
            });
            verdicts.push(verdict);
        }

        BatchReport {
            total,
            completed,
            unknown,
            verdicts,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::io::Write;
    use std::path::Path;

    use pretty_assertions::assert_eq;

    use crate::events::NullObserver;
    use crate::gateway::{GatewayError, GatewayResult};

    struct ScriptedGateway {
        responses: RefCell<VecDeque<Result<String, String>>>,
    }

    impl ScriptedGateway {
        fn new(responses: Vec<Result<&str, &str>>) -> Self {
            Self {
                responses: RefCell::new(
                    responses
                        .into_iter()
                        .map(|r| r.map(String::from).map_err(String::from))
                        .collect(),
                ),
            }
        }
    }

    impl SimulatorGateway for ScriptedGateway {
        fn invoke(&self, _map_path: &Path) -> GatewayResult<String> {
            match self.responses.borrow_mut().pop_front() {
                Some(Ok(output)) => Ok(output),
                Some(Err(reason)) => Err(GatewayError::Run(reason)),
                None => panic!("gateway invoked more times than scripted"),
            }
        }
    }

    fn write_dataset(dir: &Path, header: &str, cells: &[&str]) -> std::path::PathBuf {
        let path = dir.join("levels.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "id,{}", header).unwrap();
        for (i, cell) in cells.iter().enumerate() {
            writeln!(file, "{},\"{}\"", i, cell.replace('"', "\"\"")).unwrap();
        }
        path
    }

    fn test_config(dir: &Path, dataset: std::path::PathBuf) -> Config {
        let mut config = Config::defaults();
        config.simulator.map_dir = dir.to_path_buf();
        config.dataset.path = dataset;
        config
    }

    #[test]
    fn test_percentage_three_of_four() {
        let report = BatchReport {
            total: 4,
            completed: 3,
            unknown: 0,
            verdicts: vec![true, false, true, true],
            timestamp: Utc::now(),
        };
        assert_eq!(report.completion_percentage(), 75.0);
    }

    #[test]
    fn test_percentage_empty_batch() {
        let report = BatchReport {
            total: 0,
            completed: 0,
            unknown: 0,
            verdicts: vec![],
            timestamp: Utc::now(),
        };
        assert_eq!(report.completion_percentage(), 0.0);
    }

    #[test]
    fn test_missing_column_aborts_before_evaluation() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(dir.path(), "layout", &[r#"["--", "XX"]"#]);
        let config = test_config(dir.path(), dataset);
        let gateway = ScriptedGateway::new(vec![]);
        let analyzer = BatchAnalyzer::new(&config, &gateway, &NullObserver);

        let err = analyzer.analyze().unwrap_err();
        assert!(matches!(err, BatchError::MissingColumn(_)));
    }

    #[test]
    fn test_batch_counts_and_unknowns() {
        let dir = tempfile::tempdir().unwrap();
        let cell = r#"["--", "XX"]"#;
        let dataset = write_dataset(dir.path(), "level", &[cell, cell, cell]);
        let config = test_config(dir.path(), dataset);

        let gateway = ScriptedGateway::new(vec![Ok("WIN"), Ok("LOSE"), Ok("silence")]);
        let analyzer = BatchAnalyzer::new(&config, &gateway, &NullObserver);

        let report = analyzer.analyze().unwrap();
        assert_eq!(report.total, 3);
        assert_eq!(report.completed, 1);
        assert_eq!(report.unknown, 1);
        assert_eq!(report.verdicts, vec![true, false, false]);
    }

    #[test]
    fn test_bad_cell_never_aborts_batch() {
        let dir = tempfile::tempdir().unwrap();
        let dataset = write_dataset(
            dir.path(),
            "level",
            &[r#"["--", "X"]"#, r#"["--", "XX"]"#],
        );
        let config = test_config(dir.path(), dataset);

        // only the valid level reaches the gateway
        let gateway = ScriptedGateway::new(vec![Ok("WIN")]);
        let analyzer = BatchAnalyzer::new(&config, &gateway, &NullObserver);

        let report = analyzer.analyze().unwrap();
        assert_eq!(report.verdicts, vec![false, true]);
        assert_eq!(report.completed, 1);
    }
}
