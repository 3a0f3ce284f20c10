//! Level Harness - batch evaluation of generated platformer levels.
//!
//! This crate provides:
//! - Tile vocabulary translation from generator output to the simulator format
//! - Deterministic spawn point placement and map file serialization
//! - A gateway seam to the external game-playing agent (Java simulator)
//! - Tolerant parsing of the agent's playthrough trace into a path and outcome
//! - Per-level retry orchestration and batch completion-rate aggregation
//!
//! # Example
//!
//! ```rust,no_run
//! use level_harness::batch::BatchAnalyzer;
//! use level_harness::config::Config;
//! use level_harness::events::LogObserver;
//! use level_harness::gateway::JavaGateway;
//!
//! let config = Config::from_env();
//! let gateway = JavaGateway::new(&config.simulator.root);
//! let analyzer = BatchAnalyzer::new(&config, &gateway, &LogObserver);
//! let report = analyzer.analyze().unwrap();
//! println!("{:.2}% completed", report.completion_percentage());
//! ```

pub mod batch;
pub mod config;
pub mod evaluator;
pub mod events;
pub mod gateway;
pub mod level;
pub mod trace;

// Re-export batch types
pub use batch::{BatchAnalyzer, BatchError, BatchReport, BatchResult};

// Re-export evaluator types
pub use evaluator::{AttemptResult, CompletionEvaluator, LevelError, LevelResult, LevelVerdict};

// Re-export observability types
pub use events::{EvalEvent, EvalObserver, LogObserver, NullObserver};

// Re-export the gateway seam
pub use gateway::{GatewayError, GatewayResult, JavaGateway, SimulatorGateway};

// Re-export level transforms
pub use level::{
    find_spawn, translate, write_map_file, Grid, GridError, SpawnPoint, OPEN_SPACE, SPAWN_MARKER,
};

// Re-export trace parsing
pub use trace::{parse_trace, Outcome, Trace, TracePoint};
