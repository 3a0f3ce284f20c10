use clap::Parser;
use std::error::Error;
use std::path::PathBuf;

use level_harness::batch::BatchAnalyzer;
use level_harness::config::{Config, DatasetSettings, EvalSettings, SimulatorSettings};
use level_harness::events::{EvalEvent, EvalObserver, NullObserver};
use level_harness::gateway::JavaGateway;

/// Level Harness - batch evaluation of generated platformer levels
#[derive(Parser, Debug)]
#[command(
    name = "level-harness",
    about = "Evaluate generated platformer levels against an external game-playing agent",
    after_help = "ENVIRONMENT VARIABLES:\n\
        LEVEL_HARNESS_DATASET       CSV dataset path\n\
        LEVEL_HARNESS_SIM_ROOT      Simulator framework root directory\n\
        LEVEL_HARNESS_MAP_DIR       Directory for serialized map files\n\
        LEVEL_HARNESS_MAP_NAME      Serialized map file name\n\
        LEVEL_HARNESS_LEVEL_COLUMN  Dataset column holding level grids\n\
        LEVEL_HARNESS_MAX_ATTEMPTS  Attempts per level before giving up"
)]
struct Args {
    /// Path to the CSV dataset of generated levels
    #[arg(short, long, env = "LEVEL_HARNESS_DATASET", default_value = "./generated_levels.csv")]
    dataset: PathBuf,

    /// Root directory of the simulator framework checkout
    #[arg(long, env = "LEVEL_HARNESS_SIM_ROOT", default_value = "./Mario-AI-Framework")]
    sim_root: PathBuf,

    /// Directory for serialized map files (default: <sim-root>/levels/test)
    #[arg(long, env = "LEVEL_HARNESS_MAP_DIR")]
    map_dir: Option<PathBuf>,

    /// File name of the serialized map
    #[arg(long, env = "LEVEL_HARNESS_MAP_NAME", default_value = "map_temp.txt")]
    map_name: String,

    /// Dataset column holding level grids
    #[arg(long, env = "LEVEL_HARNESS_LEVEL_COLUMN", default_value = "level")]
    level_column: String,

    /// Attempts per level before giving up (completion stops early)
    #[arg(short, long, env = "LEVEL_HARNESS_MAX_ATTEMPTS", default_value = "1")]
    attempts: u32,

    /// Output the report as JSON
    #[arg(long)]
    json: bool,

    /// List per-level verdicts in the summary
    #[arg(long)]
    verdicts: bool,

    /// Suppress per-level progress output
    #[arg(short, long)]
    quiet: bool,
}

/// Observer printing per-level progress to stderr
struct ConsoleObserver;

impl EvalObserver for ConsoleObserver {
    fn on_event(&self, event: &EvalEvent) {
        match event {
            EvalEvent::LevelFinished {
                index,
                total,
                completed,
            } => {
                let status = if *completed { "completed" } else { "not completed" };
                eprintln!("Level {}/{} {}", index, total, status);
            }
            EvalEvent::LevelSkipped { index, reason } => {
                eprintln!("Level {} skipped: {}", index, reason);
            }
            EvalEvent::SpawnMissing => {
                eprintln!("Warning: no valid spawn position found");
            }
            EvalEvent::AttemptNotRun { attempt, reason } => {
                eprintln!("Attempt {} could not run: {}", attempt, reason);
            }
            _ => {}
        }
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let map_dir = args
        .map_dir
        .unwrap_or_else(|| args.sim_root.join("levels").join("test"));

    let config = Config {
        simulator: SimulatorSettings {
            root: args.sim_root,
            map_dir,
            map_name: args.map_name,
        },
        dataset: DatasetSettings {
            path: args.dataset,
            level_column: args.level_column,
        },
        eval: EvalSettings {
            max_attempts: args.attempts.max(1),
        },
    };

    let gateway = JavaGateway::new(&config.simulator.root);
    let console = ConsoleObserver;
    let null = NullObserver;
    let observer: &dyn EvalObserver = if args.quiet { &null } else { &console };

    let analyzer = BatchAnalyzer::new(&config, &gateway, observer);
    let report = analyzer.analyze()?;

    if args.json {
        let mut value = serde_json::to_value(&report)?;
        if let Some(obj) = value.as_object_mut() {
            obj.insert(
                "completion_percentage".to_string(),
                serde_json::json!(report.completion_percentage()),
            );
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        println!(
            "{}/{} levels completed ({:.2}%)",
            report.completed,
            report.total,
            report.completion_percentage()
        );
        if report.unknown > 0 {
            println!(
                "{} level(s) produced no win/lose marker",
                report.unknown
            );
        }
        if args.verdicts {
            for (index, completed) in report.verdicts.iter().enumerate() {
                let status = if *completed { "completed" } else { "not completed" };
                println!("Level {}: {}", index + 1, status);
            }
        }
    }

    Ok(())
}
