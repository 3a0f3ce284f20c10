//! External simulator boundary.
//!
//! The simulator is an opaque external program: it consumes a map file path and
//! reports the playthrough on standard output. Everything behind this seam —
//! build steps, process execution, exit codes — is the gateway's problem; the
//! evaluator only ever sees captured output text or an explicit failure.

pub mod process;

use std::path::{Path, PathBuf};

pub use process::JavaGateway;

/// Boundary to the external game-playing agent.
///
/// Implementations own any build step and the process invocation. `invoke`
/// blocks until the agent exits and returns the complete captured stdout, or a
/// [`GatewayError`] when the attempt could not run at all. A gateway error is
/// distinct from a lost playthrough: the latter arrives as parseable text.
pub trait SimulatorGateway {
    /// Run the agent against the serialized map at `map_path`
    fn invoke(&self, map_path: &Path) -> GatewayResult<String>;
}

/// Result type for gateway operations
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Error types for gateway operations
#[derive(Debug)]
pub enum GatewayError {
    /// Simulator root directory does not exist
    MissingRoot(PathBuf),

    /// Build step exited non-zero (captured stderr)
    Compile(String),

    /// Simulator run exited non-zero (captured stderr)
    Run(String),

    /// Process could not be spawned or its output read
    Io(std::io::Error),
}

impl std::fmt::Display for GatewayError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GatewayError::MissingRoot(path) => {
                write!(f, "Simulator root not found: {}", path.display())
            }
            GatewayError::Compile(stderr) => write!(f, "Compilation failed: {}", stderr),
            GatewayError::Run(stderr) => write!(f, "Simulator run failed: {}", stderr),
            GatewayError::Io(err) => write!(f, "Process error: {}", err),
        }
    }
}

impl std::error::Error for GatewayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GatewayError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for GatewayError {
    fn from(err: std::io::Error) -> Self {
        GatewayError::Io(err)
    }
}
