//! Java-based simulator gateway.
//!
//! Compiles and runs the Mario AI framework's `PlayLevel` entry point against a
//! serialized map file. The framework checkout is plain Java sources, so each
//! invocation compiles first (a no-op when classes are current) and then runs
//! the agent with the map path as the single positional argument.

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::gateway::{GatewayError, GatewayResult, SimulatorGateway};

/// Java source directory under the simulator root
const SRC_DIR: &str = "src";

/// Entry-point class of the simulator
const MAIN_CLASS: &str = "PlayLevel";

/// Gateway that compiles and runs the Java simulator via `javac`/`java`.
#[derive(Debug, Clone)]
pub struct JavaGateway {
    /// Root directory of the simulator framework checkout
    root: PathBuf,
}

impl JavaGateway {
    /// Create a gateway rooted at the given framework checkout
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn compile(&self, src_dir: &Path) -> GatewayResult<()> {
        let output = Command::new("javac")
            .arg("-cp")
            .arg(src_dir)
            .arg(src_dir.join(format!("{}.java", MAIN_CLASS)))
            .current_dir(&self.root)
            .output()?;

        if !output.status.success() {
            return Err(GatewayError::Compile(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }
        Ok(())
    }

    fn run(&self, src_dir: &Path, map_path: &Path) -> GatewayResult<String> {
        let output = Command::new("java")
            .arg("-cp")
            .arg(src_dir)
            .arg(MAIN_CLASS)
            .arg(map_path)
            .current_dir(&self.root)
            .output()?;

        if !output.status.success() {
            return Err(GatewayError::Run(
                String::from_utf8_lossy(&output.stderr).into_owned(),
            ));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl SimulatorGateway for JavaGateway {
    fn invoke(&self, map_path: &Path) -> GatewayResult<String> {
        if !self.root.exists() {
            return Err(GatewayError::MissingRoot(self.root.clone()));
        }

        let src_dir = self.root.join(SRC_DIR);
        self.compile(&src_dir)?;
        self.run(&src_dir, map_path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_root_is_explicit() {
        let gateway = JavaGateway::new("/nonexistent/simulator/root");
        let err = gateway.invoke(Path::new("map.txt")).unwrap_err();
        assert!(matches!(err, GatewayError::MissingRoot(_)));
    }
}
