//! Playthrough trace parsing.
//!
//! The simulator reports a playthrough as free-form text: somewhere in it a
//! marker line opens a path section of `[x, y]` coordinate lines (ended by a
//! blank line), and somewhere in it a win or lose keyword states the result.
//! The producer is an external process we do not fully control, so parsing is
//! deliberately tolerant: malformed coordinate lines are skipped, and text with
//! neither keyword classifies as [`Outcome::Unknown`] rather than an error.

use serde::{Deserialize, Serialize};

/// Line opening the path section of the simulator output
pub const PATH_MARKER: &str = "Mario Path:";

/// Substring marking a completed level (checked before the failure marker)
pub const COMPLETION_MARKER: &str = "WIN";

/// Substring marking a failed level
pub const FAILURE_MARKER: &str = "LOSE";

/// One recorded position sample from the agent's path, in play order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TracePoint {
    pub x: i32,
    pub y: i32,
}

/// Terminal classification of one attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The completion marker was present
    Completed,
    /// The failure marker was present (and the completion marker was not)
    Failed,
    /// Neither marker was found
    Unknown,
}

/// Parsed playthrough: ordered path plus terminal outcome
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trace {
    /// Positions visited, in temporal order
    pub path: Vec<TracePoint>,

    /// Terminal classification
    pub outcome: Outcome,
}

/// Parse raw simulator output into a [`Trace`]. Never fails.
pub fn parse_trace(raw: &str) -> Trace {
    Trace {
        path: parse_path(raw),
        outcome: parse_outcome(raw),
    }
}

/// Collect the path section: lines after the marker, until a blank line.
fn parse_path(raw: &str) -> Vec<TracePoint> {
    let mut path = Vec::new();
    let mut collecting = false;

    for line in raw.lines() {
        let trimmed = line.trim();
        if !collecting {
            if trimmed == PATH_MARKER {
                collecting = true;
            }
            continue;
        }
        if trimmed.is_empty() {
            break;
        }
        if let Some(point) = parse_point(trimmed) {
            path.push(point);
        }
    }

    path
}

/// Parse a `[x, y]` line; anything that is not exactly two integers is skipped.
fn parse_point(line: &str) -> Option<TracePoint> {
    let inner = line
        .trim_start_matches('[')
        .trim_end_matches(']');
    let parts: Vec<&str> = inner.split(", ").collect();
    if parts.len() != 2 {
        return None;
    }

    let x = parts[0].trim().parse().ok()?;
    let y = parts[1].trim().parse().ok()?;
    Some(TracePoint { x, y })
}

/// Classify the whole output by marker substring, completion first.
fn parse_outcome(raw: &str) -> Outcome {
    if raw.contains(COMPLETION_MARKER) {
        Outcome::Completed
    } else if raw.contains(FAILURE_MARKER) {
        Outcome::Failed
    } else {
        Outcome::Unknown
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_completed_run() {
        let raw = "booting agent\nMario Path:\n[3, 4]\n[5, 4]\n\nResult: WIN\n";
        let trace = parse_trace(raw);
        assert_eq!(
            trace.path,
            vec![TracePoint { x: 3, y: 4 }, TracePoint { x: 5, y: 4 }]
        );
        assert_eq!(trace.outcome, Outcome::Completed);
    }

    #[test]
    fn test_parse_failed_run() {
        let trace = parse_trace("Mario Path:\n[1, 2]\n\nResult: LOSE\n");
        assert_eq!(trace.outcome, Outcome::Failed);
        assert_eq!(trace.path, vec![TracePoint { x: 1, y: 2 }]);
    }

    #[test]
    fn test_completion_takes_precedence_over_failure() {
        let trace = parse_trace("LOSE streak ended: WIN");
        assert_eq!(trace.outcome, Outcome::Completed);
    }

    #[test]
    fn test_no_marker_is_unknown() {
        let trace = parse_trace("agent crashed mid-flight\n");
        assert_eq!(trace.outcome, Outcome::Unknown);
        assert!(trace.path.is_empty());
    }

    #[test]
    fn test_malformed_lines_are_skipped() {
        let raw = "Mario Path:\n[3]\n[a, b]\n[7, 8]\n\nWIN\n";
        let trace = parse_trace(raw);
        assert_eq!(trace.path, vec![TracePoint { x: 7, y: 8 }]);
    }

    #[test]
    fn test_blank_line_ends_path_section() {
        let raw = "Mario Path:\n[1, 1]\n\n[9, 9]\nWIN\n";
        let trace = parse_trace(raw);
        assert_eq!(trace.path, vec![TracePoint { x: 1, y: 1 }]);
    }

    #[test]
    fn test_no_path_section() {
        let trace = parse_trace("WIN\n");
        assert!(trace.path.is_empty());
        assert_eq!(trace.outcome, Outcome::Completed);
    }

    #[test]
    fn test_negative_coordinates() {
        let trace = parse_trace("Mario Path:\n[-2, 10]\n\nLOSE\n");
        assert_eq!(trace.path, vec![TracePoint { x: -2, y: 10 }]);
    }
}
