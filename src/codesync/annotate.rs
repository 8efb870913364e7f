//! Upload transform: comments out the body of every sync region so the
//! uploaded copy carries machine-specific lines without other machines
//! applying them by default.
//!
//! Lines already starting with `//` (after indentation) are left alone, which
//! makes the transform idempotent. Marker lines are never modified.

use crate::markers::{check_marker, is_commented, split_lines, Marker, RegionIssue, COMMENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    Inside,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Annotated {
    /// One entry per input line.
    pub lines: Vec<String>,
    pub issues: Vec<RegionIssue>,
}

pub fn annotate(content: &str) -> Annotated {
    let mut result = Annotated::default();
    let mut state = State::Outside;

    for (idx, line) in split_lines(content).enumerate() {
        let marker = Marker::detect(line);
        check_marker(marker, state == State::Inside, idx + 1, &mut result.issues);

        let emitted = if state == State::Inside && !marker.end && !is_commented(line) {
            comment_out(line)
        } else {
            line.to_string()
        };
        result.lines.push(emitted);

        if marker.begin {
            state = State::Inside;
        }
        if marker.end {
            state = State::Outside;
        }
    }

    result
}

/// Inserts the comment marker between the indentation and the content.
fn comment_out(line: &str) -> String {
    let body = line.trim_start();
    let indent = &line[..line.len() - body.len()];
    format!("{}{}{}", indent, COMMENT, body)
}
