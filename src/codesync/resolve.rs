//! Download transform: uncomments the body of sync regions whose predicate
//! matches this machine. Regions meant for other machines stay commented.
//!
//! Only commented lines take part: anything not starting with `//` is copied
//! through, and a commented line outside a region is an ordinary comment.

use crate::machine::MachineInfo;
use crate::markers::{check_marker, is_commented, split_lines, Marker, Predicate, RegionIssue, COMMENT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Outside,
    /// `apply` is decided once, on the begin line.
    Inside { apply: bool },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Resolved {
    pub text: String,
    pub issues: Vec<RegionIssue>,
}

pub fn resolve(content: &str, machine: &MachineInfo) -> Resolved {
    let mut issues = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    let mut state = State::Outside;

    for (idx, line) in split_lines(content).enumerate() {
        if !is_commented(line) {
            lines.push(line.to_string());
            continue;
        }

        let marker = Marker::detect(line);
        let in_region = matches!(state, State::Inside { .. });
        if marker.is_none() && !in_region {
            lines.push(line.to_string());
            continue;
        }

        check_marker(marker, in_region, idx + 1, &mut issues);

        if marker.begin {
            state = State::Inside {
                apply: Predicate::parse(line).matches(machine),
            };
        }
        if marker.end {
            state = State::Outside;
            lines.push(line.to_string());
            continue;
        }
        if marker.begin {
            lines.push(line.to_string());
            continue;
        }

        match state {
            State::Inside { apply: true } => lines.push(line.replacen(COMMENT, "", 1)),
            _ => lines.push(line.to_string()),
        }
    }

    Resolved {
        text: lines.join("\n"),
        issues,
    }
}
