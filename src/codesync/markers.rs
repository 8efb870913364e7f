//! # Sync Region Markers
//!
//! A configuration file may contain machine-specific blocks:
//!
//! ```text
//! // @beginSync hostname:work-laptop os:linux
//! "editor.fontSize": 15,
//! // @endSync
//! ```
//!
//! Everything between a `@beginSync` line and the next `@endSync` line is a
//! region. On upload the region body is commented out with `//`, on download
//! it is uncommented only when the predicate on the begin line matches the
//! current machine. Markers are matched by substring, case-sensitive.
//!
//! Regions do not nest, and a single line may not carry both markers. Both
//! problems are reported as [`RegionIssue`]s while the transform keeps going.

use crate::machine::MachineInfo;
use std::fmt;

pub const BEGIN_TOKEN: &str = "@beginSync";
pub const END_TOKEN: &str = "@endSync";
pub const COMMENT: &str = "//";
pub const HOSTNAME_KEY: &str = "hostname:";
pub const OS_KEY: &str = "os:";

/// Which markers a line carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Marker {
    pub begin: bool,
    pub end: bool,
}

impl Marker {
    pub fn detect(line: &str) -> Self {
        Self {
            begin: line.contains(BEGIN_TOKEN),
            end: line.contains(END_TOKEN),
        }
    }

    pub fn is_none(&self) -> bool {
        !self.begin && !self.end
    }
}

pub fn is_commented(line: &str) -> bool {
    line.trim_start().starts_with(COMMENT)
}

/// Splits file content into lines, accepting both `\n` and `\r\n` endings.
pub(crate) fn split_lines(content: &str) -> impl Iterator<Item = &str> {
    content
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
}

/// Returns the value following `key` up to the next space, if non-empty.
pub fn extract_token<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let start = line.find(key)? + key.len();
    let rest = &line[start..];
    let value = rest.split(' ').next().unwrap_or("");
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Conditions attached to a `@beginSync` line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    pub hostname: Option<String>,
    pub os: Option<String>,
}

impl Predicate {
    pub fn parse(line: &str) -> Self {
        Self {
            hostname: extract_token(line, HOSTNAME_KEY).map(str::to_string),
            os: extract_token(line, OS_KEY).map(str::to_string),
        }
    }

    /// Absent conditions always hold; present ones must all match.
    pub fn matches(&self, machine: &MachineInfo) -> bool {
        let host_ok = self
            .hostname
            .as_deref()
            .map_or(true, |h| h == machine.hostname);
        let os_ok = self.os.as_deref().map_or(true, |os| os == machine.os.as_str());
        host_ok && os_ok
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueKind {
    /// Begin and end markers on the same line.
    Format,
    /// A begin marker inside an open region.
    Nesting,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegionIssue {
    /// 1-based line number.
    pub line: usize,
    pub kind: IssueKind,
}

impl fmt::Display for RegionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            IssueKind::Format => write!(
                f,
                "line {}: {} and {} cannot be on the same line",
                self.line, BEGIN_TOKEN, END_TOKEN
            ),
            IssueKind::Nesting => write!(
                f,
                "line {}: {} nesting is not supported",
                self.line, BEGIN_TOKEN
            ),
        }
    }
}

/// Shared validation for both transforms.
pub(crate) fn check_marker(
    marker: Marker,
    in_region: bool,
    line: usize,
    issues: &mut Vec<RegionIssue>,
) {
    if marker.begin && marker.end {
        issues.push(RegionIssue {
            line,
            kind: IssueKind::Format,
        });
    }
    if marker.begin && in_region {
        issues.push(RegionIssue {
            line,
            kind: IssueKind::Nesting,
        });
    }
}
