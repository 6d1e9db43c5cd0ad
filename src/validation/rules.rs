//! Risky-call patterns flagged in Python sources.
//!
//! Each rule is a regex plus a short label. Adding a rule means adding a row
//! to [`DANGEROUS_PATTERNS`]; the scanner itself never changes.

use regex::Regex;
use std::sync::LazyLock;

/// A textual pattern that suggests a risky call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DangerousPattern {
    /// Regex matched anywhere in the file content
    pub pattern: &'static str,
    /// Human-readable name of what the pattern catches
    pub label: &'static str,
}

pub const DANGEROUS_PATTERNS: &[DangerousPattern] = &[
    DangerousPattern {
        pattern: r"os\.system\(",
        label: "system shell invocation",
    },
    DangerousPattern {
        pattern: r"eval\(",
        label: "dynamic code evaluation",
    },
    DangerousPattern {
        pattern: r"exec\(",
        label: "dynamic code execution",
    },
    DangerousPattern {
        pattern: r"subprocess\.",
        label: "subprocess invocation",
    },
];

static COMPILED: LazyLock<Vec<(DangerousPattern, Regex)>> = LazyLock::new(|| {
    DANGEROUS_PATTERNS
        .iter()
        .map(|rule| {
            let re = Regex::new(rule.pattern).expect("built-in pattern must compile");
            (*rule, re)
        })
        .collect()
});

/// Return every rule that matches somewhere in `content`, in table order.
pub fn matching_patterns(content: &str) -> Vec<DangerousPattern> {
    COMPILED
        .iter()
        .filter(|(_, re)| re.is_match(content))
        .map(|(rule, _)| *rule)
        .collect()
}
