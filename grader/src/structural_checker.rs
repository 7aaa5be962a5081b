//! # Structural Checker
//!
//! Pattern-based presence/absence checks that compare a submission against the reference
//! solution. Each [`StructuralRule`] inspects comment-stripped text and, when violated,
//! contributes one issue and a fixed penalty. Rules are independent; the only thing their
//! order affects is the order of the reported issues.
//!
//! Penalties are summed without a cap. Capping happens when the final score is composed.

use crate::types::StructuralReport;
use crate::utilities::code_normalization::normalize;
use once_cell::sync::Lazy;
use regex::Regex;

pub const ENTRY_POINT_PENALTY: u32 = 25;
pub const IO_HEADER_PENALTY: u32 = 15;
pub const BRACE_BALANCE_PENALTY: u32 = 20;
pub const SWITCH_PARITY_PENALTY: u32 = 15;
pub const MODULO_PARITY_PENALTY: u32 = 10;
pub const UNSAFE_INPUT_PENALTY: u32 = 10;

static MAIN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bmain\s*\(").expect("valid regex"));

/// An include that must be present when the reference uses calls it declares.
struct IoHeaderRequirement {
    header: &'static str,
    purpose: &'static str,
    calls: Regex,
    includes: Regex,
}

/// `<bits/stdc++.h>` pulls in both families.
static IO_HEADER_REQUIREMENTS: Lazy<[IoHeaderRequirement; 2]> = Lazy::new(|| {
    [
        IoHeaderRequirement {
            header: "<stdio.h>",
            purpose: "standard I/O functions",
            calls: Regex::new(r"\b(?:printf|scanf|puts|gets|fgets|putchar|getchar)\s*\(")
                .expect("valid regex"),
            includes: Regex::new(
                r#"#\s*include\s*[<"]\s*(?:stdio\.h|cstdio|bits/stdc\+\+\.h)\s*[>"]"#,
            )
            .expect("valid regex"),
        },
        IoHeaderRequirement {
            header: "<iostream>",
            purpose: "stream I/O",
            calls: Regex::new(r"\b(?:cin|cout|cerr)\b").expect("valid regex"),
            includes: Regex::new(r#"#\s*include\s*[<"]\s*(?:iostream|bits/stdc\+\+\.h)\s*[>"]"#)
                .expect("valid regex"),
        },
    ]
});

static SWITCH_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bswitch\s*\(").expect("valid regex"));

/// `x % 2 == 0`, `n % divisor != 0`, ...
static MODULO_CHECK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"%\s*[A-Za-z0-9_]+\s*[=!]=").expect("valid regex"));

static GETS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bgets\s*\(").expect("valid regex"));

static FGETS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bfgets\s*\(").expect("valid regex"));

/// One structural check. `check` receives normalized submission and reference text and
/// returns the issue to report, if any.
pub struct StructuralRule {
    pub name: &'static str,
    pub penalty: u32,
    check: fn(&str, &str) -> Option<String>,
}

impl StructuralRule {
    pub fn evaluate(&self, submission: &str, reference: &str) -> Option<String> {
        (self.check)(submission, reference)
    }
}

/// All rules, in reporting order.
pub static RULES: [StructuralRule; 6] = [
    StructuralRule {
        name: "entry_point",
        penalty: ENTRY_POINT_PENALTY,
        check: check_entry_point,
    },
    StructuralRule {
        name: "io_header",
        penalty: IO_HEADER_PENALTY,
        check: check_io_header,
    },
    StructuralRule {
        name: "brace_balance",
        penalty: BRACE_BALANCE_PENALTY,
        check: check_brace_balance,
    },
    StructuralRule {
        name: "switch_parity",
        penalty: SWITCH_PARITY_PENALTY,
        check: check_switch_parity,
    },
    StructuralRule {
        name: "modulo_parity",
        penalty: MODULO_PARITY_PENALTY,
        check: check_modulo_parity,
    },
    StructuralRule {
        name: "unsafe_input",
        penalty: UNSAFE_INPUT_PENALTY,
        check: check_unsafe_input,
    },
];

fn check_entry_point(submission: &str, _reference: &str) -> Option<String> {
    (!MAIN_RE.is_match(submission))
        .then(|| "Missing main() function: the program has no entry point.".to_string())
}

fn check_io_header(submission: &str, reference: &str) -> Option<String> {
    let missing: Vec<&IoHeaderRequirement> = IO_HEADER_REQUIREMENTS
        .iter()
        .filter(|req| req.calls.is_match(reference) && !req.includes.is_match(submission))
        .collect();
    if missing.is_empty() {
        return None;
    }

    let headers: Vec<&str> = missing.iter().map(|req| req.header).collect();
    let purposes: Vec<&str> = missing.iter().map(|req| req.purpose).collect();
    Some(format!(
        "Missing #include {}: the reference solution relies on {}.",
        headers.join(", "),
        purposes.join(" and ")
    ))
}

fn check_brace_balance(submission: &str, _reference: &str) -> Option<String> {
    let open = submission.matches('{').count();
    let close = submission.matches('}').count();
    (open != close).then(|| {
        format!("Unbalanced braces: found {open} opening '{{' but {close} closing '}}'.")
    })
}

fn check_switch_parity(submission: &str, reference: &str) -> Option<String> {
    (SWITCH_RE.is_match(reference) && !SWITCH_RE.is_match(submission)).then(|| {
        "The reference solution uses a switch statement for multi-way branching; yours does not."
            .to_string()
    })
}

fn check_modulo_parity(submission: &str, reference: &str) -> Option<String> {
    (MODULO_CHECK_RE.is_match(reference) && !MODULO_CHECK_RE.is_match(submission)).then(|| {
        "The reference solution uses a modulo (%) check that is missing from your solution."
            .to_string()
    })
}

fn check_unsafe_input(submission: &str, reference: &str) -> Option<String> {
    (FGETS_RE.is_match(reference) && GETS_RE.is_match(submission))
        .then(|| "Uses unsafe gets(); read input with fgets() instead.".to_string())
}

/// Runs every rule against the submission and collects issues and penalty points.
pub fn check_structure(submission: &str, reference: &str) -> StructuralReport {
    let submission = normalize(submission);
    let reference = normalize(reference);

    let mut report = StructuralReport::default();
    for rule in RULES.iter() {
        if let Some(issue) = rule.evaluate(&submission, &reference) {
            tracing::debug!(rule = rule.name, penalty = rule.penalty, "structural rule violated");
            report.issues.push(issue);
            report.penalty += rule.penalty;
        }
    }
    report
}
