//! # Feedback Wording
//!
//! Summary sentences and fixed issue texts shown to students. Scored paths pick a sentence
//! by [`ScoreBand`]; the wording differs depending on whether the output was verified.

use crate::scorer::ScoreBand;

pub const EMPTY_SUBMISSION_ISSUE: &str =
    "Submission is empty. Write your solution before requesting a grade.";
pub const EMPTY_SUBMISSION_SUMMARY: &str = "No code submitted.";

pub const UNMATCHED_ISSUE: &str = "Problem not found in the problem bank. \
     Use the exact problem text from the bank so your code can be compared with the reference solution.";
pub const UNMATCHED_SUMMARY: &str = "Problem not found in the problem bank.";

pub const EXECUTION_FAILED_ISSUE: &str = "Your code failed to compile or run:";
pub const EXECUTION_FAILED_SUMMARY: &str = "Your code failed to compile or run.";
pub const NO_DIAGNOSTIC: &str = "(no diagnostic output)";

pub const OUTPUT_MISMATCH_ISSUE: &str = "Output does not match the expected output.";
pub const OUTPUT_MISMATCH_SUMMARY: &str =
    "Your program's output does not match the expected output.";

pub const INTERNAL_FAULT_SUMMARY: &str = "Grading could not be completed due to an internal error.";

/// Summary for a submission scored without running it.
pub fn similarity_summary(score: u32) -> String {
    match ScoreBand::of(score) {
        ScoreBand::Close => "Your solution closely matches the reference solution.",
        ScoreBand::Partial => "Your solution has some differences from the reference solution.",
        ScoreBand::Distant => {
            "Your solution has significant differences from the reference solution."
        }
    }
    .to_string()
}

/// Summary for a submission whose output was verified before scoring.
pub fn correct_output_summary(score: u32) -> String {
    match ScoreBand::of(score) {
        ScoreBand::Close => "Correct output! Your code also closely matches the reference approach.",
        ScoreBand::Partial => {
            "Correct output! Your approach has some differences from the reference solution."
        }
        ScoreBand::Distant => {
            "Correct output! Your approach differs significantly from the reference solution."
        }
    }
    .to_string()
}

/// First `max_chars` characters of `text`, with `...` appended when something was cut.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let mut chars = text.chars();
    let head: String = chars.by_ref().take(max_chars).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// First `max_lines` lines of `text`, with `...` on its own line when lines were dropped.
pub fn head_lines(text: &str, max_lines: usize) -> String {
    let trimmed = text.trim();
    let mut lines = trimmed.lines();
    let head: Vec<&str> = lines.by_ref().take(max_lines).collect();
    let mut out = head.join("\n");
    if lines.next().is_some() {
        out.push_str("\n...");
    }
    out
}
