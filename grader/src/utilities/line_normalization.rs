use once_cell::sync::Lazy;
use regex::Regex;

/// Any whitespace run that does not contain a line break.
static HORIZONTAL_WS_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\S\n]+").expect("valid horizontal whitespace regex"));

/// Rewrites `\r\n` and lone `\r` as `\n`.
pub fn unify_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// Canonical form of program output used for comparison.
///
/// Line endings become `\n`, horizontal whitespace runs inside a line become one space,
/// trailing whitespace is dropped from every line and the whole string is trimmed.
/// Applying it twice gives the same result as applying it once.
pub fn normalize_output(s: &str) -> String {
    let unified = unify_line_endings(s);
    let lines: Vec<String> = unified
        .split('\n')
        .map(|line| {
            HORIZONTAL_WS_RE
                .replace_all(line, " ")
                .trim_end()
                .to_string()
        })
        .collect();
    lines.join("\n").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_trailing_space_are_ignored() {
        assert_eq!(normalize_output("7\r\n "), "7");
        assert_eq!(normalize_output("7\n"), "7");
    }

    #[test]
    fn lone_carriage_returns_become_newlines() {
        assert_eq!(normalize_output("a\rb"), "a\nb");
    }

    #[test]
    fn collapses_runs_inside_lines_only() {
        assert_eq!(normalize_output("Sum:\t\t 5  \nNext   line"), "Sum: 5\nNext line");
    }

    #[test]
    fn interior_blank_lines_are_kept() {
        assert_eq!(normalize_output("a\n\n  \nb\n\n"), "a\n\n\nb");
    }

    #[test]
    fn idempotent_on_awkward_inputs() {
        for s in [
            "",
            "   ",
            "\r\n\r\n x \t y \r\n",
            " lead\n  indented  \n\n",
            "tab\tsep\u{00a0}nbsp",
        ] {
            let once = normalize_output(s);
            assert_eq!(normalize_output(&once), once, "input: {s:?}");
        }
    }
}
