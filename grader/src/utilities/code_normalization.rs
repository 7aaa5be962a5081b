//! Source-code normalization and lexical scanning.
//!
//! Both functions are total: any input, including syntactically broken code, produces a
//! result. Nothing here understands the grammar of the language; the scan only recognizes
//! identifier, integer, operator and punctuation shapes.

use once_cell::sync::Lazy;
use regex::Regex;

/// Block comments (an unterminated one runs to end of input) or line comments.
/// A single alternation keeps `//` inside `/* */` and `/*` inside `//` from confusing the scan.
static COMMENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)/\*.*?(?:\*/|\z)|//[^\n]*").expect("valid comment regex"));

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Token shapes in priority order.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z_][A-Za-z0-9_]*|[0-9]+|[+\-*/%=<>!&|]+|[(){}\[\];,]")
        .expect("valid token regex")
});

/// Strips comments, collapses whitespace runs to a single space and trims both ends.
pub fn normalize(code: &str) -> String {
    let without_comments = COMMENT_RE.replace_all(code, " ");
    WHITESPACE_RE
        .replace_all(&without_comments, " ")
        .trim()
        .to_string()
}

/// Splits normalized source into identifier, integer, operator and punctuation tokens.
///
/// Characters that fit none of those shapes (quotes, `#`, `.`, `:` ...) are skipped.
pub fn tokenize(code: &str) -> Vec<String> {
    let normalized = normalize(code);
    TOKEN_RE
        .find_iter(&normalized)
        .map(|m| m.as_str().to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_line_and_block_comments() {
        let code = "int x = 1; // set x\n/* multi\nline */int y = 2;";
        assert_eq!(normalize(code), "int x = 1; int y = 2;");
    }

    #[test]
    fn comment_markers_inside_other_comments() {
        assert_eq!(normalize("a /* // still block */ b"), "a b");
        assert_eq!(normalize("a // has /* inside\nb"), "a b");
    }

    #[test]
    fn unterminated_block_comment_runs_to_end() {
        assert_eq!(normalize("int main() { /* oops"), "int main() {");
    }

    #[test]
    fn collapses_whitespace_and_trims() {
        assert_eq!(normalize("\n\t int   main ( )\r\n{ }  "), "int main ( ) { }");
        assert_eq!(normalize("   \n\t"), "");
    }

    #[test]
    fn tokenizes_by_shape_priority() {
        let tokens = tokenize("if (n % 2 == 0) { count += 1; }");
        assert_eq!(
            tokens,
            vec!["if", "(", "n", "%", "2", "==", "0", ")", "{", "count", "+=", "1", ";", "}"]
        );
    }

    #[test]
    fn operator_clusters_stay_together() {
        assert_eq!(tokenize("a&&!b||c>=d"), vec!["a", "&&!", "b", "||", "c", ">=", "d"]);
    }

    #[test]
    fn unrecognized_characters_are_skipped() {
        let tokens = tokenize("#include <stdio.h>\nprintf(\"%d\\n\", x);");
        assert_eq!(
            tokens,
            vec!["include", "<", "stdio", "h", ">", "printf", "(", "%", "d", "n", ",", "x", ")", ";"]
        );
    }

    #[test]
    fn digits_then_letters_split() {
        assert_eq!(tokenize("123abc _x9"), vec!["123", "abc", "_x9"]);
    }

    #[test]
    fn empty_and_garbage_input_is_total() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("@@@ ### \"\" ...").is_empty());
    }
}
