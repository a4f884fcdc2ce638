//! Sanitizers for specification text embedded in generated sources

use once_cell::sync::Lazy;
use regex::Regex;

// Problematic Unicode (smart quotes, em-dash)
static UNICODE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\u{2018}\u{2019}\u{201C}\u{201D}\u{2014}]").expect("valid unicode regex")
});
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));

/// Flattens Markdown description text into a single line safe inside a doc comment
///
/// This function:
/// - Replaces smart quotes and em-dashes with ASCII equivalents
/// - Collapses whitespace and drops empty lines
/// - Breaks up comment terminators (`*/`)
///
/// # Examples
/// ```
/// use swagger2angular::generation::sanitizers::sanitize_doc;
///
/// assert_eq!(sanitize_doc("Find a pet\n\nby its id"), "Find a pet by its id");
/// assert_eq!(sanitize_doc("ends */ here"), "ends *\\/ here");
/// ```
pub fn sanitize_doc(input: &str) -> String {
    input
        .lines()
        .map(|line| {
            let line = UNICODE_RE.replace_all(line, |caps: &regex::Captures| match &caps[0] {
                "\u{2018}" | "\u{2019}" => "'",
                "\u{201C}" | "\u{201D}" => "\"",
                "\u{2014}" => "-",
                _ => "",
            });
            WHITESPACE_RE.replace_all(line.trim(), " ").replace("*/", "*\\/")
        })
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_doc() {
        let input = "This is a \u{201C}smart quote\u{201D} example";
        assert_eq!(sanitize_doc(input), "This is a \"smart quote\" example");

        let input = "This\u{2014}is an em-dash";
        assert_eq!(sanitize_doc(input), "This-is an em-dash");

        let input = "Line one\n\nLine two\n   \nLine three";
        assert_eq!(sanitize_doc(input), "Line one Line two Line three");

        let input = "tabs\tand   spaces";
        assert_eq!(sanitize_doc(input), "tabs and spaces");

        assert_eq!(sanitize_doc("/* nested */"), "/* nested *\\/");
        assert_eq!(sanitize_doc(""), "");
    }
}
