//! Attachment file path rules

use std::sync::LazyLock;

use regex::Regex;

/// Root under which default attachment paths are built
pub const DEFAULT_ATTACHMENT_ROOT: &str = "/attachments";

/// Whitespace characters, replaced by underscores
static WHITESPACE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s").unwrap());

/// Grouping punctuation, replaced by hyphens
static HYPHENATE_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[&+()]").unwrap());

/// Characters stripped from paths entirely
static STRIP_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"[=?!'"{}\[\]#<>%]"#).unwrap());

/// Clean a raw file path for storage.
///
/// Three passes, in order: whitespace becomes `_`, the punctuation
/// `& + ( )` becomes `-`, and characters with no place in an attachment
/// path are dropped.
pub fn sanitize_file_path(file_path: &str) -> String {
    let s = WHITESPACE_PATTERN.replace_all(file_path, "_");
    let s = HYPHENATE_PATTERN.replace_all(&s, "-");
    STRIP_PATTERN.replace_all(&s, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whitespace_becomes_underscore() {
        assert_eq!(sanitize_file_path("my file.txt"), "my_file.txt");
        assert_eq!(sanitize_file_path("a\tb\nc"), "a_b_c");
    }

    #[test]
    fn test_grouping_punctuation_becomes_hyphen() {
        assert_eq!(sanitize_file_path("q&a+(draft)"), "q-a--draft-");
    }

    #[test]
    fn test_illegal_characters_are_stripped() {
        assert_eq!(sanitize_file_path("what?!.txt"), "what.txt");
        assert_eq!(sanitize_file_path(r#"a='b'"c"{d}[e]#f<g>%h"#), "abcdefgh");
    }

    #[test]
    fn test_rules_apply_in_order() {
        assert_eq!(sanitize_file_path("a b&c=d"), "a_b-cd");
    }

    #[test]
    fn test_sanitization_is_idempotent() {
        let once = sanitize_file_path("Annual Report (2024)?.pdf");
        assert_eq!(sanitize_file_path(&once), once);
    }

    #[test]
    fn test_clean_paths_pass_through() {
        assert_eq!(
            sanitize_file_path("/attachments/report.pdf"),
            "/attachments/report.pdf"
        );
    }
}
