//! Name sanitizing for anything that becomes a path segment.
//!
//! Every name that arrives from outside (book titles, chapter names, path
//! segments) passes through [`safe_name`] before touching storage. The
//! allow-list is deliberately tiny: alphanumerics, space, underscore and
//! hyphen. Separators, dots and control characters never survive, so a
//! sanitized name can never escape its parent directory.

/// Keeps alphanumerics, spaces, underscores and hyphens, then trims trailing
/// whitespace. An empty result means "name required" to callers.
pub fn safe_name(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
        .collect::<String>()
        .trim_end()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_allowed_characters() {
        assert_eq!(safe_name("Chapter_1 - Intro"), "Chapter_1 - Intro");
    }

    #[test]
    fn strips_separators_and_punctuation() {
        assert_eq!(safe_name("../etc/passwd"), "etcpasswd");
        assert_eq!(safe_name("What? Now!"), "What Now");
    }

    #[test]
    fn trims_only_trailing_whitespace() {
        assert_eq!(safe_name("  Leading kept   "), "  Leading kept");
    }

    #[test]
    fn empty_and_all_invalid_yield_empty() {
        assert_eq!(safe_name(""), "");
        assert_eq!(safe_name("/.\\*"), "");
    }

    #[test]
    fn unicode_letters_survive() {
        assert_eq!(safe_name("Kapitel Über"), "Kapitel Über");
    }
}
